use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use fleet_core::FleetError;

use crate::store::FleetStore;

/// Stored user document. The credential is `salt$sha256(salt || password)`;
/// authentication hardening beyond a salted hash is out of scope here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UserRecord {
    pub(crate) username: String,
    pub(crate) password_hash: String,
    pub(crate) full_name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) phone: Option<String>,
}

/// Profile view without credential material.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn hash_password(password: &str) -> String {
    let salt: [u8; 16] = rand::rng().random();
    let salt = hex::encode(salt);
    let hash = digest(&salt, password);
    format!("{salt}${hash}")
}

fn verify_password(stored: &str, password: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, hash)) => digest(salt, password) == hash,
        None => false,
    }
}

impl FleetStore {
    pub fn create_user(&self, username: &str, password: &str) -> Result<(), FleetError> {
        if username.is_empty() || password.is_empty() {
            return Err(FleetError::validation("username and password are required"));
        }

        let mut collections = self.collections.write();

        if collections
            .users
            .iter()
            .any(|user| user.username == username)
        {
            return Err(FleetError::validation(format!(
                "username '{username}' already exists"
            )));
        }

        collections.users.push(UserRecord {
            username: username.to_string(),
            password_hash: hash_password(password),
            full_name: None,
            email: None,
            phone: None,
        });
        self.commit(&collections)
    }

    pub fn verify_user(&self, username: &str, password: &str) -> bool {
        self.collections
            .read()
            .users
            .iter()
            .find(|user| user.username == username)
            .is_some_and(|user| verify_password(&user.password_hash, password))
    }

    pub fn user_profile(&self, username: &str) -> Result<UserProfile, FleetError> {
        self.collections
            .read()
            .users
            .iter()
            .find(|user| user.username == username)
            .map(|user| UserProfile {
                username: user.username.clone(),
                full_name: user.full_name.clone(),
                email: user.email.clone(),
                phone: user.phone.clone(),
            })
            .ok_or_else(|| FleetError::not_found("user", username))
    }

    pub fn update_user_profile(
        &self,
        username: &str,
        full_name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
    ) -> Result<(), FleetError> {
        let mut collections = self.collections.write();

        let user = collections
            .users
            .iter_mut()
            .find(|user| user.username == username)
            .ok_or_else(|| FleetError::not_found("user", username))?;

        user.full_name = full_name;
        user.email = email;
        user.phone = phone;
        self.commit(&collections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_verify() {
        let store = FleetStore::in_memory();
        store.create_user("ops", "hunter2").unwrap();
        assert!(store.verify_user("ops", "hunter2"));
        assert!(!store.verify_user("ops", "hunter3"));
        assert!(!store.verify_user("nobody", "hunter2"));
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let store = FleetStore::in_memory();
        store.create_user("ops", "hunter2").unwrap();
        assert!(matches!(
            store.create_user("ops", "other"),
            Err(FleetError::Validation(_))
        ));
    }

    #[test]
    fn empty_credentials_are_rejected() {
        let store = FleetStore::in_memory();
        assert!(store.create_user("", "pw").is_err());
        assert!(store.create_user("ops", "").is_err());
    }

    #[test]
    fn password_is_not_stored_in_clear() {
        let store = FleetStore::in_memory();
        store.create_user("ops", "hunter2").unwrap();
        let record = store.collections.read().users[0].clone();
        assert!(!record.password_hash.contains("hunter2"));
    }

    #[test]
    fn equal_passwords_hash_differently() {
        // Fresh salt per registration.
        assert_ne!(hash_password("hunter2"), hash_password("hunter2"));
    }

    #[test]
    fn profile_update_round_trip() {
        let store = FleetStore::in_memory();
        store.create_user("ops", "hunter2").unwrap();
        store
            .update_user_profile(
                "ops",
                Some("Ops Person".to_string()),
                Some("ops@example.com".to_string()),
                None,
            )
            .unwrap();

        let profile = store.user_profile("ops").unwrap();
        assert_eq!(profile.full_name.as_deref(), Some("Ops Person"));
        assert_eq!(profile.email.as_deref(), Some("ops@example.com"));
        assert_eq!(profile.phone, None);
    }
}
