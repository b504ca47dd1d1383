use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use fleet_store::UserProfile;

use crate::{error::ApiError, state::AppState};

/// Authenticated session, extracted from `Authorization: Bearer <token>`.
/// Every core operation runs behind this gate.
pub struct Session {
    pub token: Uuid,
    pub username: String,
}

impl FromRequestParts<Arc<AppState>> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let unauthorized = || ApiError::Unauthorized("please log in".to_string());

        let token = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .ok_or_else(unauthorized)?;

        let username = state
            .sessions
            .read()
            .get(&token)
            .cloned()
            .ok_or_else(unauthorized)?;

        Ok(Session { token, username })
    }
}

#[derive(Deserialize)]
pub struct RegisterBody {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: Uuid,
    pub username: String,
}

#[derive(Deserialize)]
pub struct ProfileBody {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterBody>,
) -> Result<StatusCode, ApiError> {
    if body.password != body.confirm_password {
        return Err(ApiError::BadRequest("passwords do not match".to_string()));
    }

    state.store.create_user(&body.username, &body.password)?;
    info!("auth: registered user {}", body.username);
    Ok(StatusCode::CREATED)
}

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>, ApiError> {
    if !state.store.verify_user(&body.username, &body.password) {
        return Err(ApiError::Unauthorized(
            "invalid username or password".to_string(),
        ));
    }

    let token = Uuid::new_v4();
    state.sessions.write().insert(token, body.username.clone());

    Ok(Json(LoginResponse {
        token,
        username: body.username,
    }))
}

pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> StatusCode {
    state.sessions.write().remove(&session.token);
    StatusCode::NO_CONTENT
}

pub async fn profile_handler(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(state.store.user_profile(&session.username)?))
}

pub async fn update_profile_handler(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(body): Json<ProfileBody>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .update_user_profile(&session.username, body.full_name, body.email, body.phone)?;
    Ok(StatusCode::NO_CONTENT)
}
