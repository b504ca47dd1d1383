use thiserror::Error;

/// Failure taxonomy shared by every component.
///
/// Every variant is a per-request failure; no component error is ever fatal
/// to the process.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("geocoding failed: {0}")]
    Geocode(String),

    #[error("directions lookup failed: {0}")]
    Directions(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(String),
}

impl FleetError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        FleetError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        FleetError::Validation(message.into())
    }
}
