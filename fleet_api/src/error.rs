use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use fleet_core::FleetError;

pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    BadGateway(String),
    InternalServerError(String),
}

impl From<FleetError> for ApiError {
    fn from(error: FleetError) -> Self {
        match &error {
            FleetError::NotFound { .. } => ApiError::NotFound(error.to_string()),
            FleetError::Validation(_) => ApiError::BadRequest(error.to_string()),
            FleetError::Geocode(_) | FleetError::Directions(_) => {
                ApiError::BadGateway(error.to_string())
            }
            FleetError::Config(_) | FleetError::Store(_) => {
                ApiError::InternalServerError(error.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message).into_response(),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            ApiError::BadGateway(message) => (StatusCode::BAD_GATEWAY, message).into_response(),
            ApiError::InternalServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}
