use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use jiff::civil::Date;
use serde::Deserialize;

use fleet_core::ServiceRequest;

use crate::{auth::Session, error::ApiError, state::AppState};

#[derive(Deserialize)]
pub struct ServiceQuery {
    pub truck_id: Option<String>,
}

#[derive(Deserialize)]
pub struct SubmitServiceBody {
    pub truck_id: String,
    pub service_type: String,
    pub description: String,
    pub requested_date: Date,
}

pub async fn list_handler(
    State(state): State<Arc<AppState>>,
    _session: Session,
    Query(query): Query<ServiceQuery>,
) -> Json<Vec<ServiceRequest>> {
    Json(state.store.service_requests(query.truck_id.as_deref()))
}

/// `requested_by` comes from the session, never from the body.
pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(body): Json<SubmitServiceBody>,
) -> Result<StatusCode, ApiError> {
    if body.truck_id.trim().is_empty() {
        return Err(ApiError::BadRequest("truck_id is required".to_string()));
    }

    state.store.create_service_request(
        &body.truck_id,
        &body.service_type,
        &body.description,
        body.requested_date,
        &session.username,
    )?;
    Ok(StatusCode::CREATED)
}
