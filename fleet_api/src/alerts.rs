use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use fleet_core::{Alert, AlertFilter, AlertId, Severity, DEFAULT_ALERT_LIMIT};

use crate::{auth::Session, error::ApiError, state::AppState};

#[derive(Deserialize)]
pub struct AlertQuery {
    pub truck_id: Option<String>,
    pub severity: Option<Severity>,
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct CreateAlertBody {
    pub alert_type: String,
    pub truck_id: String,
    pub message: String,
    pub severity: Severity,
    pub timestamp: Option<Timestamp>,
}

#[derive(Serialize)]
pub struct CreateAlertResponse {
    pub id: AlertId,
}

#[derive(Serialize)]
pub struct UnreadCountResponse {
    pub unread: usize,
}

pub async fn list_handler(
    State(state): State<Arc<AppState>>,
    _session: Session,
    Query(query): Query<AlertQuery>,
) -> Json<Vec<Alert>> {
    let filter = AlertFilter {
        truck_id: query.truck_id,
        severity: query.severity,
        unread_only: query.unread_only,
    };

    let limit = query.limit.unwrap_or(DEFAULT_ALERT_LIMIT);
    Json(state.store.alerts(&filter, limit))
}

pub async fn create_handler(
    State(state): State<Arc<AppState>>,
    _session: Session,
    Json(body): Json<CreateAlertBody>,
) -> Result<(StatusCode, Json<CreateAlertResponse>), ApiError> {
    let id = state.store.create_alert(
        &body.alert_type,
        &body.truck_id,
        &body.message,
        body.severity,
        body.timestamp,
    )?;

    Ok((StatusCode::CREATED, Json(CreateAlertResponse { id })))
}

pub async fn mark_read_handler(
    State(state): State<Arc<AppState>>,
    _session: Session,
    Path(id): Path<AlertId>,
) -> Result<StatusCode, ApiError> {
    state.store.mark_read(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn acknowledge_handler(
    State(state): State<Arc<AppState>>,
    _session: Session,
    Path(id): Path<AlertId>,
) -> Result<StatusCode, ApiError> {
    state.store.mark_acknowledged(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unread_count_handler(
    State(state): State<Arc<AppState>>,
    _session: Session,
) -> Json<UnreadCountResponse> {
    Json(UnreadCountResponse {
        unread: state.store.count_unread(),
    })
}
