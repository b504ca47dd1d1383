use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use jiff::civil::DateTime;
use serde::Deserialize;

use fleet_core::Schedule;

use crate::{auth::Session, error::ApiError, state::AppState};

#[derive(Deserialize)]
pub struct ScheduleQuery {
    pub truck_id: Option<String>,
}

#[derive(Deserialize)]
pub struct AddScheduleBody {
    pub truck_id: String,
    pub destination: String,
    pub departure_time: DateTime,
    pub arrival_time: DateTime,
}

pub async fn list_handler(
    State(state): State<Arc<AppState>>,
    _session: Session,
    Query(query): Query<ScheduleQuery>,
) -> Json<Vec<Schedule>> {
    Json(state.store.schedules(query.truck_id.as_deref()))
}

pub async fn add_handler(
    State(state): State<Arc<AppState>>,
    _session: Session,
    Json(body): Json<AddScheduleBody>,
) -> Result<StatusCode, ApiError> {
    if body.truck_id.trim().is_empty() {
        return Err(ApiError::BadRequest("truck_id is required".to_string()));
    }

    state.store.add_schedule(
        &body.truck_id,
        &body.destination,
        body.departure_time,
        body.arrival_time,
    )?;
    Ok(StatusCode::CREATED)
}

/// The truck's current schedule: the first one in insertion order, matching
/// what the trip metrics engine will use as the destination.
pub async fn current_for_truck_handler(
    State(state): State<Arc<AppState>>,
    _session: Session,
    Path(truck_id): Path<String>,
) -> Result<Json<Schedule>, ApiError> {
    state
        .store
        .schedules(Some(&truck_id))
        .into_iter()
        .next()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no schedule found for truck '{truck_id}'")))
}
