use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::warn;

use fleet_core::{Truck, TruckStatus};
use fleet_maps::MapsError;
use fleet_store::CascadeOutcome;

use crate::{auth::Session, error::ApiError, state::AppState};

#[derive(Deserialize)]
pub struct AddTruckBody {
    pub truck_id: String,
    pub location: String,
    pub speed: f64,
    pub status: TruckStatus,
}

#[derive(Deserialize)]
pub struct UpdateStatusBody {
    pub status: TruckStatus,
}

#[derive(Deserialize)]
pub struct UpdateLocationBody {
    pub location: String,
}

pub async fn list_handler(
    State(state): State<Arc<AppState>>,
    _session: Session,
) -> Json<Vec<Truck>> {
    Json(state.store.trucks())
}

pub async fn add_handler(
    State(state): State<Arc<AppState>>,
    _session: Session,
    Json(body): Json<AddTruckBody>,
) -> Result<StatusCode, ApiError> {
    if body.truck_id.trim().is_empty() {
        return Err(ApiError::BadRequest("truck_id is required".to_string()));
    }

    let location = resolve_with_fallback(&state, &body.location).await?;

    state.store.insert_truck(Truck {
        truck_id: body.truck_id,
        location,
        speed: body.speed,
        status: body.status,
    })?;

    Ok(StatusCode::CREATED)
}

pub async fn update_status_handler(
    State(state): State<Arc<AppState>>,
    _session: Session,
    Path(truck_id): Path<String>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<StatusCode, ApiError> {
    state.store.update_truck_status(&truck_id, body.status)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_location_handler(
    State(state): State<Arc<AppState>>,
    _session: Session,
    Path(truck_id): Path<String>,
    Json(body): Json<UpdateLocationBody>,
) -> Result<StatusCode, ApiError> {
    let location = resolve_with_fallback(&state, &body.location).await?;
    state.store.update_truck_location(&truck_id, &location)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_handler(
    State(state): State<Arc<AppState>>,
    _session: Session,
    Path(truck_id): Path<String>,
) -> Result<Json<CascadeOutcome>, ApiError> {
    let outcome = state
        .store
        .delete_truck(&truck_id, state.config.orphan_policy)?;
    Ok(Json(outcome))
}

/// Normalizes a location input to `"lat,lng"` where possible.
///
/// Coordinate pairs pass through untouched; free text is geocoded. When
/// geocoding fails the raw input is stored as-is — a documented lossy
/// fallback so a flaky provider never blocks fleet registration. A missing
/// API key is the one failure that does abort, reported at this point of
/// use.
async fn resolve_with_fallback(state: &AppState, input: &str) -> Result<String, ApiError> {
    match state.routes.resolve_location(input).await {
        Ok(coords) => Ok(coords.to_string()),
        Err(MapsError::MissingApiKey) => Err(ApiError::InternalServerError(
            "maps API key is not configured for geocoding".to_string(),
        )),
        Err(err) => {
            warn!("trucks: could not geocode '{}': {}; storing raw input", input, err);
            Ok(input.to_string())
        }
    }
}
