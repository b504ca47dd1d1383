use std::sync::Arc;

use axum::{extract::State, Json};

use fleet_core::TripMetrics;
use fleet_trips::SimulationRequest;

use crate::{auth::Session, error::ApiError, state::AppState};

/// Runs one route simulation and returns the derived trip metrics. Nothing
/// is persisted; a provider failure surfaces as a per-request error.
pub async fn run_handler(
    State(state): State<Arc<AppState>>,
    _session: Session,
    Json(body): Json<SimulationRequest>,
) -> Result<Json<TripMetrics>, ApiError> {
    let metrics = state.engine.compute(&body).await?;
    Ok(Json(metrics))
}
