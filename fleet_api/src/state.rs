use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use fleet_core::FleetConfig;
use fleet_maps::RouteSource;
use fleet_store::FleetStore;
use fleet_trips::TripMetricsEngine;

pub struct AppState {
    pub config: FleetConfig,
    pub store: Arc<FleetStore>,
    pub routes: RouteSource,
    pub engine: TripMetricsEngine,
    /// Session token -> username. Tokens are issued at login and dropped at
    /// logout; the username is the ambient context for attribution fields.
    pub sessions: RwLock<HashMap<Uuid, String>>,
}
