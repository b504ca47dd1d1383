pub mod alert;
pub mod config;
pub mod coordinates;
pub mod error;
pub mod route;
pub mod schedule;
pub mod service_request;
pub mod truck;

pub use alert::{Alert, AlertFilter, AlertId, Severity, DEFAULT_ALERT_LIMIT};
pub use config::{FleetConfig, OrphanPolicy, AVERAGE_FUEL_EFFICIENCY_KM_PER_L};
pub use coordinates::Coordinates;
pub use error::FleetError;
pub use route::{Avoid, RoutePreferences, RouteSummary, SimulationKind, TripMetrics};
pub use schedule::{Schedule, ScheduleStatus};
pub use service_request::{ServiceRequest, ServiceStatus};
pub use truck::{Truck, TruckStatus};
