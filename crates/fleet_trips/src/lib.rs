pub mod engine;

pub use engine::{SimulationRequest, TripMetricsEngine};
