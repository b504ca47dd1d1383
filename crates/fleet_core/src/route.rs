use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Road features a directions request may route around.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Avoid {
    Highways,
    Tolls,
}

impl Display for Avoid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Avoid::Highways => "highways",
                Avoid::Tolls => "tolls",
            }
        )
    }
}

/// Caller opt-ins for route simulation. The default policy avoids both
/// highways and tolls unless explicitly allowed.
#[derive(Debug, Copy, Clone, Default, Deserialize)]
pub struct RoutePreferences {
    #[serde(default)]
    pub allow_highways: bool,
    #[serde(default)]
    pub allow_tolls: bool,
}

impl RoutePreferences {
    pub fn avoided(&self) -> Vec<Avoid> {
        let mut avoided = Vec::new();
        if !self.allow_highways {
            avoided.push(Avoid::Highways);
        }
        if !self.allow_tolls {
            avoided.push(Avoid::Tolls);
        }
        avoided
    }
}

/// Distance/duration pair for one origin/destination request. Derived per
/// request, never persisted, no identity.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_min: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationKind {
    Fuel,
    Route,
}

/// Derived ride metrics for one simulation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum TripMetrics {
    FuelEfficiency {
        truck_id: String,
        destination: String,
        distance_km: f64,
        duration_min: f64,
        fuel_liters: f64,
    },
    RouteOptimization {
        truck_id: String,
        destination: String,
        distance_km: f64,
        duration_min: f64,
        avoided: Vec<Avoid>,
    },
}

/// Round to 2 decimals (distance, fuel).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 1 decimal (duration).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
