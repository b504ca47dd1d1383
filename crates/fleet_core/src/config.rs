use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Fleet-wide fuel model: a single configured efficiency, no per-truck
/// profile. A deliberate simplification, not a bug.
pub const AVERAGE_FUEL_EFFICIENCY_KM_PER_L: f64 = 2.5;

/// What happens to service requests and alerts that reference a truck when
/// that truck is deleted. Schedules always cascade.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Keep orphaned service requests and alerts as historical records.
    #[default]
    Retain,
    /// Remove them together with the truck.
    Purge,
}

/// Process configuration, read once at startup.
///
/// A missing maps API key is not a startup failure: components report it as
/// a configuration error at the point of use.
#[derive(Debug, Clone)]
pub struct FleetConfig {
    pub maps_api_key: Option<String>,
    pub fuel_efficiency_km_per_l: f64,
    pub orphan_policy: OrphanPolicy,
    pub store_path: Option<PathBuf>,
    pub bind_addr: SocketAddr,
}

impl Default for FleetConfig {
    fn default() -> Self {
        FleetConfig {
            maps_api_key: None,
            fuel_efficiency_km_per_l: AVERAGE_FUEL_EFFICIENCY_KM_PER_L,
            orphan_policy: OrphanPolicy::Retain,
            store_path: None,
            bind_addr: "127.0.0.1:8080".parse().unwrap(),
        }
    }
}

impl FleetConfig {
    /// Reads `FLEET_*` variables from the environment. Unset variables fall
    /// back to defaults; malformed numeric/address values are ignored the
    /// same way.
    pub fn from_env() -> Self {
        let defaults = FleetConfig::default();

        let maps_api_key = std::env::var("FLEET_MAPS_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        let fuel_efficiency_km_per_l = std::env::var("FLEET_FUEL_EFFICIENCY_KM_PER_L")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(defaults.fuel_efficiency_km_per_l);

        let orphan_policy = match std::env::var("FLEET_ORPHAN_POLICY").as_deref() {
            Ok("purge") => OrphanPolicy::Purge,
            _ => OrphanPolicy::Retain,
        };

        let store_path = std::env::var("FLEET_STORE_PATH").ok().map(PathBuf::from);

        let bind_addr = std::env::var("FLEET_BIND_ADDR")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(defaults.bind_addr);

        FleetConfig {
            maps_api_key,
            fuel_efficiency_km_per_l,
            orphan_policy,
            store_path,
            bind_addr,
        }
    }
}
