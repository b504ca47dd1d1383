use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coordinates::{Coordinates, ParseCoordinatesError};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruckStatus {
    Active,
    Idle,
    Maintenance,
    OutOfService,
}

impl Display for TruckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TruckStatus::Active => "active",
                TruckStatus::Idle => "idle",
                TruckStatus::Maintenance => "maintenance",
                TruckStatus::OutOfService => "out_of_service",
            }
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Truck {
    pub truck_id: String,
    /// Either a `"lat,lng"` pair or, after the documented geocode fallback,
    /// the raw free-text the operator entered.
    pub location: String,
    pub speed: f64,
    pub status: TruckStatus,
}

impl Truck {
    pub fn coordinates(&self) -> Result<Coordinates, ParseCoordinatesError> {
        Coordinates::from_str(&self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn truck(location: &str) -> Truck {
        Truck {
            truck_id: "TRK-1".to_string(),
            location: location.to_string(),
            speed: 60.0,
            status: TruckStatus::Active,
        }
    }

    #[test]
    fn coordinates_from_stored_location() {
        assert_eq!(
            truck("10.0,20.0").coordinates().unwrap(),
            Coordinates::new(10.0, 20.0)
        );
    }

    #[test]
    fn fallback_location_does_not_parse() {
        assert!(truck("somewhere in Ohio").coordinates().is_err());
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&TruckStatus::OutOfService).unwrap();
        assert_eq!(json, "\"out_of_service\"");
    }
}
