use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `lat,lng` pair as the mapping provider expects it.
///
/// Values are carried verbatim: out-of-range latitudes/longitudes are
/// accepted, the provider is the authority on what it can route.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Error, PartialEq)]
#[error("not a \"lat,lng\" coordinate pair: {input}")]
pub struct ParseCoordinatesError {
    pub input: String,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Coordinates { lat, lng }
    }
}

impl Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl FromStr for Coordinates {
    type Err = ParseCoordinatesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoordinatesError {
            input: s.to_string(),
        };

        let (lat, lng) = s.split_once(',').ok_or_else(err)?;
        if lng.contains(',') {
            return Err(err());
        }

        let lat: f64 = lat.trim().parse().map_err(|_| err())?;
        let lng: f64 = lng.trim().parse().map_err(|_| err())?;

        Ok(Coordinates { lat, lng })
    }
}

impl From<Coordinates> for geo_types::Point {
    fn from(coords: Coordinates) -> Self {
        geo_types::Point::new(coords.lng, coords.lat)
    }
}

impl From<&Coordinates> for geo_types::Point {
    fn from(coords: &Coordinates) -> Self {
        geo_types::Point::new(coords.lng, coords.lat)
    }
}
