use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use fleet_core::{Avoid, Coordinates, RouteSummary};

pub const GOOGLE_MAPS_API_URL: &str = "https://maps.googleapis.com";
pub const GEOCODE_API_PATH: &str = "/maps/api/geocode/json";
pub const DIRECTIONS_API_PATH: &str = "/maps/api/directions/json";

#[derive(Debug, Error)]
pub enum MapsError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("geocoding '{query}' returned status {status}")]
    GeocodeFailed { query: String, status: String },

    #[error("directions returned status {0}")]
    DirectionsFailed(String),

    #[error("directions returned no routes")]
    NoRoute,

    #[error("maps API key is not configured")]
    MissingApiKey,
}

impl MapsError {
    /// Network failures and provider 5xx responses are worth another
    /// attempt; provider verdicts (non-OK statuses) are not.
    fn is_retryable(&self) -> bool {
        match self {
            MapsError::Request(_) => true,
            MapsError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[derive(Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: GeocodeGeometry,
}

#[derive(Deserialize)]
struct GeocodeGeometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Deserialize)]
struct DirectionsRoute {
    legs: Vec<DirectionsLeg>,
}

#[derive(Deserialize)]
struct DirectionsLeg {
    /// Distance in meters.
    distance: Measure,
    /// Duration in seconds.
    duration: Measure,
}

#[derive(Deserialize)]
struct Measure {
    value: f64,
}

pub struct GoogleMapsClientParams {
    pub api_key: String,
    pub base_url: String,
    pub request_timeout: Duration,
    pub max_retries: u32,
}

impl GoogleMapsClientParams {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: GOOGLE_MAPS_API_URL.to_string(),
            request_timeout: Duration::from_secs(5),
            max_retries: 2,
        }
    }
}

#[derive(Clone)]
pub struct GoogleMapsClient {
    params: std::sync::Arc<GoogleMapsClientParams>,
    client: reqwest::Client,
}

impl GoogleMapsClient {
    pub fn new(params: GoogleMapsClientParams) -> Result<Self, MapsError> {
        let client = reqwest::Client::builder()
            .timeout(params.request_timeout)
            .build()?;

        Ok(Self {
            params: std::sync::Arc::new(params),
            client,
        })
    }

    /// Turns a free-text or `"lat,lng"` location into coordinates.
    ///
    /// A parseable coordinate pair is returned verbatim with no network
    /// call; everything else goes through the geocoding endpoint and takes
    /// the first result.
    pub async fn resolve_location(&self, input: &str) -> Result<Coordinates, MapsError> {
        if let Ok(coords) = Coordinates::from_str(input) {
            return Ok(coords);
        }

        self.geocode(input).await
    }

    pub async fn geocode(&self, address: &str) -> Result<Coordinates, MapsError> {
        let query = [
            ("address", address.to_string()),
            ("key", self.params.api_key.clone()),
        ];

        let response: GeocodeResponse = self.get_json(GEOCODE_API_PATH, &query).await?;

        if response.status != "OK" {
            return Err(MapsError::GeocodeFailed {
                query: address.to_string(),
                status: response.status,
            });
        }

        match response.results.first() {
            Some(result) => Ok(Coordinates::new(
                result.geometry.location.lat,
                result.geometry.location.lng,
            )),
            None => Err(MapsError::GeocodeFailed {
                query: address.to_string(),
                status: "ZERO_RESULTS".to_string(),
            }),
        }
    }

    /// Fetches a route summary for an origin point and a free-text
    /// destination. `avoided` becomes the provider's `avoid` parameter,
    /// joined with `|`; an empty set sends no parameter at all.
    pub async fn route<P>(
        &self,
        origin: P,
        destination: &str,
        avoided: &[Avoid],
    ) -> Result<RouteSummary, MapsError>
    where
        P: Into<geo_types::Point>,
    {
        let origin: geo_types::Point = origin.into();

        let mut query = vec![
            ("origin", format!("{},{}", origin.y(), origin.x())),
            ("destination", destination.to_string()),
            ("key", self.params.api_key.clone()),
        ];

        if let Some(avoid) = avoid_param(avoided) {
            query.push(("avoid", avoid));
        }

        let response: DirectionsResponse = self.get_json(DIRECTIONS_API_PATH, &query).await?;

        if response.status != "OK" {
            return Err(MapsError::DirectionsFailed(response.status));
        }

        let leg = response
            .routes
            .first()
            .and_then(|route| route.legs.first())
            .ok_or(MapsError::NoRoute)?;

        Ok(RouteSummary {
            distance_km: leg.distance.value / 1000.0,
            duration_min: leg.duration.value / 60.0,
        })
    }

    /// One GET with bounded retry: up to `max_retries` extra attempts with
    /// exponential backoff, only for retryable failures.
    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, MapsError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.params.base_url, path);

        let mut attempt = 0;
        let mut backoff = Duration::from_millis(200);

        loop {
            attempt += 1;

            match self.try_get_json(&url, query).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt <= self.params.max_retries && err.is_retryable() => {
                    debug!(
                        "GoogleMapsApi: attempt {}/{} for {} failed: {}",
                        attempt,
                        self.params.max_retries + 1,
                        path,
                        err
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn try_get_json<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T, MapsError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.get(url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(MapsError::Api { status, message });
        }

        Ok(response.json().await?)
    }
}

/// `avoid` parameter value: the avoided set joined with `|`, or nothing
/// when the set is empty.
pub fn avoid_param(avoided: &[Avoid]) -> Option<String> {
    if avoided.is_empty() {
        return None;
    }

    Some(
        avoided
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("|"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_core::RoutePreferences;

    fn client() -> GoogleMapsClient {
        GoogleMapsClient::new(GoogleMapsClientParams::new("test-key".to_string())).unwrap()
    }

    #[tokio::test]
    async fn resolve_location_fast_path_skips_network() {
        // base_url points nowhere reachable; a network call would fail.
        let client = GoogleMapsClient::new(GoogleMapsClientParams {
            api_key: "test-key".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            request_timeout: Duration::from_millis(100),
            max_retries: 0,
        })
        .unwrap();

        let coords = client.resolve_location("10.0, 20.0").await.unwrap();
        assert_eq!(coords, Coordinates::new(10.0, 20.0));
    }

    #[tokio::test]
    async fn resolve_location_free_text_reports_network_failure() {
        let client = GoogleMapsClient::new(GoogleMapsClientParams {
            api_key: "test-key".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            request_timeout: Duration::from_millis(100),
            max_retries: 0,
        })
        .unwrap();

        let err = client.resolve_location("Rotterdam").await.unwrap_err();
        assert!(matches!(err, MapsError::Request(_)));
    }

    #[test]
    fn avoid_param_default_policy_avoids_both() {
        let avoided = RoutePreferences::default().avoided();
        assert_eq!(avoid_param(&avoided).as_deref(), Some("highways|tolls"));
    }

    #[test]
    fn avoid_param_absent_when_everything_allowed() {
        let prefs = RoutePreferences {
            allow_highways: true,
            allow_tolls: true,
        };
        assert_eq!(avoid_param(&prefs.avoided()), None);
    }

    #[test]
    fn avoid_param_single_entry_has_no_separator() {
        assert_eq!(avoid_param(&[Avoid::Tolls]).as_deref(), Some("tolls"));
    }

    #[test]
    fn directions_leg_deserializes_integer_values() {
        let raw = r#"{
            "status": "OK",
            "routes": [{"legs": [{"distance": {"value": 100000}, "duration": {"value": 5400}}]}]
        }"#;
        let response: DirectionsResponse = serde_json::from_str(raw).unwrap();
        let leg = &response.routes[0].legs[0];
        assert_eq!(leg.distance.value, 100000.0);
        assert_eq!(leg.duration.value, 5400.0);
    }

    #[test]
    fn geocode_response_tolerates_missing_results() {
        let raw = r#"{"status": "ZERO_RESULTS"}"#;
        let response: GeocodeResponse = serde_json::from_str(raw).unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn client_is_cheap_to_clone() {
        let a = client();
        let _b = a.clone();
    }
}
