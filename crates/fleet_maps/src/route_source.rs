use fleet_core::{Avoid, Coordinates, RouteSummary};

use crate::google_maps_api::{GoogleMapsClient, MapsError};

/// Where route summaries come from.
///
/// `Fixed` serves a canned summary for offline/dev use; `Unconfigured`
/// stands in when no API key was provided and fails at the point of use,
/// never at startup.
#[derive(Clone)]
pub enum RouteSource {
    GoogleMaps(GoogleMapsClient),
    Fixed { summary: RouteSummary },
    Unconfigured,
}

impl RouteSource {
    pub async fn resolve_location(&self, input: &str) -> Result<Coordinates, MapsError> {
        match self {
            RouteSource::GoogleMaps(client) => client.resolve_location(input).await,
            // Without a provider only the coordinate fast path works.
            RouteSource::Fixed { .. } | RouteSource::Unconfigured => input
                .parse()
                .map_err(|_| MapsError::MissingApiKey),
        }
    }

    pub async fn route(
        &self,
        origin: Coordinates,
        destination: &str,
        avoided: &[Avoid],
    ) -> Result<RouteSummary, MapsError> {
        match self {
            RouteSource::GoogleMaps(client) => client.route(origin, destination, avoided).await,
            RouteSource::Fixed { summary } => Ok(*summary),
            RouteSource::Unconfigured => Err(MapsError::MissingApiKey),
        }
    }
}
