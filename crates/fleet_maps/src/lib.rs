pub mod google_maps_api;
pub mod route_source;

pub use google_maps_api::{GoogleMapsClient, GoogleMapsClientParams, MapsError};
pub use route_source::RouteSource;
