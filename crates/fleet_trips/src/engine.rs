use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use fleet_core::{
    route::{round1, round2},
    FleetError, RoutePreferences, RouteSummary, SimulationKind, TripMetrics,
};
use fleet_maps::{MapsError, RouteSource};
use fleet_store::FleetStore;

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationRequest {
    pub truck_id: String,
    pub simulation_type: SimulationKind,
    #[serde(flatten)]
    pub preferences: RoutePreferences,
}

/// Derives trip metrics from a truck's current position, its scheduled
/// destination and a route summary. Nothing here is persisted; a failed
/// computation never touches stored truck or schedule data.
pub struct TripMetricsEngine {
    store: Arc<FleetStore>,
    routes: RouteSource,
    fuel_efficiency_km_per_l: f64,
}

impl TripMetricsEngine {
    pub fn new(store: Arc<FleetStore>, routes: RouteSource, fuel_efficiency_km_per_l: f64) -> Self {
        TripMetricsEngine {
            store,
            routes,
            fuel_efficiency_km_per_l,
        }
    }

    /// Runs one simulation. Preconditions are checked in a fixed order,
    /// each with its own error: the truck must exist, its location must be
    /// coordinates, it must have a schedule, that schedule must name a
    /// destination, and a route provider must be configured.
    pub async fn compute(&self, request: &SimulationRequest) -> Result<TripMetrics, FleetError> {
        let truck = self.store.truck(&request.truck_id)?;

        let origin = truck.coordinates().map_err(|_| {
            FleetError::validation(format!(
                "truck '{}' has no valid coordinates for its current location",
                truck.truck_id
            ))
        })?;

        // Multiple schedules may exist; the first inserted one is treated
        // as the current destination.
        let schedules = self.store.schedules(Some(&request.truck_id));
        let schedule = schedules
            .first()
            .ok_or_else(|| FleetError::not_found("schedule for truck", &request.truck_id))?;

        let destination = schedule.destination.trim();
        if destination.is_empty() {
            return Err(FleetError::validation(format!(
                "schedule for truck '{}' is missing a destination",
                request.truck_id
            )));
        }

        let avoided = match request.simulation_type {
            SimulationKind::Route => request.preferences.avoided(),
            SimulationKind::Fuel => Vec::new(),
        };

        debug!(
            "TripMetricsEngine: routing {} -> {} (avoid: {:?})",
            origin, destination, avoided
        );

        let summary = self
            .routes
            .route(origin, destination, &avoided)
            .await
            .map_err(map_maps_error)?;

        Ok(self.derive(request, destination, summary, avoided))
    }

    fn derive(
        &self,
        request: &SimulationRequest,
        destination: &str,
        summary: RouteSummary,
        avoided: Vec<fleet_core::Avoid>,
    ) -> TripMetrics {
        let distance_km = round2(summary.distance_km);
        let duration_min = round1(summary.duration_min);

        match request.simulation_type {
            SimulationKind::Fuel => {
                let fuel_liters = summary.distance_km / self.fuel_efficiency_km_per_l;
                TripMetrics::FuelEfficiency {
                    truck_id: request.truck_id.clone(),
                    destination: destination.to_string(),
                    distance_km,
                    duration_min,
                    fuel_liters: round2(fuel_liters),
                }
            }
            SimulationKind::Route => TripMetrics::RouteOptimization {
                truck_id: request.truck_id.clone(),
                destination: destination.to_string(),
                distance_km,
                duration_min,
                avoided,
            },
        }
    }
}

fn map_maps_error(err: MapsError) -> FleetError {
    match err {
        MapsError::MissingApiKey => FleetError::Config(err.to_string()),
        MapsError::GeocodeFailed { .. } => FleetError::Geocode(err.to_string()),
        other => FleetError::Directions(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_core::{Avoid, Truck, TruckStatus};
    use jiff::civil::date;

    fn store_with_truck(location: &str) -> Arc<FleetStore> {
        let store = Arc::new(FleetStore::in_memory());
        store
            .insert_truck(Truck {
                truck_id: "TRK-1".to_string(),
                location: location.to_string(),
                speed: 80.0,
                status: TruckStatus::Active,
            })
            .unwrap();
        store
    }

    fn schedule_to(store: &FleetStore, destination: &str) {
        store
            .add_schedule(
                "TRK-1",
                destination,
                date(2026, 9, 1).at(8, 0, 0, 0),
                date(2026, 9, 1).at(17, 0, 0, 0),
            )
            .unwrap();
    }

    fn engine_with(store: Arc<FleetStore>, summary: RouteSummary) -> TripMetricsEngine {
        TripMetricsEngine::new(store, RouteSource::Fixed { summary }, 2.5)
    }

    fn fuel_request() -> SimulationRequest {
        SimulationRequest {
            truck_id: "TRK-1".to_string(),
            simulation_type: SimulationKind::Fuel,
            preferences: RoutePreferences::default(),
        }
    }

    #[tokio::test]
    async fn fuel_metrics_for_a_100km_trip() {
        let store = store_with_truck("10.0,20.0");
        schedule_to(&store, "Rotterdam");
        let engine = engine_with(
            store,
            RouteSummary {
                distance_km: 100.0,
                duration_min: 90.0,
            },
        );

        let metrics = engine.compute(&fuel_request()).await.unwrap();
        assert_eq!(
            metrics,
            TripMetrics::FuelEfficiency {
                truck_id: "TRK-1".to_string(),
                destination: "Rotterdam".to_string(),
                distance_km: 100.0,
                duration_min: 90.0,
                fuel_liters: 40.0,
            }
        );
    }

    #[tokio::test]
    async fn outputs_are_rounded() {
        let store = store_with_truck("10.0,20.0");
        schedule_to(&store, "Rotterdam");
        let engine = engine_with(
            store,
            RouteSummary {
                distance_km: 123.4567,
                duration_min: 98.76,
            },
        );

        let metrics = engine.compute(&fuel_request()).await.unwrap();
        let TripMetrics::FuelEfficiency {
            distance_km,
            duration_min,
            fuel_liters,
            ..
        } = metrics
        else {
            panic!("expected fuel metrics");
        };
        assert_eq!(distance_km, 123.46);
        assert_eq!(duration_min, 98.8);
        // 123.4567 / 2.5 = 49.38268
        assert_eq!(fuel_liters, 49.38);
    }

    #[tokio::test]
    async fn route_metrics_report_default_avoided_set() {
        let store = store_with_truck("10.0,20.0");
        schedule_to(&store, "Rotterdam");
        let engine = engine_with(
            store,
            RouteSummary {
                distance_km: 50.0,
                duration_min: 45.0,
            },
        );

        let request = SimulationRequest {
            truck_id: "TRK-1".to_string(),
            simulation_type: SimulationKind::Route,
            preferences: RoutePreferences::default(),
        };

        let metrics = engine.compute(&request).await.unwrap();
        let TripMetrics::RouteOptimization { avoided, .. } = metrics else {
            panic!("expected route metrics");
        };
        assert_eq!(avoided, vec![Avoid::Highways, Avoid::Tolls]);
    }

    #[tokio::test]
    async fn first_schedule_wins_when_several_exist() {
        let store = store_with_truck("10.0,20.0");
        schedule_to(&store, "Rotterdam");
        schedule_to(&store, "Antwerp");
        let engine = engine_with(
            store,
            RouteSummary {
                distance_km: 10.0,
                duration_min: 10.0,
            },
        );

        let metrics = engine.compute(&fuel_request()).await.unwrap();
        let TripMetrics::FuelEfficiency { destination, .. } = metrics else {
            panic!("expected fuel metrics");
        };
        assert_eq!(destination, "Rotterdam");
    }

    #[tokio::test]
    async fn unknown_truck_is_not_found() {
        let store = Arc::new(FleetStore::in_memory());
        let engine = engine_with(
            store,
            RouteSummary {
                distance_km: 1.0,
                duration_min: 1.0,
            },
        );

        let err = engine.compute(&fuel_request()).await.unwrap_err();
        assert!(matches!(err, FleetError::NotFound { entity: "truck", .. }));
    }

    #[tokio::test]
    async fn raw_text_location_fails_validation() {
        let store = store_with_truck("parking lot B");
        schedule_to(&store, "Rotterdam");
        let engine = engine_with(
            store,
            RouteSummary {
                distance_km: 1.0,
                duration_min: 1.0,
            },
        );

        let err = engine.compute(&fuel_request()).await.unwrap_err();
        assert!(matches!(err, FleetError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_schedule_is_not_found() {
        let store = store_with_truck("10.0,20.0");
        let engine = engine_with(
            store,
            RouteSummary {
                distance_km: 1.0,
                duration_min: 1.0,
            },
        );

        let err = engine.compute(&fuel_request()).await.unwrap_err();
        assert!(matches!(err, FleetError::NotFound { .. }));
    }

    #[tokio::test]
    async fn blank_destination_fails_validation() {
        let store = store_with_truck("10.0,20.0");
        schedule_to(&store, "   ");
        let engine = engine_with(
            store,
            RouteSummary {
                distance_km: 1.0,
                duration_min: 1.0,
            },
        );

        let err = engine.compute(&fuel_request()).await.unwrap_err();
        assert!(matches!(err, FleetError::Validation(_)));
    }

    #[tokio::test]
    async fn unconfigured_route_source_is_a_config_error() {
        let store = store_with_truck("10.0,20.0");
        schedule_to(&store, "Rotterdam");
        let engine = TripMetricsEngine::new(store, RouteSource::Unconfigured, 2.5);

        let err = engine.compute(&fuel_request()).await.unwrap_err();
        assert!(matches!(err, FleetError::Config(_)));
    }

    #[tokio::test]
    async fn failed_computation_leaves_store_untouched() {
        let store = store_with_truck("10.0,20.0");
        schedule_to(&store, "Rotterdam");
        let engine = TripMetricsEngine::new(store.clone(), RouteSource::Unconfigured, 2.5);

        let _ = engine.compute(&fuel_request()).await;
        assert_eq!(store.trucks().len(), 1);
        assert_eq!(store.schedules(Some("TRK-1")).len(), 1);
    }
}
