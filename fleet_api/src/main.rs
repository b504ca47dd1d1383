mod alerts;
mod auth;
mod error;
mod schedules;
mod service;
mod simulation;
mod state;
mod trucks;

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::Method;
use axum::routing::{delete, get, patch, post};
use axum::{serve, Router};
use parking_lot::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};

use fleet_core::FleetConfig;
use fleet_maps::{GoogleMapsClient, GoogleMapsClientParams, RouteSource};
use fleet_store::FleetStore;
use fleet_trips::TripMetricsEngine;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = FleetConfig::from_env();

    let store = Arc::new(match &config.store_path {
        Some(path) => FleetStore::open(path)?,
        None => FleetStore::in_memory(),
    });

    // An absent API key is deliberately not a startup failure; the
    // Unconfigured source reports it at the point of use.
    let routes = match &config.maps_api_key {
        Some(key) => RouteSource::GoogleMaps(GoogleMapsClient::new(
            GoogleMapsClientParams::new(key.clone()),
        )?),
        None => {
            info!("fleet_api: no maps API key configured, route lookups will be rejected");
            RouteSource::Unconfigured
        }
    };

    let engine = TripMetricsEngine::new(
        store.clone(),
        routes.clone(),
        config.fuel_efficiency_km_per_l,
    );

    let bind_addr = config.bind_addr;
    let state = Arc::new(AppState {
        config,
        store,
        routes,
        engine,
        sessions: RwLock::new(HashMap::new()),
    });

    let cors_layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_origin(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route(
            "/auth/profile",
            get(auth::profile_handler).put(auth::update_profile_handler),
        )
        .route(
            "/trucks",
            get(trucks::list_handler).post(trucks::add_handler),
        )
        .route("/trucks/{truck_id}", delete(trucks::delete_handler))
        .route(
            "/trucks/{truck_id}/status",
            patch(trucks::update_status_handler),
        )
        .route(
            "/trucks/{truck_id}/location",
            patch(trucks::update_location_handler),
        )
        .route(
            "/trucks/{truck_id}/schedule",
            get(schedules::current_for_truck_handler),
        )
        .route(
            "/schedules",
            get(schedules::list_handler).post(schedules::add_handler),
        )
        .route(
            "/service-requests",
            get(service::list_handler).post(service::submit_handler),
        )
        .route(
            "/alerts",
            get(alerts::list_handler).post(alerts::create_handler),
        )
        .route("/alerts/unread-count", get(alerts::unread_count_handler))
        .route("/alerts/{id}/read", post(alerts::mark_read_handler))
        .route(
            "/alerts/{id}/acknowledge",
            post(alerts::acknowledge_handler),
        )
        .route("/simulations", post(simulation::run_handler))
        .layer(cors_layer)
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("fleet_api: listening on {}", bind_addr);

    serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.store.close()?;
    info!("fleet_api: store flushed, shutting down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("fleet_api: failed to listen for shutdown signal: {err}");
    }
}
