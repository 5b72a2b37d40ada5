use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServiceConfig;
use crate::registry::DeviceRegistry;
use crate::state::AppState;

mod config;
mod metrics;
mod registry;
mod roster;
mod routes;
mod state;
mod store;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::from_env();
    let device_ids = roster::load(&config.devices_path).with_context(|| {
        format!(
            "failed to load device roster from {}",
            config.devices_path.display()
        )
    })?;
    let registry = DeviceRegistry::new(device_ids);
    info!(devices = registry.len(), "loaded device roster");

    let state = Arc::new(AppState::new(&registry));

    // Device routes: /api/v1/devices/{device_id}/*
    let device_routes = Router::new()
        .route(
            "/devices/{device_id}/heartbeat",
            post(routes::record_heartbeat),
        )
        .route(
            "/devices/{device_id}/stats",
            post(routes::record_stats).get(routes::get_stats),
        );

    let app = Router::new()
        .route("/ping", get(routes::ping))
        .nest("/api/v1", device_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await.context("server exited")?;

    Ok(())
}
