// Main entry point - Configuration, dependency wiring and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::chart_service::TemperatureChartService;
use crate::infrastructure::config::load_app_config;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    health_check, popular_cities, temperature_chart, temperature_page,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;
    tracing::info!(
        range_policy = ?config.chart.range_policy,
        chart_library = config.chart.script_url.as_deref().unwrap_or("none"),
        "loaded chart settings"
    );

    // Create services (application layer)
    let state = Arc::new(AppState {
        chart_service: TemperatureChartService::new(config.chart),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/popular-cities", get(popular_cities))
        .route("/charts/temperature", post(temperature_chart))
        .route("/charts/temperature/page", post(temperature_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting city-temperature-chart service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
