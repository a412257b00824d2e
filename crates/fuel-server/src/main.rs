//! Fuel Server - plans cost-optimal refuelling stops for long drives

use anyhow::{Context, Result};
use fuel_core::RouteOptimizer;
use fuel_ors::OrsClient;
use fuel_server::{api, config::Config, persistence, state::AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fuel_server=debug".parse()?),
        )
        .init();

    tracing::info!("Starting Fuel Server...");

    let config = Config::from_env().context("Invalid configuration")?;
    if config.ors_api_key.is_empty() {
        tracing::warn!("OPENROUTESERVICE_API_KEY is not set; directions requests will be rejected");
    }

    let db = persistence::init_database(&config.database_path, config.database_max_connections)
        .await
        .context("Failed to open station catalog")?;
    let station_count = persistence::count_stations(db.pool()).await?;
    tracing::info!("Station catalog holds {} stations", station_count);

    let routing = OrsClient::new(config.ors_config(), config.retry_policy())?;
    let catalog = persistence::SqliteCatalog::new(db.pool().clone());
    let optimizer = RouteOptimizer::new(
        Arc::new(routing),
        Arc::new(catalog),
        config.optimizer_config(),
    );
    let state = Arc::new(AppState::new(optimizer));

    let app = api::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
