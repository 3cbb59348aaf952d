//! Waypoint server - turns relative flight offsets into Litchi mission CSVs.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wpgen_server::api;
use wpgen_server::config::Config;
use wpgen_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wpgen_server=debug".parse()?),
        )
        .init();

    tracing::info!("Starting waypoint server...");

    let config = Config::from_env();
    let port = config.server_port;
    tracing::info!(
        "Output mode {:?}, directory {}",
        config.output_mode,
        config.output_dir.display()
    );
    let state = Arc::new(AppState::new(config));

    let app = api::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
