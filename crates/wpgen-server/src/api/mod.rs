//! API routes for the waypoint server.

pub mod generate;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// Create the API router.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/generate", post(generate::generate_csv))
}

#[cfg(test)]
mod tests;
