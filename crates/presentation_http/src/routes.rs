//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Web page
        .route("/", get(handlers::page::index))
        .route("/forecast", get(handlers::page::forecast_page))
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // JSON API (v1)
        .route("/api/v1/forecast", get(handlers::forecast::get_forecast))
        // Attach state
        .with_state(state)
}
