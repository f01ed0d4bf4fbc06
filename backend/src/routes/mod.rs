//! Route definitions for the HarvestGuard backend

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Risk assessment
        .nest("/assessments", assessment_routes())
        // Environment data
        .nest("/environment", environment_routes())
}

/// Risk assessment routes
fn assessment_routes() -> Router<AppState> {
    Router::new()
        .route("/batch", post(handlers::assess_batch))
        .route("/portfolio", post(handlers::assess_portfolio))
}

/// Environment data routes
fn environment_routes() -> Router<AppState> {
    Router::new().route("/:location", get(handlers::get_environment))
}
