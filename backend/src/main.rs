//! HarvestGuard - Crop Storage Risk Platform Backend
//!
//! Assesses spoilage risk for stored agricultural produce from batch
//! telemetry and local weather, and aggregates risk across a farmer's
//! active batches.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use external::{AdvisoryClient, WeatherClient};
use services::EnvironmentCache;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub environment_cache: Arc<EnvironmentCache>,
    pub advisory: Option<AdvisoryClient>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hg_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting HarvestGuard Server");
    tracing::info!("Environment: {}", config.environment);

    // Environment source behind the TTL cache
    let weather_client = WeatherClient::new(
        config.environment_api.api_key.clone(),
        Duration::from_secs(config.environment_api.request_timeout_seconds),
    )?;
    let environment_cache = Arc::new(EnvironmentCache::new(
        Arc::new(weather_client),
        chrono::Duration::seconds(config.environment_api.cache_ttl_seconds),
    ));

    // Optional generative advisory client
    let advisory = if config.advisory.enabled {
        tracing::info!("Generative advisory service enabled");
        Some(AdvisoryClient::new(
            config.advisory.endpoint.clone(),
            config.advisory.api_key.clone(),
            Duration::from_secs(config.advisory.request_timeout_seconds),
        )?)
    } else {
        None
    };

    // Create application state
    let state = AppState {
        environment_cache,
        advisory,
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "HarvestGuard Crop Storage Risk Platform API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
