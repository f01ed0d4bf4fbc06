//! Configuration management for the HarvestGuard backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with HG_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Environment data source configuration
    pub environment_api: EnvironmentApiConfig,

    /// Generative advisory service configuration
    pub advisory: AdvisoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EnvironmentApiConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: String,

    /// Upstream request timeout in seconds
    pub request_timeout_seconds: u64,

    /// Time-to-live for cached readings in seconds
    pub cache_ttl_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdvisoryConfig {
    /// Whether the generative advisory path is enabled
    pub enabled: bool,

    /// Advisory service endpoint
    pub endpoint: String,

    /// Advisory service API key
    pub api_key: String,

    /// Advisory request timeout in seconds
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("HG_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default(
                "environment_api.api_endpoint",
                "https://api.openweathermap.org/data/2.5",
            )?
            .set_default("environment_api.api_key", "")?
            .set_default("environment_api.request_timeout_seconds", 8)?
            .set_default("environment_api.cache_ttl_seconds", 300)?
            .set_default("advisory.enabled", false)?
            .set_default("advisory.endpoint", "")?
            .set_default("advisory.api_key", "")?
            .set_default("advisory.request_timeout_seconds", 10)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (HG_ prefix)
            .add_source(
                Environment::with_prefix("HG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
