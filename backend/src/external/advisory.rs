//! Generative advisory service client
//!
//! Optional enrichment of the deterministic recommendation text. Callers
//! must treat every failure here as recoverable and keep the deterministic
//! output; this client never influences the numeric risk results.

use std::time::Duration;

use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared::Language;

use crate::error::{AppError, AppResult};

/// Client for the generative advisory microservice
#[derive(Clone)]
pub struct AdvisoryClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

/// Numeric context the advisory service generates text from
#[derive(Debug, Serialize)]
pub struct AdvisoryRequest {
    pub crop_type: String,
    pub storage_type: String,
    pub moisture_percent: Decimal,
    pub temperature_celsius: Decimal,
    pub days_in_storage: i64,
    pub etcl_hours: Decimal,
    /// Locale the advice should be written in
    pub language: Language,
}

/// Free-text advice returned by the service
#[derive(Debug, Deserialize)]
pub struct AdvisoryText {
    pub advice: String,
    #[serde(default)]
    pub advice_bn: Option<String>,
}

impl AdvisoryClient {
    pub fn new(endpoint: String, api_key: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// Request enriched advice for one batch
    pub async fn advise(&self, request: &AdvisoryRequest) -> AppResult<AdvisoryText> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::AdvisoryUnavailable(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::AdvisoryUnavailable(format!(
                "advisory API returned {}",
                status
            )));
        }

        let text: AdvisoryText = response
            .json()
            .await
            .map_err(|e| AppError::AdvisoryUnavailable(format!("malformed response: {}", e)))?;

        if text.advice.trim().is_empty() {
            return Err(AppError::AdvisoryUnavailable(
                "empty advice in response".to_string(),
            ));
        }

        Ok(text)
    }
}
