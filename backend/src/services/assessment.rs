//! Risk assessment orchestration
//!
//! Combines the environment cache with the pure risk engine from the
//! shared crate. Every assessment returns a complete result: when the
//! environment source is unreachable the documented neutral defaults are
//! substituted and the result is flagged as degraded.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use validator::Validate;

use shared::risk::{aggregate, classify, etcl_label, recommend, score_batch};
use shared::{
    clamp_percent, CropBatch, EnvironmentReading, Language, PortfolioSummary, RiskAssessment,
};

use crate::error::{AppError, AppResult};
use crate::external::advisory::{AdvisoryClient, AdvisoryRequest};
use crate::services::environment::EnvironmentCache;

/// Assessment service for batches and portfolios
#[derive(Clone)]
pub struct AssessmentService {
    cache: Arc<EnvironmentCache>,
    advisory: Option<AdvisoryClient>,
}

impl AssessmentService {
    /// Create a new AssessmentService instance
    pub fn new(cache: Arc<EnvironmentCache>) -> Self {
        Self {
            cache,
            advisory: None,
        }
    }

    /// Create a new AssessmentService with a generative advisory client
    pub fn with_advisory(cache: Arc<EnvironmentCache>, advisory: AdvisoryClient) -> Self {
        Self {
            cache,
            advisory: Some(advisory),
        }
    }

    /// Assess one batch
    pub async fn assess_batch(&self, batch: &CropBatch) -> AppResult<RiskAssessment> {
        batch.validate().map_err(|e| AppError::InvalidBatch {
            message: e.to_string(),
            message_bn: "ব্যাচের পরিচয় তথ্য অসম্পূর্ণ".to_string(),
        })?;

        let (env, degraded) = self.resolve_environment(&batch.storage_location).await;

        // Missing telemetry equilibrates with the ambient air
        let moisture = batch
            .moisture_percent
            .map(clamp_percent)
            .unwrap_or_else(|| Decimal::from(env.humidity_percent));
        let temperature = batch.temperature_celsius.unwrap_or(env.temperature_celsius);

        let score = score_batch(batch, &env);
        let classification = classify(moisture, temperature);
        let (label, label_bn) = etcl_label(classification.etcl_hours);
        let (mut recommendation, mut recommendation_bn) =
            recommend(&classification, moisture, temperature);

        if let Some(advisory) = &self.advisory {
            let request = AdvisoryRequest {
                crop_type: batch.crop_type.clone(),
                storage_type: batch.storage_type.clone(),
                moisture_percent: moisture,
                temperature_celsius: temperature,
                days_in_storage: batch.days_in_storage(Utc::now()),
                etcl_hours: classification.etcl_hours,
                language: Language::default(),
            };
            match advisory.advise(&request).await {
                Ok(text) => {
                    recommendation = text.advice;
                    if let Some(bn) = text.advice_bn {
                        recommendation_bn = bn;
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        batch_id = %batch.id,
                        error = %err,
                        "advisory service failed, keeping deterministic recommendation"
                    );
                }
            }
        }

        Ok(RiskAssessment {
            batch_id: batch.id.clone(),
            risk_level: classification.risk_level,
            risk_score: score.score,
            expected_loss_percent: score.expected_loss_percent,
            etcl_hours: classification.etcl_hours,
            etcl_label: label.to_string(),
            etcl_label_bn: label_bn.to_string(),
            aflatoxin_risk: classification.aflatoxin_risk,
            moisture_percent: moisture,
            temperature_celsius: temperature,
            recommendation,
            recommendation_bn,
            suggestions: score.suggestions,
            suggestions_bn: score.suggestions_bn,
            environment_degraded: degraded,
        })
    }

    /// Aggregate risk over a farmer's batches; only active batches count
    pub async fn assess_portfolio(
        &self,
        batches: &[CropBatch],
    ) -> AppResult<Option<PortfolioSummary>> {
        let mut scores = Vec::new();

        for batch in batches.iter().filter(|b| b.is_active()) {
            if let Err(err) = batch.validate() {
                tracing::warn!(
                    batch_id = %batch.id,
                    error = %err,
                    "skipping invalid batch in portfolio"
                );
                continue;
            }
            // One batch's environment failure never aborts the others
            let (env, _) = self.resolve_environment(&batch.storage_location).await;
            scores.push(score_batch(batch, &env));
        }

        Ok(aggregate(&scores))
    }

    async fn resolve_environment(&self, location: &str) -> (EnvironmentReading, bool) {
        match self.cache.get(location).await {
            Ok(reading) => (reading, false),
            Err(err) => {
                tracing::warn!(
                    location = %location,
                    error = %err,
                    "environment unavailable, assessing with neutral defaults"
                );
                (EnvironmentReading::neutral(location, Utc::now()), true)
            }
        }
    }
}
