//! Risk assessment models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discrete risk tier of a stored batch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
            RiskLevel::Critical => write!(f, "Critical"),
        }
    }
}

/// The engine's full output for one batch
///
/// Always complete: when environment data was unavailable the neutral
/// defaults are used and `environment_degraded` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub batch_id: String,
    pub risk_level: RiskLevel,
    /// Continuous weighted score, 0-100
    pub risk_score: Decimal,
    /// Expected spoilage loss, 0-50
    pub expected_loss_percent: i32,
    /// Estimated time to critical loss in hours
    pub etcl_hours: Decimal,
    pub etcl_label: String,
    pub etcl_label_bn: String,
    pub aflatoxin_risk: bool,
    /// Moisture value actually used (may be synthesized from humidity)
    pub moisture_percent: Decimal,
    /// Temperature value actually used (may be synthesized from ambient air)
    pub temperature_celsius: Decimal,
    pub recommendation: String,
    pub recommendation_bn: String,
    pub suggestions: Vec<String>,
    pub suggestions_bn: Vec<String>,
    pub environment_degraded: bool,
}

/// Aggregate risk over a farmer's active batches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioSummary {
    pub batch_count: usize,
    /// Mean risk score across batches, rounded to a whole number
    pub average_risk_score: Decimal,
    /// Mean expected loss across batches, rounded to a whole number
    pub average_expected_loss_percent: Decimal,
}
