//! Portfolio aggregation over per-batch scores

use rust_decimal::Decimal;

use crate::models::PortfolioSummary;

use super::scorer::RiskScore;

/// Arithmetic mean of per-batch scorer outputs
///
/// Returns `None` for an empty set so callers can distinguish "no active
/// batches" from "zero risk".
pub fn aggregate(scores: &[RiskScore]) -> Option<PortfolioSummary> {
    if scores.is_empty() {
        return None;
    }

    let count = Decimal::from(scores.len());
    let score_sum: Decimal = scores.iter().map(|s| s.score).sum();
    let loss_sum: Decimal = scores
        .iter()
        .map(|s| Decimal::from(s.expected_loss_percent))
        .sum();

    Some(PortfolioSummary {
        batch_count: scores.len(),
        average_risk_score: (score_sum / count).round(),
        average_expected_loss_percent: (loss_sum / count).round(),
    })
}
