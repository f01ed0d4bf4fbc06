//! Estimated Time to Critical Loss classification
//!
//! First-match-wins threshold ladder over moisture and temperature. Tier
//! classification and label selection are two separate lookups: the label
//! is derived from the numeric hour value, so a high-tier batch can sit on
//! either side of the 48-hour label boundary.

use rand::Rng;
use rust_decimal::Decimal;

use crate::models::RiskLevel;

/// ETCL hour range for one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EtclBand {
    pub base_hours: i64,
    pub spread_hours: i64,
}

impl RiskLevel {
    /// Output hour range defined by the tier
    pub fn etcl_band(&self) -> EtclBand {
        match self {
            RiskLevel::Critical => EtclBand {
                base_hours: 24,
                spread_hours: 24,
            },
            RiskLevel::High => EtclBand {
                base_hours: 48,
                spread_hours: 48,
            },
            RiskLevel::Medium => EtclBand {
                base_hours: 72,
                spread_hours: 72,
            },
            RiskLevel::Low => EtclBand {
                base_hours: 144,
                spread_hours: 168,
            },
        }
    }
}

/// Discrete classification of one batch's telemetry
#[derive(Debug, Clone, PartialEq)]
pub struct EtclClassification {
    pub risk_level: RiskLevel,
    pub etcl_hours: Decimal,
    pub aflatoxin_risk: bool,
}

fn tier_for(moisture_percent: Decimal, temperature_celsius: Decimal) -> RiskLevel {
    let m = moisture_percent;
    let t = temperature_celsius;
    if m > Decimal::from(75) && t > Decimal::from(30) {
        RiskLevel::Critical
    } else if m > Decimal::from(70) || t > Decimal::from(28) {
        RiskLevel::High
    } else if m > Decimal::from(65) || t > Decimal::from(25) {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Deterministic classification used on the assessment path
///
/// The hour estimate is the tier band's midpoint and the aflatoxin flag is
/// set only for the critical tier, so identical inputs always produce
/// identical output.
pub fn classify(moisture_percent: Decimal, temperature_celsius: Decimal) -> EtclClassification {
    let risk_level = tier_for(moisture_percent, temperature_celsius);
    let band = risk_level.etcl_band();
    EtclClassification {
        risk_level,
        etcl_hours: Decimal::from(band.base_hours + band.spread_hours / 2),
        aflatoxin_risk: risk_level == RiskLevel::Critical,
    }
}

/// Classification with a sampled hour estimate for human-facing display
///
/// Draws `base + random() * spread` from the tier band; the high tier's
/// aflatoxin flag becomes a coin flip. Never used where idempotent output
/// is required.
pub fn sample<R: Rng>(
    moisture_percent: Decimal,
    temperature_celsius: Decimal,
    rng: &mut R,
) -> EtclClassification {
    let risk_level = tier_for(moisture_percent, temperature_celsius);
    let band = risk_level.etcl_band();
    let offset = rng.gen::<f64>() * band.spread_hours as f64;
    let etcl_hours = Decimal::from(band.base_hours)
        + Decimal::from_f64_retain(offset).unwrap_or_default().round_dp(1);
    let aflatoxin_risk = match risk_level {
        RiskLevel::Critical => true,
        RiskLevel::High => rng.gen_bool(0.5),
        _ => false,
    };
    EtclClassification {
        risk_level,
        etcl_hours,
        aflatoxin_risk,
    }
}

/// Bilingual label derived from the numeric hour value, not the tier name
pub fn etcl_label(etcl_hours: Decimal) -> (&'static str, &'static str) {
    if etcl_hours < Decimal::from(24) {
        ("Critical – less than 1 day", "চরম – ১ দিনের কম")
    } else if etcl_hours < Decimal::from(48) {
        ("High – 1–2 days", "উচ্চ – ১–২ দিন")
    } else if etcl_hours < Decimal::from(96) {
        ("Medium – 2–4 days", "মাঝারি – ২–৪ দিন")
    } else {
        ("Low – 4+ days", "নিম্ন – ৪+ দিন")
    }
}
