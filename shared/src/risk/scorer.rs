//! Continuous risk scoring for one batch
//!
//! Weighted additive score over ambient conditions and batch history,
//! clamped to [0, 100]. Out-of-range telemetry is clamped, never rejected.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{CropBatch, EnvironmentReading};
use crate::validation::{clamp_percent, is_protected_storage};

use super::profile::CropProfile;

const HUMIDITY_THRESHOLD: i32 = 65;
const HEAT_THRESHOLD_CELSIUS: i32 = 35;
const SUGGESTION_RAIN_THRESHOLD: i32 = 50;
const SUGGESTION_HUMIDITY_THRESHOLD: i32 = 75;
const SUGGESTION_INTERVENTION_FLOOR: i32 = 50;

/// Scorer output for one batch
#[derive(Debug, Clone, PartialEq)]
pub struct RiskScore {
    /// Weighted risk score, 0-100
    pub score: Decimal,
    /// Expected spoilage loss, 0-50
    pub expected_loss_percent: i32,
    pub suggestions: Vec<String>,
    pub suggestions_bn: Vec<String>,
}

/// Score a batch against an environment reading
///
/// Callers without environment data pass [`EnvironmentReading::neutral`];
/// the scorer itself never performs I/O.
pub fn score_batch(batch: &CropBatch, env: &EnvironmentReading) -> RiskScore {
    let profile = CropProfile::for_crop(&batch.crop_type);
    let humidity = Decimal::from(env.humidity_percent.clamp(0, 100));
    let rain_chance = Decimal::from(env.rain_chance_percent.clamp(0, 100));
    let intervention_rate = clamp_percent(batch.intervention_success_rate);

    let mut score = Decimal::ZERO;

    let excess_humidity = humidity - Decimal::from(HUMIDITY_THRESHOLD);
    if excess_humidity > Decimal::ZERO {
        score += excess_humidity * Decimal::new(8, 1) * profile.humidity_factor;
    }

    score += rain_chance * Decimal::new(35, 2);

    if env.temperature_celsius >= Decimal::from(HEAT_THRESHOLD_CELSIUS) {
        score += Decimal::from(8) * profile.temperature_factor;
    }

    if !is_protected_storage(&batch.storage_type) {
        score += Decimal::from(8) * profile.storage_sensitivity;
    }

    score += Decimal::from(batch.loss_events.max(0)) * Decimal::from(6);
    score -= intervention_rate * Decimal::new(25, 2);

    let score = score.clamp(Decimal::ZERO, Decimal::from(100));
    let expected_loss = (score * Decimal::new(35, 2))
        .round()
        .min(Decimal::from(50));

    let (suggestions, suggestions_bn) = build_suggestions(env, intervention_rate);

    RiskScore {
        score,
        expected_loss_percent: expected_loss.to_i32().unwrap_or(0),
        suggestions,
        suggestions_bn,
    }
}

/// Actionable suggestions, each gated by its own threshold; order follows
/// the check order and entries are additive
fn build_suggestions(
    env: &EnvironmentReading,
    intervention_rate: Decimal,
) -> (Vec<String>, Vec<String>) {
    let mut suggestions = Vec::new();
    let mut suggestions_bn = Vec::new();

    if env.rain_chance_percent > SUGGESTION_RAIN_THRESHOLD {
        suggestions.push(format!(
            "High rain chance ({}%): cover stored produce and clear drainage around the store",
            env.rain_chance_percent
        ));
        suggestions_bn.push(format!(
            "বৃষ্টির সম্ভাবনা বেশি ({}%): মজুত শস্য ঢেকে দিন এবং গুদামের চারপাশের পানি নিষ্কাশন পরিষ্কার রাখুন",
            env.rain_chance_percent
        ));
    }

    if env.humidity_percent > SUGGESTION_HUMIDITY_THRESHOLD {
        suggestions.push(format!(
            "Humidity at {}%: ventilate the store or place desiccant near the stock",
            env.humidity_percent
        ));
        suggestions_bn.push(format!(
            "আর্দ্রতা {}%: গুদামে বাতাস চলাচলের ব্যবস্থা করুন বা শস্যের কাছে শুষ্ককারক রাখুন",
            env.humidity_percent
        ));
    }

    if env.temperature_celsius >= Decimal::from(HEAT_THRESHOLD_CELSIUS) {
        suggestions.push(format!(
            "Heat stress at {}°C: move stock into shade and improve airflow",
            env.temperature_celsius
        ));
        suggestions_bn.push(format!(
            "তাপমাত্রা {}°সে: শস্য ছায়ায় সরান এবং বায়ু চলাচল বাড়ান",
            env.temperature_celsius
        ));
    }

    if intervention_rate < Decimal::from(SUGGESTION_INTERVENTION_FLOOR) {
        suggestions.push(
            "Past interventions were under 50% effective: review drying and handling practices"
                .to_string(),
        );
        suggestions_bn.push(
            "আগের পদক্ষেপগুলোর কার্যকারিতা ৫০%-এর কম: শুকানো ও সংরক্ষণ পদ্ধতি পুনর্বিবেচনা করুন"
                .to_string(),
        );
    }

    if suggestions.is_empty() {
        suggestions.push("Conditions are stable: continue routine monitoring".to_string());
        suggestions_bn.push("পরিস্থিতি স্থিতিশীল: নিয়মিত পর্যবেক্ষণ চালিয়ে যান".to_string());
    }

    (suggestions, suggestions_bn)
}
