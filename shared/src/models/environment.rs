//! Environmental data models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Neutral fallback values used when no environment source is reachable
pub const NEUTRAL_HUMIDITY_PERCENT: i32 = 70;
pub const NEUTRAL_RAIN_CHANCE_PERCENT: i32 = 0;
pub const NEUTRAL_TEMPERATURE_CELSIUS: i32 = 28;

/// A weather snapshot for one named location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentReading {
    pub location: String,
    pub temperature_celsius: Decimal,
    pub humidity_percent: i32,
    pub rain_chance_percent: i32,
    pub wind_speed_kmh: Decimal,
    pub condition: String,
    pub forecast: Vec<DailyForecast>,
    /// Timestamp used for cache TTL expiry
    pub fetched_at: DateTime<Utc>,
}

impl EnvironmentReading {
    /// Reading with neutral defaults, substituted when the environment
    /// source is unavailable so an assessment can still complete
    pub fn neutral(location: &str, now: DateTime<Utc>) -> Self {
        Self {
            location: location.to_string(),
            temperature_celsius: Decimal::from(NEUTRAL_TEMPERATURE_CELSIUS),
            humidity_percent: NEUTRAL_HUMIDITY_PERCENT,
            rain_chance_percent: NEUTRAL_RAIN_CHANCE_PERCENT,
            wind_speed_kmh: Decimal::ZERO,
            condition: "Unknown".to_string(),
            forecast: Vec::new(),
            fetched_at: now,
        }
    }
}

/// One day of forecast data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Short day label, e.g. "Mon"
    pub day: String,
    pub date: NaiveDate,
    pub max_celsius: Decimal,
    pub min_celsius: Decimal,
    pub rain_chance_percent: i32,
    pub humidity_percent: i32,
}
