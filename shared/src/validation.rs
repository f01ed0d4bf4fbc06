//! Validation utilities for the HarvestGuard platform
//!
//! Telemetry from field sensors may report transient extremes; values are
//! clamped into range rather than rejected.

use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;

static PROTECTED_STORAGE_RE: OnceLock<Regex> = OnceLock::new();

/// Check whether a free-text storage type describes protected storage
/// (sealed bags, airtight drums, containers)
pub fn is_protected_storage(storage_type: &str) -> bool {
    let re = PROTECTED_STORAGE_RE
        .get_or_init(|| Regex::new(r"(?i)sealed|airtight|container").expect("valid pattern"));
    re.is_match(storage_type)
}

/// Clamp a percentage value into [0, 100]
pub fn clamp_percent(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::from(100))
}

/// Validate a location string used as an environment-cache key
pub fn validate_location(location: &str) -> Result<(), &'static str> {
    if location.trim().is_empty() {
        return Err("location must not be empty");
    }
    Ok(())
}
