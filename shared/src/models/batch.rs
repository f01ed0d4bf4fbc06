//! Crop batch models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A farmer-owned unit of harvested produce in storage
///
/// Batches are created and mutated by the external batch store; the risk
/// engine only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CropBatch {
    #[validate(length(min = 1, message = "batch id must not be empty"))]
    pub id: String,
    #[validate(length(min = 1, message = "owner id must not be empty"))]
    pub owner_id: String,
    /// Crop name matched against the sensitivity profile table
    /// (e.g. "Rice", "Wheat"); unknown crops get neutral factors
    pub crop_type: String,
    pub estimated_weight_kg: Decimal,
    pub harvest_date: NaiveDate,
    /// Named administrative region, used as the environment-cache key
    pub storage_location: String,
    /// Free-text storage classification; matched against
    /// sealed/airtight/container to detect protected storage
    pub storage_type: String,
    pub status: BatchStatus,
    /// Grain moisture in % w/w; synthesized from ambient humidity when absent
    #[serde(default)]
    pub moisture_percent: Option<Decimal>,
    /// Storage temperature in °C; synthesized from ambient air when absent
    #[serde(default)]
    pub temperature_celsius: Option<Decimal>,
    /// Count of prior spoilage incidents
    #[serde(default)]
    pub loss_events: i32,
    /// Effectiveness of past mitigations, 0-100
    #[serde(default)]
    pub intervention_success_rate: Decimal,
    pub created_at: DateTime<Utc>,
}

impl CropBatch {
    pub fn is_active(&self) -> bool {
        self.status == BatchStatus::Active
    }

    /// Whole days the batch has spent in storage as of `now`
    pub fn days_in_storage(&self, now: DateTime<Utc>) -> i64 {
        (now.date_naive() - self.harvest_date).num_days().max(0)
    }
}

/// Lifecycle status of a batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Active,
    Completed,
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchStatus::Active => write!(f, "Active"),
            BatchStatus::Completed => write!(f, "Completed"),
        }
    }
}
