//! Crop sensitivity profiles

use rust_decimal::Decimal;

/// Per-crop weighting of environmental stress factors
#[derive(Debug, Clone, PartialEq)]
pub struct CropProfile {
    pub humidity_factor: Decimal,
    pub temperature_factor: Decimal,
    pub storage_sensitivity: Decimal,
}

impl CropProfile {
    /// Neutral profile applied to crops without a dedicated entry
    pub fn neutral() -> Self {
        Self {
            humidity_factor: Decimal::ONE,
            temperature_factor: Decimal::ONE,
            storage_sensitivity: Decimal::ONE,
        }
    }

    /// Look up the sensitivity profile for a crop name, case-insensitively
    pub fn for_crop(crop_type: &str) -> Self {
        let (humidity, temperature, storage) = match crop_type.trim().to_lowercase().as_str() {
            // Paddy spoils fast in humid storage
            "rice" | "paddy" => (12, 11, 12),
            "wheat" => (10, 10, 10),
            // Maize is the main aflatoxin carrier
            "maize" | "corn" => (13, 11, 12),
            "potato" => (11, 13, 8),
            "onion" => (9, 10, 11),
            "lentil" | "pulse" => (8, 9, 9),
            "jute" => (11, 9, 10),
            _ => return Self::neutral(),
        };
        Self {
            humidity_factor: Decimal::new(humidity, 1),
            temperature_factor: Decimal::new(temperature, 1),
            storage_sensitivity: Decimal::new(storage, 1),
        }
    }
}
