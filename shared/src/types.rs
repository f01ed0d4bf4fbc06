//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Supported languages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Bengali,
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Bengali => "bn",
            Language::English => "en",
        }
    }
}
