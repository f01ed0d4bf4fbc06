//! Shared types and the risk engine for the HarvestGuard platform
//!
//! This crate contains the domain models and the deterministic storage-risk
//! engine shared between the backend and other components of the system.

pub mod models;
pub mod risk;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
