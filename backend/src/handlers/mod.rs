//! HTTP handlers for the HarvestGuard backend

pub mod assessment;
pub mod environment;
pub mod health;

pub use assessment::*;
pub use environment::*;
pub use health::*;
