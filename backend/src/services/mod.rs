//! Business logic services for the HarvestGuard platform

pub mod assessment;
pub mod environment;

pub use assessment::AssessmentService;
pub use environment::EnvironmentCache;
