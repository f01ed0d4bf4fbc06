//! Domain models for the HarvestGuard platform

mod assessment;
mod batch;
mod environment;

pub use assessment::*;
pub use batch::*;
pub use environment::*;
