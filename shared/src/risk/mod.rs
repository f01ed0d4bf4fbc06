//! Deterministic storage-risk engine
//!
//! Two intentionally separate views of batch risk: a continuous weighted
//! score used for portfolio aggregation ([`scorer`]) and a threshold ladder
//! over moisture/temperature that yields a discrete tier and an estimated
//! time to critical loss ([`etcl`]). The two may disagree in magnitude for
//! a single batch.

pub mod etcl;
pub mod portfolio;
pub mod profile;
pub mod recommendation;
pub mod scorer;

pub use etcl::{classify, etcl_label, sample, EtclClassification};
pub use portfolio::aggregate;
pub use profile::CropProfile;
pub use recommendation::recommend;
pub use scorer::{score_batch, RiskScore};
