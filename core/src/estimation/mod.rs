//! Workload energy model and emissions estimation.

pub mod equivalence;
pub mod estimator;
pub mod factors;
pub mod tokens;

pub use equivalence::Equivalences;
pub use estimator::{estimate, estimate_request, EmissionsEstimator};
pub use factors::EnergyFactorTable;
pub use tokens::estimate_tokens;
