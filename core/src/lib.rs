//! Estimation engine for the AI carbon footprint calculator.
//!
//! Maps a generation workload (text tokens, images, video seconds) and a grid
//! carbon intensity to the energy consumed, the emissions produced and a set of
//! everyday equivalences. Presentation layers build on [`report`].

pub mod estimation;
pub mod intensity;
pub mod prelude;
pub mod report;
pub mod telemetry;

pub use estimation::{estimate, estimate_request, estimate_tokens};
pub use intensity::{resolve, Country, IntensityOverride, IntensityResolver, IntensityTable};
pub use prelude::{EstimateError, EstimateResult, EstimationRequest, EstimationResult, WorkloadType};
