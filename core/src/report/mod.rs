//! Presentation-ready views of an estimation result.

pub mod chart;
pub mod summary;

pub use chart::{ComparisonBar, ComparisonChart};
pub use summary::{EquivalenceSummary, DISCLAIMER_NOTES};
