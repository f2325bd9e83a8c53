//! Grid carbon intensity lookup.

pub mod country;
pub mod resolver;
pub mod table;

pub use country::Country;
pub use resolver::{resolve, IntensityOverride, IntensityResolver};
pub use table::{IntensityTable, EU_DEFAULT_INTENSITY, GLOBAL_AVERAGE_INTENSITY};
