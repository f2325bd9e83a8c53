pub mod form;

pub use form::{EstimateForm, ModelChoice};
