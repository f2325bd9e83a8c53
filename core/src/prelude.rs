use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of AI generation task being estimated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadType {
    Text,
    Image,
    Video,
}

impl WorkloadType {
    pub const ALL: [WorkloadType; 3] = [WorkloadType::Text, WorkloadType::Image, WorkloadType::Video];

    pub fn name(&self) -> &'static str {
        match self {
            WorkloadType::Text => "Text",
            WorkloadType::Image => "Image",
            WorkloadType::Video => "Video",
        }
    }

    /// Unit in which the request quantity is counted.
    pub fn unit_label(&self) -> &'static str {
        match self {
            WorkloadType::Text => "token",
            WorkloadType::Image => "image",
            WorkloadType::Video => "second",
        }
    }
}

impl fmt::Display for WorkloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkloadType {
    type Err = EstimateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(WorkloadType::Text),
            "image" => Ok(WorkloadType::Image),
            "video" => Ok(WorkloadType::Video),
            _ => Err(EstimateError::UnknownWorkload(value.to_string())),
        }
    }
}

/// Input bundle handed to the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedRequest")]
pub struct EstimationRequest {
    pub workload: WorkloadType,
    /// Tokens for text, images for image, seconds for video.
    pub quantity: f64,
    pub intensity_g_per_kwh: f64,
}

impl EstimationRequest {
    pub fn new(
        workload: WorkloadType,
        quantity: f64,
        intensity_g_per_kwh: f64,
    ) -> EstimateResult<Self> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(EstimateError::InvalidQuantity(quantity));
        }
        if !intensity_g_per_kwh.is_finite() || intensity_g_per_kwh < 0.0 {
            return Err(EstimateError::InvalidIntensity(intensity_g_per_kwh));
        }
        Ok(Self {
            workload,
            quantity,
            intensity_g_per_kwh,
        })
    }
}

#[derive(Deserialize)]
struct UncheckedRequest {
    workload: WorkloadType,
    quantity: f64,
    intensity_g_per_kwh: f64,
}

impl TryFrom<UncheckedRequest> for EstimationRequest {
    type Error = EstimateError;

    fn try_from(raw: UncheckedRequest) -> Result<Self, Self::Error> {
        Self::new(raw.workload, raw.quantity, raw.intensity_g_per_kwh)
    }
}

/// Energy, emissions and equivalences for one estimated task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub energy_wh: f64,
    pub energy_kwh: f64,
    /// Grams of CO2-equivalent.
    pub emissions_g: f64,
    pub google_search_equivalent: f64,
    pub led_bulb_hours_equivalent: f64,
    pub meters_driven: f64,
    pub coal_burned_grams: f64,
}

/// Errors raised while validating estimator inputs.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    #[error("unknown workload type: {0}")]
    UnknownWorkload(String),
    #[error("unknown country: {0}")]
    UnknownCountry(String),
    #[error("carbon intensity must be a non-negative number, got {0}")]
    InvalidIntensity(f64),
    #[error("quantity must be a non-negative number, got {0}")]
    InvalidQuantity(f64),
}

pub type EstimateResult<T> = Result<T, EstimateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workload_parses_case_insensitively() {
        assert_eq!("Video".parse::<WorkloadType>().unwrap(), WorkloadType::Video);
        assert_eq!(" text ".parse::<WorkloadType>().unwrap(), WorkloadType::Text);
        assert_eq!(
            "audio".parse::<WorkloadType>(),
            Err(EstimateError::UnknownWorkload("audio".into()))
        );
    }

    #[test]
    fn workload_serializes_snake_case() {
        let json = serde_json::to_string(&WorkloadType::Image).unwrap();
        assert_eq!(json, "\"image\"");
    }

    #[test]
    fn request_rejects_negative_inputs() {
        assert_eq!(
            EstimationRequest::new(WorkloadType::Text, -1.0, 366.0),
            Err(EstimateError::InvalidQuantity(-1.0))
        );
        assert_eq!(
            EstimationRequest::new(WorkloadType::Text, 1.0, -0.5),
            Err(EstimateError::InvalidIntensity(-0.5))
        );
        assert!(EstimationRequest::new(WorkloadType::Image, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn request_deserialization_is_validated() {
        let request: EstimationRequest = serde_json::from_str(
            r#"{"workload": "video", "quantity": 10.0, "intensity_g_per_kwh": 366.0}"#,
        )
        .unwrap();
        assert_eq!(request.workload, WorkloadType::Video);

        assert!(serde_json::from_str::<EstimationRequest>(
            r#"{"workload": "text", "quantity": -3.0, "intensity_g_per_kwh": 366.0}"#,
        )
        .is_err());
        assert!(serde_json::from_str::<EstimationRequest>(
            r#"{"workload": "text", "quantity": 3.0, "intensity_g_per_kwh": -1.0}"#,
        )
        .is_err());
    }

    #[test]
    fn request_accepts_zero_quantity() {
        let request = EstimationRequest::new(WorkloadType::Video, 0.0, 366.0).unwrap();
        assert_eq!(request.quantity, 0.0);
    }
}
