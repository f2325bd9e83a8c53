use carboncore::prelude::{EstimateResult, WorkloadType};
use carboncore::{estimate_tokens, Country, IntensityOverride};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generation model the user says they ran. Informational only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ModelChoice {
    #[default]
    #[serde(rename = "gpt-3.5")]
    Gpt35,
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "other")]
    Other,
}

impl ModelChoice {
    pub fn label(&self) -> &'static str {
        match self {
            ModelChoice::Gpt35 => "GPT-3.5",
            ModelChoice::Gpt4 => "GPT-4",
            ModelChoice::Other => "Other",
        }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModelChoice {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gpt-3.5" | "gpt35" => Ok(ModelChoice::Gpt35),
            "gpt-4" | "gpt4" => Ok(ModelChoice::Gpt4),
            "other" => Ok(ModelChoice::Other),
            _ => Err(format!("unknown model: {value}")),
        }
    }
}

/// Everything the user enters for one estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateForm {
    pub workload: WorkloadType,
    pub prompt: String,
    /// Image count or video seconds. Ignored for text.
    pub units: Option<u32>,
    pub country: Country,
    /// Manual grid intensity in g CO2/kWh.
    pub intensity_override: Option<f64>,
    pub model: ModelChoice,
}

impl Default for EstimateForm {
    fn default() -> Self {
        Self {
            workload: WorkloadType::Text,
            prompt: String::new(),
            units: None,
            country: Country::ALL[0],
            intensity_override: None,
            model: ModelChoice::default(),
        }
    }
}

impl EstimateForm {
    /// Quantity in the workload's unit: estimated tokens for text, otherwise the
    /// requested count with a floor of one.
    pub fn derive_quantity(&self) -> f64 {
        match self.workload {
            WorkloadType::Text => estimate_tokens(&self.prompt) as f64,
            WorkloadType::Image | WorkloadType::Video => self.units.unwrap_or(1).max(1) as f64,
        }
    }

    pub fn manual_override(&self) -> EstimateResult<Option<IntensityOverride>> {
        self.intensity_override
            .map(IntensityOverride::new)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carboncore::EstimateError;

    #[test]
    fn text_quantity_comes_from_prompt() {
        let form = EstimateForm {
            prompt: "summarise this article in three bullet points".into(),
            units: Some(40),
            ..Default::default()
        };
        assert_eq!(form.derive_quantity(), 9.0);

        let empty = EstimateForm::default();
        assert_eq!(empty.derive_quantity(), 0.0);
    }

    #[test]
    fn image_and_video_units_have_a_floor_of_one() {
        let images = EstimateForm {
            workload: WorkloadType::Image,
            units: Some(0),
            ..Default::default()
        };
        assert_eq!(images.derive_quantity(), 1.0);

        let video = EstimateForm {
            workload: WorkloadType::Video,
            units: Some(12),
            ..Default::default()
        };
        assert_eq!(video.derive_quantity(), 12.0);

        let unspecified = EstimateForm {
            workload: WorkloadType::Video,
            ..Default::default()
        };
        assert_eq!(unspecified.derive_quantity(), 1.0);
    }

    #[test]
    fn override_is_validated() {
        let form = EstimateForm {
            intensity_override: Some(-10.0),
            ..Default::default()
        };
        assert_eq!(
            form.manual_override(),
            Err(EstimateError::InvalidIntensity(-10.0))
        );
        assert_eq!(EstimateForm::default().manual_override(), Ok(None));
    }

    #[test]
    fn form_deserializes_with_defaults() {
        let form: EstimateForm =
            serde_json::from_str(r#"{"workload": "image", "units": 3, "model": "gpt-4"}"#)
                .unwrap();
        assert_eq!(form.workload, WorkloadType::Image);
        assert_eq!(form.country, Country::Austria);
        assert_eq!(form.model, ModelChoice::Gpt4);
        assert!(form.prompt.is_empty());
    }

    #[test]
    fn model_choice_parses_labels() {
        assert_eq!("GPT-4".parse::<ModelChoice>().unwrap(), ModelChoice::Gpt4);
        assert!("llama".parse::<ModelChoice>().is_err());
    }
}
