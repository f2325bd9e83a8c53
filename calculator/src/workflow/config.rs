use crate::input::{EstimateForm, ModelChoice};
use anyhow::Context;
use carboncore::prelude::WorkloadType;
use carboncore::{Country, IntensityTable};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Scenario description loaded from YAML or assembled from CLI flags.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub workload: WorkloadType,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub units: Option<u32>,
    pub country: Country,
    #[serde(default)]
    pub intensity_override: Option<f64>,
    #[serde(default)]
    pub model: ModelChoice,
    /// Per-country intensities layered over the EU defaults.
    #[serde(default)]
    pub intensity_table: Option<IntensityTable>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ScenarioConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading scenario config {}", path_ref.display()))?;
        let config: ScenarioConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing scenario config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        workload: WorkloadType,
        prompt: String,
        units: Option<u32>,
        country: Country,
        intensity_override: Option<f64>,
        model: ModelChoice,
    ) -> Self {
        Self {
            workload,
            prompt,
            units,
            country,
            intensity_override,
            model,
            intensity_table: None,
            description: None,
        }
    }

    pub fn to_form(&self) -> EstimateForm {
        EstimateForm {
            workload: self.workload,
            prompt: self.prompt.clone(),
            units: self.units,
            country: self.country,
            intensity_override: self.intensity_override,
            model: self.model,
        }
    }

    pub fn intensity_table(&self) -> IntensityTable {
        match &self.intensity_table {
            Some(custom) => IntensityTable::eu_default().merged(custom),
            None => IntensityTable::eu_default(),
        }
    }
}
