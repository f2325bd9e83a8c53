use crate::workflow::runner::EstimateOutcome;
use carboncore::prelude::{EstimationResult, WorkloadType};
use carboncore::report::{ComparisonChart, EquivalenceSummary, DISCLAIMER_NOTES};
use carboncore::Country;
use serde::{Deserialize, Serialize};

/// Latest estimate as served to the visualizer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VisualizationModel {
    pub workload: Option<WorkloadType>,
    pub country: Option<Country>,
    pub model_label: String,
    pub quantity: f64,
    pub unit_label: String,
    pub intensity_g_per_kwh: f64,
    pub result: Option<EstimationResult>,
    pub chart: ComparisonChart,
    pub summary: EquivalenceSummary,
    pub notes: Vec<String>,
}

impl VisualizationModel {
    pub fn from_outcome(outcome: &EstimateOutcome) -> Self {
        let (chart, summary) = match &outcome.result {
            Some(result) => (
                ComparisonChart::from_result(result),
                EquivalenceSummary::from_result(result),
            ),
            None => (ComparisonChart::default(), EquivalenceSummary::default()),
        };

        Self {
            workload: Some(outcome.request.workload),
            country: Some(outcome.form.country),
            model_label: outcome.form.model.label().to_string(),
            quantity: outcome.request.quantity,
            unit_label: outcome.request.workload.unit_label().to_string(),
            intensity_g_per_kwh: outcome.request.intensity_g_per_kwh,
            result: outcome.result,
            chart,
            summary,
            notes: DISCLAIMER_NOTES.iter().map(|note| note.to_string()).collect(),
        }
    }
}
