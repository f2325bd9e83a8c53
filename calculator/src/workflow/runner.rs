use crate::input::EstimateForm;
use anyhow::Context;
use carboncore::estimation::EmissionsEstimator;
use carboncore::prelude::{EstimationRequest, EstimationResult};
use carboncore::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};
use carboncore::{Country, IntensityResolver, IntensityTable};
use std::sync::Arc;

pub struct EstimateOutcome {
    pub form: EstimateForm,
    pub request: EstimationRequest,
    /// `None` when the form described nothing to estimate.
    pub result: Option<EstimationResult>,
}

impl EstimateOutcome {
    /// Single line appended to the report log.
    pub fn log_line(&self) -> String {
        let emissions = self
            .result
            .map(|result| format!("{:.4}", result.emissions_g))
            .unwrap_or_else(|| "none".into());
        format!(
            "workload={} quantity={} country={} intensity={} model={} emissions_g={}\n",
            self.request.workload,
            self.request.quantity,
            self.form.country,
            self.request.intensity_g_per_kwh,
            self.form.model,
            emissions
        )
    }
}

#[derive(Clone)]
pub struct Runner {
    resolver: IntensityResolver,
    estimator: EmissionsEstimator,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(table: IntensityTable) -> Self {
        Self {
            resolver: IntensityResolver::new(table),
            estimator: EmissionsEstimator::new(),
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    pub fn execute(&self, form: &EstimateForm) -> anyhow::Result<EstimateOutcome> {
        let logger = LogManager::new();
        let outcome = self.evaluate(form, &logger);
        match &outcome {
            Ok(EstimateOutcome { result: Some(_), .. }) => self.metrics.record_estimate(),
            Ok(EstimateOutcome { result: None, .. }) => {
                logger.record("nothing to estimate for an empty request");
                self.metrics.record_empty();
            }
            Err(err) => {
                logger.warn(&format!("rejected estimate request: {:#}", err));
                self.metrics.record_rejected();
            }
        }
        outcome
    }

    fn evaluate(&self, form: &EstimateForm, logger: &LogManager) -> anyhow::Result<EstimateOutcome> {
        let manual = form
            .manual_override()
            .context("validating manual intensity")?;
        let intensity = self.resolver.resolve(form.country, manual);
        let request = EstimationRequest::new(form.workload, form.derive_quantity(), intensity)
            .context("building estimation request")?;

        let result = self
            .estimator
            .estimate(request.workload, request.quantity, request.intensity_g_per_kwh);
        if let Some(result) = &result {
            logger.record(&format!(
                "{} x{} {} at {} g/kWh -> {:.2} Wh, {:.4} g CO2-eq",
                request.workload,
                request.quantity,
                request.workload.unit_label(),
                request.intensity_g_per_kwh,
                result.energy_wh,
                result.emissions_g
            ));
        }

        Ok(EstimateOutcome {
            form: form.clone(),
            request,
            result,
        })
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Country defaults currently in effect, in display order.
    pub fn country_defaults(&self) -> Vec<(Country, f64)> {
        Country::ALL
            .iter()
            .map(|&country| (country, self.resolver.location_default(country)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ModelChoice;
    use carboncore::prelude::WorkloadType;

    #[test]
    fn runner_estimates_image_request() {
        let runner = Runner::new(IntensityTable::eu_default());
        let form = EstimateForm {
            workload: WorkloadType::Image,
            units: Some(3),
            intensity_override: Some(475.0),
            ..Default::default()
        };
        let outcome = runner.execute(&form).unwrap();
        let result = outcome.result.unwrap();
        assert!((result.emissions_g - 7.125).abs() < 1e-9);
        assert_eq!(runner.metrics().estimated, 1);
    }

    #[test]
    fn runner_reports_empty_prompt_as_no_result() {
        let runner = Runner::new(IntensityTable::eu_default());
        let outcome = runner.execute(&EstimateForm::default()).unwrap();
        assert!(outcome.result.is_none());
        assert_eq!(outcome.request.quantity, 0.0);
        assert_eq!(runner.metrics().empty, 1);
        assert!(outcome.log_line().ends_with("emissions_g=none\n"));
    }

    #[test]
    fn runner_rejects_negative_override() {
        let runner = Runner::new(IntensityTable::eu_default());
        let form = EstimateForm {
            prompt: "hello world".into(),
            intensity_override: Some(-1.0),
            ..Default::default()
        };
        assert!(runner.execute(&form).is_err());
        assert_eq!(runner.metrics().rejected, 1);
    }

    #[test]
    fn runner_uses_custom_table_and_fallback() {
        let mut table = IntensityTable::eu_default().with_value(Country::France, 56.0);
        table.remove(Country::Malta);
        let runner = Runner::new(table);

        let form = EstimateForm {
            workload: WorkloadType::Video,
            units: Some(10),
            country: Country::France,
            model: ModelChoice::Gpt4,
            ..Default::default()
        };
        let outcome = runner.execute(&form).unwrap();
        assert_eq!(outcome.request.intensity_g_per_kwh, 56.0);
        assert!(outcome.log_line().contains("country=France"));
        assert!(outcome.log_line().contains("model=GPT-4"));

        let defaults = runner.country_defaults();
        assert_eq!(defaults.len(), Country::ALL.len());
        assert!(defaults.contains(&(Country::Malta, 475.0)));
    }
}
