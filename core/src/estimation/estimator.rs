use crate::estimation::equivalence::Equivalences;
use crate::estimation::factors::EnergyFactorTable;
use crate::prelude::{EstimationRequest, EstimationResult, WorkloadType};

/// Converts a workload quantity and grid intensity into energy and emissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmissionsEstimator {
    factors: EnergyFactorTable,
}

impl EmissionsEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` when there is nothing to estimate (`quantity <= 0` or NaN).
    pub fn estimate(
        &self,
        workload: WorkloadType,
        quantity: f64,
        intensity_g_per_kwh: f64,
    ) -> Option<EstimationResult> {
        if quantity.is_nan() || quantity <= 0.0 {
            return None;
        }

        let energy_wh = quantity * self.factors.wh_per_unit(workload);
        let energy_kwh = energy_wh / 1000.0;
        let emissions_g = energy_kwh * intensity_g_per_kwh;
        let equivalences = Equivalences::from_emissions(emissions_g);

        Some(EstimationResult {
            energy_wh,
            energy_kwh,
            emissions_g,
            google_search_equivalent: equivalences.google_searches,
            led_bulb_hours_equivalent: equivalences.led_bulb_hours,
            meters_driven: equivalences.meters_driven,
            coal_burned_grams: equivalences.coal_burned_grams,
        })
    }
}

pub fn estimate(
    workload: WorkloadType,
    quantity: f64,
    intensity_g_per_kwh: f64,
) -> Option<EstimationResult> {
    EmissionsEstimator::new().estimate(workload, quantity, intensity_g_per_kwh)
}

pub fn estimate_request(request: &EstimationRequest) -> Option<EstimationResult> {
    estimate(
        request.workload,
        request.quantity,
        request.intensity_g_per_kwh,
    )
}
