use crate::prelude::EstimationResult;
use serde::{Deserialize, Serialize};

/// Caveats shown alongside every estimate.
pub const DISCLAIMER_NOTES: [&str; 3] = [
    "Coefficients are based on published benchmarks and subject to change.",
    "All values are indicative and reflect average energy intensity by country.",
    "This app is intended for awareness, not official carbon reporting.",
];

/// Human-readable sentences describing an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EquivalenceSummary {
    pub headline: String,
    pub lines: Vec<String>,
}

impl EquivalenceSummary {
    pub fn from_result(result: &EstimationResult) -> Self {
        Self {
            headline: format!("Estimated Emissions: {:.2} g CO₂-eq", result.emissions_g),
            lines: vec![
                format!(
                    "Equivalent to {:.0} Google searches",
                    result.google_search_equivalent
                ),
                format!(
                    "Equivalent to using an LED bulb for {:.1} hours",
                    result.led_bulb_hours_equivalent
                ),
                format!(
                    "Equivalent to driving {:.2} m with an average ICE car",
                    result.meters_driven
                ),
                format!(
                    "Burning approximately {:.2} g of coal",
                    result.coal_burned_grams
                ),
            ],
        }
    }

    pub fn render(&self) -> String {
        let mut out = self.headline.clone();
        for line in &self.lines {
            out.push_str("\n- ");
            out.push_str(line);
        }
        out
    }
}
