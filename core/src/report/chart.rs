use crate::estimation::equivalence::{LED_BULB_HOUR_G, SEARCH_QUERY_G};
use crate::prelude::EstimationResult;
use serde::{Deserialize, Serialize};

pub const TASK_LABEL: &str = "Your Task";
pub const SEARCH_LABEL: &str = "Google search (1 query)";
pub const LED_LABEL: &str = "LED bulb (1 hour)";

/// One bar of the comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonBar {
    pub label: String,
    /// g CO2-eq
    pub grams: f64,
    /// `#RRGGBB`
    pub color: String,
}

impl ComparisonBar {
    fn new(label: &str, grams: f64, color: &str) -> Self {
        Self {
            label: label.to_string(),
            grams,
            color: color.to_string(),
        }
    }

    /// Parses `color` into normalized RGB components.
    pub fn rgb(&self) -> Option<[f32; 3]> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(hex.get(range)?, 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
    }
}

/// The task's emissions next to the fixed reference activities, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ComparisonChart {
    pub bars: Vec<ComparisonBar>,
}

impl ComparisonChart {
    pub fn from_result(result: &EstimationResult) -> Self {
        Self {
            bars: vec![
                ComparisonBar::new(TASK_LABEL, result.emissions_g, "#F31111"),
                ComparisonBar::new(SEARCH_LABEL, SEARCH_QUERY_G, "#4285F4"),
                ComparisonBar::new(LED_LABEL, LED_BULB_HOUR_G, "#FFD700"),
            ],
        }
    }

    pub fn max_grams(&self) -> f64 {
        self.bars.iter().map(|bar| bar.grams).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::estimate;
    use crate::prelude::WorkloadType;

    #[test]
    fn chart_orders_task_before_references() {
        let result = estimate(WorkloadType::Text, 100.0, 366.0).unwrap();
        let chart = ComparisonChart::from_result(&result);
        let labels: Vec<_> = chart.bars.iter().map(|bar| bar.label.as_str()).collect();
        assert_eq!(labels, vec![TASK_LABEL, SEARCH_LABEL, LED_LABEL]);
        assert_eq!(chart.bars[1].grams, 0.05);
        assert_eq!(chart.bars[2].grams, 15.0);
        assert_eq!(chart.max_grams(), result.emissions_g);
    }

    #[test]
    fn bar_colors_parse_to_rgb() {
        let result = estimate(WorkloadType::Image, 1.0, 366.0).unwrap();
        let chart = ComparisonChart::from_result(&result);
        assert_eq!(chart.bars[0].rgb(), Some([243.0 / 255.0, 17.0 / 255.0, 17.0 / 255.0]));
        let broken = ComparisonBar::new("x", 1.0, "F31111");
        assert_eq!(broken.rgb(), None);
    }
}
