use crate::prelude::WorkloadType;

/// Watt-hours per generated token (Berthelot et al., 2024).
pub const TEXT_WH_PER_TOKEN: f64 = 0.5;
/// Watt-hours per generated image.
pub const IMAGE_WH_PER_IMAGE: f64 = 5.0;
/// Watt-hours per second of generated video.
pub const VIDEO_WH_PER_SECOND: f64 = 14.375;

/// Energy consumed per unit of work for each workload type.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyFactorTable;

impl EnergyFactorTable {
    pub fn wh_per_unit(&self, workload: WorkloadType) -> f64 {
        match workload {
            WorkloadType::Text => TEXT_WH_PER_TOKEN,
            WorkloadType::Image => IMAGE_WH_PER_IMAGE,
            WorkloadType::Video => VIDEO_WH_PER_SECOND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_factor_is_positive() {
        let table = EnergyFactorTable;
        assert!(WorkloadType::ALL
            .iter()
            .all(|&workload| table.wh_per_unit(workload) > 0.0));
        assert_eq!(table.wh_per_unit(WorkloadType::Video), 14.375);
    }
}
