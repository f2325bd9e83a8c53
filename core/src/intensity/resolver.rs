use crate::intensity::country::Country;
use crate::intensity::table::{IntensityTable, GLOBAL_AVERAGE_INTENSITY};
use crate::prelude::{EstimateError, EstimateResult};
use crate::telemetry::log::LogManager;
use serde::{Deserialize, Serialize};

/// Manually entered grid intensity that replaces the location default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct IntensityOverride(f64);

impl IntensityOverride {
    /// No upper bound is enforced; only negative or non-finite values are rejected.
    pub fn new(intensity_g_per_kwh: f64) -> EstimateResult<Self> {
        if !intensity_g_per_kwh.is_finite() || intensity_g_per_kwh < 0.0 {
            return Err(EstimateError::InvalidIntensity(intensity_g_per_kwh));
        }
        Ok(Self(intensity_g_per_kwh))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for IntensityOverride {
    type Error = EstimateError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IntensityOverride> for f64 {
    fn from(value: IntensityOverride) -> Self {
        value.0
    }
}

/// Resolves the grid intensity for a location from a table of defaults.
#[derive(Debug, Clone, Default)]
pub struct IntensityResolver {
    table: IntensityTable,
}

impl IntensityResolver {
    pub fn new(table: IntensityTable) -> Self {
        Self { table }
    }

    /// Default intensity for `location`, or the global average when the table lacks it.
    pub fn location_default(&self, location: Country) -> f64 {
        match self.table.get(location) {
            Some(value) => value,
            None => GLOBAL_AVERAGE_INTENSITY,
        }
    }

    pub fn resolve(&self, location: Country, manual: Option<IntensityOverride>) -> f64 {
        let logger = LogManager::new();
        match manual {
            Some(value) => {
                logger.trace(&format!(
                    "using manual intensity {} g/kWh for {}",
                    value.value(),
                    location
                ));
                value.value()
            }
            None => {
                let value = self.location_default(location);
                logger.trace(&format!("default intensity {} g/kWh for {}", value, location));
                value
            }
        }
    }
}

/// Resolves against the built-in EU table.
pub fn resolve(location: Country, manual: Option<IntensityOverride>) -> f64 {
    IntensityResolver::default().resolve(location, manual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intensity::table::EU_DEFAULT_INTENSITY;

    #[test]
    fn override_wins_regardless_of_location() {
        for &country in Country::ALL.iter() {
            let manual = IntensityOverride::new(123.4).unwrap();
            assert_eq!(resolve(country, Some(manual)), 123.4);
        }
    }

    #[test]
    fn zero_override_is_returned_unchanged() {
        let manual = IntensityOverride::new(0.0).unwrap();
        assert_eq!(resolve(Country::Italy, Some(manual)), 0.0);
    }

    #[test]
    fn extreme_override_is_accepted() {
        let manual = IntensityOverride::new(1.0e9).unwrap();
        assert_eq!(resolve(Country::Malta, Some(manual)), 1.0e9);
    }

    #[test]
    fn negative_override_is_rejected() {
        assert_eq!(
            IntensityOverride::new(-1.0),
            Err(EstimateError::InvalidIntensity(-1.0))
        );
        assert!(IntensityOverride::new(f64::INFINITY).is_err());
    }

    #[test]
    fn location_without_override_uses_table() {
        assert_eq!(resolve(Country::Germany, None), EU_DEFAULT_INTENSITY);
        let resolver =
            IntensityResolver::new(IntensityTable::eu_default().with_value(Country::France, 56.0));
        assert_eq!(resolver.resolve(Country::France, None), 56.0);
    }

    #[test]
    fn missing_location_falls_back_to_global_average() {
        let mut table = IntensityTable::eu_default();
        table.remove(Country::Spain);
        let resolver = IntensityResolver::new(table);
        assert_eq!(resolver.resolve(Country::Spain, None), 475.0);
        assert_eq!(resolver.resolve(Country::Portugal, None), EU_DEFAULT_INTENSITY);
    }

    #[test]
    fn override_deserialization_validates_sign() {
        let parsed: IntensityOverride = serde_json::from_str("12.5").unwrap();
        assert_eq!(parsed.value(), 12.5);
        assert!(serde_json::from_str::<IntensityOverride>("-3.0").is_err());
    }
}
