use crate::intensity::country::Country;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Global average grid intensity (IEA), g CO2/kWh.
pub const GLOBAL_AVERAGE_INTENSITY: f64 = 475.0;

/// Default intensity assigned to every EU member state, g CO2/kWh.
pub const EU_DEFAULT_INTENSITY: f64 = 366.0;

/// Per-country default grid carbon intensity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntensityTable {
    values: BTreeMap<Country, f64>,
}

impl IntensityTable {
    pub fn empty() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    pub fn eu_default() -> Self {
        Self {
            values: Country::ALL
                .iter()
                .map(|&country| (country, EU_DEFAULT_INTENSITY))
                .collect(),
        }
    }

    pub fn with_value(mut self, country: Country, intensity_g_per_kwh: f64) -> Self {
        self.values.insert(country, intensity_g_per_kwh);
        self
    }

    /// Applies every entry of `other` on top of this table.
    pub fn merged(mut self, other: &IntensityTable) -> Self {
        self.values
            .extend(other.values.iter().map(|(&country, &value)| (country, value)));
        self
    }

    pub fn remove(&mut self, country: Country) -> Option<f64> {
        self.values.remove(&country)
    }

    pub fn get(&self, country: Country) -> Option<f64> {
        self.values.get(&country).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Country, f64)> + '_ {
        self.values.iter().map(|(&country, &value)| (country, value))
    }
}

impl Default for IntensityTable {
    fn default() -> Self {
        Self::eu_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_every_country() {
        let table = IntensityTable::eu_default();
        assert_eq!(table.len(), Country::ALL.len());
        assert!(table.iter().all(|(_, value)| value == EU_DEFAULT_INTENSITY));
    }

    #[test]
    fn merged_overrides_single_entries() {
        let custom = IntensityTable::empty().with_value(Country::France, 56.0);
        let table = IntensityTable::eu_default().merged(&custom);
        assert_eq!(table.get(Country::France), Some(56.0));
        assert_eq!(table.get(Country::Poland), Some(EU_DEFAULT_INTENSITY));
    }

    #[test]
    fn table_deserializes_from_country_map() {
        let table: IntensityTable =
            serde_json::from_str(r#"{"sweden": 41.0, "czech_republic": 430.5}"#).unwrap();
        assert_eq!(table.get(Country::Sweden), Some(41.0));
        assert_eq!(table.get(Country::CzechRepublic), Some(430.5));
        assert_eq!(table.get(Country::Malta), None);
    }
}
