use serde::{Deserialize, Serialize};

/// g CO2-eq emitted by one web search query.
pub const SEARCH_QUERY_G: f64 = 0.05;
/// g CO2-eq emitted by one LED bulb running for an hour.
pub const LED_BULB_HOUR_G: f64 = 15.0;
/// Metres an average combustion car drives per kg CO2.
pub const CAR_METERS_PER_KG: f64 = 4042.0;
/// Grams of coal burned per kg CO2.
pub const COAL_G_PER_KG: f64 = 500.0;

/// Everyday comparisons for an emissions figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equivalences {
    pub google_searches: f64,
    pub led_bulb_hours: f64,
    pub meters_driven: f64,
    pub coal_burned_grams: f64,
}

impl Equivalences {
    pub fn from_emissions(emissions_g: f64) -> Self {
        let emissions_kg = emissions_g / 1000.0;
        Self {
            google_searches: emissions_g / SEARCH_QUERY_G,
            led_bulb_hours: emissions_g / LED_BULB_HOUR_G,
            meters_driven: emissions_kg * CAR_METERS_PER_KG,
            coal_burned_grams: emissions_kg * COAL_G_PER_KG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_kilogram_maps_to_reference_constants() {
        let eq = Equivalences::from_emissions(1000.0);
        assert_eq!(eq.meters_driven, 4042.0);
        assert_eq!(eq.coal_burned_grams, 500.0);
        assert_eq!(eq.google_searches, 1000.0 / 0.05);
    }

    #[test]
    fn zero_emissions_give_zero_equivalences() {
        let eq = Equivalences::from_emissions(0.0);
        assert_eq!(eq.google_searches, 0.0);
        assert_eq!(eq.led_bulb_hours, 0.0);
    }
}
