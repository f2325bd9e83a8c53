use crate::prelude::EstimateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// EU member states offered as estimation locations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Country {
    Austria,
    Belgium,
    Bulgaria,
    Croatia,
    Cyprus,
    CzechRepublic,
    Denmark,
    Estonia,
    Finland,
    France,
    Germany,
    Greece,
    Hungary,
    Ireland,
    Italy,
    Latvia,
    Lithuania,
    Luxembourg,
    Malta,
    Netherlands,
    Poland,
    Portugal,
    Romania,
    Slovakia,
    Slovenia,
    Spain,
    Sweden,
}

impl Country {
    pub const ALL: [Country; 27] = [
        Country::Austria,
        Country::Belgium,
        Country::Bulgaria,
        Country::Croatia,
        Country::Cyprus,
        Country::CzechRepublic,
        Country::Denmark,
        Country::Estonia,
        Country::Finland,
        Country::France,
        Country::Germany,
        Country::Greece,
        Country::Hungary,
        Country::Ireland,
        Country::Italy,
        Country::Latvia,
        Country::Lithuania,
        Country::Luxembourg,
        Country::Malta,
        Country::Netherlands,
        Country::Poland,
        Country::Portugal,
        Country::Romania,
        Country::Slovakia,
        Country::Slovenia,
        Country::Spain,
        Country::Sweden,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Country::Austria => "Austria",
            Country::Belgium => "Belgium",
            Country::Bulgaria => "Bulgaria",
            Country::Croatia => "Croatia",
            Country::Cyprus => "Cyprus",
            Country::CzechRepublic => "Czech Republic",
            Country::Denmark => "Denmark",
            Country::Estonia => "Estonia",
            Country::Finland => "Finland",
            Country::France => "France",
            Country::Germany => "Germany",
            Country::Greece => "Greece",
            Country::Hungary => "Hungary",
            Country::Ireland => "Ireland",
            Country::Italy => "Italy",
            Country::Latvia => "Latvia",
            Country::Lithuania => "Lithuania",
            Country::Luxembourg => "Luxembourg",
            Country::Malta => "Malta",
            Country::Netherlands => "Netherlands",
            Country::Poland => "Poland",
            Country::Portugal => "Portugal",
            Country::Romania => "Romania",
            Country::Slovakia => "Slovakia",
            Country::Slovenia => "Slovenia",
            Country::Spain => "Spain",
            Country::Sweden => "Sweden",
        }
    }

    /// ISO 3166-1 alpha-2 code.
    pub fn code(&self) -> &'static str {
        match self {
            Country::Austria => "AT",
            Country::Belgium => "BE",
            Country::Bulgaria => "BG",
            Country::Croatia => "HR",
            Country::Cyprus => "CY",
            Country::CzechRepublic => "CZ",
            Country::Denmark => "DK",
            Country::Estonia => "EE",
            Country::Finland => "FI",
            Country::France => "FR",
            Country::Germany => "DE",
            Country::Greece => "GR",
            Country::Hungary => "HU",
            Country::Ireland => "IE",
            Country::Italy => "IT",
            Country::Latvia => "LV",
            Country::Lithuania => "LT",
            Country::Luxembourg => "LU",
            Country::Malta => "MT",
            Country::Netherlands => "NL",
            Country::Poland => "PL",
            Country::Portugal => "PT",
            Country::Romania => "RO",
            Country::Slovakia => "SK",
            Country::Slovenia => "SI",
            Country::Spain => "ES",
            Country::Sweden => "SE",
        }
    }

    /// Flag emoji built from the regional indicator symbols of the code.
    pub fn flag(&self) -> String {
        self.code()
            .chars()
            .filter_map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
            .collect()
    }

    /// Dropdown label, e.g. "🇦🇹 Austria".
    pub fn label(&self) -> String {
        format!("{} {}", self.flag(), self.name())
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Country {
    type Err = EstimateError;

    /// Accepts the English name (any case, spaces or underscores) or the two-letter code.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().replace('_', " ");
        Country::ALL
            .iter()
            .copied()
            .find(|country| {
                country.name().eq_ignore_ascii_case(&wanted)
                    || country.code().eq_ignore_ascii_case(&wanted)
            })
            .ok_or_else(|| EstimateError::UnknownCountry(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_codes() {
        assert_eq!("germany".parse::<Country>().unwrap(), Country::Germany);
        assert_eq!("czech_republic".parse::<Country>().unwrap(), Country::CzechRepublic);
        assert_eq!("Czech Republic".parse::<Country>().unwrap(), Country::CzechRepublic);
        assert_eq!("se".parse::<Country>().unwrap(), Country::Sweden);
        assert!("Norway".parse::<Country>().is_err());
    }

    #[test]
    fn label_carries_flag() {
        assert_eq!(Country::Austria.flag(), "\u{1F1E6}\u{1F1F9}");
        assert_eq!(Country::Austria.label(), "\u{1F1E6}\u{1F1F9} Austria");
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<_> = Country::ALL.iter().map(|c| c.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), Country::ALL.len());
    }
}
