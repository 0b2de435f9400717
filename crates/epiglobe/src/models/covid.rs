//! Live outbreak (disease.sh) response shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Identity and geography block of a country record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
    #[serde(default)]
    pub iso2: Option<String>,
    #[serde(default)]
    pub iso3: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub long: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flag: String,
}

impl CountryInfo {
    /// Coordinates, if both are present and inside valid ranges.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.long) {
            (Some(lat), Some(long))
                if lat.is_finite()
                    && long.is_finite()
                    && (-90.0..=90.0).contains(&lat)
                    && (-180.0..=180.0).contains(&long) =>
            {
                Some((lat, long))
            }
            _ => None,
        }
    }
}

/// One country from the `/countries` list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CovidCountry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country_info: CountryInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cases: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deaths: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recovered: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub critical: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tests: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub population: u64,
    #[serde(default)]
    pub continent: Option<String>,
    /// Last update, epoch milliseconds.
    #[serde(default)]
    pub updated: Option<i64>,
}

/// Pre-aggregated `/global` summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cases: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deaths: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recovered: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub critical: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tests: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub population: u64,
    #[serde(default)]
    pub affected_countries: Option<u64>,
    #[serde(default)]
    pub updated: Option<i64>,
}

/// Cumulative counters keyed by `M/D/YY` date strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cases: BTreeMap<String, u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deaths: BTreeMap<String, u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recovered: BTreeMap<String, u64>,
}

/// `/historical/{code}` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoricalData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default)]
    pub province: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timeline: Timeline,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_tolerates_nulls() {
        let json = r#"{
            "country": "Diamond Princess",
            "countryInfo": {"_id": null, "iso2": null, "iso3": null, "lat": 35.4437, "long": 139.638, "flag": "https://disease.sh/assets/img/flags/unknown.png"},
            "cases": 712, "deaths": 13, "recovered": null, "updated": 1700000000000
        }"#;
        let country: CovidCountry = serde_json::from_str(json).unwrap();
        assert_eq!(country.cases, 712);
        assert_eq!(country.recovered, 0);
        assert!(country.country_info.iso3.is_none());
        assert_eq!(country.updated, Some(1_700_000_000_000));
    }

    #[test]
    fn test_coordinates_out_of_range() {
        let info = CountryInfo {
            lat: Some(95.0),
            long: Some(10.0),
            ..Default::default()
        };
        assert!(info.coordinates().is_none());

        let info = CountryInfo {
            lat: Some(-33.9),
            long: Some(18.4),
            ..Default::default()
        };
        assert_eq!(info.coordinates(), Some((-33.9, 18.4)));
    }

    #[test]
    fn test_global_data_affected_countries() {
        let json = r#"{"cases": 10, "deaths": 2, "recovered": 5, "affectedCountries": 231}"#;
        let global: GlobalData = serde_json::from_str(json).unwrap();
        assert_eq!(global.affected_countries, Some(231));
        assert_eq!(global.active, 0);
    }
}
