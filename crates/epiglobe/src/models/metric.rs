//! The uniform per-country record handed to the globe.

use serde::{Deserialize, Serialize};

use crate::reference::CountryReference;

/// One country's value for one disease selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCountryMetric {
    pub country_code: String,
    pub display_name: String,
    pub flag_url: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Cases, coverage %, incidence, ... depending on the disease category.
    /// Always non-negative.
    pub value: f64,
    /// Time key of the selected observation.
    pub as_of: i64,
}

impl NormalizedCountryMetric {
    /// Combine a resolved reference with an observation.
    pub fn from_reference(
        country_code: impl Into<String>,
        reference: &CountryReference,
        value: f64,
        as_of: i64,
    ) -> Self {
        Self {
            country_code: country_code.into(),
            display_name: reference.display_name.clone(),
            flag_url: reference.flag_url.clone(),
            latitude: reference.latitude,
            longitude: reference.longitude,
            value,
            as_of,
        }
    }

    /// Whether the value counts towards aggregates.
    pub fn has_value(&self) -> bool {
        self.value.is_finite() && self.value >= 0.0
    }
}
