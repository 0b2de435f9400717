//! WHO Global Health Observatory response shapes.

use serde::{Deserialize, Serialize};

/// `SpatialDimType` marking a country-level observation.
pub const COUNTRY_SPATIAL_TYPE: &str = "COUNTRY";

/// One (country, time, dimension) observation of a WHO indicator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawIndicatorRecord {
    #[serde(default)]
    pub indicator_code: Option<String>,
    #[serde(default)]
    pub spatial_dim_type: Option<String>,
    #[serde(default)]
    pub spatial_dim: Option<String>,
    /// Sortable time key, usually a year.
    #[serde(default)]
    pub time_dim: Option<i64>,
    #[serde(default)]
    pub dim1: Option<String>,
    #[serde(default)]
    pub numeric_value: Option<f64>,
}

impl RawIndicatorRecord {
    /// Country-level record for `code` at `year`.
    pub fn country(code: impl Into<String>, year: i64, value: Option<f64>) -> Self {
        Self {
            spatial_dim_type: Some(COUNTRY_SPATIAL_TYPE.to_string()),
            spatial_dim: Some(code.into()),
            time_dim: Some(year),
            numeric_value: value,
            ..Default::default()
        }
    }

    /// Record with an arbitrary spatial type, e.g. `REGION` or `GLOBAL`.
    pub fn spatial(
        spatial_type: impl Into<String>,
        code: impl Into<String>,
        year: i64,
        value: Option<f64>,
    ) -> Self {
        Self {
            spatial_dim_type: Some(spatial_type.into()),
            spatial_dim: Some(code.into()),
            time_dim: Some(year),
            numeric_value: value,
            ..Default::default()
        }
    }

    /// Time key, treating a missing one as the earliest possible.
    pub fn time_key(&self) -> i64 {
        self.time_dim.unwrap_or(0)
    }

    /// Country code and value if this record may be normalized.
    ///
    /// Only country-level records with a finite, non-negative value qualify.
    pub fn eligible(&self) -> Option<(&str, f64)> {
        if self.spatial_dim_type.as_deref() != Some(COUNTRY_SPATIAL_TYPE) {
            return None;
        }
        let code = self.spatial_dim.as_deref().map(str::trim)?;
        if code.is_empty() {
            return None;
        }
        match self.numeric_value {
            Some(v) if v.is_finite() && v >= 0.0 => Some((code, v)),
            _ => None,
        }
    }
}

/// One entry in the WHO indicator catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WhoIndicator {
    pub indicator_code: String,
    #[serde(default)]
    pub indicator_name: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// OData payload: either `{ "value": [...] }` or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ODataPayload<T> {
    Wrapped { value: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ODataPayload<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ODataPayload::Wrapped { value } => value,
            ODataPayload::Bare(items) => items,
        }
    }
}
