//! Data source trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{CovidCountry, GlobalData, HistoricalData, RawIndicatorRecord, WhoIndicator};

/// The five upstream operations the dashboard consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Global,
    Countries,
    Historical,
    IndicatorData,
    Indicators,
}

/// Source of disease data.
///
/// Implementations must be thread-safe so one source can serve the reference
/// table and concurrent selections at the same time.
#[async_trait]
pub trait DiseaseApi: Send + Sync {
    /// Live outbreak global totals.
    async fn global(&self) -> Result<GlobalData>;

    /// Live outbreak per-country records; also feeds the reference table.
    async fn countries(&self) -> Result<Vec<CovidCountry>>;

    /// Time series for one country over the last `last_days` days.
    async fn historical(&self, country: &str, last_days: u32) -> Result<HistoricalData>;

    /// Observations of one WHO indicator.
    ///
    /// Elements that do not parse as records are dropped rather than failing
    /// the whole payload.
    async fn indicator_data(&self, code: &str) -> Result<Vec<RawIndicatorRecord>>;

    /// WHO indicator catalog.
    async fn indicators(&self) -> Result<Vec<WhoIndicator>>;

    /// Name of this source (for logging).
    fn name(&self) -> &str;
}
