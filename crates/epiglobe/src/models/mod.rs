//! Data shapes consumed from upstream APIs and produced for the globe.
//!
//! Upstream payloads are loosely structured: fields go missing, arrive as
//! `null`, or come wrapped in an OData `{ "value": [...] }` envelope. The
//! types here accept all of that and leave eligibility decisions to the
//! normalizer.

mod covid;
mod history;
mod indicator;
mod metric;

pub use covid::{CountryInfo, CovidCountry, GlobalData, HistoricalData, Timeline};
pub use history::{CountryHistory, TimelinePoint};
pub use indicator::{COUNTRY_SPATIAL_TYPE, ODataPayload, RawIndicatorRecord, WhoIndicator};
pub use metric::NormalizedCountryMetric;

use serde::{Deserialize, Deserializer};

/// Deserialize a possibly-`null` field into its default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
