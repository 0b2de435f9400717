//! Raw upstream records to [`NormalizedCountryMetric`](crate::models::NormalizedCountryMetric)s.
//!
//! Normalization never fails. Ineligible records are filtered out, and
//! countries the reference table cannot place get a synthetic entry.

mod normalizer;

pub use normalizer::{Normalizer, select_latest};
