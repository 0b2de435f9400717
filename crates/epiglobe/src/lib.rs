//! Epiglobe: normalization and aggregation core for a disease-data globe.
//!
//! Epiglobe pulls per-country disease statistics from two loosely structured
//! sources (a live COVID-19 aggregator and the WHO Global Health Observatory)
//! and turns them into one uniform record per country, ready to be placed on
//! a globe, plus a global summary whose meaning depends on the disease.
//!
//! # Core Principles
//!
//! - **Never fail on sparse data**: ineligible records are filtered and
//!   unknown countries get a synthetic, deterministic reference entry
//! - **Policy by catalog**: each disease declares its aggregation category
//! - **One reference fetch**: the country table is initialized once and shared
//!
//! # Example
//!
//! ```no_run
//! use epiglobe::{Epiglobe, EpiglobeConfig};
//!
//! # async fn example() -> epiglobe::Result<()> {
//! let epiglobe = Epiglobe::from_config(EpiglobeConfig::from_env())?;
//! let snapshot = epiglobe.load_disease("tuberculosis").await?;
//!
//! println!("Countries: {}", snapshot.metrics.len());
//! println!("Total: {}", snapshot.summary.primary_total);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod normalize;
pub mod reference;
pub mod source;

mod dashboard;

pub use crate::dashboard::{
    ComparisonEntry, DataStatus, DiseaseSnapshot, Epiglobe, IndicatorEntry, Selection,
};
pub use aggregate::{GlobalSummary, MetricValue};
pub use catalog::{Catalog, DataSource, Disease, DiseaseCategory, MetricLabels};
pub use config::{ApiEndpoints, EpiglobeConfig};
pub use error::{EpiglobeError, Result};
pub use models::{CountryHistory, NormalizedCountryMetric, RawIndicatorRecord, TimelinePoint};
pub use normalize::Normalizer;
pub use reference::{CountryReference, CountryReferenceTable, ReferenceStatus};
pub use source::{DiseaseApi, Endpoint, HttpDiseaseApi, MockDiseaseApi};
