//! Main Epiglobe struct: one disease selection end to end.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::aggregate::{self, GlobalSummary};
use crate::catalog::{Catalog, DataSource, Disease};
use crate::config::EpiglobeConfig;
use crate::error::{EpiglobeError, Result};
use crate::models::{CountryHistory, CovidCountry, NormalizedCountryMetric, WhoIndicator};
use crate::normalize::Normalizer;
use crate::reference::CountryReferenceTable;
use crate::source::{DiseaseApi, HttpDiseaseApi};

/// Whether a snapshot's source answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DataStatus {
    Available,
    /// The source failed; metrics are empty and the summary is zeroed.
    Unavailable { reason: String },
}

impl DataStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, DataStatus::Available)
    }
}

/// Everything the globe needs for one disease.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseSnapshot {
    pub disease: Disease,
    pub status: DataStatus,
    pub metrics: Vec<NormalizedCountryMetric>,
    pub summary: GlobalSummary,
}

/// Outcome of [`Epiglobe::select`].
#[derive(Debug, Clone)]
pub enum Selection {
    /// Still the latest selection.
    Current(DiseaseSnapshot),
    /// A newer selection started while this one ran; discard it.
    Superseded { disease_id: String },
}

impl Selection {
    /// The snapshot, unless superseded.
    pub fn into_current(self) -> Option<DiseaseSnapshot> {
        match self {
            Selection::Current(snapshot) => Some(snapshot),
            Selection::Superseded { .. } => None,
        }
    }
}

/// One country in a comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    pub history: CountryHistory,
    /// Current totals from the live country list (0 when unknown).
    pub cases: u64,
    pub deaths: u64,
    pub recovered: u64,
}

/// Entry of the WHO indicator catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorEntry {
    pub code: String,
    pub name: String,
}

impl IndicatorEntry {
    /// Case-insensitive substring match on code or name.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.code.to_lowercase().contains(&query) || self.name.to_lowercase().contains(&query)
    }
}

impl From<WhoIndicator> for IndicatorEntry {
    fn from(indicator: WhoIndicator) -> Self {
        Self {
            code: indicator.indicator_code,
            name: indicator.indicator_name,
        }
    }
}

/// The disease data pipeline.
///
/// Owns the process-wide country reference table, so every selection made
/// through one `Epiglobe` shares the same cache.
pub struct Epiglobe {
    config: EpiglobeConfig,
    api: Arc<dyn DiseaseApi>,
    catalog: Catalog,
    reference: Arc<CountryReferenceTable>,
    normalizer: Normalizer,
    generation: AtomicU64,
}

impl Epiglobe {
    /// Create a pipeline over `api` with the built-in catalog.
    pub fn new(api: Arc<dyn DiseaseApi>, config: EpiglobeConfig) -> Self {
        let reference = Arc::new(CountryReferenceTable::with_timeout(
            api.clone(),
            config.reference_timeout,
        ));
        let normalizer =
            Normalizer::new(reference.clone()).with_batch_size(config.resolve_batch_size);

        Self {
            config,
            api,
            catalog: Catalog::builtin(),
            reference,
            normalizer,
            generation: AtomicU64::new(0),
        }
    }

    /// Create a pipeline that talks HTTP to the configured endpoints.
    pub fn from_config(config: EpiglobeConfig) -> Result<Self> {
        let api = HttpDiseaseApi::new(&config)?;
        Ok(Self::new(Arc::new(api), config))
    }

    /// Replace the disease catalog.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &EpiglobeConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn reference(&self) -> &Arc<CountryReferenceTable> {
        &self.reference
    }

    pub fn api(&self) -> &Arc<dyn DiseaseApi> {
        &self.api
    }

    /// Load a catalog disease by id.
    ///
    /// Only an unknown id is an error; source failures yield an
    /// [`DataStatus::Unavailable`] snapshot.
    pub async fn load_disease(&self, id: &str) -> Result<DiseaseSnapshot> {
        let disease = self
            .catalog
            .get(id)
            .cloned()
            .ok_or_else(|| EpiglobeError::UnknownDisease(id.to_string()))?;
        Ok(self.load(&disease).await)
    }

    /// Load any WHO indicator, using its catalog entry when one exists.
    pub async fn load_indicator(&self, code: &str) -> DiseaseSnapshot {
        let disease = self
            .catalog
            .find_by_indicator(code)
            .cloned()
            .unwrap_or_else(|| Disease::adhoc_indicator(code));
        self.load(&disease).await
    }

    /// Fetch, normalize and aggregate one disease.
    ///
    /// Aggregation starts only after every country has been normalized.
    pub async fn load(&self, disease: &Disease) -> DiseaseSnapshot {
        match &disease.source {
            DataSource::LiveOutbreak => self.load_live(disease).await,
            DataSource::WhoIndicator { code } => self.load_who(disease, code).await,
        }
    }

    async fn load_who(&self, disease: &Disease, code: &str) -> DiseaseSnapshot {
        let records = match self.api.indicator_data(code).await {
            Ok(records) => records,
            Err(e) => return self.unavailable(disease, e),
        };

        let metrics = self.normalizer.normalize(&records).await;
        let summary = aggregate::aggregate(&metrics, disease.category, self.config.coverage_scale);
        info!(
            "Loaded {}: {} countries from {} records",
            disease.id,
            metrics.len(),
            records.len()
        );

        DiseaseSnapshot {
            disease: disease.clone(),
            status: DataStatus::Available,
            metrics,
            summary,
        }
    }

    async fn load_live(&self, disease: &Disease) -> DiseaseSnapshot {
        let (global, countries) = futures::join!(self.api.global(), self.api.countries());
        let countries = match countries {
            Ok(countries) => countries,
            Err(e) => return self.unavailable(disease, e),
        };

        self.reference.initialize_with(&countries).await;
        let metrics = self.normalizer.normalize_live(&countries).await;
        let summary = match global {
            Ok(global) => aggregate::from_live(&global, &metrics),
            Err(e) => {
                warn!("Global totals unavailable ({}), summing country values", e);
                aggregate::aggregate(&metrics, disease.category, self.config.coverage_scale)
            }
        };
        info!("Loaded {}: {} countries", disease.id, metrics.len());

        DiseaseSnapshot {
            disease: disease.clone(),
            status: DataStatus::Available,
            metrics,
            summary,
        }
    }

    fn unavailable(&self, disease: &Disease, error: EpiglobeError) -> DiseaseSnapshot {
        warn!("No data for {}: {}", disease.id, error);
        DiseaseSnapshot {
            disease: disease.clone(),
            status: DataStatus::Unavailable {
                reason: error.to_string(),
            },
            metrics: Vec::new(),
            summary: aggregate::aggregate(&[], disease.category, self.config.coverage_scale),
        }
    }

    /// Load a disease as the newest selection.
    ///
    /// If another `select` starts before this one finishes, the result comes
    /// back as [`Selection::Superseded`]. An unknown id fails without superseding the selection in flight.
    pub async fn select(&self, id: &str) -> Result<Selection> {
        let disease = self
            .catalog
            .get(id)
            .cloned()
            .ok_or_else(|| EpiglobeError::UnknownDisease(id.to_string()))?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = self.load(&disease).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding stale selection of {}", id);
            return Ok(Selection::Superseded {
                disease_id: snapshot.disease.id,
            });
        }
        Ok(Selection::Current(snapshot))
    }

    /// Time series for one country over the configured number of days.
    pub async fn country_history(&self, code: &str) -> Result<CountryHistory> {
        self.country_history_days(code, self.config.history_days).await
    }

    /// Time series for one country over the last `days` days.
    pub async fn country_history_days(&self, code: &str, days: u32) -> Result<CountryHistory> {
        let code = validate_code(code)?;
        let (data, reference) =
            futures::join!(self.api.historical(&code, days), self.reference.resolve(&code));
        Ok(CountryHistory::from_historical(reference, &data?))
    }

    /// Side-by-side histories and current totals for up to
    /// `comparison_limit` countries.
    ///
    /// Duplicate codes are merged. Countries whose history cannot be fetched
    /// are left out.
    pub async fn compare(&self, codes: &[String]) -> Result<Vec<ComparisonEntry>> {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for code in codes {
            let code = validate_code(code)?;
            if seen.insert(code.clone()) {
                unique.push(code);
            }
        }

        if unique.is_empty() {
            return Err(EpiglobeError::InvalidCountryCode(String::new()));
        }
        if unique.len() > self.config.comparison_limit {
            return Err(EpiglobeError::TooManyCountries {
                requested: unique.len(),
                limit: self.config.comparison_limit,
            });
        }

        // Seeded before the histories so their lookups reuse this list.
        let countries = match self.api.countries().await {
            Ok(countries) => {
                self.reference.initialize_with(&countries).await;
                countries
            }
            Err(e) => {
                warn!("Current totals unavailable: {}", e);
                Vec::new()
            }
        };
        let histories = join_all(unique.iter().map(|code| self.country_history(code))).await;

        let entries = unique
            .iter()
            .zip(histories)
            .filter_map(|(code, history)| match history {
                Ok(history) => {
                    let current = find_country(&countries, code, &history.country.display_name);
                    Some(ComparisonEntry {
                        cases: current.map_or(0, |c| c.cases),
                        deaths: current.map_or(0, |c| c.deaths),
                        recovered: current.map_or(0, |c| c.recovered),
                        history,
                    })
                }
                Err(e) => {
                    warn!("Dropping {} from comparison: {}", code, e);
                    None
                }
            })
            .collect();
        Ok(entries)
    }

    /// The WHO indicator catalog.
    pub async fn indicators(&self) -> Result<Vec<IndicatorEntry>> {
        let indicators = self.api.indicators().await?;
        Ok(indicators.into_iter().map(IndicatorEntry::from).collect())
    }
}

/// Uppercased code, or an error if it cannot be a lookup key.
fn validate_code(code: &str) -> Result<String> {
    let code = code.trim();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(EpiglobeError::InvalidCountryCode(code.to_string()));
    }
    Ok(code.to_uppercase())
}

fn find_country<'a>(
    countries: &'a [CovidCountry],
    code: &str,
    name: &str,
) -> Option<&'a CovidCountry> {
    countries.iter().find(|c| {
        let info = &c.country_info;
        info.iso3.as_deref().is_some_and(|v| v.eq_ignore_ascii_case(code))
            || info.iso2.as_deref().is_some_and(|v| v.eq_ignore_ascii_case(code))
            || c.country.eq_ignore_ascii_case(name)
    })
}
