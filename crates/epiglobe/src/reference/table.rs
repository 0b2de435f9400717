//! Cached, lazily initialized country lookups.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::models::CovidCountry;
use crate::source::DiseaseApi;

use super::tables;

/// Flag image root used when the live list has no flag for a code.
pub const FLAG_URL_BASE: &str = "https://disease.sh/assets/img/flags";

/// Identity and geography for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryReference {
    pub code: String,
    pub display_name: String,
    pub flag_url: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CountryReference {
    /// Entry built only from the embedded tables.
    ///
    /// Unknown codes get the code itself as name and coordinates (0, 0).
    pub fn synthetic(code: &str) -> Self {
        let code = clean_code(code);
        let display_name = tables::country_name(&code)
            .map(str::to_string)
            .unwrap_or_else(|| code.clone());
        let (latitude, longitude) = tables::centroid(&code).unwrap_or((0.0, 0.0));
        Self {
            flag_url: fallback_flag_url(&code),
            code,
            display_name,
            latitude,
            longitude,
        }
    }

    /// Entry built from a live outbreak country record.
    ///
    /// Out-of-range coordinates are replaced by the embedded centroid.
    pub fn from_covid(country: &CovidCountry) -> Self {
        let info = &country.country_info;
        let code = info
            .iso3
            .as_deref()
            .or(info.iso2.as_deref())
            .map(clean_code)
            .unwrap_or_else(|| country.country.trim().to_string());

        let (latitude, longitude) = info.coordinates().unwrap_or_else(|| {
            debug!(
                "Invalid coordinates for '{}', using fallback centroid",
                country.country
            );
            tables::centroid(&code).unwrap_or((0.0, 0.0))
        });

        let flag_url = if info.flag.trim().is_empty() {
            fallback_flag_url(&code)
        } else {
            info.flag.clone()
        };

        let display_name = if country.country.trim().is_empty() {
            code.clone()
        } else {
            country.country.clone()
        };

        Self {
            code,
            display_name,
            flag_url,
            latitude,
            longitude,
        }
    }
}

/// Outcome of the one-off reference fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReferenceStatus {
    Loaded { countries: usize },
    Unavailable,
}

/// Uppercase, trimmed lookup key.
pub(crate) fn clean_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Flag URL derived from a 2- or 3-letter code.
///
/// Alpha-3 codes missing from the embedded map use their first two letters.
pub fn fallback_flag_url(code: &str) -> String {
    let code = clean_code(code);
    let iso2 = if code.chars().count() == 2 {
        code.to_lowercase()
    } else {
        tables::iso2_for(&code)
            .map(str::to_string)
            .unwrap_or_else(|| code.to_lowercase().chars().take(2).collect())
    };
    format!("{}/{}.png", FLAG_URL_BASE, iso2)
}

/// Process-wide country lookup with initialize-once semantics.
///
/// Concurrent [`initialize`](Self::initialize) calls share one in-flight
/// fetch. The outcome, including failure, is kept for the table's lifetime.
pub struct CountryReferenceTable {
    api: Arc<dyn DiseaseApi>,
    fetch_timeout: Duration,
    entries: RwLock<HashMap<String, CountryReference>>,
    by_name: RwLock<HashMap<String, String>>,
    init: OnceCell<ReferenceStatus>,
}

impl CountryReferenceTable {
    pub fn new(api: Arc<dyn DiseaseApi>) -> Self {
        Self::with_timeout(api, Duration::from_secs(5))
    }

    pub fn with_timeout(api: Arc<dyn DiseaseApi>, fetch_timeout: Duration) -> Self {
        Self {
            api,
            fetch_timeout,
            entries: RwLock::new(HashMap::new()),
            by_name: RwLock::new(HashMap::new()),
            init: OnceCell::new(),
        }
    }

    /// Fetch the country list once.
    ///
    /// Never fails: an unreachable source is logged and leaves the table
    /// empty, and callers fall back to synthetic entries.
    pub async fn initialize(&self) -> ReferenceStatus {
        *self.init.get_or_init(|| self.load()).await
    }

    /// Initialize from a country list the caller already fetched.
    ///
    /// Does not touch the API. If an earlier fetch failed, the list is still
    /// merged into the cache without replacing existing entries.
    pub async fn initialize_with(&self, countries: &[CovidCountry]) -> ReferenceStatus {
        let status = *self
            .init
            .get_or_init(|| async {
                let added = self.populate(countries);
                info!("Seeded {} country references", added);
                ReferenceStatus::Loaded { countries: added }
            })
            .await;

        if status == ReferenceStatus::Unavailable {
            let added = self.populate(countries);
            debug!("Merged {} country references after failed fetch", added);
        }
        status
    }

    /// Outcome of initialization, if it has completed.
    pub fn status(&self) -> Option<ReferenceStatus> {
        self.init.get().copied()
    }

    pub fn is_initialized(&self) -> bool {
        self.init.initialized()
    }

    async fn load(&self) -> ReferenceStatus {
        match tokio::time::timeout(self.fetch_timeout, self.api.countries()).await {
            Ok(Ok(countries)) => {
                let added = self.populate(&countries);
                info!(
                    "Loaded {} country references from {}",
                    added,
                    self.api.name()
                );
                ReferenceStatus::Loaded { countries: added }
            }
            Ok(Err(e)) => {
                warn!("Country reference fetch failed: {}", e);
                ReferenceStatus::Unavailable
            }
            Err(_) => {
                warn!(
                    "Country reference fetch timed out after {:?}",
                    self.fetch_timeout
                );
                ReferenceStatus::Unavailable
            }
        }
    }

    fn populate(&self, countries: &[CovidCountry]) -> usize {
        let mut entries = self.entries.write();
        let mut by_name = self.by_name.write();
        let mut added = 0;

        for country in countries {
            let reference = CountryReference::from_covid(country);
            let info = &country.country_info;
            let keys: Vec<String> = [info.iso2.as_deref(), info.iso3.as_deref()]
                .into_iter()
                .flatten()
                .map(clean_code)
                .filter(|k| !k.is_empty())
                .collect();

            let primary = keys
                .last()
                .cloned()
                .unwrap_or_else(|| reference.code.clone());
            if primary.is_empty() {
                continue;
            }

            let mut inserted = false;
            for key in keys.iter().chain(std::iter::once(&primary)) {
                if !entries.contains_key(key) {
                    entries.insert(key.clone(), reference.clone());
                    inserted = true;
                }
            }
            if inserted {
                added += 1;
            }
            by_name
                .entry(reference.display_name.to_lowercase())
                .or_insert(primary);
        }
        added
    }

    /// Cached entry for `code`, without fetching or falling back.
    pub fn get(&self, code: &str) -> Option<CountryReference> {
        self.entries.read().get(&clean_code(code)).cloned()
    }

    /// Cached entry whose display name matches `name` (case-insensitive).
    pub fn get_by_name(&self, name: &str) -> Option<CountryReference> {
        let key = self.by_name.read().get(&name.trim().to_lowercase()).cloned()?;
        self.get(&key)
    }

    /// Resolve a 2- or 3-letter code to its reference entry.
    ///
    /// Checks the cache, initializes the table if that has not happened yet,
    /// and otherwise caches and returns a synthetic entry. Existing entries
    /// are never replaced.
    pub async fn resolve(&self, code: &str) -> CountryReference {
        let key = clean_code(code);
        if let Some(entry) = self.get(&key) {
            return entry;
        }

        if !self.is_initialized() {
            self.initialize().await;
            if let Some(entry) = self.get(&key) {
                return entry;
            }
        }

        debug!("No reference entry for '{}', using fallback", key);
        let synthetic = CountryReference::synthetic(&key);
        self.entries
            .write()
            .entry(key)
            .or_insert(synthetic)
            .clone()
    }

    /// Resolve a live outbreak record by ISO3, then ISO2, then name.
    pub async fn resolve_country(&self, country: &CovidCountry) -> CountryReference {
        if !self.is_initialized() {
            self.initialize().await;
        }
        let info = &country.country_info;
        info.iso3
            .as_deref()
            .and_then(|c| self.get(c))
            .or_else(|| info.iso2.as_deref().and_then(|c| self.get(c)))
            .or_else(|| self.get_by_name(&country.country))
            .unwrap_or_else(|| CountryReference::from_covid(country))
    }

    /// Number of cached keys (live and synthetic).
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Endpoint, MockDiseaseApi};

    #[test]
    fn test_synthetic_unknown_code() {
        let reference = CountryReference::synthetic("XYZ");
        assert_eq!(reference.display_name, "XYZ");
        assert_eq!(reference.latitude, 0.0);
        assert_eq!(reference.longitude, 0.0);
        assert_eq!(reference.flag_url, "https://disease.sh/assets/img/flags/xy.png");
    }

    #[test]
    fn test_synthetic_uses_embedded_tables() {
        let reference = CountryReference::synthetic(" sdn ");
        assert_eq!(reference.code, "SDN");
        assert_eq!(reference.display_name, "Sudan");
        assert_eq!(reference.flag_url, "https://disease.sh/assets/img/flags/sd.png");
        assert!(reference.latitude != 0.0);
    }

    #[test]
    fn test_fallback_flag_for_alpha2() {
        assert_eq!(
            fallback_flag_url("De"),
            "https://disease.sh/assets/img/flags/de.png"
        );
    }

    #[tokio::test]
    async fn test_resolve_by_either_alphabet() {
        let mock = Arc::new(MockDiseaseApi::sample());
        let table = CountryReferenceTable::new(mock.clone());

        let by_iso3 = table.resolve("FRA").await;
        let by_iso2 = table.resolve("fr").await;
        assert_eq!(by_iso3, by_iso2);
        assert_eq!(by_iso3.display_name, "France");
        assert_eq!(mock.calls(Endpoint::Countries), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_table_usable() {
        let mock = Arc::new(MockDiseaseApi::sample().failing(Endpoint::Countries));
        let table = CountryReferenceTable::new(mock.clone());

        assert_eq!(table.initialize().await, ReferenceStatus::Unavailable);
        let reference = table.resolve("USA").await;
        assert_eq!(reference.display_name, "United States");
        assert_eq!(mock.calls(Endpoint::Countries), 1);
    }

    #[tokio::test]
    async fn test_resolve_country_by_name() {
        let mock = Arc::new(MockDiseaseApi::sample());
        let table = CountryReferenceTable::new(mock);
        table.initialize().await;

        let country = CovidCountry {
            country: "india".to_string(),
            ..Default::default()
        };
        let reference = table.resolve_country(&country).await;
        assert_eq!(reference.code, "IND");
    }

    #[tokio::test]
    async fn test_initialize_with_skips_fetch() {
        let mock = Arc::new(MockDiseaseApi::sample());
        let table = CountryReferenceTable::new(mock.clone());

        let status = table
            .initialize_with(&MockDiseaseApi::sample_countries())
            .await;
        assert_eq!(status, ReferenceStatus::Loaded { countries: 5 });
        assert_eq!(table.resolve("BR").await.display_name, "Brazil");
        assert_eq!(mock.calls(Endpoint::Countries), 0);
    }

    #[tokio::test]
    async fn test_initialize_with_after_failed_fetch_merges() {
        let mock = Arc::new(MockDiseaseApi::sample().failing(Endpoint::Countries));
        let table = CountryReferenceTable::new(mock.clone());
        assert_eq!(table.initialize().await, ReferenceStatus::Unavailable);

        let mut countries = MockDiseaseApi::sample_countries();
        countries[0].country = "Renamed".to_string();
        let status = table.initialize_with(&countries).await;

        assert_eq!(status, ReferenceStatus::Unavailable);
        assert_eq!(table.get_by_name("renamed").map(|r| r.display_name), Some("Renamed".to_string()));
        assert_eq!(mock.calls(Endpoint::Countries), 1);
    }
}
