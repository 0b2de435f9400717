//! Latest-observation selection and concurrent country resolution.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::config::DEFAULT_RESOLVE_BATCH_SIZE;
use crate::models::{CovidCountry, NormalizedCountryMetric, RawIndicatorRecord};
use crate::reference::CountryReferenceTable;

/// Latest eligible `(value, time key)` per country code.
///
/// Codes are trimmed and uppercased. When two records share the latest time
/// key the first one encountered is kept.
pub fn select_latest(records: &[RawIndicatorRecord]) -> BTreeMap<String, (f64, i64)> {
    let mut latest: BTreeMap<String, (f64, i64)> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in records {
        let Some((code, value)) = record.eligible() else {
            skipped += 1;
            continue;
        };
        let time = record.time_key();
        latest
            .entry(code.to_uppercase())
            .and_modify(|current| {
                if time > current.1 {
                    *current = (value, time);
                }
            })
            .or_insert((value, time));
    }

    if skipped > 0 {
        debug!("Skipped {} ineligible records", skipped);
    }
    latest
}

/// Turns raw records into one metric per country.
pub struct Normalizer {
    reference: Arc<CountryReferenceTable>,
    batch_size: usize,
}

impl Normalizer {
    pub fn new(reference: Arc<CountryReferenceTable>) -> Self {
        Self {
            reference,
            batch_size: DEFAULT_RESOLVE_BATCH_SIZE,
        }
    }

    /// Resolve at most `batch_size` countries at a time (minimum 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn reference(&self) -> &Arc<CountryReferenceTable> {
        &self.reference
    }

    /// Normalize WHO indicator records.
    ///
    /// Output is sorted by country code. Each batch of lookups completes
    /// before the next one starts.
    pub async fn normalize(&self, records: &[RawIndicatorRecord]) -> Vec<NormalizedCountryMetric> {
        let latest: Vec<(String, (f64, i64))> = select_latest(records).into_iter().collect();
        let metrics = in_batches(&latest, self.batch_size, |(code, (value, as_of))| async move {
            let reference = self.reference.resolve(code).await;
            NormalizedCountryMetric::from_reference(code.clone(), &reference, *value, *as_of)
        })
        .await;

        debug!(
            "Normalized {} records into {} countries",
            records.len(),
            metrics.len()
        );
        metrics
    }

    /// Normalize the live outbreak country list, using case counts as values.
    ///
    /// Countries without valid coordinates are dropped. If a code shows up
    /// twice, the most recently updated record wins.
    pub async fn normalize_live(&self, countries: &[CovidCountry]) -> Vec<NormalizedCountryMetric> {
        let placeable: Vec<(&CovidCountry, (f64, f64))> = countries
            .iter()
            .filter_map(|country| match country.country_info.coordinates() {
                Some(coords) => Some((country, coords)),
                None => {
                    warn!("Ignoring '{}': invalid coordinates", country.country);
                    None
                }
            })
            .collect();

        let resolved = in_batches(&placeable, self.batch_size, |(country, (lat, long))| async move {
            let reference = self.reference.resolve_country(country).await;
            NormalizedCountryMetric {
                country_code: reference.code.clone(),
                display_name: reference.display_name,
                flag_url: reference.flag_url,
                latitude: *lat,
                longitude: *long,
                value: country.cases as f64,
                as_of: country.updated.unwrap_or(0),
            }
        })
        .await;

        let mut by_code: BTreeMap<String, NormalizedCountryMetric> = BTreeMap::new();
        for metric in resolved {
            match by_code.get(&metric.country_code) {
                Some(existing) if existing.as_of >= metric.as_of => {}
                _ => {
                    by_code.insert(metric.country_code.clone(), metric);
                }
            }
        }

        by_code.into_values().collect()
    }
}

/// Run `f` over `items`, at most `batch_size` at a time, keeping input order.
///
/// A batch starts only after the previous one has fully completed.
async fn in_batches<'a, T, R, F, Fut>(items: &'a [T], batch_size: usize, f: F) -> Vec<R>
where
    F: Fn(&'a T) -> Fut,
    Fut: Future<Output = R>,
{
    let mut out = Vec::with_capacity(items.len());
    for batch in items.chunks(batch_size.max(1)) {
        out.extend(join_all(batch.iter().map(&f)).await);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use crate::models::CountryInfo;
    use crate::source::{Endpoint, MockDiseaseApi};

    fn normalizer(mock: MockDiseaseApi) -> (Arc<MockDiseaseApi>, Normalizer) {
        let mock = Arc::new(mock);
        let table = Arc::new(CountryReferenceTable::new(mock.clone()));
        (mock, Normalizer::new(table))
    }

    #[test]
    fn test_select_latest_keeps_newest_per_country() {
        let records = vec![
            RawIndicatorRecord::country("USA", 2020, Some(100.0)),
            RawIndicatorRecord::country("USA", 2021, Some(150.0)),
            RawIndicatorRecord::spatial("REGION", "AMR", 2021, Some(9999.0)),
        ];
        let latest = select_latest(&records);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest["USA"], (150.0, 2021));
    }

    #[test]
    fn test_select_latest_tie_keeps_first() {
        let records = vec![
            RawIndicatorRecord::country("fra", 2022, Some(1.0)),
            RawIndicatorRecord::country("FRA", 2022, Some(2.0)),
        ];
        assert_eq!(select_latest(&records)["FRA"], (1.0, 2022));
    }

    #[test]
    fn test_select_latest_filters_missing_and_negative() {
        let records = vec![
            RawIndicatorRecord::country("AAA", 2020, None),
            RawIndicatorRecord::country("BBB", 2020, Some(-1.0)),
            RawIndicatorRecord::country("CCC", 2020, Some(f64::NAN)),
            RawIndicatorRecord::country("DDD", 2020, Some(0.0)),
        ];
        let latest = select_latest(&records);
        assert_eq!(latest.keys().collect::<Vec<_>>(), vec!["DDD"]);
    }

    #[tokio::test]
    async fn test_normalize_resolves_known_and_unknown() {
        let (mock, normalizer) = normalizer(MockDiseaseApi::sample());
        let records = vec![
            RawIndicatorRecord::country("USA", 2020, Some(100.0)),
            RawIndicatorRecord::country("USA", 2021, Some(150.0)),
            RawIndicatorRecord::country("XYZ", 2021, Some(3.0)),
        ];

        let metrics = normalizer.normalize(&records).await;
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].country_code, "USA");
        assert_eq!(metrics[0].display_name, "United States");
        assert_eq!(metrics[0].value, 150.0);
        assert_eq!(metrics[0].as_of, 2021);
        assert_eq!(metrics[1].display_name, "XYZ");
        assert_eq!((metrics[1].latitude, metrics[1].longitude), (0.0, 0.0));
        assert_eq!(mock.calls(Endpoint::Countries), 1);
    }

    #[tokio::test]
    async fn test_normalize_survives_reference_outage() {
        let (_, normalizer) =
            normalizer(MockDiseaseApi::sample().failing(Endpoint::Countries));
        let records: Vec<_> = ["NER", "TCD", "BFA"]
            .iter()
            .map(|c| RawIndicatorRecord::country(*c, 2017, Some(1.0)))
            .collect();

        let metrics = normalizer.with_batch_size(2).normalize(&records).await;
        assert_eq!(metrics.len(), 3);
        assert!(metrics.iter().all(|m| !m.flag_url.is_empty()));
        assert_eq!(metrics[1].display_name, "Niger");
    }

    #[tokio::test]
    async fn test_normalize_live_drops_unplaceable() {
        let (_, normalizer) = normalizer(MockDiseaseApi::sample());
        let mut countries = MockDiseaseApi::sample_countries();
        countries.push(CovidCountry {
            country: "MS Zaandam".to_string(),
            country_info: CountryInfo {
                lat: None,
                long: None,
                ..Default::default()
            },
            cases: 9,
            ..Default::default()
        });

        let metrics = normalizer.normalize_live(&countries).await;
        assert_eq!(metrics.len(), 5);
        let usa = metrics.iter().find(|m| m.country_code == "USA").unwrap();
        assert_eq!(usa.value, 103_436_829.0);
        assert_eq!(usa.as_of, 1_700_000_000_000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_batches_bound_in_flight_lookups() {
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        let (in_flight, peak) = (&in_flight, &peak);

        let items: Vec<usize> = (0..10).collect();
        let out = in_batches(&items, 3, move |i| async move {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10 * (*i as u64 % 3 + 1))).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
            *i * 2
        })
        .await;

        assert_eq!(peak.load(Ordering::SeqCst), 3);
        assert_eq!(in_flight.load(Ordering::SeqCst), 0);
        assert_eq!(out, (0..10).map(|i| i * 2).collect::<Vec<_>>());
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookups_in_a_batch_wait_on_one_fetch() {
        let mock = Arc::new(MockDiseaseApi::sample().with_delay(Duration::from_millis(100)));
        let table = Arc::new(CountryReferenceTable::new(mock.clone()));
        let normalizer = Normalizer::new(table).with_batch_size(4);

        let records: Vec<RawIndicatorRecord> = ["USA", "FRA", "IND", "BRA", "ZAF", "XYZ"]
            .iter()
            .map(|code| RawIndicatorRecord::country(*code, 2020, Some(1.0)))
            .collect();
        let started = tokio::time::Instant::now();
        let metrics = normalizer.normalize(&records).await;

        assert_eq!(metrics.len(), 6);
        assert_eq!(mock.calls(Endpoint::Countries), 1);
        assert!(started.elapsed() < Duration::from_millis(200));
    }
}
