//! End-to-end tests of the disease pipeline against the mock source.

use std::sync::Arc;
use std::time::Duration;

use epiglobe::models::RawIndicatorRecord;
use epiglobe::{
    CountryReferenceTable, DataStatus, Endpoint, Epiglobe, EpiglobeConfig, MetricValue,
    MockDiseaseApi, Normalizer, ReferenceStatus, Selection,
};

fn pipeline(mock: MockDiseaseApi) -> (Arc<MockDiseaseApi>, Epiglobe) {
    let mock = Arc::new(mock);
    let epiglobe = Epiglobe::new(mock.clone(), EpiglobeConfig::default());
    (mock, epiglobe)
}

// =============================================================================
// Country Reference Table
// =============================================================================

#[tokio::test]
async fn test_concurrent_initialize_fetches_once() {
    let mock = Arc::new(MockDiseaseApi::sample().with_delay(Duration::from_millis(50)));
    let table = Arc::new(CountryReferenceTable::new(mock.clone()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let table = table.clone();
            tokio::spawn(async move { table.initialize().await })
        })
        .collect();

    for handle in handles {
        let status = handle.await.expect("task panicked");
        assert_eq!(status, ReferenceStatus::Loaded { countries: 5 });
    }
    assert_eq!(mock.calls(Endpoint::Countries), 1);
}

#[tokio::test]
async fn test_resolve_is_idempotent_after_initialize() {
    let mock = Arc::new(MockDiseaseApi::sample());
    let table = CountryReferenceTable::new(mock.clone());
    table.initialize().await;

    for code in ["USA", "XYZ", "sdn"] {
        let first = table.resolve(code).await;
        let second = table.resolve(code).await;
        assert_eq!(first, second);
    }
    assert_eq!(mock.calls(Endpoint::Countries), 1);
}

#[tokio::test]
async fn test_unknown_code_gets_synthetic_entry() {
    let mock = Arc::new(MockDiseaseApi::sample());
    let table = CountryReferenceTable::new(mock);

    let reference = table.resolve("XYZ").await;
    assert_eq!(reference.display_name, "XYZ");
    assert_eq!(reference.latitude, 0.0);
    assert_eq!(reference.longitude, 0.0);
    assert_eq!(reference.flag_url, "https://disease.sh/assets/img/flags/xy.png");
}

#[tokio::test]
async fn test_slow_reference_fetch_times_out() {
    let mock = Arc::new(MockDiseaseApi::sample().with_delay(Duration::from_millis(200)));
    let table = CountryReferenceTable::with_timeout(mock.clone(), Duration::from_millis(20));

    assert_eq!(table.initialize().await, ReferenceStatus::Unavailable);
    assert!(table.is_empty());
    // The failed outcome is remembered.
    table.initialize().await;
    assert_eq!(mock.calls(Endpoint::Countries), 1);
}

// =============================================================================
// Normalizer
// =============================================================================

#[tokio::test]
async fn test_latest_observation_and_region_excluded() {
    let mock = Arc::new(MockDiseaseApi::sample());
    let normalizer = Normalizer::new(Arc::new(CountryReferenceTable::new(mock)));
    let records = vec![
        RawIndicatorRecord::country("USA", 2020, Some(100.0)),
        RawIndicatorRecord::country("USA", 2021, Some(150.0)),
        RawIndicatorRecord::spatial("REGION", "AMR", 2021, Some(9999.0)),
    ];

    let metrics = normalizer.normalize(&records).await;
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].country_code, "USA");
    assert_eq!(metrics[0].value, 150.0);
    assert_eq!(metrics[0].as_of, 2021);
}

#[tokio::test]
async fn test_batched_resolution_shares_one_fetch() {
    let mock = Arc::new(MockDiseaseApi::sample().with_delay(Duration::from_millis(5)));
    let table = Arc::new(CountryReferenceTable::new(mock.clone()));
    let normalizer = Normalizer::new(table).with_batch_size(3);

    let records: Vec<_> = (0..10)
        .map(|i| RawIndicatorRecord::country(format!("Q{:02}", i), 2020, Some(i as f64)))
        .collect();
    let metrics = normalizer.normalize(&records).await;

    assert_eq!(metrics.len(), 10);
    assert_eq!(mock.calls(Endpoint::Countries), 1);
    assert_eq!(mock.max_concurrent_calls(), 1);
}

// =============================================================================
// Full selections
// =============================================================================

#[tokio::test]
async fn test_every_builtin_disease_loads() {
    let (_, epiglobe) = pipeline(MockDiseaseApi::sample());
    let ids: Vec<String> = epiglobe.catalog().iter().map(|d| d.id.clone()).collect();

    for id in ids {
        let snapshot = epiglobe.load_disease(&id).await.expect("known disease");
        assert_eq!(snapshot.status, DataStatus::Available, "{}", id);
        assert_eq!(
            snapshot.summary.affected_country_count,
            snapshot.metrics.iter().filter(|m| m.has_value()).count(),
            "{}",
            id
        );
    }
}

#[tokio::test]
async fn test_meningitis_counts_zero_values() {
    let (_, epiglobe) = pipeline(MockDiseaseApi::sample());
    let snapshot = epiglobe.load_disease("meningitis").await.unwrap();

    assert_eq!(snapshot.summary.affected_country_count, 3);
    assert_eq!(snapshot.summary.primary_total, 1_798.0);
    assert_eq!(snapshot.summary.tertiary_metric, MetricValue::NotAvailable);
}

#[tokio::test]
async fn test_empty_indicator_is_available_but_empty() {
    let (_, epiglobe) = pipeline(MockDiseaseApi::sample());
    let snapshot = epiglobe.load_disease("leptospirosis").await.unwrap();

    assert!(snapshot.status.is_available());
    assert!(snapshot.metrics.is_empty());
    assert_eq!(snapshot.summary.primary_total, 0.0);
}

#[tokio::test]
async fn test_live_outbreak_survives_global_outage() {
    let (_, epiglobe) = pipeline(MockDiseaseApi::sample().failing(Endpoint::Global));
    let snapshot = epiglobe.load_disease("covid-19").await.unwrap();

    assert!(snapshot.status.is_available());
    assert_eq!(snapshot.metrics.len(), 5);
    assert_eq!(
        snapshot.summary.primary_total,
        snapshot.metrics.iter().map(|m| m.value).sum::<f64>()
    );
}

#[tokio::test]
async fn test_live_outbreak_unavailable_without_countries() {
    let (_, epiglobe) = pipeline(MockDiseaseApi::sample().failing(Endpoint::Countries));
    let snapshot = epiglobe.load_disease("covid-19").await.unwrap();

    assert!(matches!(snapshot.status, DataStatus::Unavailable { .. }));
    assert!(snapshot.metrics.is_empty());
}

#[tokio::test]
async fn test_last_selection_wins() {
    let (_, epiglobe) = pipeline(
        MockDiseaseApi::sample()
            .with_indicator_delay("HIV_ARTCOVERAGE", Duration::from_millis(150)),
    );

    let (first, second) = tokio::join!(epiglobe.select("hiv"), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        epiglobe.select("tuberculosis").await
    });

    match first.unwrap() {
        Selection::Superseded { disease_id } => assert_eq!(disease_id, "hiv"),
        Selection::Current(_) => panic!("stale selection was not discarded"),
    }
    assert!(second.unwrap().into_current().is_some());
}

#[tokio::test]
async fn test_sequential_selections_are_current() {
    let (_, epiglobe) = pipeline(MockDiseaseApi::sample());
    assert!(epiglobe.select("hiv").await.unwrap().into_current().is_some());
    assert!(epiglobe.select("measles").await.unwrap().into_current().is_some());
}

// =============================================================================
// Export
// =============================================================================

#[tokio::test]
async fn test_export_csv_to_file() {
    let (_, epiglobe) = pipeline(MockDiseaseApi::sample());
    let snapshot = epiglobe.load_disease("tuberculosis").await.unwrap();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("tb.csv");
    epiglobe::export::export_csv(&snapshot.metrics, &path).expect("export failed");

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), snapshot.metrics.len() + 1);
    assert!(content.contains("India"));
}

#[test]
fn test_export_to_missing_directory_fails() {
    let err = epiglobe::export::export_csv(&[], "/nonexistent/dir/out.csv").unwrap_err();
    assert!(matches!(err, epiglobe::EpiglobeError::Io { .. }));
}
