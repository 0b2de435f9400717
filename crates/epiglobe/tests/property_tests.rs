//! Property-based tests for normalization and aggregation.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p epiglobe --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p epiglobe --test property_tests
//! ```

use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;

use epiglobe::aggregate::aggregate;
use epiglobe::models::{COUNTRY_SPATIAL_TYPE, RawIndicatorRecord};
use epiglobe::normalize::select_latest;
use epiglobe::{CountryReference, DiseaseCategory, NormalizedCountryMetric};

// =============================================================================
// Test Strategies
// =============================================================================

fn spatial_type() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => Just(COUNTRY_SPATIAL_TYPE.to_string()),
        1 => Just("REGION".to_string()),
        1 => Just("GLOBAL".to_string()),
        1 => "[A-Z]{3,8}",
    ]
}

fn country_code() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("USA".to_string()),
        Just("FRA".to_string()),
        Just("IND".to_string()),
        "[A-Z]{2,3}",
    ]
}

fn numeric_value() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        Just(None),
        Just(Some(0.0)),
        (-100.0f64..-0.001).prop_map(Some),
        (0.0f64..1e6).prop_map(Some),
    ]
}

prop_compose! {
    fn raw_record()(
        spatial in spatial_type(),
        code in country_code(),
        year in 1990i64..2025,
        value in numeric_value(),
    ) -> RawIndicatorRecord {
        RawIndicatorRecord::spatial(spatial, code, year, value)
    }
}

fn category() -> impl Strategy<Value = DiseaseCategory> {
    prop_oneof![
        Just(DiseaseCategory::Coverage),
        Just(DiseaseCategory::Incidence),
        Just(DiseaseCategory::Unclassified),
    ]
}

fn metric(code: &str, value: f64) -> NormalizedCountryMetric {
    NormalizedCountryMetric::from_reference(code, &CountryReference::synthetic(code), value, 2022)
}

// =============================================================================
// Normalization Properties
// =============================================================================

proptest! {
    /// At most one output per distinct eligible country code.
    #[test]
    fn one_entry_per_eligible_country(records in prop::collection::vec(raw_record(), 0..60)) {
        let latest = select_latest(&records);
        let eligible: HashSet<String> = records
            .iter()
            .filter_map(|r| r.eligible().map(|(code, _)| code.to_uppercase()))
            .collect();
        prop_assert_eq!(latest.len(), eligible.len());
    }

    /// The selected time key is the maximum among the country's eligible records.
    #[test]
    fn as_of_is_latest_time_key(records in prop::collection::vec(raw_record(), 0..60)) {
        let mut expected: BTreeMap<String, i64> = BTreeMap::new();
        for record in &records {
            if let Some((code, _)) = record.eligible() {
                let entry = expected.entry(code.to_uppercase()).or_insert(i64::MIN);
                *entry = (*entry).max(record.time_key());
            }
        }
        let latest = select_latest(&records);
        for (code, (_, as_of)) in &latest {
            prop_assert_eq!(Some(as_of), expected.get(code));
        }
    }

    /// Non-country records never reach the output.
    #[test]
    fn non_country_records_excluded(
        code in "[A-Z]{3}",
        spatial in "(REGION|GLOBAL|WORLDBANKINCOMEGROUP)",
        value in 0.0f64..1e6,
    ) {
        let records = vec![RawIndicatorRecord::spatial(spatial, code, 2020, Some(value))];
        prop_assert!(select_latest(&records).is_empty());
    }

    /// Selected values are always finite and non-negative.
    #[test]
    fn selected_values_non_negative(records in prop::collection::vec(raw_record(), 0..60)) {
        for (value, _) in select_latest(&records).values() {
            prop_assert!(value.is_finite() && *value >= 0.0);
        }
    }
}

// =============================================================================
// Aggregation Properties
// =============================================================================

proptest! {
    /// The affected count equals the number of metrics with a usable value.
    #[test]
    fn affected_count_matches_input(
        values in prop::collection::vec(0.0f64..1e5, 0..40),
        category in category(),
    ) {
        let metrics: Vec<_> = values
            .iter()
            .enumerate()
            .map(|(i, v)| metric(&format!("C{:03}", i), *v))
            .collect();
        let summary = aggregate(&metrics, category, 1000.0);
        prop_assert_eq!(summary.affected_country_count, values.len());
    }

    /// Coverage maximum never exceeds the total and the mean lies within range.
    #[test]
    fn coverage_metrics_bounded(values in prop::collection::vec(0.0f64..100.0, 1..40)) {
        let metrics: Vec<_> = values
            .iter()
            .enumerate()
            .map(|(i, v)| metric(&format!("C{:03}", i), *v))
            .collect();
        let summary = aggregate(&metrics, DiseaseCategory::Coverage, 1000.0);

        let max = summary.secondary_metric.value().unwrap();
        let mean = summary.tertiary_metric.value().unwrap();
        prop_assert!(max <= summary.primary_total + 1e-6);
        prop_assert!(mean <= max + 0.5);
    }

    /// Non-coverage categories never report secondary or tertiary metrics.
    #[test]
    fn incidence_has_no_secondary(values in prop::collection::vec(0.0f64..1e5, 0..20)) {
        let metrics: Vec<_> = values
            .iter()
            .enumerate()
            .map(|(i, v)| metric(&format!("C{:03}", i), *v))
            .collect();
        let summary = aggregate(&metrics, DiseaseCategory::Incidence, 1000.0);
        prop_assert!(!summary.secondary_metric.is_available());
        prop_assert!(!summary.tertiary_metric.is_available());
    }

    /// Synthetic references never panic and always stay within valid ranges.
    #[test]
    fn synthetic_reference_in_range(code in "[A-Za-z]{0,4}") {
        let reference = CountryReference::synthetic(&code);
        prop_assert!((-90.0..=90.0).contains(&reference.latitude));
        prop_assert!((-180.0..=180.0).contains(&reference.longitude));
        prop_assert!(reference.flag_url.ends_with(".png"));
    }
}
