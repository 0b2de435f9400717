//! Category-specific reductions.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::{DiseaseCategory, MetricLabels};
use crate::models::{GlobalData, NormalizedCountryMetric};

/// A summary metric that may not apply to a category.
///
/// `NotAvailable` is distinct from a measured zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    Value(f64),
    NotAvailable,
}

impl MetricValue {
    pub fn value(&self) -> Option<f64> {
        match self {
            MetricValue::Value(v) => Some(*v),
            MetricValue::NotAvailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, MetricValue::Value(_))
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Value(v) if v.fract() == 0.0 => write!(f, "{:.0}", v),
            MetricValue::Value(v) => write!(f, "{:.2}", v),
            MetricValue::NotAvailable => write!(f, "N/A"),
        }
    }
}

/// Aggregate view of one disease selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSummary {
    pub category: DiseaseCategory,
    pub primary_total: f64,
    pub secondary_metric: MetricValue,
    pub tertiary_metric: MetricValue,
    /// Countries with a defined, non-negative value.
    pub affected_country_count: usize,
    /// Extra figures published by the source, in source order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extras: IndexMap<String, u64>,
}

impl GlobalSummary {
    pub fn labels(&self) -> MetricLabels {
        self.category.metric_labels()
    }
}

/// Reduce `metrics` under `category`'s policy.
///
/// Coverage values are multiplied by `coverage_scale` before summing; the
/// resulting total is an estimate, not a measured count. Every other
/// category sums raw values and reports no secondary or tertiary metric.
/// `LiveOutbreak` is normally summarized with [`from_live`]; given only
/// metrics it falls back to the default policy.
pub fn aggregate(
    metrics: &[NormalizedCountryMetric],
    category: DiseaseCategory,
    coverage_scale: f64,
) -> GlobalSummary {
    let values: Vec<f64> = metrics
        .iter()
        .filter(|m| m.has_value())
        .map(|m| m.value)
        .collect();
    let count = values.len();

    let (primary_total, secondary_metric, tertiary_metric) = match category {
        DiseaseCategory::Coverage => {
            let scaled: Vec<f64> = values.iter().map(|v| v * coverage_scale).collect();
            let total: f64 = scaled.iter().sum();
            if count == 0 {
                (0.0, MetricValue::NotAvailable, MetricValue::NotAvailable)
            } else {
                let max = scaled.iter().copied().fold(f64::MIN, f64::max);
                let mean = (total / count as f64).round();
                (total, MetricValue::Value(max), MetricValue::Value(mean))
            }
        }
        DiseaseCategory::Incidence
        | DiseaseCategory::Unclassified
        | DiseaseCategory::LiveOutbreak => (
            values.iter().sum(),
            MetricValue::NotAvailable,
            MetricValue::NotAvailable,
        ),
    };

    GlobalSummary {
        category,
        primary_total,
        secondary_metric,
        tertiary_metric,
        affected_country_count: count,
        extras: IndexMap::new(),
    }
}

/// Summary for the live outbreak source, taken from its own global totals.
///
/// The affected-country count still comes from `metrics`.
pub fn from_live(global: &GlobalData, metrics: &[NormalizedCountryMetric]) -> GlobalSummary {
    let mut extras = IndexMap::new();
    extras.insert("active".to_string(), global.active);
    extras.insert("critical".to_string(), global.critical);
    extras.insert("tests".to_string(), global.tests);
    extras.insert("population".to_string(), global.population);
    if let Some(reported) = global.affected_countries {
        extras.insert("reportedAffectedCountries".to_string(), reported);
    }

    GlobalSummary {
        category: DiseaseCategory::LiveOutbreak,
        primary_total: global.cases as f64,
        secondary_metric: MetricValue::Value(global.deaths as f64),
        tertiary_metric: MetricValue::Value(global.recovered as f64),
        affected_country_count: metrics.iter().filter(|m| m.has_value()).count(),
        extras,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::CountryReference;

    fn metrics(values: &[f64]) -> Vec<NormalizedCountryMetric> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let code = format!("C{:02}", i);
                let reference = CountryReference::synthetic(&code);
                NormalizedCountryMetric::from_reference(code, &reference, *v, 2022)
            })
            .collect()
    }

    #[test]
    fn test_coverage_scaled() {
        let k = 1000.0;
        let summary = aggregate(&metrics(&[10.0, 20.0, 30.0]), DiseaseCategory::Coverage, k);
        assert_eq!(summary.primary_total, k * 60.0);
        assert_eq!(summary.secondary_metric, MetricValue::Value(k * 30.0));
        assert_eq!(summary.tertiary_metric, MetricValue::Value((k * 60.0 / 3.0).round()));
        assert_eq!(summary.affected_country_count, 3);
    }

    #[test]
    fn test_incidence_counts_zero() {
        let summary = aggregate(&metrics(&[5.0, 0.0, 15.0]), DiseaseCategory::Incidence, 1000.0);
        assert_eq!(summary.primary_total, 20.0);
        assert_eq!(summary.affected_country_count, 3);
        assert_eq!(summary.secondary_metric, MetricValue::NotAvailable);
        assert_eq!(summary.tertiary_metric, MetricValue::NotAvailable);
    }

    #[test]
    fn test_empty_coverage_not_available() {
        let summary = aggregate(&[], DiseaseCategory::Coverage, 1000.0);
        assert_eq!(summary.primary_total, 0.0);
        assert_eq!(summary.affected_country_count, 0);
        assert!(!summary.secondary_metric.is_available());
    }

    #[test]
    fn test_unclassified_sums_raw() {
        let summary = aggregate(&metrics(&[1.5, 2.5]), DiseaseCategory::Unclassified, 1000.0);
        assert_eq!(summary.primary_total, 4.0);
    }

    #[test]
    fn test_from_live_passes_through_totals() {
        let global = GlobalData {
            cases: 100,
            deaths: 5,
            recovered: 90,
            active: 5,
            affected_countries: Some(231),
            ..Default::default()
        };
        let summary = from_live(&global, &metrics(&[60.0, 40.0]));
        assert_eq!(summary.primary_total, 100.0);
        assert_eq!(summary.secondary_metric, MetricValue::Value(5.0));
        assert_eq!(summary.affected_country_count, 2);
        assert_eq!(summary.extras["reportedAffectedCountries"], 231);
    }

    #[test]
    fn test_metric_value_serialization() {
        let json = serde_json::to_value(MetricValue::NotAvailable).unwrap();
        assert_eq!(json, serde_json::json!({"status": "not_available"}));
        let json = serde_json::to_value(MetricValue::Value(0.0)).unwrap();
        assert_eq!(json, serde_json::json!({"status": "value", "value": 0.0}));
        assert_eq!(MetricValue::NotAvailable.to_string(), "N/A");
    }
}
