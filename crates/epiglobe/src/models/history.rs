//! Per-country drill-down time series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reference::CountryReference;

use super::covid::HistoricalData;

/// Upstream date key format, e.g. `3/9/23`.
const TIMELINE_DATE_FORMAT: &str = "%m/%d/%y";

/// Cumulative counters on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub cases: u64,
    pub deaths: u64,
    pub recovered: u64,
}

/// A country's reference data plus its date-sorted time series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryHistory {
    pub country: CountryReference,
    pub points: Vec<TimelinePoint>,
}

impl CountryHistory {
    /// Build from an upstream timeline; unparseable date keys are skipped.
    pub fn from_historical(country: CountryReference, data: &HistoricalData) -> Self {
        let mut points: Vec<TimelinePoint> = data
            .timeline
            .cases
            .iter()
            .filter_map(|(key, &cases)| {
                let date = NaiveDate::parse_from_str(key, TIMELINE_DATE_FORMAT).ok()?;
                Some(TimelinePoint {
                    date,
                    cases,
                    deaths: data.timeline.deaths.get(key).copied().unwrap_or(0),
                    recovered: data.timeline.recovered.get(key).copied().unwrap_or(0),
                })
            })
            .collect();
        points.sort_by_key(|p| p.date);
        Self { country, points }
    }

    /// Most recent point.
    pub fn latest(&self) -> Option<&TimelinePoint> {
        self.points.last()
    }

    /// New cases per day, derived from the cumulative counter.
    ///
    /// Corrections that lower the cumulative count show up as 0.
    pub fn daily_new_cases(&self) -> Vec<(NaiveDate, u64)> {
        self.points
            .windows(2)
            .map(|w| (w[1].date, w[1].cases.saturating_sub(w[0].cases)))
            .collect()
    }
}
