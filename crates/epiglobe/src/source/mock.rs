//! Mock data source for testing and offline use.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{EpiglobeError, Result};
use crate::models::{
    CountryInfo, CovidCountry, GlobalData, HistoricalData, RawIndicatorRecord, Timeline,
    WhoIndicator,
};

use super::api::{DiseaseApi, Endpoint};

/// Mock source that serves canned responses and counts calls.
#[derive(Default)]
pub struct MockDiseaseApi {
    global: Option<GlobalData>,
    countries: Vec<CovidCountry>,
    histories: HashMap<String, HistoricalData>,
    indicator_data: HashMap<String, Vec<RawIndicatorRecord>>,
    indicators: Vec<WhoIndicator>,
    delay: Option<Duration>,
    indicator_delays: HashMap<String, Duration>,
    failing: Mutex<HashSet<Endpoint>>,
    calls: Mutex<HashMap<Endpoint, usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockDiseaseApi {
    /// Create an empty mock. Endpoints without data answer with a 404.
    pub fn new() -> Self {
        Self::default()
    }

    /// Small consistent dataset covering every endpoint.
    pub fn sample() -> Self {
        let countries = Self::sample_countries();
        let global = GlobalData {
            cases: countries.iter().map(|c| c.cases).sum(),
            deaths: countries.iter().map(|c| c.deaths).sum(),
            recovered: countries.iter().map(|c| c.recovered).sum(),
            active: countries.iter().map(|c| c.active).sum(),
            affected_countries: Some(countries.len() as u64),
            updated: Some(1_700_000_000_000),
            ..Default::default()
        };

        let mut mock = Self::new()
            .with_global(global)
            .with_countries(countries)
            .with_indicators(vec![
                indicator("TB_1", "Incidence of tuberculosis (per 100 000 population per year)"),
                indicator("HIV_ARTCOVERAGE", "Estimated antiretroviral therapy coverage among people living with HIV (%)"),
                indicator("MENING_2", "Number of suspected meningitis cases reported"),
                indicator("LEPTO_MORTALITY", "Estimated leptospirosis deaths"),
                indicator("WHS4_543", "Hepatitis B surface antigen prevalence"),
                indicator("WHS4_544", "Measles immunization coverage among 1-year-olds (%)"),
            ]);

        mock = mock
            .with_indicator_data(
                "TB_1",
                vec![
                    RawIndicatorRecord::country("USA", 2021, Some(2.4)),
                    RawIndicatorRecord::country("USA", 2022, Some(2.5)),
                    RawIndicatorRecord::country("IND", 2022, Some(199.0)),
                    RawIndicatorRecord::country("ZAF", 2022, Some(468.0)),
                    RawIndicatorRecord::country("BRA", 2022, Some(49.0)),
                    RawIndicatorRecord::spatial("REGION", "AFR", 2022, Some(205.0)),
                    RawIndicatorRecord::spatial("GLOBAL", "GLOBAL", 2022, Some(133.0)),
                ],
            )
            .with_indicator_data(
                "HIV_ARTCOVERAGE",
                vec![
                    RawIndicatorRecord::country("ZAF", 2021, Some(71.0)),
                    RawIndicatorRecord::country("ZAF", 2022, Some(75.0)),
                    RawIndicatorRecord::country("BRA", 2022, Some(73.0)),
                    RawIndicatorRecord::country("IND", 2022, Some(68.0)),
                    RawIndicatorRecord::country("PRK", 2022, None),
                ],
            )
            .with_indicator_data(
                "MENING_2",
                vec![
                    RawIndicatorRecord::country("NER", 2017, Some(1_578.0)),
                    RawIndicatorRecord::country("TCD", 2017, Some(220.0)),
                    RawIndicatorRecord::country("BFA", 2017, Some(0.0)),
                ],
            )
            .with_indicator_data(
                "WHS4_544",
                vec![
                    RawIndicatorRecord::country("FRA", 2022, Some(90.0)),
                    RawIndicatorRecord::country("USA", 2022, Some(92.0)),
                    RawIndicatorRecord::country("IND", 2022, Some(93.0)),
                ],
            )
            .with_indicator_data("LEPTO_MORTALITY", Vec::new())
            .with_indicator_data(
                "WHS4_543",
                vec![RawIndicatorRecord::country("CHN", 2020, Some(5.5))],
            );

        for (iso2, base) in [("US", 100_000u64), ("FR", 40_000), ("IN", 45_000)] {
            mock = mock.with_history(iso2, sample_history(iso2, base));
        }
        mock
    }

    /// The five countries served by [`sample`](Self::sample).
    pub fn sample_countries() -> Vec<CovidCountry> {
        vec![
            sample_country("USA", "US", "United States", 37.09, -95.71, 103_436_829, 1_127_152, 101_000_000),
            sample_country("IND", "IN", "India", 20.59, 78.96, 45_035_393, 533_570, 44_501_823),
            sample_country("FRA", "FR", "France", 46.23, 2.21, 40_138_560, 167_642, 39_970_918),
            sample_country("BRA", "BR", "Brazil", -14.24, -51.93, 38_743_918, 711_380, 36_249_161),
            sample_country("ZAF", "ZA", "South Africa", -30.56, 22.94, 4_076_463, 102_595, 3_912_506),
        ]
    }

    pub fn with_global(mut self, global: GlobalData) -> Self {
        self.global = Some(global);
        self
    }

    pub fn with_countries(mut self, countries: Vec<CovidCountry>) -> Self {
        self.countries = countries;
        self
    }

    /// History served for `country` (matched case-insensitively).
    pub fn with_history(mut self, country: &str, history: HistoricalData) -> Self {
        self.histories.insert(country.to_uppercase(), history);
        self
    }

    pub fn with_indicator_data(mut self, code: &str, records: Vec<RawIndicatorRecord>) -> Self {
        self.indicator_data.insert(code.to_string(), records);
        self
    }

    pub fn with_indicators(mut self, indicators: Vec<WhoIndicator>) -> Self {
        self.indicators = indicators;
        self
    }

    /// Delay every call by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Delay calls for one indicator code.
    pub fn with_indicator_delay(mut self, code: &str, delay: Duration) -> Self {
        self.indicator_delays.insert(code.to_string(), delay);
        self
    }

    /// Make an endpoint fail with a 500 until cleared.
    pub fn failing(self, endpoint: Endpoint) -> Self {
        self.set_failing(endpoint, true);
        self
    }

    pub fn set_failing(&self, endpoint: Endpoint, failing: bool) {
        let mut set = self.failing.lock();
        if failing {
            set.insert(endpoint);
        } else {
            set.remove(&endpoint);
        }
    }

    /// Number of calls made to `endpoint`.
    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.calls.lock().get(&endpoint).copied().unwrap_or(0)
    }

    /// Highest number of calls that were running at the same time.
    pub fn max_concurrent_calls(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn enter(&self, endpoint: Endpoint, extra_delay: Option<Duration>) -> Result<()> {
        *self.calls.lock().entry(endpoint).or_insert(0) += 1;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(delay) = extra_delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.lock().contains(&endpoint) {
            return Err(EpiglobeError::UpstreamStatus {
                url: format!("mock://{:?}", endpoint),
                status: 500,
                body: "mock failure".to_string(),
            });
        }
        Ok(())
    }
}

fn not_found(what: &str) -> EpiglobeError {
    EpiglobeError::UpstreamStatus {
        url: format!("mock://{}", what),
        status: 404,
        body: "not found".to_string(),
    }
}

#[async_trait]
impl DiseaseApi for MockDiseaseApi {
    async fn global(&self) -> Result<GlobalData> {
        self.enter(Endpoint::Global, None).await?;
        self.global.clone().ok_or_else(|| not_found("global"))
    }

    async fn countries(&self) -> Result<Vec<CovidCountry>> {
        self.enter(Endpoint::Countries, None).await?;
        Ok(self.countries.clone())
    }

    async fn historical(&self, country: &str, _last_days: u32) -> Result<HistoricalData> {
        self.enter(Endpoint::Historical, None).await?;
        self.histories
            .get(&country.to_uppercase())
            .cloned()
            .ok_or_else(|| not_found(country))
    }

    async fn indicator_data(&self, code: &str) -> Result<Vec<RawIndicatorRecord>> {
        let delay = self.indicator_delays.get(code).copied();
        self.enter(Endpoint::IndicatorData, delay).await?;
        self.indicator_data
            .get(code)
            .cloned()
            .ok_or_else(|| not_found(code))
    }

    async fn indicators(&self) -> Result<Vec<WhoIndicator>> {
        self.enter(Endpoint::Indicators, None).await?;
        Ok(self.indicators.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Country record as the live outbreak list would return it.
#[allow(clippy::too_many_arguments)]
pub(crate) fn sample_country(
    iso3: &str,
    iso2: &str,
    name: &str,
    lat: f64,
    long: f64,
    cases: u64,
    deaths: u64,
    recovered: u64,
) -> CovidCountry {
    CovidCountry {
        country: name.to_string(),
        country_info: CountryInfo {
            iso2: Some(iso2.to_string()),
            iso3: Some(iso3.to_string()),
            lat: Some(lat),
            long: Some(long),
            flag: format!("https://disease.sh/assets/img/flags/{}.png", iso2.to_lowercase()),
        },
        cases,
        deaths,
        recovered,
        active: cases.saturating_sub(deaths).saturating_sub(recovered),
        updated: Some(1_700_000_000_000),
        ..Default::default()
    }
}

fn indicator(code: &str, name: &str) -> WhoIndicator {
    WhoIndicator {
        indicator_code: code.to_string(),
        indicator_name: name.to_string(),
        language: Some("EN".to_string()),
    }
}

fn sample_history(country: &str, base: u64) -> HistoricalData {
    let mut timeline = Timeline::default();
    for day in 1..=7u64 {
        let key = format!("3/{}/23", day);
        timeline.cases.insert(key.clone(), base + day * 120);
        timeline.deaths.insert(key.clone(), base / 100 + day);
        timeline.recovered.insert(key, 0);
    }
    HistoricalData {
        country: country.to_string(),
        province: None,
        timeline,
    }
}
