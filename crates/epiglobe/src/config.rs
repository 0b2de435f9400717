//! Pipeline configuration and environment overrides.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};

/// Default disease.sh COVID-19 API root.
pub const DEFAULT_COVID_API_URL: &str = "https://disease.sh/v3/covid-19";

/// Default WHO Global Health Observatory OData root.
pub const DEFAULT_WHO_API_URL: &str = "https://ghoapi.azureedge.net/api";

/// Multiplier turning a coverage percentage into an estimated head count.
///
/// This is a heuristic carried over from the dashboard, not a derived figure.
/// Override it with `EPIGLOBE_COVERAGE_SCALE` or [`EpiglobeConfig::coverage_scale`].
pub const DEFAULT_COVERAGE_SCALE: f64 = 1000.0;

/// Number of countries resolved concurrently per batch.
pub const DEFAULT_RESOLVE_BATCH_SIZE: usize = 50;

/// Where disease data is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEndpoints {
    /// A proxy gateway exposing `/global`, `/countries`, `/historical/{code}`,
    /// `/who/data/{code}` and `/who/indicators`.
    Gateway { base_url: String },
    /// The upstream APIs themselves.
    Direct {
        covid_base_url: String,
        who_base_url: String,
    },
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        ApiEndpoints::Direct {
            covid_base_url: DEFAULT_COVID_API_URL.to_string(),
            who_base_url: DEFAULT_WHO_API_URL.to_string(),
        }
    }
}

impl ApiEndpoints {
    /// Gateway layout rooted at `base_url` (e.g. `http://localhost:3002/api`).
    pub fn gateway(base_url: impl Into<String>) -> Self {
        ApiEndpoints::Gateway {
            base_url: trim_base(base_url.into()),
        }
    }

    /// URL of the live outbreak global summary.
    pub fn global(&self) -> String {
        match self {
            ApiEndpoints::Gateway { base_url } => format!("{}/global", base_url),
            ApiEndpoints::Direct { covid_base_url, .. } => format!("{}/all", covid_base_url),
        }
    }

    /// URL of the live outbreak country list.
    pub fn countries(&self) -> String {
        match self {
            ApiEndpoints::Gateway { base_url } => format!("{}/countries", base_url),
            ApiEndpoints::Direct { covid_base_url, .. } => format!("{}/countries", covid_base_url),
        }
    }

    /// URL of one country's time series.
    pub fn historical(&self, country: &str, last_days: u32) -> String {
        match self {
            ApiEndpoints::Gateway { base_url } => {
                format!("{}/historical/{}?lastdays={}", base_url, country, last_days)
            }
            ApiEndpoints::Direct { covid_base_url, .. } => format!(
                "{}/historical/{}?lastdays={}",
                covid_base_url, country, last_days
            ),
        }
    }

    /// URL of one WHO indicator's observations.
    pub fn indicator_data(&self, code: &str) -> String {
        match self {
            ApiEndpoints::Gateway { base_url } => format!("{}/who/data/{}", base_url, code),
            ApiEndpoints::Direct { who_base_url, .. } => format!("{}/{}", who_base_url, code),
        }
    }

    /// URL of the WHO indicator catalog.
    pub fn indicators(&self) -> String {
        match self {
            ApiEndpoints::Gateway { base_url } => format!("{}/who/indicators", base_url),
            ApiEndpoints::Direct { who_base_url, .. } => format!("{}/Indicator", who_base_url),
        }
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Configuration for the disease data pipeline.
#[derive(Debug, Clone)]
pub struct EpiglobeConfig {
    /// Data source layout.
    pub endpoints: ApiEndpoints,
    /// Timeout for disease data requests.
    pub request_timeout: Duration,
    /// Timeout for the one-off country reference fetch.
    pub reference_timeout: Duration,
    /// Countries resolved concurrently per batch.
    pub resolve_batch_size: usize,
    /// Percentage-to-count multiplier for coverage diseases.
    pub coverage_scale: f64,
    /// Days of history requested for drill-downs.
    pub history_days: u32,
    /// Maximum countries in one comparison.
    pub comparison_limit: usize,
}

impl Default for EpiglobeConfig {
    fn default() -> Self {
        Self {
            endpoints: ApiEndpoints::default(),
            request_timeout: Duration::from_secs(15),
            reference_timeout: Duration::from_secs(5),
            resolve_batch_size: DEFAULT_RESOLVE_BATCH_SIZE,
            coverage_scale: DEFAULT_COVERAGE_SCALE,
            history_days: 30,
            comparison_limit: 5,
        }
    }
}

impl EpiglobeConfig {
    /// Defaults overridden by `EPIGLOBE_*` environment variables.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = env_var("EPIGLOBE_GATEWAY_URL") {
            config.endpoints = ApiEndpoints::gateway(url);
        } else {
            let covid = env_var("EPIGLOBE_COVID_API");
            let who = env_var("EPIGLOBE_WHO_API");
            if covid.is_some() || who.is_some() {
                config.endpoints = ApiEndpoints::Direct {
                    covid_base_url: trim_base(
                        covid.unwrap_or_else(|| DEFAULT_COVID_API_URL.to_string()),
                    ),
                    who_base_url: trim_base(who.unwrap_or_else(|| DEFAULT_WHO_API_URL.to_string())),
                };
            }
        }

        if let Some(secs) = env_parse::<u64>("EPIGLOBE_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(scale) = env_parse::<f64>("EPIGLOBE_COVERAGE_SCALE") {
            if scale.is_finite() && scale > 0.0 {
                config.coverage_scale = scale;
            } else {
                warn!("EPIGLOBE_COVERAGE_SCALE must be positive, keeping {}", config.coverage_scale);
            }
        }
        if let Some(batch) = env_parse::<usize>("EPIGLOBE_BATCH_SIZE") {
            config = config.with_batch_size(batch);
        }

        config
    }

    /// Use a gateway at `base_url` instead of the upstream APIs.
    pub fn with_gateway(mut self, base_url: impl Into<String>) -> Self {
        self.endpoints = ApiEndpoints::gateway(base_url);
        self
    }

    /// Set the resolve batch size (minimum 1).
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.resolve_batch_size = size.max(1);
        self
    }

    /// Set the coverage scaling constant.
    pub fn with_coverage_scale(mut self, scale: f64) -> Self {
        self.coverage_scale = scale;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: FromStr>(key: &str) -> Option<T>
where
    T::Err: Display,
{
    let raw = env_var(key)?;
    match raw.trim().parse() {
        Ok(value) => {
            info!("{key} set to {raw}");
            Some(value)
        }
        Err(e) => {
            warn!("Invalid {key} value '{raw}': {e}, using default");
            None
        }
    }
}
