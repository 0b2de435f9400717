//! HTTP implementation of [`DiseaseApi`] over reqwest.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ApiEndpoints, EpiglobeConfig};
use crate::error::{EpiglobeError, Result};
use crate::models::{
    CovidCountry, GlobalData, HistoricalData, ODataPayload, RawIndicatorRecord, WhoIndicator,
};

use super::api::DiseaseApi;

/// Longest upstream error body kept in an error message.
const MAX_ERROR_BODY: usize = 200;

/// Disease data over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDiseaseApi {
    client: Client,
    endpoints: ApiEndpoints,
}

impl HttpDiseaseApi {
    /// Build a client from configuration.
    pub fn new(config: &EpiglobeConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| EpiglobeError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoints: config.endpoints.clone(),
        })
    }

    /// Endpoint layout in use.
    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    /// GET `url` and return the JSON body untouched.
    pub async fn get_json(&self, url: &str) -> Result<Value> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| EpiglobeError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|&i| body.is_char_boundary(i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(EpiglobeError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| EpiglobeError::Parse(format!("Invalid JSON from '{}': {}", url, e)))
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let value = self.get_json(url).await?;
        serde_json::from_value(value)
            .map_err(|e| EpiglobeError::Parse(format!("Unexpected shape from '{}': {}", url, e)))
    }
}

/// Parse a list payload element by element, dropping elements that fail.
pub(crate) fn parse_list<T: DeserializeOwned>(url: &str, payload: Value) -> Result<Vec<T>> {
    let items = serde_json::from_value::<ODataPayload<Value>>(payload)
        .map_err(|_| EpiglobeError::Parse(format!("Expected a list from '{}'", url)))?
        .into_vec();

    let total = items.len();
    let parsed: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if parsed.len() < total {
        warn!(
            "Dropped {} of {} malformed elements from '{}'",
            total - parsed.len(),
            total,
            url
        );
    }
    Ok(parsed)
}

#[async_trait]
impl DiseaseApi for HttpDiseaseApi {
    async fn global(&self) -> Result<GlobalData> {
        self.get(&self.endpoints.global()).await
    }

    async fn countries(&self) -> Result<Vec<CovidCountry>> {
        let url = self.endpoints.countries();
        let payload = self.get_json(&url).await?;
        parse_list(&url, payload)
    }

    async fn historical(&self, country: &str, last_days: u32) -> Result<HistoricalData> {
        let code = country.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(EpiglobeError::InvalidCountryCode(country.to_string()));
        }
        self.get(&self.endpoints.historical(code, last_days)).await
    }

    async fn indicator_data(&self, code: &str) -> Result<Vec<RawIndicatorRecord>> {
        let url = self.endpoints.indicator_data(code);
        let payload = self.get_json(&url).await?;
        parse_list(&url, payload)
    }

    async fn indicators(&self) -> Result<Vec<WhoIndicator>> {
        let url = self.endpoints.indicators();
        let payload = self.get_json(&url).await?;
        parse_list(&url, payload)
    }

    fn name(&self) -> &str {
        match self.endpoints {
            ApiEndpoints::Gateway { .. } => "gateway",
            ApiEndpoints::Direct { .. } => "direct",
        }
    }
}
