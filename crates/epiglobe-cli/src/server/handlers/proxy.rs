//! Pass-through handlers for the upstream APIs.

use std::future::Future;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use epiglobe::ApiEndpoints;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Query string of the historical route.
#[derive(Debug, Deserialize)]
pub struct HistoricalQuery {
    /// Days of history (upstream `lastdays`).
    pub lastdays: Option<u32>,
}

/// Forward `url` untouched when an upstream client is configured, otherwise
/// serve `fallback` from the pipeline's source.
async fn forward<F, T>(
    state: &AppState,
    url: impl FnOnce(&ApiEndpoints) -> String,
    fallback: F,
    context: &str,
) -> Result<Json<Value>, ApiError>
where
    F: Future<Output = epiglobe::Result<T>>,
    T: Serialize,
{
    let body = match &state.upstream {
        Some(http) => http.get_json(&url(http.endpoints())).await,
        None => fallback
            .await
            .and_then(|data| serde_json::to_value(data).map_err(Into::into)),
    };
    body.map(Json).map_err(|e| ApiError::upstream(context, e))
}

/// `GET /api/global`
pub async fn get_global(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    forward(
        &state,
        ApiEndpoints::global,
        state.api().global(),
        "Error fetching global data",
    )
    .await
}

/// `GET /api/countries`
pub async fn get_countries(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    forward(
        &state,
        ApiEndpoints::countries,
        state.api().countries(),
        "Error fetching countries data",
    )
    .await
}

/// `GET /api/historical/:country?lastdays=N`
pub async fn get_historical(
    State(state): State<AppState>,
    Path(country): Path<String>,
    Query(query): Query<HistoricalQuery>,
) -> Result<Json<Value>, ApiError> {
    if country.is_empty() || !country.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ApiError::BadRequest(format!("Invalid country code: '{}'", country)));
    }
    let days = query
        .lastdays
        .unwrap_or(state.epiglobe.config().history_days);

    forward(
        &state,
        |endpoints| endpoints.historical(&country, days),
        state.api().historical(&country, days),
        "Error fetching historical data",
    )
    .await
}

/// `GET /api/who/data/:code`
pub async fn get_who_data(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ApiError::BadRequest("Disease code is required".to_string()));
    }
    let context = format!("Failed to fetch WHO data for {}", code);
    let api = state.api().clone();
    let indicator = code.clone();
    forward(
        &state,
        |endpoints| endpoints.indicator_data(&code),
        async move {
            let records = api.indicator_data(&indicator).await?;
            Ok(json!({ "value": records }))
        },
        &context,
    )
    .await
}

/// `GET /api/who/indicators`
pub async fn get_who_indicators(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let api = state.api().clone();
    forward(
        &state,
        ApiEndpoints::indicators,
        async move {
            let indicators = api.indicators().await?;
            Ok(json!({ "value": indicators }))
        },
        "Failed to fetch WHO indicators",
    )
    .await
}
