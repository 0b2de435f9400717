//! Normalized disease data handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use epiglobe::{Disease, DiseaseSnapshot, MetricLabels};
use serde::Serialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Catalog entry with its summary labels.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseEntry {
    #[serde(flatten)]
    pub disease: Disease,
    pub labels: MetricLabels,
}

/// `GET /api/diseases`
pub async fn list_diseases(State(state): State<AppState>) -> Json<Vec<DiseaseEntry>> {
    let entries = state
        .epiglobe
        .catalog()
        .iter()
        .map(|disease| DiseaseEntry {
            labels: disease.category.metric_labels(),
            disease: disease.clone(),
        })
        .collect();
    Json(entries)
}

/// `GET /api/diseases/:id`
///
/// Source outages come back as a 200 snapshot with an unavailable status.
pub async fn get_disease(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DiseaseSnapshot>, ApiError> {
    let snapshot = state.epiglobe.load_disease(&id).await?;
    Ok(Json(snapshot))
}
