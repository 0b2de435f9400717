//! Application state for the gateway.

use std::sync::Arc;

use epiglobe::{DiseaseApi, Epiglobe, HttpDiseaseApi};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Pipeline used for the normalized routes.
    pub epiglobe: Arc<Epiglobe>,
    /// Raw HTTP client for pass-through routes.
    /// If None, pass-through routes re-serialize the pipeline's source data.
    pub upstream: Option<Arc<HttpDiseaseApi>>,
}

impl AppState {
    /// State whose pass-through routes serve the pipeline's own source.
    pub fn new(epiglobe: Epiglobe) -> Self {
        Self {
            epiglobe: Arc::new(epiglobe),
            upstream: None,
        }
    }

    /// State that forwards upstream JSON untouched.
    pub fn with_upstream(epiglobe: Epiglobe, upstream: HttpDiseaseApi) -> Self {
        Self {
            epiglobe: Arc::new(epiglobe),
            upstream: Some(Arc::new(upstream)),
        }
    }

    pub fn api(&self) -> &Arc<dyn DiseaseApi> {
        self.epiglobe.api()
    }
}
