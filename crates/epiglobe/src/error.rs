//! Error types for the epiglobe library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for epiglobe operations.
#[derive(Debug, Error)]
pub enum EpiglobeError {
    /// Transport-level failure talking to an upstream API.
    #[error("HTTP error for '{url}': {message}")]
    Http { url: String, message: String },

    /// Upstream answered with a non-success status.
    #[error("Upstream returned {status} for '{url}': {body}")]
    UpstreamStatus {
        url: String,
        status: u16,
        body: String,
    },

    /// Upstream request timed out.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Response did not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Disease id not present in the catalog.
    #[error("Unknown disease: {0}")]
    UnknownDisease(String),

    /// Country code that cannot be used as a lookup key.
    #[error("Invalid country code: '{0}'")]
    InvalidCountryCode(String),

    /// Comparison requested for more countries than allowed.
    #[error("Too many countries to compare: {requested} (limit {limit})")]
    TooManyCountries { requested: usize, limit: usize },

    /// Error writing an export file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EpiglobeError {
    /// Build an error from a reqwest failure for the given URL.
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EpiglobeError::Timeout(url.to_string())
        } else {
            EpiglobeError::Http {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Whether this error means the upstream data source could not be reached
    /// or did not answer usefully.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            EpiglobeError::Http { .. }
                | EpiglobeError::UpstreamStatus { .. }
                | EpiglobeError::Timeout(_)
                | EpiglobeError::Parse(_)
                | EpiglobeError::Json(_)
        )
    }
}

/// Result type alias for epiglobe operations.
pub type Result<T> = std::result::Result<T, EpiglobeError>;
