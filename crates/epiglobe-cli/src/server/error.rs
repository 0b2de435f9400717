//! API error types and handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use epiglobe::EpiglobeError;
use serde::Serialize;
use tracing::warn;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from client.
    BadRequest(String),
    /// Upstream fetch failed; `context` says what was being fetched.
    Upstream {
        context: String,
        source: EpiglobeError,
    },
}

impl ApiError {
    pub fn upstream(context: impl Into<String>, source: EpiglobeError) -> Self {
        ApiError::Upstream {
            context: context.into(),
            source,
        }
    }
}

/// Uniform `{message, error}` envelope.
#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "not_found".to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "bad_request".to_string()),
            ApiError::Upstream { context, source } => {
                warn!("{}: {}", context, source);
                (StatusCode::INTERNAL_SERVER_ERROR, context, source.to_string())
            }
        };

        (status, Json(ErrorResponse { message, error })).into_response()
    }
}

impl From<EpiglobeError> for ApiError {
    fn from(err: EpiglobeError) -> Self {
        match err {
            EpiglobeError::UnknownDisease(id) => ApiError::NotFound(format!("Unknown disease: {}", id)),
            EpiglobeError::InvalidCountryCode(_) | EpiglobeError::TooManyCountries { .. } => {
                ApiError::BadRequest(err.to_string())
            }
            other => ApiError::upstream("Error fetching data", other),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Upstream { context, source } => write!(f, "{}: {}", context, source),
        }
    }
}

impl std::error::Error for ApiError {}
