//! HTTP response types and error mapping
//!
//! Lineup lookups map to a plain-text 404 because tuner clients only check
//! the status. Everything else that escapes a handler is rendered as a small
//! JSON error body.

use axum::{
    Json,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Marks a `/lineup.json` response built from the fallback channel
pub const FALLBACK_HEADER: HeaderName = HeaderName::from_static("x-tuner-fallback");

pub fn fallback_header_value() -> HeaderValue {
    HeaderValue::from_static("true")
}

/// JSON body for non-protocol errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Lineup(e) => return (StatusCode::NOT_FOUND, e.to_string()).into_response(),
            AppError::Source(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Playlist source unavailable".to_string(),
            ),
            AppError::Configuration { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Configuration error: {message}"),
            ),
            AppError::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {message}"),
            ),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// 404 for paths outside the protocol
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
