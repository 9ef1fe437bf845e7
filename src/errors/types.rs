//! Error type definitions for the tuner
//!
//! Errors are grouped by the layer that raises them. Source failures are
//! recovered by the web layer (fallback lineup or 404), lineup lookups map to
//! 404, and only configuration/internal errors surface as 5xx.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Playlist source could not be read
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Lineup lookup failures
    #[error("Lineup error: {0}")]
    Lineup(#[from] LineupError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Playlist source failures
///
/// Every variant is a flavour of "source unavailable": the caller cannot
/// distinguish them in the protocol, but they are kept apart for logging.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Upstream did not answer within the configured timeout
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// Upstream answered with a non-success status
    #[error("HTTP error: {status} - {url}")]
    Http { status: u16, url: String },

    /// Transport level failure talking to the upstream
    #[error("Request failed: {url} - {message}")]
    Request { url: String, message: String },

    /// Local playlist file could not be read
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Body could not be decompressed or decoded as UTF-8
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// Every source in a chain failed
    #[error("All {attempts} playlist sources failed")]
    Exhausted { attempts: usize },
}

/// Lineup lookup failures, both surfaced as HTTP 404
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineupError {
    /// No channel carries the requested ordinal
    #[error("Unknown channel: {ordinal}")]
    UnknownChannel { ordinal: u32 },

    /// The tuner path is malformed (missing or non-numeric channel)
    #[error("Invalid tuner path: {path}")]
    InvalidPath { path: String },
}

impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl SourceError {
    /// Create a decode error
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Map a reqwest failure, keeping timeouts distinguishable
    ///
    /// `url` should already be safe to log. The URL reqwest attaches to the
    /// error is stripped so credentials never reach the message.
    pub fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if let Some(status) = error.status() {
            Self::Http {
                status: status.as_u16(),
                url: url.to_string(),
            }
        } else {
            Self::Request {
                url: url.to_string(),
                message: error.without_url().to_string(),
            }
        }
    }
}

impl LineupError {
    pub fn invalid_path<S: Into<String>>(path: S) -> Self {
        Self::InvalidPath { path: path.into() }
    }
}
