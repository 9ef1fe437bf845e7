//! Centralized error handling for the tuner
//!
//! # Error Categories
//!
//! - **Source Errors**: playlist fetch failures (timeout, I/O, HTTP status, decoding)
//! - **Lineup Errors**: unknown channel ordinals and malformed tuner paths
//! - **Configuration Errors**: invalid settings detected at startup
//!
//! Malformed playlist entries are not errors: the parser drops them and
//! reports them through `m3u::ParseReport`.
//!
//! # Usage
//!
//! ```rust
//! use m3u_tuner::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::configuration("port must be non-zero"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;

/// Convenience type alias for Lineup Results
pub type LineupResult<T> = Result<T, LineupError>;
