//! Error types for Herald
//!
//! This module defines custom error types used throughout the application.

use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether the error is the missing-credential case rather than a
    /// delivery failure. Callers that degrade to canned output use this
    /// to pick the right log level.
    pub fn is_unconfigured(&self) -> bool {
        matches!(self, AppError::ServiceUnavailable(_))
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
