//! Error types for segment enrichment.

use thiserror::Error;

/// Result type for segment operations.
pub type Result<T> = std::result::Result<T, SegmentError>;

/// Errors raised while asking for or reading segment labels.
#[derive(Debug, Error)]
pub enum SegmentError {
    /// No API key configured
    #[error("no API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Reply did not have the expected shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Reply text was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
