//! Error types for the fundamentals backend client.

use thiserror::Error;

/// Errors that can occur when fetching ticker fundamentals.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// No usable symbols were given.
    #[error("No ticker symbols provided")]
    NoSymbols,

    /// More symbols than the backend accepts in one request.
    #[error("Maximum of {max} ticker symbols allowed, got {count}")]
    TooManySymbols {
        /// Number of symbols requested.
        count: usize,
        /// Backend limit.
        max: usize,
    },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend answered with an error payload or status.
    #[error("Backend error: {0}")]
    Api(String),

    /// Symbol not found.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),
}
