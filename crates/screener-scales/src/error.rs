//! Error types for metric tier evaluation.
//!
//! Evaluation itself never fails on bad numeric input; missing or
//! out-of-domain values produce the sentinel result instead. The errors
//! here cover lookups by name and configuration problems.

use thiserror::Error;

/// The error type for scale lookups and configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScaleError {
    /// The metric name is not one of the supported metrics.
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// A threshold value is NaN or infinite.
    #[error("Invalid threshold for {metric}: {value}")]
    InvalidThreshold {
        /// Metric whose definition was rejected.
        metric: String,
        /// The offending value.
        value: f64,
    },

    /// A color string could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// A specialized Result type for scale operations.
pub type Result<T> = std::result::Result<T, ScaleError>;
