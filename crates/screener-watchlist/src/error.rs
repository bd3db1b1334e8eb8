//! Error types for watchlist operations.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors that can occur when editing, importing, or saving watchlists.
#[derive(Debug, Error)]
pub enum WatchlistError {
    /// No tab has the given index.
    #[error("Tab not found: {0}")]
    TabNotFound(u32),

    /// No tab index is left above the highest existing one.
    #[error("No tab index available above {}", u32::MAX)]
    TabIndexExhausted,

    /// A ticker symbol was empty after trimming.
    #[error("Ticker symbol is empty")]
    EmptySymbol,

    /// A row position is past the end of the tab.
    #[error("Row {row} out of range for tab {tab} ({len} rows)")]
    RowOutOfRange {
        /// Tab index.
        tab: u32,
        /// Requested row.
        row: usize,
        /// Rows in the tab.
        len: usize,
    },

    /// Imported data parsed as JSON but does not have the watchlist shape.
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Imported data is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl WatchlistError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A specialized Result type for watchlist operations.
pub type Result<T> = std::result::Result<T, WatchlistError>;
