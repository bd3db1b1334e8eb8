//! Fundamentals backend client for the stock screener.
//!
//! The backend exposes `GET /api/stock?tickers=A,B,C` (at most 50 symbols)
//! returning one quote summary per ticker, and `GET /api/health`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use screener_quotes::QuoteClient;
//! use screener_scales::{Metric, TierEvaluator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = QuoteClient::from_env();
//!     let evaluator = TierEvaluator::default();
//!
//!     for info in client.tickers(&["NVDA", "KO"]).await? {
//!         let pe = info.metric_value(Metric::PriceToEarnings);
//!         println!("{}: {}", info.display_name(), evaluator.evaluate(Metric::PriceToEarnings, pe).basic_color);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `SCREENER_BACKEND_URL` in your environment or `.env` file:
//!
//! ```bash
//! SCREENER_BACKEND_URL=http://localhost:8000
//! ```

mod client;
mod error;
mod types;

pub use client::{BACKEND_URL_ENV, DEFAULT_BACKEND_URL, MAX_SYMBOLS, QuoteClient, normalize_symbols};
pub use error::QuoteError;
pub use types::TickerInfo;

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, QuoteError>;
