//! Backend client implementation.

use crate::{
    Result,
    error::QuoteError,
    types::{StockResponse, TickerInfo},
};
use reqwest::Client;
use std::env;
use tracing::{debug, warn};

/// Backend URL used when none is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Environment variable holding the backend URL.
pub const BACKEND_URL_ENV: &str = "SCREENER_BACKEND_URL";

/// Most symbols the backend accepts per request.
pub const MAX_SYMBOLS: usize = 50;

/// Trim, upper-case, and de-duplicate ticker symbols, dropping empties.
///
/// # Errors
///
/// Returns [`QuoteError::NoSymbols`] if nothing is left and
/// [`QuoteError::TooManySymbols`] if more than [`MAX_SYMBOLS`] remain.
pub fn normalize_symbols<S: AsRef<str>>(symbols: &[S]) -> Result<Vec<String>> {
    let mut out: Vec<String> = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let symbol = symbol.as_ref().trim().to_uppercase();
        if !symbol.is_empty() && !out.contains(&symbol) {
            out.push(symbol);
        }
    }

    if out.is_empty() {
        return Err(QuoteError::NoSymbols);
    }
    if out.len() > MAX_SYMBOLS {
        return Err(QuoteError::TooManySymbols {
            count: out.len(),
            max: MAX_SYMBOLS,
        });
    }
    Ok(out)
}

/// Client for the screener's fundamentals backend.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    client: Client,
    base_url: String,
}

impl QuoteClient {
    /// Create a client for the backend at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from the `SCREENER_BACKEND_URL` environment variable,
    /// falling back to [`DEFAULT_BACKEND_URL`].
    ///
    /// This will also load from a `.env` file if present.
    #[must_use]
    pub fn from_env() -> Self {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = env::var(BACKEND_URL_ENV).unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        Self::new(base_url)
    }

    /// The backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an API endpoint.
    fn url(&self, endpoint: &str) -> String {
        format!("{}/api/{endpoint}", self.base_url)
    }

    /// Make a GET request and return the body of a successful response.
    async fn get_text(&self, endpoint: &str) -> Result<String> {
        let url = self.url(endpoint);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(QuoteError::Api(format!("HTTP {status}: {text}")));
        }

        Ok(response.text().await?)
    }

    /// Check that the backend is up.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be made or the backend
    /// answers with a non-success status.
    pub async fn health(&self) -> Result<bool> {
        let text = self.get_text("health").await?;
        Ok(text.trim().trim_matches('"') == "OK")
    }

    /// Fetch fundamentals for several tickers in one request.
    ///
    /// Tickers the backend could not resolve are simply absent from the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol list is empty or too long, the
    /// request fails, or the backend reports an error.
    pub async fn tickers<S: AsRef<str>>(&self, symbols: &[S]) -> Result<Vec<TickerInfo>> {
        let symbols = normalize_symbols(symbols)?;
        let endpoint = format!("stock?tickers={}", symbols.join(","));
        let text = self.get_text(&endpoint).await?;

        let infos = parse_stock_response(&text)?;
        if infos.len() < symbols.len() {
            let missing: Vec<&str> = symbols
                .iter()
                .filter(|s| !infos.iter().any(|i| i.symbol.eq_ignore_ascii_case(s.as_str())))
                .map(String::as_str)
                .collect();
            warn!(?missing, "backend returned no data for some tickers");
        }
        Ok(infos)
    }

    /// Fetch fundamentals for a single ticker.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::SymbolNotFound`] if the backend has no data for
    /// the symbol, or any error from [`QuoteClient::tickers`].
    pub async fn ticker(&self, symbol: &str) -> Result<TickerInfo> {
        self.tickers(&[symbol])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| QuoteError::SymbolNotFound(symbol.trim().to_uppercase()))
    }
}

/// Decode a `/api/stock` body.
fn parse_stock_response(text: &str) -> Result<Vec<TickerInfo>> {
    match serde_json::from_str::<StockResponse>(text) {
        Ok(StockResponse::Tickers(infos)) => Ok(infos),
        Ok(StockResponse::Error { error }) => Err(QuoteError::Api(error)),
        Err(_) => {
            // Re-parse as the expected shape for a useful error message.
            let infos: Vec<TickerInfo> = serde_json::from_str(text)?;
            Ok(infos)
        }
    }
}
