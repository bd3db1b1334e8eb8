//! Data types for backend responses.

use screener_scales::Metric;
use serde::{Deserialize, Deserializer, Serialize};

/// Fundamentals for one ticker, as returned by the backend.
///
/// Field names follow the upstream quote summary. Every numeric field is
/// optional because upstream data is frequently incomplete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerInfo {
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Short company name.
    #[serde(default)]
    pub short_name: Option<String>,
    /// Last traded price.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub current_price: Option<f64>,
    /// Trailing price to earnings.
    #[serde(rename = "trailingPE", default, deserialize_with = "lenient_f64")]
    pub trailing_pe: Option<f64>,
    /// Trailing PEG ratio.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub trailing_peg_ratio: Option<f64>,
    /// Price to trailing twelve month sales.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_to_sales_trailing12_months: Option<f64>,
    /// Price to book.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_to_book: Option<f64>,
    /// Trailing annual dividend yield, as a fraction.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub trailing_annual_dividend_yield: Option<f64>,
    /// Payout ratio, as a fraction.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub payout_ratio: Option<f64>,
    /// Debt to equity, in percent (150 means 1.5x).
    #[serde(default, deserialize_with = "lenient_f64")]
    pub debt_to_equity: Option<f64>,
    /// Current ratio.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub current_ratio: Option<f64>,
    /// Beta against the market.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub beta: Option<f64>,
    /// Return on equity, as a fraction.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub return_on_equity: Option<f64>,
    /// Return on assets, as a fraction.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub return_on_assets: Option<f64>,
    /// Enterprise value to revenue.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub enterprise_to_revenue: Option<f64>,
    /// Enterprise value to EBITDA.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub enterprise_to_ebitda: Option<f64>,
}

impl TickerInfo {
    /// Name to show in the first table column.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.short_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.symbol)
    }

    /// The value to evaluate for `metric`, converted to the units the
    /// threshold tables use.
    ///
    /// Dividend yield, ROE and ROA arrive as fractions and are returned as
    /// percentages. Debt to equity arrives as a percentage and is returned
    /// as a ratio.
    #[must_use]
    pub fn metric_value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::PriceToEarnings => self.trailing_pe,
            Metric::PriceEarningsToGrowth => self.trailing_peg_ratio,
            Metric::PriceToSales => self.price_to_sales_trailing12_months,
            Metric::PriceToBook => self.price_to_book,
            Metric::DividendYield => self.trailing_annual_dividend_yield.map(|v| v * 100.0),
            Metric::PayoutRatio => self.payout_ratio,
            Metric::DebtToEquity => self.debt_to_equity.map(|v| v / 100.0),
            Metric::CurrentRatio => self.current_ratio,
            Metric::Beta => self.beta,
            Metric::ReturnOnEquity => self.return_on_equity.map(|v| v * 100.0),
            Metric::ReturnOnAssets => self.return_on_assets.map(|v| v * 100.0),
            Metric::EvToRevenue => self.enterprise_to_revenue,
            Metric::EvToEbitda => self.enterprise_to_ebitda,
        }
    }
}

/// Body of a `/api/stock` response: either a list of tickers or an
/// error object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum StockResponse {
    /// Fundamentals, one entry per ticker that resolved.
    Tickers(Vec<TickerInfo>),
    /// Validation failure reported by the backend.
    Error {
        /// Message from the backend.
        error: String,
    },
}

/// Accept numbers, numeric strings, and null. Anything else, including
/// `"Infinity"`, becomes `None`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}
