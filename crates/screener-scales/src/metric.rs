//! The supported financial metrics and their directionality.

use crate::{Result, ScaleError};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Whether lower or higher values of a metric are more favorable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Lower values are better; crossing a threshold going up is worse.
    Ascending,
    /// Higher values are better; crossing a threshold going down is worse.
    Descending,
}

impl Direction {
    /// Short human-readable hint.
    #[must_use]
    pub const fn hint(&self) -> &'static str {
        match self {
            Self::Ascending => "lower is better",
            Self::Descending => "higher is better",
        }
    }
}

/// A financial ratio shown as a screener column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    /// Price to earnings.
    #[serde(rename = "pe")]
    PriceToEarnings,
    /// Price/earnings to growth.
    #[serde(rename = "peg")]
    PriceEarningsToGrowth,
    /// Price to sales.
    #[serde(rename = "ps")]
    PriceToSales,
    /// Price to book.
    #[serde(rename = "pb")]
    PriceToBook,
    /// Trailing dividend yield, in percent.
    #[serde(rename = "dividend-yield")]
    DividendYield,
    /// Share of earnings paid as dividends, as a fraction.
    #[serde(rename = "payout-ratio")]
    PayoutRatio,
    /// Total debt over shareholder equity, as a ratio.
    #[serde(rename = "debt-to-equity")]
    DebtToEquity,
    /// Current assets over current liabilities.
    #[serde(rename = "current-ratio")]
    CurrentRatio,
    /// Volatility relative to the market.
    #[serde(rename = "beta")]
    Beta,
    /// Return on equity, in percent.
    #[serde(rename = "roe")]
    ReturnOnEquity,
    /// Return on assets, in percent.
    #[serde(rename = "roa")]
    ReturnOnAssets,
    /// Enterprise value to revenue.
    #[serde(rename = "ev-to-revenue")]
    EvToRevenue,
    /// Enterprise value to EBITDA.
    #[serde(rename = "ev-to-ebitda")]
    EvToEbitda,
}

impl Metric {
    /// Number of supported metrics.
    pub const COUNT: usize = 13;

    /// Every supported metric, in column order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::PriceToEarnings,
        Self::PriceEarningsToGrowth,
        Self::PriceToSales,
        Self::PriceToBook,
        Self::ReturnOnEquity,
        Self::ReturnOnAssets,
        Self::EvToRevenue,
        Self::EvToEbitda,
        Self::DividendYield,
        Self::PayoutRatio,
        Self::DebtToEquity,
        Self::CurrentRatio,
        Self::Beta,
    ];

    /// Column header label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PriceToEarnings => "P/E",
            Self::PriceEarningsToGrowth => "PEG",
            Self::PriceToSales => "P/S",
            Self::PriceToBook => "P/B",
            Self::DividendYield => "Dividend Yield",
            Self::PayoutRatio => "Payout Ratio",
            Self::DebtToEquity => "Debt/Equity",
            Self::CurrentRatio => "Current Ratio",
            Self::Beta => "Beta",
            Self::ReturnOnEquity => "ROE",
            Self::ReturnOnAssets => "ROA",
            Self::EvToRevenue => "EV/Revenue",
            Self::EvToEbitda => "EV/EBITDA",
        }
    }

    /// Identifier used in configuration files and on the command line.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::PriceToEarnings => "pe",
            Self::PriceEarningsToGrowth => "peg",
            Self::PriceToSales => "ps",
            Self::PriceToBook => "pb",
            Self::DividendYield => "dividend-yield",
            Self::PayoutRatio => "payout-ratio",
            Self::DebtToEquity => "debt-to-equity",
            Self::CurrentRatio => "current-ratio",
            Self::Beta => "beta",
            Self::ReturnOnEquity => "roe",
            Self::ReturnOnAssets => "roa",
            Self::EvToRevenue => "ev-to-revenue",
            Self::EvToEbitda => "ev-to-ebitda",
        }
    }

    /// Tooltip text for the column header.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::PriceToEarnings => {
                "Compares a company's current share price to its earnings per share"
            }
            Self::PriceEarningsToGrowth => {
                "Price to earnings, taking the company's earnings growth into account"
            }
            Self::PriceToSales => "Compares stock price to its revenues",
            Self::PriceToBook => "Compares a company's stock price to its book value",
            Self::DividendYield => {
                "How much a company pays out in dividends each year relative to its stock price"
            }
            Self::PayoutRatio => "The proportion of earnings paid out as dividends",
            Self::DebtToEquity => "Total liabilities relative to stockholders' equity",
            Self::CurrentRatio => "Ability to pay short-term obligations",
            Self::Beta => "Volatility in relation to the overall market",
            Self::ReturnOnEquity => "How well a company uses investments to generate income",
            Self::ReturnOnAssets => "How profitable a company is relative to its total assets",
            Self::EvToRevenue => {
                "Enterprise value relative to revenue; useful for companies without earnings"
            }
            Self::EvToEbitda => "Enterprise value relative to EBITDA",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercase and drop separators so "Debt/Equity", "debt-to-equity" and
/// "Debt To Equity" compare sensibly.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for Metric {
    type Err = ScaleError;

    /// Parse a header label or slug, ignoring case and separators.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        if wanted.is_empty() {
            return Err(ScaleError::UnknownMetric(s.to_string()));
        }

        Self::ALL
            .into_iter()
            .find(|m| normalize(m.label()) == wanted || normalize(m.slug()) == wanted)
            .ok_or_else(|| ScaleError::UnknownMetric(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        for metric in Metric::ALL {
            assert_eq!(metric.label().parse::<Metric>().unwrap(), metric);
            assert_eq!(metric.slug().parse::<Metric>().unwrap(), metric);
        }
    }

    #[test]
    fn test_parse_is_lenient_about_spelling() {
        assert_eq!("pe".parse::<Metric>().unwrap(), Metric::PriceToEarnings);
        assert_eq!(
            "Debt To Equity".parse::<Metric>().unwrap(),
            Metric::DebtToEquity
        );
        assert_eq!("ev/ebitda".parse::<Metric>().unwrap(), Metric::EvToEbitda);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "UNKNOWN_METRIC".parse::<Metric>().unwrap_err();
        assert_eq!(err, ScaleError::UnknownMetric("UNKNOWN_METRIC".to_string()));
        assert!("".parse::<Metric>().is_err());
        assert!("//".parse::<Metric>().is_err());
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<_> = Metric::ALL.iter().map(|m| normalize(m.label())).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), Metric::ALL.len());
    }

    #[test]
    fn test_serde_uses_slug() {
        let json = serde_json::to_string(&Metric::DebtToEquity).unwrap();
        assert_eq!(json, "\"debt-to-equity\"");
        for metric in Metric::ALL {
            let json = format!("\"{}\"", metric.slug());
            assert_eq!(serde_json::from_str::<Metric>(&json).unwrap(), metric);
        }
    }
}
