//! Tabs of ticker symbols and their JSON import/export format.
//!
//! The exchange format is a bare JSON array of tabs:
//!
//! ```json
//! [
//!   { "label": "Watchlist", "index": 0, "tickers": ["NVDA", "KO"] }
//! ]
//! ```

use crate::{Result, WatchlistError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Label given to the tab of a fresh watchlist.
pub const DEFAULT_TAB_LABEL: &str = "Watchlist";

/// Normalize a ticker symbol: trimmed and upper-cased.
///
/// # Errors
///
/// Returns [`WatchlistError::EmptySymbol`] if nothing is left.
pub fn normalize_symbol(symbol: &str) -> Result<String> {
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(WatchlistError::EmptySymbol);
    }
    Ok(symbol)
}

/// A named tab holding an ordered list of tickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// Display label.
    pub label: String,
    /// Stable identifier of the tab.
    pub index: u32,
    /// Ticker symbols, in row order.
    pub tickers: Vec<String>,
}

impl Tab {
    /// Create an empty tab.
    #[must_use]
    pub fn new(label: impl Into<String>, index: u32) -> Self {
        Self {
            label: label.into(),
            index,
            tickers: Vec::new(),
        }
    }
}

/// An ordered set of tabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watchlist {
    tabs: Vec<Tab>,
}

impl Default for Watchlist {
    fn default() -> Self {
        Self {
            tabs: vec![Tab::new(DEFAULT_TAB_LABEL, 0)],
        }
    }
}

impl Watchlist {
    /// A watchlist with no tabs at all.
    #[must_use]
    pub const fn empty() -> Self {
        Self { tabs: Vec::new() }
    }

    /// All tabs, in display order.
    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Whether there are no tabs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Look up a tab by index.
    ///
    /// # Errors
    ///
    /// Returns [`WatchlistError::TabNotFound`] if no tab has `index`.
    pub fn tab(&self, index: u32) -> Result<&Tab> {
        self.tabs
            .iter()
            .find(|t| t.index == index)
            .ok_or(WatchlistError::TabNotFound(index))
    }

    fn tab_mut(&mut self, index: u32) -> Result<&mut Tab> {
        self.tabs
            .iter_mut()
            .find(|t| t.index == index)
            .ok_or(WatchlistError::TabNotFound(index))
    }

    /// Append a new empty tab and return its index.
    ///
    /// # Errors
    ///
    /// Returns [`WatchlistError::TabIndexExhausted`] if a tab already has
    /// the largest possible index.
    pub fn add_tab(&mut self, label: impl Into<String>) -> Result<u32> {
        let index = match self.tabs.iter().map(|t| t.index).max() {
            Some(max) => max.checked_add(1).ok_or(WatchlistError::TabIndexExhausted)?,
            None => 0,
        };
        self.tabs.push(Tab::new(label, index));
        Ok(index)
    }

    /// Remove a tab and return it.
    ///
    /// # Errors
    ///
    /// Returns [`WatchlistError::TabNotFound`] if no tab has `index`.
    pub fn remove_tab(&mut self, index: u32) -> Result<Tab> {
        let pos = self
            .tabs
            .iter()
            .position(|t| t.index == index)
            .ok_or(WatchlistError::TabNotFound(index))?;
        Ok(self.tabs.remove(pos))
    }

    /// Change a tab's label.
    ///
    /// # Errors
    ///
    /// Returns [`WatchlistError::TabNotFound`] if no tab has `index`.
    pub fn rename_tab(&mut self, index: u32, label: impl Into<String>) -> Result<()> {
        self.tab_mut(index)?.label = label.into();
        Ok(())
    }

    /// Add a ticker to the end of a tab.
    ///
    /// Returns `false` if the tab already holds the symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the tab does not exist or the symbol is empty.
    pub fn add_ticker(&mut self, index: u32, symbol: &str) -> Result<bool> {
        let symbol = normalize_symbol(symbol)?;
        let tab = self.tab_mut(index)?;
        if tab.tickers.contains(&symbol) {
            return Ok(false);
        }
        tab.tickers.push(symbol);
        Ok(true)
    }

    /// Remove a ticker from a tab by symbol.
    ///
    /// Returns `false` if the tab did not hold the symbol.
    ///
    /// # Errors
    ///
    /// Returns [`WatchlistError::TabNotFound`] if no tab has `index`.
    pub fn remove_ticker(&mut self, index: u32, symbol: &str) -> Result<bool> {
        let symbol = symbol.trim().to_uppercase();
        let tab = self.tab_mut(index)?;
        let before = tab.tickers.len();
        tab.tickers.retain(|t| *t != symbol);
        Ok(tab.tickers.len() != before)
    }

    /// Remove the ticker at a row position and return it.
    ///
    /// # Errors
    ///
    /// Returns an error if the tab does not exist or `row` is out of range.
    pub fn remove_row(&mut self, index: u32, row: usize) -> Result<String> {
        let tab = self.tab_mut(index)?;
        if row >= tab.tickers.len() {
            return Err(WatchlistError::RowOutOfRange {
                tab: index,
                row,
                len: tab.tickers.len(),
            });
        }
        Ok(tab.tickers.remove(row))
    }

    /// Parse and validate an exported watchlist.
    ///
    /// Every item must have a string `label`, a non-negative integer
    /// `index`, and a `tickers` array of strings. Tab indices must be
    /// unique. Symbols are normalized and empty ones dropped.
    ///
    /// # Errors
    ///
    /// Returns [`WatchlistError::Json`] for malformed JSON and
    /// [`WatchlistError::InvalidFormat`] for the wrong shape.
    pub fn import_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let items = value
            .as_array()
            .ok_or_else(|| WatchlistError::InvalidFormat("expected an array of tabs".to_string()))?;

        let mut tabs = Vec::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            let tab = parse_tab(item).map_err(|msg| {
                WatchlistError::InvalidFormat(format!("tab {pos}: {msg}"))
            })?;
            if tabs.iter().any(|t: &Tab| t.index == tab.index) {
                return Err(WatchlistError::InvalidFormat(format!(
                    "tab {pos}: duplicate index {}",
                    tab.index
                )));
            }
            tabs.push(tab);
        }

        Ok(Self { tabs })
    }

    /// Serialize for export, pretty printed.
    ///
    /// # Errors
    ///
    /// Returns [`WatchlistError::Json`] if serialization fails.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn parse_tab(item: &Value) -> std::result::Result<Tab, String> {
    let label = item
        .get("label")
        .and_then(Value::as_str)
        .ok_or("label must be a string")?;

    let index = item
        .get("index")
        .and_then(Value::as_u64)
        .and_then(|i| u32::try_from(i).ok())
        .ok_or("index must be a non-negative integer")?;

    let raw = item
        .get("tickers")
        .and_then(Value::as_array)
        .ok_or("tickers must be an array")?;

    let mut tickers: Vec<String> = Vec::with_capacity(raw.len());
    for ticker in raw {
        let symbol = ticker.as_str().ok_or("tickers must contain strings")?;
        if let Ok(symbol) = normalize_symbol(symbol)
            && !tickers.contains(&symbol)
        {
            tickers.push(symbol);
        }
    }

    Ok(Tab {
        label: label.to_string(),
        index,
        tickers,
    })
}
