#![forbid(unsafe_code)]

//! Tabbed ticker watchlists for the stock screener.
//!
//! A [`Watchlist`] is an ordered set of [`Tab`]s, each holding ticker
//! symbols in row order. Watchlists persist to a JSON file on a best-effort
//! basis through [`WatchlistStore`] and can be exported to or imported from
//! the same JSON format.

pub mod error;
pub mod store;
pub mod watchlist;

pub use error::{Result, WatchlistError};
pub use store::{WatchlistStore, export_file, import_file};
pub use watchlist::{DEFAULT_TAB_LABEL, Tab, Watchlist, normalize_symbol};
