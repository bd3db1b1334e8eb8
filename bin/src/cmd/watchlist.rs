//! Watchlist command implementation.

use super::banner;
use crate::WatchlistAction;
use anyhow::{Context, Result};
use screener_watchlist::{Watchlist, WatchlistStore, export_file, import_file};
use tracing::warn;

/// Apply a watchlist action, saving the result when it changes anything.
pub(crate) fn run_action(store: &WatchlistStore, action: WatchlistAction) -> Result<()> {
    let mut list = store.load();

    let changed = match action {
        WatchlistAction::List => {
            print_watchlist(&list);
            false
        }
        WatchlistAction::Export { path } => {
            export_file(&list, &path)
                .with_context(|| format!("failed exporting to {}", path.display()))?;
            println!("Exported {} tab(s) to {}", list.tabs().len(), path.display());
            false
        }
        WatchlistAction::Import { path } => {
            list = import_file(&path)
                .with_context(|| format!("failed importing {}", path.display()))?;
            println!("Imported {} tab(s) from {}", list.tabs().len(), path.display());
            true
        }
        other => apply_edit(&mut list, other)?,
    };

    if changed {
        store
            .save(&list)
            .with_context(|| format!("failed saving {}", store.path().display()))?;
    }
    Ok(())
}

/// Apply an in-memory edit and report whether the list changed.
fn apply_edit(list: &mut Watchlist, action: WatchlistAction) -> Result<bool> {
    match action {
        WatchlistAction::AddTab { label } => {
            let index = list.add_tab(label.as_str())?;
            println!("Added tab {index}: {label}");
            Ok(true)
        }
        WatchlistAction::RemoveTab { index } => {
            let tab = list.remove_tab(index)?;
            println!("Removed tab {index}: {}", tab.label);
            Ok(true)
        }
        WatchlistAction::RenameTab { index, label } => {
            list.rename_tab(index, label.as_str())?;
            println!("Renamed tab {index} to {label}");
            Ok(true)
        }
        WatchlistAction::Add { symbols, tab } => {
            let mut changed = false;
            for symbol in &symbols {
                if symbol.trim().is_empty() {
                    warn!(tab, "skipping empty ticker symbol");
                    continue;
                }
                if list.add_ticker(tab, symbol)? {
                    changed = true;
                } else {
                    warn!(symbol = %symbol, tab, "ticker already in tab");
                }
            }
            Ok(changed)
        }
        WatchlistAction::Remove { symbols, tab } => {
            let mut changed = false;
            for symbol in &symbols {
                if list.remove_ticker(tab, symbol)? {
                    changed = true;
                } else {
                    warn!(symbol = %symbol, tab, "ticker not in tab");
                }
            }
            Ok(changed)
        }
        WatchlistAction::RemoveRow { row, tab } => {
            let symbol = list.remove_row(tab, row)?;
            println!("Removed {symbol} from tab {tab}");
            Ok(true)
        }
        WatchlistAction::List | WatchlistAction::Import { .. } | WatchlistAction::Export { .. } => {
            Ok(false)
        }
    }
}

fn print_watchlist(list: &Watchlist) {
    banner("Watchlist");
    if list.is_empty() {
        println!("No tabs.\n");
        return;
    }
    for tab in list.tabs() {
        println!("[{}] {}", tab.index, tab.label);
        println!("{}", "-".repeat(60));
        if tab.tickers.is_empty() {
            println!("  (empty)");
        }
        for (row, symbol) in tab.tickers.iter().enumerate() {
            println!("  {row:>3}  {symbol}");
        }
        println!();
    }
}
