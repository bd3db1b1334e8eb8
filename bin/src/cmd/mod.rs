//! CLI subcommand modules.
//!
//! This module contains the implementations for all screener CLI subcommands.

pub(crate) mod evaluate;
pub(crate) mod health;
pub(crate) mod legend;
pub(crate) mod metrics;
pub(crate) mod screen;
pub(crate) mod watchlist;

/// Print a boxed section banner.
pub(crate) fn banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{title:^62}║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

/// Format an optional threshold for display.
pub(crate) fn fmt_threshold(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v}"))
}
