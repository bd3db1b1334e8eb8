//! Screener CLI binary.
//!
//! Colors fundamentals for a watchlist of tickers by metric tier.

mod cmd;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use config::{Config, ConfigOverrides};
use std::{path::PathBuf, process};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "screener")]
#[command(about = "Stock screener with tiered metric coloring", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.config/screener/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Path to the watchlist file
    #[arg(long, global = true)]
    watchlist: Option<PathBuf>,

    /// Treat unknown metric names as missing instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for commands that produce data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List supported metrics and their thresholds
    Metrics,

    /// Evaluate a single metric value
    Evaluate {
        /// Metric label or slug (e.g. "P/E" or "pe")
        metric: String,

        /// Value to evaluate; omit for a missing value
        #[arg(allow_hyphen_values = true)]
        value: Option<f64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show the color legend for a metric
    Legend {
        /// Metric label or slug
        metric: String,
    },

    /// Fetch fundamentals and show the colored screener table
    Screen {
        /// Ticker symbols (defaults to the watchlist tab)
        #[arg(value_delimiter = ',')]
        symbols: Vec<String>,

        /// Watchlist tab to screen when no symbols are given
        #[arg(short, long, default_value = "0")]
        tab: u32,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check that the backend is reachable
    Health,

    /// Manage watchlist tabs and tickers
    Watchlist {
        #[command(subcommand)]
        action: WatchlistAction,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum WatchlistAction {
    /// Show all tabs and their tickers
    List,

    /// Add a new tab
    AddTab {
        /// Tab label
        label: String,
    },

    /// Remove a tab
    RemoveTab {
        /// Tab index
        index: u32,
    },

    /// Rename a tab
    RenameTab {
        /// Tab index
        index: u32,
        /// New label
        label: String,
    },

    /// Add tickers to a tab
    Add {
        /// Ticker symbols
        #[arg(required = true, value_delimiter = ',')]
        symbols: Vec<String>,

        /// Tab index
        #[arg(short, long, default_value = "0")]
        tab: u32,
    },

    /// Remove tickers from a tab by symbol
    Remove {
        /// Ticker symbols
        #[arg(required = true, value_delimiter = ',')]
        symbols: Vec<String>,

        /// Tab index
        #[arg(short, long, default_value = "0")]
        tab: u32,
    },

    /// Remove the ticker at a row position (0-based)
    RemoveRow {
        /// Row position
        row: usize,

        /// Tab index
        #[arg(short, long, default_value = "0")]
        tab: u32,
    },

    /// Replace the watchlist with an exported JSON file
    Import {
        /// File to import
        path: PathBuf,
    },

    /// Write the watchlist to a JSON file
    Export {
        /// Destination file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(ConfigOverrides {
        backend_url: cli.backend,
        watchlist_path: cli.watchlist,
        lenient: cli.lenient,
    });
    let evaluator = config.evaluator()?;

    match cli.command {
        Commands::Metrics => {
            cmd::metrics::list_metrics(&evaluator);
        }
        Commands::Evaluate {
            metric,
            value,
            format,
        } => {
            cmd::evaluate::evaluate_value(&evaluator, &metric, value, format)?;
        }
        Commands::Legend { metric } => {
            cmd::legend::show_legend(&evaluator, &metric)?;
        }
        Commands::Screen {
            symbols,
            tab,
            format,
        } => {
            let client = config.quote_client();
            let store = config.watchlist_store();
            cmd::screen::screen(&evaluator, &client, &store, &symbols, tab, format).await?;
        }
        Commands::Health => {
            cmd::health::check_health(&config.quote_client()).await?;
        }
        Commands::Watchlist { action } => {
            cmd::watchlist::run_action(&config.watchlist_store(), action)?;
        }
    }

    Ok(())
}
