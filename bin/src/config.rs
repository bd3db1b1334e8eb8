//! Configuration file and command-line overrides for the screener CLI.

use anyhow::{Context, Result};
use screener_quotes::QuoteClient;
use screener_scales::{LookupMode, Metric, ScaleConfig, ThresholdOverride, TierEvaluator};
use screener_watchlist::WatchlistStore;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Settings read from `config.toml`.
///
/// ```toml
/// backend_url = "http://localhost:8000"
/// watchlist_path = "/home/me/.config/screener/tickers.json"
/// lookup = "lenient"
///
/// [thresholds.pe]
/// excellent = 12.0
/// good = 20.0
/// poor = 30.0
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) backend_url: Option<String>,
    pub(crate) watchlist_path: Option<PathBuf>,
    pub(crate) lookup: LookupMode,
    pub(crate) thresholds: BTreeMap<Metric, ThresholdOverride>,
}

/// Values given on the command line, which win over the file.
#[derive(Debug, Clone, Default)]
pub(crate) struct ConfigOverrides {
    pub(crate) backend_url: Option<String>,
    pub(crate) watchlist_path: Option<PathBuf>,
    pub(crate) lenient: bool,
}

fn config_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".config/screener")
}

impl Config {
    pub(crate) fn default_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Load the config file; a missing file means defaults.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map_or_else(Self::default_path, Path::to_path_buf);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        Self::parse(&data).with_context(|| format!("failed parsing TOML config: {}", path.display()))
    }

    pub(crate) fn parse(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }

    pub(crate) fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(url) = overrides.backend_url {
            self.backend_url = Some(url);
        }
        if let Some(path) = overrides.watchlist_path {
            self.watchlist_path = Some(path);
        }
        if overrides.lenient {
            self.lookup = LookupMode::Lenient;
        }
    }

    /// Build the evaluator once; it is shared read-only by every command.
    pub(crate) fn evaluator(&self) -> Result<TierEvaluator> {
        let scales = ScaleConfig::default()
            .with_overrides(&self.thresholds)
            .context("invalid threshold override")?;
        Ok(TierEvaluator::new(scales).with_mode(self.lookup))
    }

    pub(crate) fn quote_client(&self) -> QuoteClient {
        match &self.backend_url {
            Some(url) => QuoteClient::new(url.as_str()),
            None => QuoteClient::from_env(),
        }
    }

    pub(crate) fn watchlist_store(&self) -> WatchlistStore {
        let path = self
            .watchlist_path
            .clone()
            .unwrap_or_else(|| config_dir().join("tickers.json"));
        WatchlistStore::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screener_scales::Tier;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            backend_url = "https://api.example.com"
            watchlist_path = "/tmp/tickers.json"
            lookup = "lenient"

            [thresholds.pe]
            excellent = 12.0

            [thresholds.dividend-yield]
            good = 1.5
            "#,
        )
        .unwrap();

        assert_eq!(config.backend_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.lookup, LookupMode::Lenient);
        assert_eq!(config.thresholds.len(), 2);
        assert_eq!(
            config.thresholds[&Metric::DividendYield].good,
            Some(1.5)
        );
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(Config::parse("colour = \"red\"").is_err());
        assert!(Config::parse("[thresholds.eps]\nexcellent = 1.0").is_err());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("config.toml"))).unwrap();
        assert!(config.backend_url.is_none());
        assert_eq!(config.lookup, LookupMode::Strict);
    }

    #[test]
    fn test_overrides_win() {
        let mut config = Config::parse("backend_url = \"http://a\"").unwrap();
        config.apply_overrides(ConfigOverrides {
            backend_url: Some("http://b".to_string()),
            watchlist_path: None,
            lenient: true,
        });
        assert_eq!(config.backend_url.as_deref(), Some("http://b"));
        assert_eq!(config.lookup, LookupMode::Lenient);
        assert_eq!(config.quote_client().base_url(), "http://b");
    }

    #[test]
    fn test_evaluator_uses_threshold_overrides() {
        let config = Config::parse("[thresholds.pe]\nexcellent = 12.0").unwrap();
        let evaluator = config.evaluator().unwrap();
        assert_eq!(
            evaluator.tier(Metric::PriceToEarnings, Some(13.0)),
            Some(Tier::Neutral)
        );
    }

    #[test]
    fn test_watchlist_path_from_config() {
        let config = Config::parse("watchlist_path = \"/tmp/w.json\"").unwrap();
        assert_eq!(config.watchlist_store().path(), Path::new("/tmp/w.json"));
    }
}
