#![doc(issue_tracker_base_url = "https://github.com/stock-screener/screener/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Metric-to-color-tier evaluation for the stock screener.
//!
//! Each supported financial metric has excellent/good/poor thresholds and a
//! direction (lower-is-better or higher-is-better). Given a value, the
//! [`TierEvaluator`] picks a favorability [`Tier`] and returns both the
//! tier's discrete color and a color interpolated within the tier.
//!
//! Missing or meaningless inputs never fail: they evaluate to a black
//! "unknown" sentinel so a table cell can always be rendered.

/// The version of the screener-scales crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod color;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod metric;
pub mod tier;

// Re-exports
pub use color::{ColorBand, ColorPalette, Rgb};
pub use config::{MetricDefinition, ScaleConfig, ThresholdOverride, Thresholds, builtin_definition};
pub use error::{Result, ScaleError};
pub use evaluator::{EvaluationResult, LookupMode, TierEvaluator};
pub use metric::{Direction, Metric};
pub use tier::Tier;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
