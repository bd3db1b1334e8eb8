//! Threshold tables and the immutable scale configuration.
//!
//! A [`ScaleConfig`] is built once at start-up, optionally patched with
//! user overrides, and then handed to a
//! [`TierEvaluator`](crate::TierEvaluator). Nothing here is mutated after
//! construction.

use crate::{
    Result, ScaleError,
    color::ColorPalette,
    metric::{Direction, Metric},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Threshold boundaries for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Boundary of the favorable tier.
    pub excellent: f64,
    /// Boundary of the neutral tier.
    pub good: f64,
    /// Boundary of the unfavorable tier, if the metric defines one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poor: Option<f64>,
}

impl Thresholds {
    /// Thresholds with all three boundaries.
    #[must_use]
    pub const fn new(excellent: f64, good: f64, poor: f64) -> Self {
        Self {
            excellent,
            good,
            poor: Some(poor),
        }
    }

    /// Thresholds without a poor boundary.
    #[must_use]
    pub const fn two(excellent: f64, good: f64) -> Self {
        Self {
            excellent,
            good,
            poor: None,
        }
    }
}

/// How one metric is tiered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDefinition {
    /// Threshold boundaries.
    pub thresholds: Thresholds,
    /// Whether lower or higher values are better.
    pub direction: Direction,
    /// Whether negative values are economically meaningful. When false,
    /// negative inputs evaluate to the unknown sentinel.
    pub allows_negative: bool,
}

impl MetricDefinition {
    /// Define a metric.
    #[must_use]
    pub const fn new(thresholds: Thresholds, direction: Direction, allows_negative: bool) -> Self {
        Self {
            thresholds,
            direction,
            allows_negative,
        }
    }

    /// Boundaries ordered from most to least favorable.
    ///
    /// Ascending metrics come out increasing, descending metrics
    /// decreasing, regardless of how the thresholds were entered.
    #[must_use]
    pub fn boundaries(&self) -> Vec<f64> {
        let t = &self.thresholds;
        let mut bounds: Vec<f64> = [Some(t.excellent), Some(t.good), t.poor]
            .into_iter()
            .flatten()
            .collect();

        match self.direction {
            Direction::Ascending => bounds.sort_by(f64::total_cmp),
            Direction::Descending => bounds.sort_by(|a, b| b.total_cmp(a)),
        }
        bounds
    }

    fn validate(&self, metric: Metric) -> Result<()> {
        let t = &self.thresholds;
        for value in [Some(t.excellent), Some(t.good), t.poor].into_iter().flatten() {
            if !value.is_finite() {
                return Err(ScaleError::InvalidThreshold {
                    metric: metric.label().to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Built-in definition for a metric.
///
/// Ratio units: dividend yield, ROE and ROA are percentages; payout ratio
/// is a fraction; debt/equity is a plain ratio.
#[must_use]
pub const fn builtin_definition(metric: Metric) -> MetricDefinition {
    use Direction::{Ascending, Descending};

    match metric {
        Metric::PriceToEarnings => MetricDefinition::new(Thresholds::new(15.0, 25.0, 35.0), Ascending, false),
        Metric::PriceEarningsToGrowth => MetricDefinition::new(Thresholds::new(1.0, 2.0, 3.0), Ascending, false),
        Metric::PriceToSales => MetricDefinition::new(Thresholds::new(1.0, 2.0, 25.0), Ascending, false),
        Metric::PriceToBook => MetricDefinition::new(Thresholds::new(1.0, 3.0, 25.0), Ascending, false),
        Metric::DividendYield => MetricDefinition::new(Thresholds::two(4.0, 2.0), Descending, false),
        Metric::PayoutRatio => MetricDefinition::new(Thresholds::new(0.5, 0.6, 0.8), Ascending, false),
        Metric::DebtToEquity => MetricDefinition::new(Thresholds::new(1.0, 2.0, 3.0), Ascending, false),
        Metric::CurrentRatio => MetricDefinition::new(Thresholds::two(2.0, 1.0), Descending, false),
        Metric::Beta => MetricDefinition::new(Thresholds::new(1.0, 2.0, 3.0), Ascending, true),
        Metric::ReturnOnEquity => MetricDefinition::new(Thresholds::new(30.0, 20.0, 10.0), Descending, true),
        Metric::ReturnOnAssets => MetricDefinition::new(Thresholds::two(10.0, 5.0), Descending, true),
        Metric::EvToRevenue => MetricDefinition::new(Thresholds::new(1.0, 3.0, 5.0), Ascending, false),
        Metric::EvToEbitda => MetricDefinition::new(Thresholds::new(8.0, 10.0, 12.0), Ascending, false),
    }
}

/// A partial replacement for a metric definition, as read from a config
/// file. Unset fields keep the built-in value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdOverride {
    /// Replacement excellent boundary.
    pub excellent: Option<f64>,
    /// Replacement good boundary.
    pub good: Option<f64>,
    /// Replacement poor boundary.
    pub poor: Option<f64>,
    /// Replacement direction.
    pub direction: Option<Direction>,
}

impl ThresholdOverride {
    fn apply(&self, mut def: MetricDefinition) -> MetricDefinition {
        if let Some(v) = self.excellent {
            def.thresholds.excellent = v;
        }
        if let Some(v) = self.good {
            def.thresholds.good = v;
        }
        if self.poor.is_some() {
            def.thresholds.poor = self.poor;
        }
        if let Some(d) = self.direction {
            def.direction = d;
        }
        def
    }
}

/// Process-wide threshold and color configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleConfig {
    definitions: [MetricDefinition; Metric::COUNT],
    palette: ColorPalette,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        let mut definitions = [builtin_definition(Metric::Beta); Metric::COUNT];
        for metric in Metric::ALL {
            definitions[slot(metric)] = builtin_definition(metric);
        }
        Self {
            definitions,
            palette: ColorPalette::default(),
        }
    }
}

const fn slot(metric: Metric) -> usize {
    metric as usize
}

impl ScaleConfig {
    /// Built-in tables with a custom palette.
    #[must_use]
    pub fn with_palette(palette: ColorPalette) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }

    /// Apply per-metric overrides on top of this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::InvalidThreshold`] if an overridden boundary
    /// is NaN or infinite.
    pub fn with_overrides(mut self, overrides: &BTreeMap<Metric, ThresholdOverride>) -> Result<Self> {
        for (metric, patch) in overrides {
            let def = patch.apply(self.definitions[slot(*metric)]);
            def.validate(*metric)?;
            debug!(metric = %metric, ?def, "applied threshold override");
            self.definitions[slot(*metric)] = def;
        }
        Ok(self)
    }

    /// Definition for a metric.
    #[must_use]
    pub const fn definition(&self, metric: Metric) -> &MetricDefinition {
        &self.definitions[slot(metric)]
    }

    /// The color palette.
    #[must_use]
    pub const fn palette(&self) -> &ColorPalette {
        &self.palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_builtin() {
        let config = ScaleConfig::default();
        for metric in Metric::ALL {
            assert_eq!(*config.definition(metric), builtin_definition(metric));
        }
    }

    #[test]
    fn test_builtin_boundaries_are_ordered() {
        for metric in Metric::ALL {
            let def = builtin_definition(metric);
            let bounds = def.boundaries();
            assert!(bounds.len() >= 2, "{metric} needs at least two thresholds");
            for pair in bounds.windows(2) {
                match def.direction {
                    Direction::Ascending => assert!(pair[0] < pair[1], "{metric}"),
                    Direction::Descending => assert!(pair[0] > pair[1], "{metric}"),
                }
            }
        }
    }

    #[test]
    fn test_boundaries_resorted_when_entered_out_of_order() {
        let def = MetricDefinition::new(Thresholds::two(2.0, 4.0), Direction::Descending, false);
        assert_eq!(def.boundaries(), vec![4.0, 2.0]);

        let def = MetricDefinition::new(Thresholds::new(35.0, 15.0, 25.0), Direction::Ascending, false);
        assert_eq!(def.boundaries(), vec![15.0, 25.0, 35.0]);
    }

    #[test]
    fn test_overrides_patch_only_given_fields() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            Metric::PriceToEarnings,
            ThresholdOverride {
                excellent: Some(12.0),
                ..Default::default()
            },
        );

        let config = ScaleConfig::default().with_overrides(&overrides).unwrap();
        let def = config.definition(Metric::PriceToEarnings);
        assert_eq!(def.thresholds, Thresholds::new(12.0, 25.0, 35.0));
        assert_eq!(def.direction, Direction::Ascending);
        assert_eq!(
            *config.definition(Metric::Beta),
            builtin_definition(Metric::Beta)
        );
    }

    #[test]
    fn test_overrides_reject_non_finite() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            Metric::Beta,
            ThresholdOverride {
                good: Some(f64::NAN),
                ..Default::default()
            },
        );

        let err = ScaleConfig::default().with_overrides(&overrides).unwrap_err();
        assert!(matches!(err, ScaleError::InvalidThreshold { .. }));
    }

    #[test]
    fn test_override_deserializes_from_json() {
        let json = r#"{"roe": {"excellent": 25.0, "direction": "descending"}}"#;
        let overrides: BTreeMap<Metric, ThresholdOverride> = serde_json::from_str(json).unwrap();
        assert_eq!(overrides[&Metric::ReturnOnEquity].excellent, Some(25.0));
        assert_eq!(
            overrides[&Metric::ReturnOnEquity].direction,
            Some(Direction::Descending)
        );

        let bad = r#"{"roe": {"great": 1.0}}"#;
        assert!(serde_json::from_str::<BTreeMap<Metric, ThresholdOverride>>(bad).is_err());
    }
}
