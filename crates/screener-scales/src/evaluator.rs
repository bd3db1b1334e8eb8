//! Metric tier evaluation.
//!
//! Maps a `(metric, value)` pair to a discrete tier color and a color
//! interpolated within that tier.
//!
//! # Boundary convention
//!
//! Comparisons are inclusive: a value exactly on a threshold belongs to
//! the more favorable side. For an ascending metric with `excellent = 15`,
//! a value of `15` is favorable and `15.0001` is neutral.
//!
//! # Example
//!
//! ```
//! use screener_scales::{Metric, ScaleConfig, Tier, TierEvaluator};
//!
//! let evaluator = TierEvaluator::new(ScaleConfig::default());
//! let result = evaluator.evaluate(Metric::PriceToEarnings, Some(20.0));
//! assert_eq!(result.tier, Some(Tier::Neutral));
//! assert_eq!(result.basic_color.to_hex(), "#FFFF00");
//! ```

use crate::{
    Result,
    color::Rgb,
    config::{MetricDefinition, ScaleConfig, Thresholds},
    metric::{Direction, Metric},
    tier::Tier,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// How lookups by metric name treat names that are not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// Unknown names are an error.
    #[default]
    Strict,
    /// Unknown names evaluate to the unknown sentinel.
    Lenient,
}

/// Colors for one evaluated metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// The tier's representative color.
    pub basic_color: Rgb,
    /// A finer-grained color within the tier.
    pub interpolated_color: Rgb,
    /// The matched tier, `None` when the value could not be evaluated.
    pub tier: Option<Tier>,
}

impl EvaluationResult {
    /// The sentinel for missing or out-of-domain values.
    #[must_use]
    pub const fn unknown(color: Rgb) -> Self {
        Self {
            basic_color: color,
            interpolated_color: color,
            tier: None,
        }
    }

    /// Whether this is the unknown sentinel.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        self.tier.is_none()
    }
}

/// Near (favorable) and far (unfavorable) edges of the tier a value
/// landed in.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Band {
    tier: Tier,
    near: f64,
    far: f64,
}

impl Band {
    /// Position of `value` from the near edge (0) to the far edge (1),
    /// or `None` when the band has zero width.
    fn ratio(&self, value: f64) -> Option<f64> {
        let width = self.far - self.near;
        if width == 0.0 {
            return None;
        }
        Some(((value - self.near) / width).clamp(0.0, 1.0))
    }
}

/// Locate the tier band for a finite value.
fn locate(def: &MetricDefinition, value: f64) -> Band {
    let bounds = def.boundaries();
    let within = |b: f64| match def.direction {
        Direction::Ascending => value <= b,
        Direction::Descending => value >= b,
    };

    let index = bounds
        .iter()
        .position(|b| within(*b))
        .unwrap_or(bounds.len());
    let tier = Tier::from_index(index);

    let (b0, b1) = (bounds[0], bounds[1]);
    let (near, far) = match tier {
        Tier::Favorable => {
            // Ascending bands start at zero unless the excellent bound is
            // itself below the mirrored width.
            let outer = match def.direction {
                Direction::Ascending => f64::min(0.0, b0 - (b1 - b0)),
                Direction::Descending => b0 + (b0 - b1),
            };
            (outer, b0)
        }
        Tier::Neutral => (b0, b1),
        Tier::Unfavorable => {
            let far = bounds.get(2).copied().unwrap_or(b1 + (b1 - b0));
            (b1, far)
        }
    };

    Band { tier, near, far }
}

/// Evaluates metric values against an immutable [`ScaleConfig`].
///
/// Evaluation is pure: the same inputs always yield the same result, and
/// an evaluator can be shared across threads without locking.
#[derive(Debug, Clone)]
pub struct TierEvaluator {
    config: ScaleConfig,
    mode: LookupMode,
}

impl Default for TierEvaluator {
    fn default() -> Self {
        Self::new(ScaleConfig::default())
    }
}

impl TierEvaluator {
    /// Create a strict evaluator.
    #[must_use]
    pub const fn new(config: ScaleConfig) -> Self {
        Self {
            config,
            mode: LookupMode::Strict,
        }
    }

    /// Set how unknown metric names are handled.
    #[must_use]
    pub const fn with_mode(mut self, mode: LookupMode) -> Self {
        self.mode = mode;
        self
    }

    /// The configuration this evaluator reads from.
    #[must_use]
    pub const fn config(&self) -> &ScaleConfig {
        &self.config
    }

    /// The lookup mode.
    #[must_use]
    pub const fn mode(&self) -> LookupMode {
        self.mode
    }

    /// The sentinel result for values that cannot be evaluated.
    #[must_use]
    pub const fn unknown(&self) -> EvaluationResult {
        EvaluationResult::unknown(self.config.palette().unknown)
    }

    /// Usable input value, or `None` for missing, NaN, infinite, or
    /// negative-where-meaningless values.
    fn admissible(&self, metric: Metric, value: Option<f64>) -> Option<f64> {
        let value = value.filter(|v| v.is_finite())?;
        let def = self.config.definition(metric);
        if value < 0.0 && !def.allows_negative {
            return None;
        }
        Some(value)
    }

    /// The tier a value falls into, if it can be evaluated.
    #[must_use]
    pub fn tier(&self, metric: Metric, value: Option<f64>) -> Option<Tier> {
        let value = self.admissible(metric, value)?;
        Some(locate(self.config.definition(metric), value).tier)
    }

    /// Evaluate a metric value.
    ///
    /// Missing, NaN, infinite, and meaningless negative values produce the
    /// unknown sentinel. Values beyond the worst threshold get the most
    /// extreme unfavorable shade.
    #[must_use]
    pub fn evaluate(&self, metric: Metric, value: Option<f64>) -> EvaluationResult {
        let Some(value) = self.admissible(metric, value) else {
            return self.unknown();
        };

        let band = locate(self.config.definition(metric), value);
        let colors = self.config.palette().band(band.tier);
        let interpolated_color = band
            .ratio(value)
            .map_or_else(|| colors.middle(), |ratio| colors.shade_at(ratio));

        EvaluationResult {
            basic_color: colors.representative(),
            interpolated_color,
            tier: Some(band.tier),
        }
    }

    /// Evaluate a metric identified by its label or slug.
    ///
    /// # Errors
    ///
    /// In [`LookupMode::Strict`], returns [`ScaleError::UnknownMetric`](crate::ScaleError::UnknownMetric) for
    /// unrecognized names. In [`LookupMode::Lenient`] the sentinel result is
    /// returned instead.
    pub fn evaluate_named(&self, name: &str, value: Option<f64>) -> Result<EvaluationResult> {
        match self.lookup(name)? {
            Some(metric) => Ok(self.evaluate(metric, value)),
            None => Ok(self.unknown()),
        }
    }

    /// Thresholds for a metric.
    #[must_use]
    pub const fn thresholds(&self, metric: Metric) -> &Thresholds {
        &self.config.definition(metric).thresholds
    }

    /// Thresholds for a metric identified by its label or slug.
    ///
    /// # Errors
    ///
    /// In [`LookupMode::Strict`], returns [`ScaleError::UnknownMetric`](crate::ScaleError::UnknownMetric) for
    /// unrecognized names. In [`LookupMode::Lenient`] the result is `None`.
    pub fn thresholds_named(&self, name: &str) -> Result<Option<&Thresholds>> {
        Ok(self.lookup(name)?.map(|metric| self.thresholds(metric)))
    }

    fn lookup(&self, name: &str) -> Result<Option<Metric>> {
        match name.parse::<Metric>() {
            Ok(metric) => Ok(Some(metric)),
            Err(err) => match self.mode {
                LookupMode::Strict => Err(err),
                LookupMode::Lenient => {
                    warn!(metric = name, "unknown metric, using neutral default");
                    Ok(None)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ScaleError, color::ColorPalette, config::ThresholdOverride};
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    const GREEN: Rgb = Rgb::from_u32(0x00FF00);
    const YELLOW: Rgb = Rgb::from_u32(0xFFFF00);
    const RED: Rgb = Rgb::from_u32(0xFF0000);
    const DEEPEST_RED: Rgb = Rgb::from_u32(0xCC0000);

    fn evaluator() -> TierEvaluator {
        TierEvaluator::default()
    }

    fn basic(metric: Metric, value: f64) -> Rgb {
        evaluator().evaluate(metric, Some(value)).basic_color
    }

    #[test]
    fn test_pe_scenario() {
        let ev = evaluator();

        let low = ev.evaluate(Metric::PriceToEarnings, Some(10.0));
        assert_eq!(low.basic_color, GREEN);
        assert_eq!(low.tier, Some(Tier::Favorable));

        let mid = ev.evaluate(Metric::PriceToEarnings, Some(20.0));
        assert_eq!(mid.basic_color, YELLOW);

        let high = ev.evaluate(Metric::PriceToEarnings, Some(40.0));
        assert_eq!(high.basic_color, RED);
        assert_eq!(high.interpolated_color, DEEPEST_RED);
    }

    #[test]
    fn test_roe_scenario() {
        assert_eq!(basic(Metric::ReturnOnEquity, 35.0), GREEN);
        assert_eq!(basic(Metric::ReturnOnEquity, 25.0), YELLOW);
        assert_eq!(basic(Metric::ReturnOnEquity, 5.0), RED);
        assert_eq!(
            evaluator().evaluate(Metric::ReturnOnEquity, Some(5.0)).interpolated_color,
            DEEPEST_RED
        );
    }

    #[test]
    fn test_boundary_belongs_to_favorable_side() {
        let ev = evaluator();
        assert_eq!(ev.tier(Metric::PriceToEarnings, Some(15.0)), Some(Tier::Favorable));
        assert_eq!(ev.tier(Metric::PriceToEarnings, Some(15.0001)), Some(Tier::Neutral));
        assert_eq!(ev.tier(Metric::PriceToEarnings, Some(25.0)), Some(Tier::Neutral));
        assert_eq!(ev.tier(Metric::PriceToEarnings, Some(35.0)), Some(Tier::Unfavorable));

        assert_eq!(ev.tier(Metric::ReturnOnEquity, Some(30.0)), Some(Tier::Favorable));
        assert_eq!(ev.tier(Metric::ReturnOnEquity, Some(29.9999)), Some(Tier::Neutral));
    }

    #[test]
    fn test_direction_properties_hold_for_every_metric() {
        let ev = evaluator();
        for metric in Metric::ALL {
            let def = ev.config().definition(metric);
            let bounds = def.boundaries();
            let best = bounds[0];
            let worst = bounds[bounds.len() - 1];

            let (favorable, unfavorable) = match def.direction {
                Direction::Ascending => (best - 1.0, worst + 1.0),
                Direction::Descending => (best + 1.0, worst - 1.0),
            };

            // Payout ratio's excellent bound is 0.5, so best - 1 is negative.
            let favorable = if favorable < 0.0 && !def.allows_negative {
                best / 2.0
            } else {
                favorable
            };

            assert_eq!(ev.evaluate(metric, Some(favorable)).basic_color, GREEN, "{metric}");
            if unfavorable >= 0.0 || def.allows_negative {
                assert_eq!(ev.evaluate(metric, Some(unfavorable)).basic_color, RED, "{metric}");
            }
        }
    }

    #[test]
    fn test_missing_values_yield_sentinel() {
        let ev = evaluator();
        for metric in Metric::ALL {
            for value in [None, Some(f64::NAN), Some(f64::INFINITY), Some(f64::NEG_INFINITY)] {
                let result = ev.evaluate(metric, value);
                assert!(result.is_unknown(), "{metric} {value:?}");
                assert_eq!(result.basic_color, Rgb::BLACK);
                assert_eq!(result.interpolated_color, Rgb::BLACK);
            }
        }
    }

    #[test]
    fn test_negative_values() {
        let ev = evaluator();
        assert!(ev.evaluate(Metric::PriceToEarnings, Some(-12.0)).is_unknown());
        assert!(ev.evaluate(Metric::DividendYield, Some(-0.1)).is_unknown());

        let roe = ev.evaluate(Metric::ReturnOnEquity, Some(-15.0));
        assert_eq!(roe.tier, Some(Tier::Unfavorable));
        assert_eq!(roe.interpolated_color, DEEPEST_RED);

        let beta = ev.evaluate(Metric::Beta, Some(-0.4));
        assert_eq!(beta.tier, Some(Tier::Favorable));
        assert_eq!(beta.interpolated_color, GREEN);
    }

    #[test]
    fn test_zero_is_a_real_value() {
        let ev = evaluator();
        let result = ev.evaluate(Metric::PriceToEarnings, Some(0.0));
        assert_eq!(result.tier, Some(Tier::Favorable));
        assert_eq!(result.interpolated_color, GREEN);

        assert_eq!(ev.tier(Metric::DividendYield, Some(0.0)), Some(Tier::Unfavorable));
    }

    #[test]
    fn test_interpolation_within_neutral_band() {
        let ev = evaluator();
        // P/E 20 is halfway between 15 and 25: the middle yellow shade.
        let result = ev.evaluate(Metric::PriceToEarnings, Some(20.0));
        assert_eq!(result.interpolated_color, Rgb::from_u32(0xFFDD00));

        let edge = ev.evaluate(Metric::PriceToEarnings, Some(25.0));
        assert_eq!(edge.interpolated_color, Rgb::from_u32(0xFFBB00));
    }

    #[test]
    fn test_interpolation_in_descending_favorable_band() {
        let ev = evaluator();
        // ROE favorable band spans 40 (outer) down to 30.
        let at_threshold = ev.evaluate(Metric::ReturnOnEquity, Some(30.0));
        assert_eq!(at_threshold.interpolated_color, Rgb::from_u32(0xAAFF00));

        let far_above = ev.evaluate(Metric::ReturnOnEquity, Some(80.0));
        assert_eq!(far_above.interpolated_color, GREEN);

        let between = ev.evaluate(Metric::ReturnOnEquity, Some(35.0));
        assert_eq!(between.interpolated_color, Rgb::from_u32(0x55FF00));
    }

    #[test]
    fn test_two_threshold_metric_outer_band() {
        let ev = evaluator();
        // Dividend yield: 4 then 2, unfavorable band mirrors down to 0.
        let at_zero = ev.evaluate(Metric::DividendYield, Some(0.0));
        assert_eq!(at_zero.interpolated_color, DEEPEST_RED);

        let one = ev.evaluate(Metric::DividendYield, Some(1.0));
        assert_eq!(one.tier, Some(Tier::Unfavorable));
        assert_eq!(one.interpolated_color, Rgb::from_u32(0xFF3333));
    }

    #[test]
    fn test_zero_width_band_uses_middle_shade() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            Metric::ReturnOnAssets,
            ThresholdOverride {
                excellent: Some(5.0),
                good: Some(5.0),
                ..Default::default()
            },
        );
        let config = ScaleConfig::default().with_overrides(&overrides).unwrap();
        let ev = TierEvaluator::new(config);

        // Mirrored favorable band is [5, 5].
        let result = ev.evaluate(Metric::ReturnOnAssets, Some(7.0));
        assert_eq!(result.tier, Some(Tier::Favorable));
        assert_eq!(result.basic_color, GREEN);
        assert_eq!(result.interpolated_color, Rgb::from_u32(0x55FF00));
        assert_eq!(
            result.interpolated_color,
            ColorPalette::default().favorable.middle()
        );

        // 5.0 lands on both boundaries; favorable wins.
        assert_eq!(ev.tier(Metric::ReturnOnAssets, Some(5.0)), Some(Tier::Favorable));
    }

    #[test]
    fn test_band_ratio() {
        let band = Band {
            tier: Tier::Neutral,
            near: 15.0,
            far: 25.0,
        };
        assert_relative_eq!(band.ratio(20.0).unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(band.ratio(17.5).unwrap(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(band.ratio(99.0).unwrap(), 1.0);

        // Descending bands run from high to low.
        let band = Band {
            tier: Tier::Favorable,
            near: 40.0,
            far: 30.0,
        };
        assert_relative_eq!(band.ratio(32.0).unwrap(), 0.8, epsilon = 1e-12);

        let flat = Band {
            tier: Tier::Neutral,
            near: 2.0,
            far: 2.0,
        };
        assert_eq!(flat.ratio(2.0), None);
    }

    #[test]
    fn test_negative_excellent_keeps_band_orientation() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            Metric::Beta,
            ThresholdOverride {
                excellent: Some(-1.0),
                good: Some(1.0),
                poor: Some(3.0),
                ..Default::default()
            },
        );
        let config = ScaleConfig::default().with_overrides(&overrides).unwrap();
        let ev = TierEvaluator::new(config);

        // Favorable band runs from -3 up to -1; lower is greener.
        let best = ev.evaluate(Metric::Beta, Some(-3.0));
        let mid = ev.evaluate(Metric::Beta, Some(-2.0));
        let edge = ev.evaluate(Metric::Beta, Some(-1.0));
        assert_eq!(best.tier, Some(Tier::Favorable));
        assert_eq!(best.interpolated_color, GREEN);
        assert_eq!(mid.interpolated_color, Rgb::from_u32(0x55FF00));
        assert_eq!(edge.interpolated_color, Rgb::from_u32(0xAAFF00));

        assert_eq!(ev.tier(Metric::Beta, Some(0.0)), Some(Tier::Neutral));
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let ev = evaluator();
        for metric in Metric::ALL {
            for value in [0.3, 1.0, 7.5, 18.0, 42.0] {
                assert_eq!(
                    ev.evaluate(metric, Some(value)),
                    ev.evaluate(metric, Some(value))
                );
            }
        }
    }

    #[test]
    fn test_named_lookup_strict() {
        let ev = evaluator();
        let result = ev.evaluate_named("P/E", Some(10.0)).unwrap();
        assert_eq!(result.basic_color, GREEN);

        let err = ev.evaluate_named("UNKNOWN_METRIC", Some(10.0)).unwrap_err();
        assert_eq!(err, ScaleError::UnknownMetric("UNKNOWN_METRIC".to_string()));
        assert!(ev.thresholds_named("UNKNOWN_METRIC").is_err());
    }

    #[test]
    fn test_named_lookup_lenient() {
        let ev = evaluator().with_mode(LookupMode::Lenient);
        let result = ev.evaluate_named("UNKNOWN_METRIC", Some(10.0)).unwrap();
        assert!(result.is_unknown());
        assert_eq!(ev.thresholds_named("UNKNOWN_METRIC").unwrap(), None);

        let pe = ev.thresholds_named("P/E").unwrap().unwrap();
        assert_relative_eq!(pe.excellent, 15.0);
        assert_eq!(pe.poor, Some(35.0));
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = evaluator().evaluate(Metric::PriceToEarnings, Some(40.0));
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["basicColor"], "#FF0000");
        assert_eq!(json["interpolatedColor"], "#CC0000");
        assert_eq!(json["tier"], "unfavorable");
    }

    #[test]
    fn test_evaluator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TierEvaluator>();
    }
}
