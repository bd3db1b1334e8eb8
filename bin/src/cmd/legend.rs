//! Legend command implementation.

use super::{banner, fmt_threshold};
use anyhow::{Result, bail};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use screener_scales::{Metric, Rgb, Tier, TierEvaluator};

/// A cell whose text is drawn in `color`.
pub(crate) fn swatch(color: Rgb, text: impl Into<String>) -> Cell {
    Cell::new(text.into()).fg(Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    })
}

/// Print the tier colors for a metric next to the thresholds that
/// separate them.
pub(crate) fn show_legend(evaluator: &TierEvaluator, name: &str) -> Result<()> {
    let Some(thresholds) = evaluator.thresholds_named(name)? else {
        bail!("no thresholds for metric: {name}");
    };
    let metric: Metric = name.parse()?;

    banner(&format!("{} Legend", metric.label()));
    let direction = evaluator.config().definition(metric).direction;
    println!("{} ({})", metric.description(), direction.hint());
    println!();

    let bounds = [
        Some(thresholds.excellent),
        Some(thresholds.good),
        thresholds.poor,
    ];
    println!("{}", legend_table(evaluator, &bounds));
    println!();
    Ok(())
}

fn legend_table(evaluator: &TierEvaluator, bounds: &[Option<f64>; 3]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Tier", "Shade", "Threshold"]);

    // The last shade of each tier sits on the threshold that closes it.
    for (i, color) in evaluator.config().palette().legend().into_iter().enumerate() {
        let tier = Tier::from_index(i / 3);
        let label = if i % 3 == 2 {
            format!(
                "{} {}",
                tier.threshold_label(),
                fmt_threshold(bounds[tier.index()])
            )
        } else {
            String::new()
        };
        table.add_row(vec![
            Cell::new(tier.to_string()),
            swatch(color, format!("██ {color}")),
            Cell::new(label),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use screener_scales::LookupMode;

    #[test]
    fn test_legend_table_shows_boundaries() {
        let evaluator = TierEvaluator::default();
        let rendered = legend_table(&evaluator, &[Some(4.0), Some(2.0), None]).to_string();
        assert!(rendered.contains("Excellent 4"));
        assert!(rendered.contains("Good 2"));
        assert!(rendered.contains("Poor -"));
        assert!(rendered.contains("#00FF00"));
        assert!(rendered.contains("#CC0000"));
        assert_eq!(rendered.matches("██").count(), 9);
    }

    #[test]
    fn test_unknown_metric_fails_in_both_modes() {
        assert!(show_legend(&TierEvaluator::default(), "EPS").is_err());
        let lenient = TierEvaluator::default().with_mode(LookupMode::Lenient);
        assert!(show_legend(&lenient, "EPS").is_err());
    }
}
