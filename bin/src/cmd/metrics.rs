//! Metrics command implementation.

use super::{banner, fmt_threshold};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use screener_scales::{Metric, TierEvaluator};

/// Print every supported metric with its thresholds.
pub(crate) fn list_metrics(evaluator: &TierEvaluator) {
    banner("Supported Metrics");
    println!("{}", metrics_table(evaluator));
    println!("\nValues on a threshold count toward the better tier.\n");
}

fn metrics_table(evaluator: &TierEvaluator) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Metric", "Slug", "Excellent", "Good", "Poor", "Direction", "Negatives",
    ]);

    for metric in Metric::ALL {
        let def = evaluator.config().definition(metric);
        table.add_row(vec![
            metric.label().to_string(),
            metric.slug().to_string(),
            fmt_threshold(Some(def.thresholds.excellent)),
            fmt_threshold(Some(def.thresholds.good)),
            fmt_threshold(def.thresholds.poor),
            def.direction.hint().to_string(),
            if def.allows_negative { "allowed" } else { "unknown" }.to_string(),
        ]);
    }
    table
}
