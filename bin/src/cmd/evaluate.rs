//! Evaluate command implementation.

use super::banner;
use crate::OutputFormat;
use anyhow::Result;
use screener_scales::{EvaluationResult, TierEvaluator};

/// Evaluate one metric value and print its tier and colors.
pub(crate) fn evaluate_value(
    evaluator: &TierEvaluator,
    metric: &str,
    value: Option<f64>,
    format: OutputFormat,
) -> Result<()> {
    let result = evaluator.evaluate_named(metric, value)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => {
            banner("Metric Evaluation");
            for line in describe(metric, value, &result) {
                println!("{line}");
            }
            println!();
        }
    }
    Ok(())
}

fn describe(metric: &str, value: Option<f64>, result: &EvaluationResult) -> Vec<String> {
    let value = value.map_or_else(|| "missing".to_string(), |v| v.to_string());
    let tier = result
        .tier
        .map_or_else(|| "unknown".to_string(), |t| t.to_string());
    vec![
        format!("Metric:        {metric}"),
        format!("Value:         {value}"),
        format!("Tier:          {tier}"),
        format!("Basic:         {}", result.basic_color),
        format!("Interpolated:  {}", result.interpolated_color),
    ]
}
