//! Screen command implementation.

use super::{banner, legend::swatch};
use crate::OutputFormat;
use anyhow::{Result, bail};
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};
use screener_quotes::{QuoteClient, TickerInfo};
use screener_scales::{EvaluationResult, Metric, TierEvaluator};
use screener_watchlist::WatchlistStore;
use serde::Serialize;
use tracing::info;

/// One evaluated metric of a ticker.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MetricCell {
    pub(crate) metric: Metric,
    pub(crate) value: Option<f64>,
    #[serde(flatten)]
    pub(crate) evaluation: EvaluationResult,
}

/// One ticker row of the screener table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScreenRow {
    pub(crate) symbol: String,
    pub(crate) name: String,
    pub(crate) price: Option<f64>,
    pub(crate) metrics: Vec<MetricCell>,
}

/// Evaluate every metric column for each ticker.
pub(crate) fn score_rows(evaluator: &TierEvaluator, infos: &[TickerInfo]) -> Vec<ScreenRow> {
    infos
        .iter()
        .map(|info| ScreenRow {
            symbol: info.symbol.clone(),
            name: info.display_name().to_string(),
            price: info.current_price,
            metrics: Metric::ALL
                .into_iter()
                .map(|metric| {
                    let value = info.metric_value(metric);
                    MetricCell {
                        metric,
                        value,
                        evaluation: evaluator.evaluate(metric, value),
                    }
                })
                .collect(),
        })
        .collect()
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "—".to_string(), |v| format!("{v:.2}"))
}

pub(crate) fn render_table(rows: &[ScreenRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["Symbol".to_string(), "Name".to_string(), "Price".to_string()];
    header.extend(Metric::ALL.iter().map(|m| m.label().to_string()));
    table.set_header(header);

    for row in rows {
        let mut cells = vec![
            Cell::new(&row.symbol),
            Cell::new(&row.name),
            Cell::new(fmt_value(row.price)),
        ];
        for cell in &row.metrics {
            let text = fmt_value(cell.value);
            if cell.evaluation.is_unknown() {
                cells.push(Cell::new(text));
            } else {
                cells.push(swatch(cell.evaluation.interpolated_color, text));
            }
        }
        table.add_row(cells);
    }
    table
}

/// Fetch fundamentals for the given symbols, or the watchlist tab when
/// none are given, and print the colored table.
pub(crate) async fn screen(
    evaluator: &TierEvaluator,
    client: &QuoteClient,
    store: &WatchlistStore,
    symbols: &[String],
    tab: u32,
    format: OutputFormat,
) -> Result<()> {
    let symbols = if symbols.is_empty() {
        let list = store.load();
        let tab = list.tab(tab)?;
        if tab.tickers.is_empty() {
            bail!("watchlist tab \"{}\" has no tickers", tab.label);
        }
        info!(tab = %tab.label, count = tab.tickers.len(), "screening watchlist tab");
        tab.tickers.clone()
    } else {
        symbols.to_vec()
    };

    let infos = client.tickers(&symbols).await?;
    let rows = score_rows(evaluator, &infos);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text => {
            banner("Stock Screener");
            println!("{}", render_table(&rows));
            if rows.len() < symbols.len() {
                println!("\n{} of {} tickers returned no data.", symbols.len() - rows.len(), symbols.len());
            }
            println!();
        }
    }
    Ok(())
}
