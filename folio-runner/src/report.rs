//! Text and JSON renderings of a finished analysis.

use chrono::NaiveDate;
use folio_core::data::{DataSource, SymbolCoverage};
use folio_core::CorrelationMatrix;
use serde::Serialize;

use crate::metrics::{ReturnSummary, SymbolValues};
use crate::pipeline::{PipelineConfig, PortfolioAnalysis};

pub const MEAN_RETURN_HEADER: &str = "Average Daily Returns (%):";
pub const VOLATILITY_HEADER: &str = "Annualized Volatility (%):";
pub const REWARD_PER_RISK_HEADER: &str = "Return per Unit of Risk (%):";

/// The two intro lines printed before any data is fetched.
pub fn format_banner(config: &PipelineConfig) -> String {
    format!(
        "You have {} assets in your portfolio\nFetching data from: {} to {}\n",
        config.symbols.len(),
        config.start,
        config.end
    )
}

/// One labelled table per statistic, separated by a blank line.
pub fn format_summary(summary: &ReturnSummary) -> String {
    let mut out = String::new();
    push_table(&mut out, MEAN_RETURN_HEADER, &summary.mean_return);
    out.push('\n');
    push_table(&mut out, VOLATILITY_HEADER, &summary.annualized_volatility);
    out.push('\n');
    push_table(&mut out, REWARD_PER_RISK_HEADER, &summary.reward_per_risk);
    out
}

fn push_table(out: &mut String, header: &str, values: &SymbolValues) {
    out.push_str(header);
    out.push('\n');

    let width = values.iter().map(|v| v.symbol.len()).max().unwrap_or(0);
    for v in values.iter() {
        out.push_str(&format!(
            "{:<width$}  {:>12}\n",
            v.symbol,
            format_percent(v.value),
            width = width
        ));
    }
}

/// Six decimals, or `NaN` for an undefined statistic.
pub fn format_percent(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.6}")
    }
}

/// Lines describing partial coverage; empty when every symbol is complete.
pub fn format_coverage_warnings(coverage: &[SymbolCoverage]) -> Vec<String> {
    coverage
        .iter()
        .filter(|c| c.has_gaps())
        .map(|c| {
            let span = match (c.first_date, c.last_date) {
                (Some(first), Some(last)) => format!("first {first}, last {last}"),
                _ => "no observations".to_string(),
            };
            format!(
                "{}: {} of {} dates missing ({span})",
                c.symbol,
                c.missing,
                c.observations + c.missing,
            )
        })
        .collect()
}

/// Machine-readable summary emitted by `--json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub config: &'a PipelineConfig,
    pub dataset_hash: &'a str,
    pub price_rows: usize,
    pub return_rows: usize,
    pub first_return_date: Option<NaiveDate>,
    pub last_return_date: Option<NaiveDate>,
    pub sources: Vec<SourceEntry<'a>>,
    pub coverage: &'a [SymbolCoverage],
    pub summary: &'a ReturnSummary,
    pub correlation: &'a CorrelationMatrix,
}

#[derive(Debug, Serialize)]
pub struct SourceEntry<'a> {
    pub symbol: &'a str,
    pub source: DataSource,
}

impl<'a> JsonReport<'a> {
    pub fn from_analysis(analysis: &'a PortfolioAnalysis) -> Self {
        Self {
            config: &analysis.config,
            dataset_hash: &analysis.dataset_hash,
            price_rows: analysis.prices.len(),
            return_rows: analysis.returns.len(),
            first_return_date: analysis.returns.dates().first().copied(),
            last_return_date: analysis.returns.dates().last().copied(),
            sources: analysis
                .sources
                .iter()
                .map(|(symbol, source)| SourceEntry {
                    symbol,
                    source: *source,
                })
                .collect(),
            coverage: &analysis.coverage,
            summary: &analysis.summary,
            correlation: &analysis.correlation,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
