//! Folio CLI: fetch the NSE portfolio, chart it, print return statistics.
//!
//! One run, no subcommands:
//! 1. Print the portfolio size and date range
//! 2. Fetch each symbol's daily closes (Yahoo Finance, CSV export, or synthetic)
//! 3. Show the chart deck (price history, correlation, returns, growth)
//! 4. Print mean return, annualized volatility and return per unit of risk

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use folio_core::data::{
    CsvProvider, DataProvider, LogProgress, PriceField, SyntheticProvider, YahooProvider,
};
use folio_runner::report::{format_coverage_warnings, JsonReport};
use folio_runner::{format_banner, format_summary, run_pipeline, PipelineConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Folio: NSE portfolio price history, correlation and return statistics"
)]
struct Cli {
    /// Last date (YYYY-MM-DD, exclusive). Defaults to today.
    #[arg(long)]
    end: Option<String>,

    /// Where daily closes come from.
    #[arg(long, value_enum, default_value_t = Source::Yahoo)]
    source: Source,

    /// Directory of `<SYMBOL>.NS.csv` files for `--source csv`.
    #[arg(long, default_value = "data")]
    csv_dir: PathBuf,

    /// Use the raw exchange close instead of the split/dividend-adjusted close.
    #[arg(long, default_value_t = false)]
    unadjusted: bool,

    /// Skip the interactive chart deck.
    #[arg(long, default_value_t = false)]
    no_charts: bool,

    /// Print the statistics as JSON instead of text tables (implies --no-charts).
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    /// Yahoo Finance chart API.
    Yahoo,
    /// Yahoo-style CSV exports in --csv-dir.
    Csv,
    /// Deterministic random walk; offline demos only.
    Synthetic,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let end = match cli.end.as_deref() {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };
    let price_field = if cli.unadjusted {
        PriceField::Close
    } else {
        PriceField::AdjustedClose
    };
    let config = PipelineConfig::nse_portfolio(end).with_price_field(price_field);

    if !cli.json {
        print!("{}", format_banner(&config));
    }

    let provider = build_provider(cli.source, &cli.csv_dir, price_field)?;
    tracing::info!(provider = provider.name(), "starting run");

    let analysis = run_pipeline(&config, provider.as_ref(), Some(&LogProgress))
        .context("portfolio analysis failed")?;

    if cli.json {
        println!("{}", JsonReport::from_analysis(&analysis).to_json()?);
        return Ok(());
    }

    let gaps = format_coverage_warnings(&analysis.coverage);
    if !gaps.is_empty() {
        println!("Partial coverage:");
        for line in &gaps {
            println!("  {line}");
        }
        println!();
    }

    if cli.no_charts {
        tracing::debug!("chart deck disabled");
    } else if !std::io::stdout().is_terminal() {
        tracing::warn!("stdout is not a terminal; skipping charts");
    } else {
        folio_tui::run_deck(&analysis).context("chart deck failed")?;
    }

    print!("{}", format_summary(&analysis.summary));
    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

fn build_provider(
    source: Source,
    csv_dir: &Path,
    field: PriceField,
) -> Result<Box<dyn DataProvider>> {
    let provider: Box<dyn DataProvider> = match source {
        Source::Yahoo => Box::new(
            YahooProvider::new()
                .context("failed to build HTTP client")?
                .with_price_field(field),
        ),
        Source::Csv => Box::new(CsvProvider::new(csv_dir).with_price_field(field)),
        Source::Synthetic => Box::new(SyntheticProvider::new()),
    };
    Ok(provider)
}
