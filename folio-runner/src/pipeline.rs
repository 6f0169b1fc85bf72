//! The linear analysis pipeline: fetch → align → statistics.
//!
//! Symbols are fetched one at a time through an injected `DataProvider`, so
//! tests can drive the whole pipeline from fixed in-memory prices. The first
//! failure aborts the run; nothing is retried and no partial table is kept.

use chrono::NaiveDate;
use folio_core::data::{
    align_closes, history_start, request_symbol, DataError, DataProvider, DataSource,
    FetchProgress, PriceField, SymbolCoverage, NSE_SUFFIX, NSE_SYMBOLS,
};
use folio_core::{CorrelationMatrix, GrowthTable, PriceTable, ReturnsTable, TableError};
use serde::Serialize;
use thiserror::Error;

use crate::metrics::{self, ReturnSummary};

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to fetch {symbol}: {source}")]
    Fetch {
        symbol: String,
        #[source]
        source: DataError,
    },

    #[error("provider answered a request for {requested} with data for {returned}")]
    SymbolMismatch { requested: String, returned: String },

    #[error("malformed price table: {0}")]
    Table(#[from] TableError),

    #[error(
        "only {rows} date(s) have returns for every symbol; at least 2 are needed \
         for volatility and correlation"
    )]
    InsufficientData { rows: usize },
}

/// Everything a run needs to know, passed explicitly into the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineConfig {
    /// Column labels, without exchange suffix.
    pub symbols: Vec<String>,
    /// Appended to each symbol for the provider request only.
    pub exchange_suffix: String,
    /// First requested date (inclusive).
    pub start: NaiveDate,
    /// Last requested date (exclusive).
    pub end: NaiveDate,
    /// Adjusted or raw closes.
    pub price_field: PriceField,
}

impl PipelineConfig {
    /// The fixed seven-symbol NSE portfolio from 2008-03-16 up to `end`.
    pub fn nse_portfolio(end: NaiveDate) -> Self {
        Self {
            symbols: NSE_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            exchange_suffix: NSE_SUFFIX.to_string(),
            start: history_start(),
            end,
            price_field: PriceField::default(),
        }
    }

    pub fn with_price_field(mut self, field: PriceField) -> Self {
        self.price_field = field;
        self
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.symbols.is_empty() {
            return Err(PipelineError::InvalidConfig("no symbols configured".into()));
        }
        if self.start >= self.end {
            return Err(PipelineError::InvalidConfig(format!(
                "start date {} is not before end date {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

/// Aligned prices and where each column came from.
#[derive(Debug, Clone)]
pub struct FetchedPrices {
    pub prices: PriceTable,
    pub coverage: Vec<SymbolCoverage>,
    pub sources: Vec<(String, DataSource)>,
}

/// All tables and statistics produced by one run.
#[derive(Debug, Clone)]
pub struct PortfolioAnalysis {
    pub config: PipelineConfig,
    pub prices: PriceTable,
    pub coverage: Vec<SymbolCoverage>,
    pub sources: Vec<(String, DataSource)>,
    pub returns: ReturnsTable,
    pub growth: GrowthTable,
    pub correlation: CorrelationMatrix,
    pub summary: ReturnSummary,
    /// BLAKE3 fingerprint of the aligned price table.
    pub dataset_hash: String,
}

impl PortfolioAnalysis {
    /// True if any column was generated rather than fetched.
    pub fn has_synthetic(&self) -> bool {
        self.sources.iter().any(|(_, s)| *s == DataSource::Synthetic)
    }
}

/// Fetch every configured symbol sequentially and align them on date.
pub fn fetch_prices(
    config: &PipelineConfig,
    provider: &dyn DataProvider,
    progress: Option<&dyn FetchProgress>,
) -> Result<FetchedPrices, PipelineError> {
    config.validate()?;

    let total = config.symbols.len();
    let mut series = Vec::with_capacity(total);
    let mut sources = Vec::with_capacity(total);

    for (i, symbol) in config.symbols.iter().enumerate() {
        let requested = request_symbol(symbol, &config.exchange_suffix);
        if let Some(p) = progress {
            p.on_start(&requested, i, total);
        }

        let result = provider.fetch(&requested, config.start, config.end);
        if let Some(p) = progress {
            let outcome = result.as_ref().map(|r| r.closes.len());
            p.on_complete(&requested, i, total, outcome);
        }

        let fetched = result.map_err(|source| PipelineError::Fetch {
            symbol: requested.clone(),
            source,
        })?;
        if fetched.symbol != requested {
            return Err(PipelineError::SymbolMismatch {
                requested,
                returned: fetched.symbol,
            });
        }

        sources.push((symbol.clone(), fetched.source));
        series.push((symbol.clone(), fetched.closes));
    }

    let aligned = align_closes(series)?;
    tracing::info!(
        rows = aligned.prices.len(),
        symbols = total,
        provider = provider.name(),
        "aligned price table"
    );

    Ok(FetchedPrices {
        prices: aligned.prices,
        coverage: aligned.coverage,
        sources,
    })
}

/// Derive returns, growth, correlation and the summary statistics.
pub fn analyze(
    config: PipelineConfig,
    fetched: FetchedPrices,
) -> Result<PortfolioAnalysis, PipelineError> {
    let FetchedPrices {
        prices,
        coverage,
        sources,
    } = fetched;

    let returns = metrics::daily_returns(&prices);
    let dropped = prices.len().saturating_sub(1).saturating_sub(returns.len());
    if dropped > 0 {
        tracing::warn!(
            dropped,
            kept = returns.len(),
            "dropped return rows where at least one symbol had no price"
        );
    }
    if returns.len() < 2 {
        return Err(PipelineError::InsufficientData {
            rows: returns.len(),
        });
    }

    let growth = metrics::cumulative_growth(&returns);
    let correlation = metrics::correlation(&returns);
    let summary = ReturnSummary::compute(&returns);

    for value in summary.reward_per_risk.iter().filter(|v| v.value.is_nan()) {
        tracing::warn!(symbol = %value.symbol, "zero volatility; reward per risk is undefined");
    }

    let dataset_hash = prices.fingerprint();
    tracing::debug!(%dataset_hash, "dataset fingerprint");

    Ok(PortfolioAnalysis {
        config,
        prices,
        coverage,
        sources,
        returns,
        growth,
        correlation,
        summary,
        dataset_hash,
    })
}

/// Run the whole pipeline for one configuration.
pub fn run_pipeline(
    config: &PipelineConfig,
    provider: &dyn DataProvider,
    progress: Option<&dyn FetchProgress>,
) -> Result<PortfolioAnalysis, PipelineError> {
    let fetched = fetch_prices(config, provider, progress)?;
    analyze(config.clone(), fetched)
}
