//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over price sources (Yahoo Finance, CSV
//! import, synthetic) so the pipeline can be driven by a fixed in-memory
//! series in tests instead of the network.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One daily closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyClose {
    pub date: NaiveDate,
    pub close: f64,
}

impl DailyClose {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Structured error types for data retrieval.
///
/// Every variant is fatal to a run; nothing is retried.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no prices for '{symbol}' between {start} and {end}")]
    EmptyRange {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("HTTP {status} for {symbol}")]
    Http { status: u16, symbol: String },

    #[error("CSV import failed for '{symbol}': {reason}")]
    CsvImport { symbol: String, reason: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Result of a successful data fetch for a single symbol.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// The symbol as requested (including any exchange suffix).
    pub symbol: String,
    pub closes: Vec<DailyClose>,
    pub source: DataSource,
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    YahooFinance,
    CsvImport,
    Synthetic,
    /// Series handed in by the caller through a custom `DataProvider`,
    /// e.g. fixed prices in tests or data loaded by an embedding program.
    Memory,
}

/// Which price a provider reports as the daily close.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    /// Split- and dividend-adjusted close.
    #[default]
    AdjustedClose,
    /// Raw exchange close.
    Close,
}

/// Trait for price providers.
///
/// `end` is exclusive: a bar dated `end` is never returned.
pub trait DataProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily closes for a symbol over `[start, end)`, sorted ascending.
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError>;
}

/// Progress callback for the sequential per-symbol fetch.
pub trait FetchProgress {
    /// Called when starting to fetch a symbol.
    fn on_start(&self, symbol: &str, index: usize, total: usize);

    /// Called when a symbol fetch completes, with the row count or the error.
    fn on_complete(
        &self,
        symbol: &str,
        index: usize,
        total: usize,
        result: Result<usize, &DataError>,
    );
}

/// Progress reporter that emits tracing events.
pub struct LogProgress;

impl FetchProgress for LogProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        tracing::info!("[{}/{}] fetching {symbol}", index + 1, total);
    }

    fn on_complete(
        &self,
        symbol: &str,
        _index: usize,
        _total: usize,
        result: Result<usize, &DataError>,
    ) {
        match result {
            Ok(count) => tracing::info!(symbol, rows = count, "fetched"),
            Err(e) => tracing::error!(symbol, "fetch failed: {e}"),
        }
    }
}

/// Sort, de-duplicate and range-filter raw closes; fail if nothing is left.
///
/// Duplicate dates keep the last value seen. Non-positive closes are treated
/// as missing and dropped.
pub fn finalize_closes(
    symbol: &str,
    mut closes: Vec<DailyClose>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DailyClose>, DataError> {
    closes.retain(|c| c.date >= start && c.date < end && c.close.is_finite() && c.close > 0.0);
    closes.sort_by_key(|c| c.date);

    let mut deduped: Vec<DailyClose> = Vec::with_capacity(closes.len());
    for close in closes {
        match deduped.last_mut() {
            Some(last) if last.date == close.date => *last = close,
            _ => deduped.push(close),
        }
    }

    if deduped.is_empty() {
        return Err(DataError::EmptyRange {
            symbol: symbol.to_string(),
            start,
            end,
        });
    }

    Ok(deduped)
}
