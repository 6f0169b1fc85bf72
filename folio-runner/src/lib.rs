//! Folio Runner: statistics engine, pipeline orchestration, reports.
//!
//! This crate builds on `folio-core` to provide:
//! - Daily returns, cumulative growth, correlation and the per-symbol summary
//! - The fetch → align → statistics pipeline driven by a `PipelineConfig`
//! - Text and JSON renderings of a finished analysis

pub mod metrics;
pub mod pipeline;
pub mod report;

pub use metrics::{ReturnSummary, SymbolValue, SymbolValues, TRADING_DAYS_PER_YEAR};
pub use pipeline::{
    analyze, fetch_prices, run_pipeline, FetchedPrices, PipelineConfig, PipelineError,
    PortfolioAnalysis,
};
pub use report::{format_banner, format_summary, JsonReport};
