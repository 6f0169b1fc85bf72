//! Folio Core: price providers, multi-symbol alignment, date-indexed tables.
//!
//! This crate contains the data side of the portfolio pipeline:
//! - The `DataProvider` trait and its Yahoo Finance, CSV and synthetic implementations
//! - The fixed NSE universe
//! - Outer-join alignment of per-symbol closes onto one date axis
//! - Table types shared by every later stage (prices, returns, growth, correlation)

pub mod data;
pub mod table;

pub use table::{CorrelationMatrix, DateTable, GrowthTable, PriceTable, ReturnsTable, TableError};
