//! The fixed NSE equity universe analysed by every run.

use chrono::NaiveDate;

/// NSE symbols, without the exchange suffix.
pub const NSE_SYMBOLS: [&str; 7] = [
    "NHPC",
    "NTPC",
    "HDFCBANK",
    "BEL",
    "POWERGRID",
    "ITC",
    "COALINDIA",
];

/// Yahoo Finance suffix for National Stock Exchange of India listings.
pub const NSE_SUFFIX: &str = ".NS";

/// First date requested from the provider.
pub fn history_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2008, 3, 16).expect("valid calendar date")
}

/// Append an exchange suffix for the fetch request only.
pub fn request_symbol(symbol: &str, suffix: &str) -> String {
    format!("{symbol}{suffix}")
}
