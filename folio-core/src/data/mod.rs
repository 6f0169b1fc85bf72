//! Price retrieval and alignment

pub mod align;
pub mod csv_import;
pub mod provider;
pub mod synthetic;
pub mod universe;
pub mod yahoo;

pub use align::{align_closes, AlignedPrices, SymbolCoverage};
pub use csv_import::CsvProvider;
pub use provider::{
    finalize_closes, DailyClose, DataError, DataProvider, DataSource, FetchProgress, FetchResult,
    LogProgress, PriceField,
};
pub use synthetic::SyntheticProvider;
pub use universe::{history_start, request_symbol, NSE_SUFFIX, NSE_SYMBOLS};
pub use yahoo::YahooProvider;
