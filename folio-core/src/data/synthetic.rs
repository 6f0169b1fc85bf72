//! Synthetic price provider for offline runs.
//!
//! Produces a deterministic random walk per symbol: the RNG is seeded from
//! a BLAKE3 hash of the symbol name, so the same symbol and range always
//! yield the same series. Weekends are skipped. Results are tagged
//! `DataSource::Synthetic` and must never be mistaken for market data.

use super::provider::{
    finalize_closes, DailyClose, DataError, DataProvider, DataSource, FetchResult,
};
use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random-walk provider.
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    start_price: f64,
    daily_range: f64,
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self {
            start_price: 100.0,
            daily_range: 0.03,
        }
    }
}

impl SyntheticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn generate(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<DailyClose> {
        let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
        let mut rng = StdRng::from_seed(seed);

        let mut closes = Vec::new();
        let mut price = self.start_price * rng.gen_range(0.5..2.0);
        let mut current = start;

        while current < end {
            if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
                let daily_return: f64 = rng.gen_range(-self.daily_range..self.daily_range);
                price *= 1.0 + daily_return;
                closes.push(DailyClose::new(current, price));
            }
            current += chrono::Duration::days(1);
        }

        closes
    }
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        tracing::warn!(symbol, "generating synthetic prices");
        let closes = finalize_closes(symbol, self.generate(symbol, start, end), start, end)?;
        Ok(FetchResult {
            symbol: symbol.to_string(),
            closes,
            source: DataSource::Synthetic,
        })
    }
}
