//! Multi-symbol time alignment.
//!
//! Given closes for multiple symbols, outer-join them onto the union of their
//! dates. Missing cells stay NaN (no forward-fill, no interpolation); the
//! per-symbol coverage report makes those gaps visible instead of silent.

use super::provider::DailyClose;
use crate::table::{DateTable, PriceTable, TableError};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// How much of the common timeline a symbol actually traded on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolCoverage {
    pub symbol: String,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Dates with a real close.
    pub observations: usize,
    /// Dates on the common timeline with no close for this symbol.
    pub missing: usize,
}

impl SymbolCoverage {
    pub fn has_gaps(&self) -> bool {
        self.missing > 0
    }
}

/// Aligned prices plus the coverage of each column.
#[derive(Debug, Clone)]
pub struct AlignedPrices {
    pub prices: PriceTable,
    pub coverage: Vec<SymbolCoverage>,
}

/// Align multiple symbols to a common timeline.
///
/// Column order follows the input order. Each input series must already be
/// sorted and de-duplicated (providers guarantee this).
pub fn align_closes(series: Vec<(String, Vec<DailyClose>)>) -> Result<AlignedPrices, TableError> {
    let all_dates: BTreeSet<NaiveDate> = series
        .iter()
        .flat_map(|(_, closes)| closes.iter().map(|c| c.date))
        .collect();
    let dates: Vec<NaiveDate> = all_dates.into_iter().collect();

    let mut symbols = Vec::with_capacity(series.len());
    let mut columns = Vec::with_capacity(series.len());
    let mut coverage = Vec::with_capacity(series.len());

    for (symbol, closes) in series {
        let by_date: HashMap<NaiveDate, f64> = closes.iter().map(|c| (c.date, c.close)).collect();

        let column: Vec<f64> = dates
            .iter()
            .map(|date| by_date.get(date).copied().unwrap_or(f64::NAN))
            .collect();

        let observations = column.iter().filter(|v| !v.is_nan()).count();
        coverage.push(SymbolCoverage {
            symbol: symbol.clone(),
            first_date: closes.first().map(|c| c.date),
            last_date: closes.last().map(|c| c.date),
            observations,
            missing: dates.len() - observations,
        });

        symbols.push(symbol);
        columns.push(column);
    }

    for cov in coverage.iter().filter(|c| c.has_gaps()) {
        tracing::warn!(
            symbol = %cov.symbol,
            missing = cov.missing,
            first = ?cov.first_date,
            "symbol has no close on some dates of the common timeline"
        );
    }

    let table = DateTable::new(dates, symbols, columns)?;
    Ok(AlignedPrices {
        prices: PriceTable::new(table),
        coverage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(date: &str, value: f64) -> DailyClose {
        DailyClose::new(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(), value)
    }

    #[test]
    fn align_fills_missing_with_nan() {
        let input = vec![
            (
                "SPY".to_string(),
                vec![
                    close("2024-01-02", 100.0),
                    close("2024-01-03", 101.0),
                    close("2024-01-04", 102.0),
                ],
            ),
            (
                "QQQ".to_string(),
                vec![
                    close("2024-01-02", 200.0),
                    // QQQ missing 2024-01-03
                    close("2024-01-04", 202.0),
                ],
            ),
        ];

        let aligned = align_closes(input).unwrap();
        let prices = &aligned.prices;

        assert_eq!(prices.len(), 3);
        assert_eq!(prices.column("SPY").unwrap()[1], 101.0);
        assert!(prices.column("QQQ").unwrap()[1].is_nan());

        assert!(!aligned.coverage[0].has_gaps());
        assert_eq!(aligned.coverage[1].missing, 1);
        assert_eq!(aligned.coverage[1].observations, 2);
    }

    #[test]
    fn column_order_follows_input() {
        let input = vec![
            ("ZED".to_string(), vec![close("2024-01-02", 1.0)]),
            ("ALPHA".to_string(), vec![close("2024-01-02", 2.0)]),
        ];
        let aligned = align_closes(input).unwrap();
        assert_eq!(aligned.prices.symbols(), &["ZED".to_string(), "ALPHA".to_string()]);
    }

    #[test]
    fn late_listing_reports_first_date() {
        let input = vec![
            (
                "OLD".to_string(),
                vec![close("2024-01-02", 1.0), close("2024-01-03", 1.1)],
            ),
            ("NEW".to_string(), vec![close("2024-01-03", 5.0)]),
        ];
        let aligned = align_closes(input).unwrap();
        let new = &aligned.coverage[1];
        assert_eq!(new.first_date, Some(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()));
        assert_eq!(new.missing, 1);
    }

    #[test]
    fn single_symbol_no_alignment_needed() {
        let input = vec![("SPY".to_string(), vec![close("2024-01-02", 100.0)])];
        let aligned = align_closes(input).unwrap();
        assert_eq!(aligned.prices.len(), 1);
        assert_eq!(aligned.prices.value(0, "SPY"), Some(100.0));
    }

    #[test]
    fn duplicate_symbol_is_rejected() {
        let input = vec![
            ("A".to_string(), vec![close("2024-01-02", 1.0)]),
            ("A".to_string(), vec![close("2024-01-02", 1.0)]),
        ];
        assert!(align_closes(input).is_err());
    }
}
