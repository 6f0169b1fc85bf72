//! Return statistics as pure functions over price and return tables.
//!
//! Every function is a one-shot transform of a whole table: table in, table
//! or per-symbol values out. No dependencies on the data providers or the UI.

use folio_core::{CorrelationMatrix, GrowthTable, PriceTable, ReturnsTable};
use serde::Serialize;

/// Trading days used to annualize daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// One value per symbol, in column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolValues(Vec<SymbolValue>);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolValue {
    pub symbol: String,
    /// `NaN` when the statistic is undefined (serialized as `null`).
    pub value: f64,
}

impl SymbolValues {
    fn from_columns<F>(returns: &ReturnsTable, mut f: F) -> Self
    where
        F: FnMut(&[f64]) -> f64,
    {
        Self(
            returns
                .columns()
                .map(|(symbol, column)| SymbolValue {
                    symbol: symbol.to_string(),
                    value: f(column),
                })
                .collect(),
        )
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.0.iter().find(|v| v.symbol == symbol).map(|v| v.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The three printed statistics, all as percentages.
#[derive(Debug, Clone, Serialize)]
pub struct ReturnSummary {
    pub mean_return: SymbolValues,
    pub annualized_volatility: SymbolValues,
    pub reward_per_risk: SymbolValues,
}

impl ReturnSummary {
    pub fn compute(returns: &ReturnsTable) -> Self {
        Self {
            mean_return: mean_return(returns),
            annualized_volatility: annualized_volatility(returns),
            reward_per_risk: reward_per_risk(returns),
        }
    }
}

// ─── Table transforms ───────────────────────────────────────────────

/// Fractional change from `prev` to `cur`. NaN if either is missing.
pub fn pct_change(prev: f64, cur: f64) -> f64 {
    cur / prev - 1.0
}

/// Day-over-day fractional change per column.
///
/// A row survives only if every column has a defined change on it, so the
/// first row is always dropped and a gap in any one symbol drops that date
/// (and the date after it) for all symbols.
pub fn daily_returns(prices: &PriceTable) -> ReturnsTable {
    let raw = prices.map_columns(|src, out| {
        for t in 1..src.len() {
            out[t] = pct_change(src[t - 1], src[t]);
        }
    });
    let complete = raw.retain_rows(|row| row > 0 && raw.row_is_complete(row));
    ReturnsTable::new(complete)
}

/// Running product of `(1 + r)` per column, starting at the first return date.
pub fn cumulative_growth(returns: &ReturnsTable) -> GrowthTable {
    GrowthTable::new(returns.map_columns(|src, out| {
        let mut growth = 1.0;
        for (o, r) in out.iter_mut().zip(src) {
            growth *= 1.0 + r;
            *o = growth;
        }
    }))
}

/// Full-sample Pearson correlation between every pair of return columns.
///
/// The diagonal is 1.0. Pairs involving a zero-variance column are NaN.
pub fn correlation(returns: &ReturnsTable) -> CorrelationMatrix {
    let columns: Vec<&[f64]> = returns.columns().map(|(_, c)| c).collect();
    CorrelationMatrix::from_pairs(returns.symbols().to_vec(), |i, j| {
        pearson(columns[i], columns[j])
    })
}

// ─── Per-symbol statistics ──────────────────────────────────────────

/// Arithmetic mean of daily returns, × 100.
pub fn mean_return(returns: &ReturnsTable) -> SymbolValues {
    SymbolValues::from_columns(returns, |c| mean(c) * 100.0)
}

/// Sample standard deviation of daily returns × √252, × 100.
pub fn annualized_volatility(returns: &ReturnsTable) -> SymbolValues {
    SymbolValues::from_columns(returns, |c| annualized_std(c) * 100.0)
}

/// Mean daily return divided by annualized volatility, × 100.
///
/// A constant price series has zero volatility; its ratio is reported as
/// NaN rather than ±infinity.
pub fn reward_per_risk(returns: &ReturnsTable) -> SymbolValues {
    SymbolValues::from_columns(returns, |c| {
        let vol = annualized_std(c);
        if !vol.is_finite() || vol == 0.0 {
            return f64::NAN;
        }
        mean(c) / vol * 100.0
    })
}

// ─── Scalar helpers ─────────────────────────────────────────────────

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1). NaN for fewer than two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

fn annualized_std(values: &[f64]) -> f64 {
    sample_std(values) * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Pearson correlation coefficient, clamped to [-1, 1].
///
/// NaN when the inputs differ in length, have fewer than two points, or
/// either side has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return f64::NAN;
    }
    let mx = mean(x);
    let my = mean(y);
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use folio_core::DateTable;

    const EPS: f64 = 1e-12;

    fn dates(n: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n).map(|i| start + chrono::Duration::days(i as i64)).collect()
    }

    fn prices(columns: Vec<(&str, Vec<f64>)>) -> PriceTable {
        let n = columns[0].1.len();
        let symbols = columns.iter().map(|(s, _)| s.to_string()).collect();
        let cells = columns.into_iter().map(|(_, c)| c).collect();
        PriceTable::new(DateTable::new(dates(n), symbols, cells).unwrap())
    }

    fn returns(columns: Vec<(&str, Vec<f64>)>) -> ReturnsTable {
        ReturnsTable::new(prices(columns).into_inner())
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < EPS, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn two_symbol_three_day_example() {
        let p = prices(vec![("A", vec![100.0, 110.0, 99.0]), ("B", vec![50.0, 50.0, 55.0])]);

        let r = daily_returns(&p);
        assert_eq!(r.len(), 2);
        assert_eq!(r.dates(), &p.dates()[1..]);
        assert_close(r.column("A").unwrap(), &[0.10, -0.10]);
        assert_close(r.column("B").unwrap(), &[0.0, 0.10]);

        let g = cumulative_growth(&r);
        assert_eq!(g.dates(), r.dates());
        assert_close(g.column("A").unwrap(), &[1.10, 0.99]);
        assert_close(g.column("B").unwrap(), &[1.00, 1.10]);
    }

    #[test]
    fn gap_in_one_symbol_drops_rows_for_all() {
        let p = prices(vec![
            ("A", vec![10.0, 11.0, 12.0, 13.0, 14.0]),
            ("B", vec![20.0, f64::NAN, 22.0, 23.0, 24.0]),
        ]);
        let r = daily_returns(&p);

        // Row 1 (B missing) and row 2 (B's prior missing) go, plus the leading row.
        assert_eq!(r.len(), 2);
        assert_eq!(r.dates(), &[p.dates()[3], p.dates()[4]]);
        assert_close(r.column("A").unwrap(), &[13.0 / 12.0 - 1.0, 14.0 / 13.0 - 1.0]);
    }

    #[test]
    fn single_row_prices_yield_empty_returns() {
        let p = prices(vec![("A", vec![10.0])]);
        let r = daily_returns(&p);
        assert!(r.is_empty());
        assert_eq!(r.symbols(), &["A".to_string()]);
    }

    #[test]
    fn mean_return_is_percentage() {
        let r = returns(vec![("A", vec![0.01, -0.01, 0.02])]);
        let m = mean_return(&r).get("A").unwrap();
        assert!((m - 0.666_666_666_666_666_6).abs() < 1e-9, "{m}");
    }

    #[test]
    fn annualized_volatility_uses_sample_std() {
        let r = returns(vec![("A", vec![0.01, -0.01, 0.02])]);
        // mean = 0.00667, ss = 0.000467, var = ss / 2
        let expected = 0.000_233_333_333_333_333_3_f64.sqrt() * 252f64.sqrt() * 100.0;
        let v = annualized_volatility(&r).get("A").unwrap();
        assert!((v - expected).abs() < 1e-9, "{v} vs {expected}");
    }

    #[test]
    fn reward_per_risk_is_mean_over_annual_vol() {
        let r = returns(vec![("A", vec![0.01, -0.01, 0.02])]);
        let mean_pct = mean_return(&r).get("A").unwrap();
        let vol_pct = annualized_volatility(&r).get("A").unwrap();
        let rpr = reward_per_risk(&r).get("A").unwrap();
        assert!((rpr - mean_pct / vol_pct * 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_volatility_reward_is_nan() {
        let p = prices(vec![("FLAT", vec![5.0, 5.0, 5.0, 5.0]), ("UP", vec![1.0, 2.0, 3.0, 5.0])]);
        let r = daily_returns(&p);
        let rpr = reward_per_risk(&r);

        assert!(rpr.get("FLAT").unwrap().is_nan());
        assert!(rpr.get("UP").unwrap().is_finite());
        assert_eq!(annualized_volatility(&r).get("FLAT"), Some(0.0));
    }

    #[test]
    fn correlation_is_symmetric_with_unit_diagonal() {
        let r = returns(vec![
            ("A", vec![0.01, 0.02, -0.01, 0.03]),
            ("B", vec![0.02, 0.04, -0.02, 0.06]),
            ("C", vec![-0.01, -0.02, 0.01, -0.03]),
        ]);
        let c = correlation(&r);

        assert_eq!(c.len(), 3);
        for i in 0..3 {
            assert_eq!(c.at(i, i), 1.0);
            for j in 0..3 {
                assert_eq!(c.at(i, j), c.at(j, i));
            }
        }
        assert!((c.get("A", "B").unwrap() - 1.0).abs() < EPS);
        assert!((c.get("A", "C").unwrap() + 1.0).abs() < EPS);
    }

    #[test]
    fn correlation_with_flat_series_is_nan_off_diagonal() {
        let r = returns(vec![("A", vec![0.01, 0.02, -0.01]), ("FLAT", vec![0.0, 0.0, 0.0])]);
        let c = correlation(&r);
        assert!(c.get("A", "FLAT").unwrap().is_nan());
        assert_eq!(c.get("FLAT", "FLAT"), Some(1.0));
    }

    #[test]
    fn helpers_handle_short_inputs() {
        assert!(mean(&[]).is_nan());
        assert!(sample_std(&[1.0]).is_nan());
        assert!(pearson(&[1.0], &[2.0]).is_nan());
        assert!(pearson(&[1.0, 2.0], &[1.0]).is_nan());
    }

    #[test]
    fn summary_preserves_column_order() {
        let r = returns(vec![("Z", vec![0.01, 0.02]), ("A", vec![0.03, 0.01])]);
        let s = ReturnSummary::compute(&r);
        let order: Vec<&str> = s.mean_return.iter().map(|v| v.symbol.as_str()).collect();
        assert_eq!(order, vec!["Z", "A"]);
        assert_eq!(s.annualized_volatility.len(), 2);
        assert_eq!(s.reward_per_risk.len(), 2);
    }
}
