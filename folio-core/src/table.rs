//! Date-indexed, symbol-columned tables.
//!
//! `DateTable` is the shared shape behind every table the pipeline produces:
//! a strictly increasing date axis and one `f64` column per symbol, where
//! `NaN` marks a missing cell. The newtypes below tag what a table holds so a
//! returns table cannot be passed where prices are expected.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use std::ops::Deref;
use thiserror::Error;

/// Structural violations detected when building a table.
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("date index is not strictly increasing at position {index} ({date})")]
    UnorderedDates { index: usize, date: NaiveDate },

    #[error("duplicate symbol column: {symbol}")]
    DuplicateSymbol { symbol: String },

    #[error("{symbols} symbols but {columns} columns")]
    ColumnCountMismatch { symbols: usize, columns: usize },

    #[error("column '{symbol}' has {len} cells, expected {expected}")]
    ColumnLengthMismatch {
        symbol: String,
        len: usize,
        expected: usize,
    },
}

/// A table indexed by trading date with one column per symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateTable {
    dates: Vec<NaiveDate>,
    symbols: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl DateTable {
    /// Build a table, validating the date order and column shapes.
    pub fn new(
        dates: Vec<NaiveDate>,
        symbols: Vec<String>,
        columns: Vec<Vec<f64>>,
    ) -> Result<Self, TableError> {
        for (i, pair) in dates.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(TableError::UnorderedDates {
                    index: i + 1,
                    date: pair[1],
                });
            }
        }

        let mut seen = HashSet::new();
        for symbol in &symbols {
            if !seen.insert(symbol.as_str()) {
                return Err(TableError::DuplicateSymbol {
                    symbol: symbol.clone(),
                });
            }
        }

        if symbols.len() != columns.len() {
            return Err(TableError::ColumnCountMismatch {
                symbols: symbols.len(),
                columns: columns.len(),
            });
        }

        for (symbol, column) in symbols.iter().zip(&columns) {
            if column.len() != dates.len() {
                return Err(TableError::ColumnLengthMismatch {
                    symbol: symbol.clone(),
                    len: column.len(),
                    expected: dates.len(),
                });
            }
        }

        Ok(Self {
            dates,
            symbols,
            columns,
        })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Number of rows (dates).
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Column for a symbol, if present.
    pub fn column(&self, symbol: &str) -> Option<&[f64]> {
        self.symbols
            .iter()
            .position(|s| s == symbol)
            .map(|i| self.columns[i].as_slice())
    }

    /// Iterate `(symbol, column)` pairs in column order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.symbols
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// Cell value at a row for a symbol. Missing cells are `NaN`.
    pub fn value(&self, row: usize, symbol: &str) -> Option<f64> {
        self.column(symbol).and_then(|c| c.get(row).copied())
    }

    /// True if every column has a finite value at `row`.
    pub fn row_is_complete(&self, row: usize) -> bool {
        self.columns
            .iter()
            .all(|c| c.get(row).is_some_and(|v| v.is_finite()))
    }

    /// Finite (min, max) across all cells, or `None` if the table has no finite values.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut finite = self.columns.iter().flatten().copied().filter(|v| v.is_finite());
        let first = finite.next()?;
        Some(finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// New table over the same index, one output column per input column.
    ///
    /// `f` receives the source column and an output slice of the same length,
    /// pre-filled with NaN.
    pub fn map_columns<F>(&self, mut f: F) -> DateTable
    where
        F: FnMut(&[f64], &mut [f64]),
    {
        let columns = self
            .columns
            .iter()
            .map(|src| {
                let mut out = vec![f64::NAN; src.len()];
                f(src, &mut out);
                out
            })
            .collect();
        DateTable {
            dates: self.dates.clone(),
            symbols: self.symbols.clone(),
            columns,
        }
    }

    /// Keep only the rows for which `keep(row)` is true, across all columns.
    pub fn retain_rows<F>(&self, mut keep: F) -> DateTable
    where
        F: FnMut(usize) -> bool,
    {
        let rows: Vec<usize> = (0..self.dates.len()).filter(|&r| keep(r)).collect();
        DateTable {
            dates: rows.iter().map(|&r| self.dates[r]).collect(),
            symbols: self.symbols.clone(),
            columns: self
                .columns
                .iter()
                .map(|c| rows.iter().map(|&r| c[r]).collect())
                .collect(),
        }
    }

    /// Deterministic BLAKE3 fingerprint over dates, symbols and cell bits.
    ///
    /// Two runs over the same historical range produce the same fingerprint
    /// only if every cell is bit-identical.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for date in &self.dates {
            hasher.update(date.to_string().as_bytes());
        }
        for (symbol, column) in self.columns() {
            hasher.update(symbol.as_bytes());
            for value in column {
                hasher.update(&value.to_le_bytes());
            }
        }
        hasher.finalize().to_hex().to_string()
    }
}

macro_rules! tagged_table {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize)]
        pub struct $name(DateTable);

        impl $name {
            pub fn new(table: DateTable) -> Self {
                Self(table)
            }

            pub fn into_inner(self) -> DateTable {
                self.0
            }
        }

        impl Deref for $name {
            type Target = DateTable;

            fn deref(&self) -> &DateTable {
                &self.0
            }
        }
    };
}

tagged_table!(
    /// Closing prices; `NaN` where a symbol did not trade on a date.
    PriceTable
);

tagged_table!(
    /// Fractional day-over-day changes. One fewer row than the source prices.
    ReturnsTable
);

tagged_table!(
    /// Compounded growth of one unit invested at the first return date.
    GrowthTable
);

/// Square matrix of pairwise Pearson coefficients between symbols.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    symbols: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Build an `n × n` matrix from a pairwise function.
    ///
    /// `pair(i, j)` is only called for `i < j`; the lower triangle mirrors it
    /// and the diagonal is fixed at 1.0, so the result is symmetric by
    /// construction.
    pub fn from_pairs<F>(symbols: Vec<String>, mut pair: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let n = symbols.len();
        let mut values = vec![vec![1.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let v = pair(i, j);
                values[i][j] = v;
                values[j][i] = v;
            }
        }
        Self { symbols, values }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Matrix dimension.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Coefficient at `(row, col)` by index.
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }

    /// Coefficient between two symbols.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.symbols.iter().position(|s| s == a)?;
        let j = self.symbols.iter().position(|s| s == b)?;
        Some(self.values[i][j])
    }

    /// Rows in symbol order.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }
}
