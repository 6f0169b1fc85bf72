//! CSV import provider.
//!
//! Reads `<dir>/<SYMBOL>.csv` in Yahoo's download layout
//! (`Date,Open,High,Low,Close,Adj Close,Volume`). Only `Date` and `Close` are
//! required; `Adj Close` is used when present and adjusted prices are asked for.
//! Unparseable cells (Yahoo writes `null` for holidays) are treated as missing.

use super::provider::{
    finalize_closes, DailyClose, DataError, DataProvider, DataSource, FetchResult, PriceField,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Close", default, deserialize_with = "csv::invalid_option")]
    close: Option<f64>,
    #[serde(rename = "Adj Close", default, deserialize_with = "csv::invalid_option")]
    adj_close: Option<f64>,
}

/// Provider backed by a directory of per-symbol CSV files.
pub struct CsvProvider {
    dir: PathBuf,
    field: PriceField,
}

impl CsvProvider {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            field: PriceField::default(),
        }
    }

    pub fn with_price_field(mut self, field: PriceField) -> Self {
        self.field = field;
        self
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }

    fn read_closes(&self, symbol: &str, path: &Path) -> Result<Vec<DailyClose>, DataError> {
        let import_err = |reason: String| DataError::CsvImport {
            symbol: symbol.to_string(),
            reason,
        };

        let mut reader = csv::Reader::from_path(path).map_err(|e| import_err(e.to_string()))?;
        let mut closes = Vec::new();

        for (line, row) in reader.deserialize::<CsvRow>().enumerate() {
            // Header is line 1.
            let row = row.map_err(|e| import_err(format!("line {}: {e}", line + 2)))?;
            let price = match self.field {
                PriceField::AdjustedClose => row.adj_close.or(row.close),
                PriceField::Close => row.close,
            };
            if let Some(close) = price {
                closes.push(DailyClose::new(row.date, close));
            }
        }

        Ok(closes)
    }
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        tracing::debug!(path = %path.display(), "reading CSV");

        let raw = self.read_closes(symbol, &path)?;
        let closes = finalize_closes(symbol, raw, start, end)?;

        Ok(FetchResult {
            symbol: symbol.to_string(),
            closes,
            source: DataSource::CsvImport,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    const YAHOO_CSV: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2024-01-02,80.0,82.0,79.5,81.5,80.9,1000
2024-01-03,81.0,83.0,80.5,82.25,81.6,1200
2024-01-04,null,null,null,null,null,null
2024-01-05,82.0,84.0,81.0,83.0,82.4,900
";

    #[test]
    fn reads_adjusted_close_and_skips_nulls() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "NHPC.NS.csv", YAHOO_CSV);

        let provider = CsvProvider::new(dir.path());
        let result = provider
            .fetch("NHPC.NS", d("2024-01-01"), d("2024-02-01"))
            .unwrap();

        assert_eq!(result.source, DataSource::CsvImport);
        assert_eq!(
            result.closes,
            vec![
                DailyClose::new(d("2024-01-02"), 80.9),
                DailyClose::new(d("2024-01-03"), 81.6),
                DailyClose::new(d("2024-01-05"), 82.4),
            ]
        );
    }

    #[test]
    fn raw_close_field_ignores_adjustment() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "NHPC.NS.csv", YAHOO_CSV);

        let provider = CsvProvider::new(dir.path()).with_price_field(PriceField::Close);
        let result = provider
            .fetch("NHPC.NS", d("2024-01-01"), d("2024-02-01"))
            .unwrap();

        assert_eq!(result.closes[0].close, 81.5);
    }

    #[test]
    fn minimal_two_column_file_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "ITC.NS.csv", "Date,Close\n2024-01-02,450.0\n2024-01-03,452.5\n");

        let provider = CsvProvider::new(dir.path());
        let result = provider.fetch("ITC.NS", d("2024-01-01"), d("2024-01-03")).unwrap();

        // End date is exclusive.
        assert_eq!(result.closes, vec![DailyClose::new(d("2024-01-02"), 450.0)]);
    }

    #[test]
    fn missing_file_is_symbol_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let provider = CsvProvider::new(dir.path());
        let err = provider
            .fetch("BEL.NS", d("2024-01-01"), d("2024-02-01"))
            .unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    #[test]
    fn bad_date_reports_line_number() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "BAD.csv", "Date,Close\n2024-01-02,1.0\nnot-a-date,2.0\n");

        let provider = CsvProvider::new(dir.path());
        let err = provider.fetch("BAD", d("2024-01-01"), d("2024-02-01")).unwrap_err();
        match err {
            DataError::CsvImport { reason, .. } => assert!(reason.contains("line 3"), "{reason}"),
            other => panic!("expected CsvImport, got {other:?}"),
        }
    }
}
