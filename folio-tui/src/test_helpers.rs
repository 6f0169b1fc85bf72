//! Test helpers for creating mock data

use chrono::NaiveDate;
use folio_core::data::SyntheticProvider;
use folio_core::DateTable;
use folio_runner::{run_pipeline, PipelineConfig, PortfolioAnalysis};
use ratatui::buffer::Buffer;

/// A full seven-symbol analysis over two months of synthetic prices.
pub fn sample_analysis() -> PortfolioAnalysis {
    let mut config = PipelineConfig::nse_portfolio(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    config.start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    run_pipeline(&config, &SyntheticProvider::new(), None).unwrap()
}

/// Table on consecutive days from 2024-01-01.
pub fn table(cols: Vec<(&str, Vec<f64>)>) -> DateTable {
    let n = cols.first().map(|(_, c)| c.len()).unwrap_or(0);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let dates = (0..n)
        .map(|i| start + chrono::Duration::days(i as i64))
        .collect();
    let symbols = cols.iter().map(|(s, _)| s.to_string()).collect();
    let columns = cols.into_iter().map(|(_, c)| c).collect();
    DateTable::new(dates, symbols, columns).unwrap()
}

/// Buffer contents, one line per row.
pub fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut content = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            content.push_str(buf.cell((x, y)).unwrap().symbol());
        }
        content.push('\n');
    }
    content
}
