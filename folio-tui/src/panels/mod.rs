//! Chart widgets
//!
//! - SeriesChart: one line per symbol (prices, returns, growth)
//! - CorrelationHeatmap: annotated symbol × symbol grid

pub mod heatmap;
pub mod series_chart;

pub use heatmap::CorrelationHeatmap;
pub use series_chart::SeriesChart;
