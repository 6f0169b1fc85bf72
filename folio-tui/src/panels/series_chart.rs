//! Series chart - one line per symbol over a shared date axis
//!
//! Used for price history, daily returns and cumulative growth. Missing
//! cells (NaN) are skipped, so a symbol that lists late simply starts
//! later on the x axis.

use folio_core::DateTable;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Widget},
};

use crate::theme::Theme;

/// Line chart of every column in a date-indexed table.
pub struct SeriesChart<'a> {
    table: &'a DateTable,
    title: &'a str,
    y_label: &'a str,
    y_decimals: usize,
    theme: &'a Theme,
}

impl<'a> SeriesChart<'a> {
    pub fn new(table: &'a DateTable, title: &'a str, y_label: &'a str, theme: &'a Theme) -> Self {
        Self {
            table,
            title,
            y_label,
            y_decimals: 2,
            theme,
        }
    }

    /// Decimal places on the y-axis labels.
    pub fn y_decimals(mut self, decimals: usize) -> Self {
        self.y_decimals = decimals;
        self
    }

    /// Finite `(row, value)` points for each column, in column order.
    pub fn points(table: &DateTable) -> Vec<(String, Vec<(f64, f64)>)> {
        table
            .columns()
            .map(|(symbol, column)| {
                let pts = column
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.is_finite())
                    .map(|(i, &v)| (i as f64, v))
                    .collect();
                (symbol.to_string(), pts)
            })
            .collect()
    }

    /// Dates at the start, middle and end of the index, as axis labels.
    fn x_labels(&self) -> Vec<Span<'static>> {
        let dates = self.table.dates();
        if dates.is_empty() {
            return Vec::new();
        }
        let mid = dates.len() / 2;
        [dates[0], dates[mid], dates[dates.len() - 1]]
            .iter()
            .map(|d| Span::raw(d.format("%Y-%m-%d").to_string()))
            .collect()
    }
}

impl<'a> Widget for SeriesChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .title_style(
                Style::default()
                    .fg(self.theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().bg(self.theme.background));

        let Some((y_min, y_max)) = self.table.value_range() else {
            let inner = block.inner(area);
            block.render(area, buf);
            buf.set_string(
                inner.x,
                inner.y,
                "No data",
                Style::default().fg(self.theme.muted),
            );
            return;
        };

        // Pad the y axis by 5% of the range.
        let y_range = y_max - y_min;
        let y_pad = if y_range > 0.0 {
            y_range * 0.05
        } else {
            y_max.abs().max(1.0) * 0.05
        };
        let y_lower = y_min - y_pad;
        let y_upper = y_max + y_pad;
        let x_max = self.table.len().saturating_sub(1).max(1) as f64;

        let series = Self::points(self.table);
        let datasets: Vec<Dataset> = series
            .iter()
            .enumerate()
            .map(|(i, (symbol, pts))| {
                Dataset::default()
                    .name(symbol.clone())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(self.theme.series_color(i)))
                    .data(pts)
            })
            .collect();

        let decimals = self.y_decimals;
        let y_labels = vec![
            Span::raw(format!("{:.*}", decimals, y_lower)),
            Span::raw(format!("{:.*}", decimals, (y_lower + y_upper) / 2.0)),
            Span::raw(format!("{:.*}", decimals, y_upper)),
        ];

        let axis_title = Style::default().fg(self.theme.text_secondary);
        let chart = Chart::new(datasets)
            .block(block)
            .legend_position(Some(LegendPosition::TopLeft))
            .hidden_legend_constraints((Constraint::Percentage(40), Constraint::Percentage(60)))
            .x_axis(
                Axis::default()
                    .title(Span::styled("Date", axis_title))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([0.0, x_max])
                    .labels(self.x_labels()),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(self.y_label.to_string(), axis_title))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([y_lower, y_upper])
                    .labels(y_labels),
            );

        chart.render(area, buf);
    }
}
