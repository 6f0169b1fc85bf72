//! Correlation heatmap - colored grid annotated with coefficients
//!
//! Renders:
//! - Row labels on the left, column labels on top
//! - One filled cell per symbol pair, colored on the yellow-green-blue ramp
//! - The coefficient printed in each cell (`nan` when undefined)
//! - A color bar with the min/max values under the grid
//!
//! Ratatui has no heatmap widget, so cells are painted straight into the
//! buffer.

use folio_core::CorrelationMatrix;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use crate::theme::Theme;

const MIN_CELL_WIDTH: u16 = 6;
const MAX_CELL_WIDTH: u16 = 12;
const MAX_CELL_HEIGHT: u16 = 3;

/// Correlation heatmap widget.
pub struct CorrelationHeatmap<'a> {
    matrix: &'a CorrelationMatrix,
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> CorrelationHeatmap<'a> {
    pub fn new(matrix: &'a CorrelationMatrix, title: &'a str, theme: &'a Theme) -> Self {
        Self {
            matrix,
            title,
            theme,
        }
    }

    /// Finite min and max over all cells (the diagonal included).
    pub fn color_range(matrix: &CorrelationMatrix) -> Option<(f64, f64)> {
        matrix
            .rows()
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Position of `value` on the color ramp given the matrix range.
    pub fn ramp_position(value: f64, range: (f64, f64)) -> f64 {
        let (lo, hi) = range;
        if value.is_nan() {
            return f64::NAN;
        }
        if hi - lo < 1e-12 {
            return 1.0;
        }
        (value - lo) / (hi - lo)
    }
}

fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

fn format_cell(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{value:.2}")
    }
}

impl<'a> Widget for CorrelationHeatmap<'a> {
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

        let inner = block.inner(area);
        block.render(area, buf);

        let n = self.matrix.len() as u16;
        if n == 0 || inner.width < 10 || inner.height < 3 {
            return;
        }

        let label_width = self
            .matrix
            .symbols()
            .iter()
            .map(|s| s.chars().count() as u16)
            .max()
            .unwrap_or(0)
            + 1;

        // Header row on top, color bar on the bottom.
        let grid_width = inner.width.saturating_sub(label_width);
        let grid_height = inner.height.saturating_sub(2);
        let cell_width = (grid_width / n).clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH);
        let cell_height = (grid_height / n).clamp(1, MAX_CELL_HEIGHT);

        let grid_left = inner.x + label_width;
        let grid_top = inner.y + 1;
        let range = Self::color_range(self.matrix).unwrap_or((0.0, 1.0));

        let label_style = Style::default().fg(self.theme.text_secondary);

        // Column labels.
        for (j, symbol) in self.matrix.symbols().iter().enumerate() {
            let x = grid_left + j as u16 * cell_width;
            if x >= inner.right() {
                break;
            }
            let room = (inner.right() - x).min(cell_width.saturating_sub(1)) as usize;
            buf.set_string(x, inner.y, truncate(symbol, room), label_style);
        }

        for (i, symbol) in self.matrix.symbols().iter().enumerate() {
            let top = grid_top + i as u16 * cell_height;
            if top >= inner.bottom() {
                break;
            }
            let mid = top + cell_height / 2;

            if mid < inner.bottom() {
                buf.set_string(
                    inner.x,
                    mid,
                    truncate(symbol, label_width.saturating_sub(1) as usize),
                    label_style,
                );
            }

            for j in 0..self.matrix.len() {
                let left = grid_left + j as u16 * cell_width;
                if left >= inner.right() {
                    break;
                }
                let value = self.matrix.at(i, j);
                let t = Self::ramp_position(value, range);
                let fill = Style::default().bg(self.theme.heatmap_color(t));

                let width = cell_width.min(inner.right() - left);
                for y in top..(top + cell_height).min(inner.bottom()) {
                    buf.set_string(left, y, " ".repeat(width as usize), fill);
                }

                if mid < inner.bottom() {
                    let text = truncate(&format_cell(value), width as usize);
                    let pad = (width as usize).saturating_sub(text.len()) / 2;
                    buf.set_string(
                        left + pad as u16,
                        mid,
                        text,
                        fill.fg(self.theme.heatmap_text_color(t)),
                    );
                }
            }
        }

        // Color bar.
        let bar_y = inner.bottom() - 1;
        let bar_top = grid_top + n * cell_height;
        if bar_y >= bar_top {
            let lo = format!("{:.2} ", range.0);
            let hi = format!(" {:.2}", range.1);
            let bar_width = (n * cell_width)
                .min(inner.right().saturating_sub(grid_left))
                .saturating_sub((lo.len() + hi.len()) as u16);
            if bar_width > 0 {
                buf.set_string(grid_left, bar_y, &lo, label_style);
                let bar_left = grid_left + lo.len() as u16;
                for k in 0..bar_width {
                    let t = k as f64 / (bar_width.max(2) - 1) as f64;
                    buf.set_string(
                        bar_left + k,
                        bar_y,
                        " ",
                        Style::default().bg(self.theme.heatmap_color(t)),
                    );
                }
                buf.set_string(bar_left + bar_width, bar_y, &hi, label_style);
            }
        }
    }
}
