//! Folio TUI - terminal chart deck for a finished portfolio analysis
//!
//! Shows, one at a time:
//! - Close price history
//! - Correlation heatmap of daily returns
//! - Daily returns
//! - Cumulative growth of one rupee

pub mod deck;
pub mod navigation;
pub mod panels;
pub mod theme;

pub use deck::{run_deck, ChartDeck, ChartKind};
pub use navigation::handle_key_event;
pub use theme::Theme;

#[cfg(test)]
mod test_helpers;
