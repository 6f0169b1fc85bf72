//! Chart deck - the four portfolio charts shown one at a time
//!
//! Terminal lifecycle mirrors a full-screen ratatui app: raw mode plus the
//! alternate screen while the deck is open, restored on exit and on panic.

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use folio_runner::PortfolioAnalysis;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use ratatui::{Frame, Terminal};

use crate::navigation::{handle_key_event, key_bindings_help};
use crate::panels::{CorrelationHeatmap, SeriesChart};
use crate::theme::Theme;

/// The charts, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    PriceHistory,
    Correlation,
    DailyReturns,
    CumulativeGrowth,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::PriceHistory,
        ChartKind::Correlation,
        ChartKind::DailyReturns,
        ChartKind::CumulativeGrowth,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::PriceHistory => "Portfolio Close Price History",
            ChartKind::Correlation => "Correlation Matrix of Portfolio Stocks",
            ChartKind::DailyReturns => "Volatility in Daily Returns",
            ChartKind::CumulativeGrowth => "Cumulative Returns (Growth of ₹1 Investment)",
        }
    }

    /// Y-axis label; the heatmap has none.
    pub fn y_label(self) -> Option<&'static str> {
        match self {
            ChartKind::PriceHistory => Some("Close Price (INR)"),
            ChartKind::Correlation => None,
            ChartKind::DailyReturns => Some("Daily Returns"),
            ChartKind::CumulativeGrowth => Some("Growth"),
        }
    }
}

/// Which chart is showing and whether the deck is still open.
#[derive(Debug, Clone)]
pub struct ChartDeck {
    index: usize,
    pub should_quit: bool,
}

impl Default for ChartDeck {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartDeck {
    pub fn new() -> Self {
        Self {
            index: 0,
            should_quit: false,
        }
    }

    pub fn current(&self) -> ChartKind {
        ChartKind::ALL[self.index]
    }

    /// Zero-based position in the deck.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Advance; stays on the last chart.
    pub fn next(&mut self) {
        if self.index + 1 < ChartKind::ALL.len() {
            self.index += 1;
        }
    }

    /// Go back; stays on the first chart.
    pub fn previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

/// Render the current chart plus the status bar.
pub fn draw(frame: &mut Frame, deck: &ChartDeck, analysis: &PortfolioAnalysis, theme: &Theme) {
    let [chart_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    render_chart(deck.current(), analysis, theme, chart_area, frame.buffer_mut());
    status_line(deck, analysis, theme).render(status_area, frame.buffer_mut());
}

/// Paint one chart into `buf`.
pub fn render_chart(
    kind: ChartKind,
    analysis: &PortfolioAnalysis,
    theme: &Theme,
    area: Rect,
    buf: &mut ratatui::buffer::Buffer,
) {
    let y_label = kind.y_label().unwrap_or_default();
    match kind {
        ChartKind::PriceHistory => {
            SeriesChart::new(&analysis.prices, kind.title(), y_label, theme)
                .y_decimals(0)
                .render(area, buf)
        }
        ChartKind::Correlation => {
            CorrelationHeatmap::new(&analysis.correlation, kind.title(), theme).render(area, buf)
        }
        ChartKind::DailyReturns => {
            SeriesChart::new(&analysis.returns, kind.title(), y_label, theme)
                .y_decimals(3)
                .render(area, buf)
        }
        ChartKind::CumulativeGrowth => {
            SeriesChart::new(&analysis.growth, kind.title(), y_label, theme).render(area, buf)
        }
    }
}

fn status_line<'a>(
    deck: &ChartDeck,
    analysis: &PortfolioAnalysis,
    theme: &Theme,
) -> Paragraph<'a> {
    let mut spans = vec![
        Span::styled(
            format!(" [{}/{}] ", deck.position() + 1, ChartKind::ALL.len()),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} to {} ", analysis.config.start, analysis.config.end),
            Style::default().fg(theme.text_secondary),
        ),
    ];
    if analysis.has_synthetic() {
        spans.push(Span::styled(
            "SYNTHETIC DATA ",
            Style::default().fg(theme.warning).add_modifier(Modifier::BOLD),
        ));
    }
    let help: Vec<String> = key_bindings_help()
        .iter()
        .map(|(keys, action)| format!("{keys}: {action}"))
        .collect();
    spans.push(Span::styled(
        format!("│ {}", help.join("  ")),
        Style::default().fg(theme.muted),
    ));

    Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.background))
}

/// Show the chart deck until the user closes it.
pub fn run_deck(analysis: &PortfolioAnalysis) -> Result<()> {
    with_terminal_panic_hook(|| run_in_terminal(analysis))
}

/// Run `body` with a panic hook that restores the terminal before the
/// previous hook prints the panic. The previous hook is reinstalled afterwards.
fn with_terminal_panic_hook<T>(body: impl FnOnce() -> T) -> T {
    let previous = Arc::new(std::panic::take_hook());
    let chained = Arc::clone(&previous);
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        chained(info);
    }));

    let out = body();

    let _ = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| previous(info)));
    out
}

fn run_in_terminal(analysis: &PortfolioAnalysis) -> Result<()> {
    enable_raw_mode()?;
    let mut terminal = setup_or_restore(enter_alternate_screen, || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })?;

    let result = event_loop(&mut terminal, analysis);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn enter_alternate_screen() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

/// Run `setup`; if it fails, call `restore` before returning the error.
fn setup_or_restore<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    match setup() {
        Ok(value) => Ok(value),
        Err(e) => {
            restore();
            Err(e)
        }
    }
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    analysis: &PortfolioAnalysis,
) -> Result<()> {
    let theme = Theme::default();
    let mut deck = ChartDeck::new();

    while !deck.should_quit {
        terminal.draw(|f| draw(f, &deck, analysis, &theme))?;

        // Nothing updates in the background, so block until the next event.
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key_event(&mut deck, key);
            }
        }
    }
    Ok(())
}
