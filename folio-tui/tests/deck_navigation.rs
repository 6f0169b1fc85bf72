//! Drives the chart deck with key events and renders every frame into a
//! test backend, the way the event loop would.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use folio_core::data::SyntheticProvider;
use folio_runner::{run_pipeline, PipelineConfig};
use folio_tui::deck::draw;
use folio_tui::{handle_key_event, ChartDeck, ChartKind, Theme};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buf = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            text.push_str(buf.cell((x, y)).unwrap().symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn walk_through_all_charts_then_quit() {
    let mut config = PipelineConfig::nse_portfolio(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
    config.start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let analysis = run_pipeline(&config, &SyntheticProvider::new(), None).unwrap();

    let theme = Theme::default();
    let mut deck = ChartDeck::new();
    let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();

    let mut seen = Vec::new();
    while !deck.should_quit {
        terminal
            .draw(|f| draw(f, &deck, &analysis, &theme))
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains(deck.current().title()));
        seen.push(deck.current());

        let key = if deck.current() == ChartKind::CumulativeGrowth {
            KeyCode::Char('q')
        } else {
            KeyCode::Right
        };
        handle_key_event(&mut deck, KeyEvent::from(key));
    }

    assert_eq!(seen, ChartKind::ALL.to_vec());
}
