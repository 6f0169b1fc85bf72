//! Keyboard navigation and event handling
//!
//! Maps keyboard events to chart deck actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::deck::ChartDeck;

/// Handle keyboard input and update deck state
pub fn handle_key_event(deck: &mut ChartDeck, key: KeyEvent) {
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            deck.quit();
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            deck.quit();
        }

        // Navigation
        KeyCode::Right | KeyCode::Char('n') | KeyCode::Char(' ') | KeyCode::Enter => {
            deck.next();
        }
        KeyCode::Left | KeyCode::Char('p') | KeyCode::Backspace => {
            deck.previous();
        }

        _ => {}
    }
}

/// Key bindings help text
pub fn key_bindings_help() -> Vec<(&'static str, &'static str)> {
    vec![
        ("→/n/Space", "next"),
        ("←/p", "previous"),
        ("q/Esc", "close"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::ChartKind;

    #[test]
    fn test_quit_on_q() {
        let mut deck = ChartDeck::new();
        handle_key_event(&mut deck, KeyEvent::from(KeyCode::Char('q')));
        assert!(deck.should_quit);
    }

    #[test]
    fn test_quit_on_esc() {
        let mut deck = ChartDeck::new();
        handle_key_event(&mut deck, KeyEvent::from(KeyCode::Esc));
        assert!(deck.should_quit);
    }

    #[test]
    fn test_quit_on_ctrl_c() {
        let mut deck = ChartDeck::new();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        handle_key_event(&mut deck, key);
        assert!(deck.should_quit);
    }

    #[test]
    fn test_plain_c_does_nothing() {
        let mut deck = ChartDeck::new();
        handle_key_event(&mut deck, KeyEvent::from(KeyCode::Char('c')));
        assert!(!deck.should_quit);
        assert_eq!(deck.position(), 0);
    }

    #[test]
    fn test_forward_keys() {
        let mut deck = ChartDeck::new();
        handle_key_event(&mut deck, KeyEvent::from(KeyCode::Right));
        assert_eq!(deck.current(), ChartKind::Correlation);
        handle_key_event(&mut deck, KeyEvent::from(KeyCode::Char('n')));
        assert_eq!(deck.current(), ChartKind::DailyReturns);
        handle_key_event(&mut deck, KeyEvent::from(KeyCode::Char(' ')));
        assert_eq!(deck.current(), ChartKind::CumulativeGrowth);
    }

    #[test]
    fn test_back_keys() {
        let mut deck = ChartDeck::new();
        deck.next();
        deck.next();
        handle_key_event(&mut deck, KeyEvent::from(KeyCode::Left));
        assert_eq!(deck.current(), ChartKind::Correlation);
        handle_key_event(&mut deck, KeyEvent::from(KeyCode::Char('p')));
        assert_eq!(deck.current(), ChartKind::PriceHistory);
    }

    #[test]
    fn test_help_covers_quit() {
        let help = key_bindings_help();
        assert!(help.iter().any(|(_, action)| *action == "close"));
    }
}
