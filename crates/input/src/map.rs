//! Key mapping from terminal events to game actions.
//!
//! The same physical key means different things per phase: Space starts the game on the
//! start screen and soft-drops while a piece falls, and while typing every printable key
//! is a character.

use crate::types::{GameAction, Phase};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a game action for the given phase.
pub fn handle_key_event(key: KeyEvent, phase: Phase) -> Option<GameAction> {
    if key.code == KeyCode::Esc {
        return Some(GameAction::Escape);
    }
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    match phase {
        Phase::StartScreen => match key.code {
            KeyCode::Left => Some(GameAction::CycleWordSetLeft),
            KeyCode::Right => Some(GameAction::CycleWordSetRight),
            KeyCode::Char(' ') => Some(GameAction::Start),
            _ => None,
        },
        Phase::Typing => match key.code {
            KeyCode::Char(c) if !c.is_whitespace() && !c.is_control() => {
                Some(GameAction::TypeChar(c))
            }
            _ => None,
        },
        Phase::Falling => match key.code {
            // Movement
            KeyCode::Left | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::MoveLeft),
            KeyCode::Right | KeyCode::Char('f') | KeyCode::Char('F') => {
                Some(GameAction::MoveRight)
            }

            // Rotation
            KeyCode::Up | KeyCode::Char('j') | KeyCode::Char('J') => Some(GameAction::RotateCw),
            KeyCode::Char('k') | KeyCode::Char('K') => Some(GameAction::RotateCcw),

            // Drops
            KeyCode::Char(' ') => Some(GameAction::SoftDrop),
            KeyCode::Enter => Some(GameAction::HardDrop),

            _ => None,
        },
        Phase::GameOver => None,
    }
}

/// Check if key should quit the game.
///
/// Only Ctrl-C quits: every letter may be part of a word.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_escape_in_every_phase() {
        for phase in [
            Phase::StartScreen,
            Phase::Typing,
            Phase::Falling,
            Phase::GameOver,
        ] {
            assert_eq!(
                handle_key_event(key(KeyCode::Esc), phase),
                Some(GameAction::Escape)
            );
        }
    }

    #[test]
    fn test_start_screen_keys() {
        assert_eq!(
            handle_key_event(key(KeyCode::Left), Phase::StartScreen),
            Some(GameAction::CycleWordSetLeft)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Right), Phase::StartScreen),
            Some(GameAction::CycleWordSetRight)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char(' ')), Phase::StartScreen),
            Some(GameAction::Start)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('a')), Phase::StartScreen),
            None
        );
    }

    #[test]
    fn test_typing_keys() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q')), Phase::Typing),
            Some(GameAction::TypeChar('q'))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('D')), Phase::Typing),
            Some(GameAction::TypeChar('D'))
        );
        assert_eq!(handle_key_event(key(KeyCode::Char(' ')), Phase::Typing), None);
        assert_eq!(handle_key_event(key(KeyCode::Left), Phase::Typing), None);
    }

    #[test]
    fn test_falling_keys() {
        let cases = [
            (KeyCode::Char('d'), GameAction::MoveLeft),
            (KeyCode::Left, GameAction::MoveLeft),
            (KeyCode::Char('F'), GameAction::MoveRight),
            (KeyCode::Right, GameAction::MoveRight),
            (KeyCode::Char('j'), GameAction::RotateCw),
            (KeyCode::Up, GameAction::RotateCw),
            (KeyCode::Char('k'), GameAction::RotateCcw),
            (KeyCode::Char(' '), GameAction::SoftDrop),
            (KeyCode::Enter, GameAction::HardDrop),
        ];
        for (code, action) in cases {
            assert_eq!(handle_key_event(key(code), Phase::Falling), Some(action));
        }
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), Phase::Falling), None);
    }

    #[test]
    fn test_game_over_ignores_everything_but_escape() {
        assert_eq!(handle_key_event(key(KeyCode::Char(' ')), Phase::GameOver), None);
        assert_eq!(handle_key_event(key(KeyCode::Enter), Phase::GameOver), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(key(KeyCode::Char('q'))));
        assert!(!should_quit(key(KeyCode::Char('c'))));
        assert_eq!(
            handle_key_event(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                Phase::Typing
            ),
            None
        );
    }
}
