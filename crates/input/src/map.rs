//! Key mapping from terminal events to match input.
//!
//! Two disjoint control schemes share one keyboard:
//!
//! | Action     | Scheme one | Scheme two |
//! |------------|------------|------------|
//! | Move left  | `A`        | `Left`     |
//! | Move right | `D`        | `Right`    |
//! | Soft drop  | `S`        | `Down`     |
//! | Rotate     | `W`        | `Up`       |
//! | Hard drop  | `Space`    | `Enter`    |
//!
//! Match controls: `G` start, `P` pause, `R` reset, `B` toggle autoplay.
//! `Q`, `Esc` and `Ctrl-C` quit.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::{Command, MatchControl, PlayerSlot};

/// One decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Play { slot: PlayerSlot, command: Command },
    Control(MatchControl),
    Quit,
}

/// Gameplay command for a key, tagged with the scheme it belongs to.
pub fn map_play_key(code: KeyCode) -> Option<(PlayerSlot, Command)> {
    let mapped = match code {
        KeyCode::Char('a') | KeyCode::Char('A') => (PlayerSlot::One, Command::MoveLeft),
        KeyCode::Char('d') | KeyCode::Char('D') => (PlayerSlot::One, Command::MoveRight),
        KeyCode::Char('s') | KeyCode::Char('S') => (PlayerSlot::One, Command::SoftDrop),
        KeyCode::Char('w') | KeyCode::Char('W') => (PlayerSlot::One, Command::Rotate),
        KeyCode::Char(' ') => (PlayerSlot::One, Command::HardDrop),

        KeyCode::Left => (PlayerSlot::Two, Command::MoveLeft),
        KeyCode::Right => (PlayerSlot::Two, Command::MoveRight),
        KeyCode::Down => (PlayerSlot::Two, Command::SoftDrop),
        KeyCode::Up => (PlayerSlot::Two, Command::Rotate),
        KeyCode::Enter => (PlayerSlot::Two, Command::HardDrop),

        _ => return None,
    };
    Some(mapped)
}

/// Match-level control for a key.
pub fn map_control_key(code: KeyCode) -> Option<MatchControl> {
    match code {
        KeyCode::Char('g') | KeyCode::Char('G') => Some(MatchControl::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(MatchControl::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(MatchControl::Reset),
        KeyCode::Char('b') | KeyCode::Char('B') => Some(MatchControl::ToggleAutoplay),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Decode a terminal key event. Releases and unmapped keys yield `None`.
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(InputEvent::Quit);
    }
    if let Some(control) = map_control_key(key.code) {
        return Some(InputEvent::Control(control));
    }
    map_play_key(key.code).map(|(slot, command)| InputEvent::Play { slot, command })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn play(slot: PlayerSlot, command: Command) -> Option<InputEvent> {
        Some(InputEvent::Play { slot, command })
    }

    #[test]
    fn test_scheme_one_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('a'))), play(PlayerSlot::One, Command::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('D'))), play(PlayerSlot::One, Command::MoveRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('s'))), play(PlayerSlot::One, Command::SoftDrop));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('W'))), play(PlayerSlot::One, Command::Rotate));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), play(PlayerSlot::One, Command::HardDrop));
    }

    #[test]
    fn test_scheme_two_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), play(PlayerSlot::Two, Command::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Right)), play(PlayerSlot::Two, Command::MoveRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Down)), play(PlayerSlot::Two, Command::SoftDrop));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), play(PlayerSlot::Two, Command::Rotate));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), play(PlayerSlot::Two, Command::HardDrop));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('g'))),
            Some(InputEvent::Control(MatchControl::Start))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('P'))),
            Some(InputEvent::Control(MatchControl::TogglePause))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('r'))),
            Some(InputEvent::Control(MatchControl::Reset))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('b'))),
            Some(InputEvent::Control(MatchControl::ToggleAutoplay))
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Esc)), Some(InputEvent::Quit));
    }

    #[test]
    fn test_release_and_unknown_ignored() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(map_key(release), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('x'))), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Tab)), None);
    }
}
