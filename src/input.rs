use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Turn(Direction),
    /// Start, resume or restart depending on where the session is.
    Confirm,
    TogglePause,
    Reset,
    Quit,
}

/// Maps a key press to a controller action. Releases carry nothing yet.
pub fn action_for(ev: &KeyEvent) -> Option<Action> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }
    if is_ctrl_c(ev) {
        return Some(Action::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Action::Turn(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Action::Turn(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Action::Turn(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Action::Turn(Right)),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc | KeyCode::Char('p') => Some(Action::TogglePause),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_turn() {
        assert_eq!(action_for(&press(KeyCode::Up)), Some(Action::Turn(Up)));
        assert_eq!(action_for(&press(KeyCode::Char('s'))), Some(Action::Turn(Down)));
        assert_eq!(action_for(&press(KeyCode::Left)), Some(Action::Turn(Left)));
        assert_eq!(action_for(&press(KeyCode::Char('d'))), Some(Action::Turn(Right)));
    }

    #[test]
    fn releases_are_ignored() {
        let ev = KeyEvent::new_with_kind(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(action_for(&ev), None);
    }

    #[test]
    fn ctrl_c_quits_but_plain_c_does_nothing() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(&ev), Some(Action::Quit));
        assert_eq!(action_for(&press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn session_keys() {
        assert_eq!(action_for(&press(KeyCode::Enter)), Some(Action::Confirm));
        assert_eq!(action_for(&press(KeyCode::Esc)), Some(Action::TogglePause));
        assert_eq!(action_for(&press(KeyCode::Char('r'))), Some(Action::Reset));
    }
}
