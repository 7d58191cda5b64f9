//! Key bindings.
//!
//! Keyboard activation is mapped onto the same two input events a click
//! would produce: `Enter`/`Space` on the tab bar is a tab click, on the menu
//! it is a menu item click.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::app::Action;

/// Map a key press to an action. `help_open` restricts the map to the keys
/// that close the help modal.
pub fn action_for_key(key: KeyEvent, help_open: bool) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if help_open {
        return match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => Some(Action::ToggleHelp),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Tab | KeyCode::BackTab => Action::SwitchFocus,
        KeyCode::Left | KeyCode::Char('h') => Action::PrevTab,
        KeyCode::Right | KeyCode::Char('l') => Action::NextTab,
        KeyCode::Up | KeyCode::Char('k') => Action::PrevItem,
        KeyCode::Down | KeyCode::Char('j') => Action::NextItem,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Activate,
        KeyCode::Char(c @ '1'..='9') => Action::JumpToTab(c as usize - '1' as usize),
        _ => return None,
    };
    Some(action)
}
