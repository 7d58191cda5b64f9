//! Keyboard event handling tests
//!
//! Tests for the key map and for keyboard activation driving the same tab
//! and menu item transitions a click would.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tabmenu::config::Config;
use tabmenu::menu::{CallStatus, SeededSampler, SelectionController};
use tabmenu::ui::keys::action_for_key;
use tabmenu::ui::{Action, App, FocusPane};

/// Helper to create a key event
fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

/// Helper to create a test app with the default tabs
fn create_test_app() -> App {
    let settings = Config::default().validate().expect("defaults are valid");
    let (controller, _rx) =
        SelectionController::from_settings(&settings, Arc::new(SeededSampler::new(9)));
    App::new(controller)
}

fn press(app: &mut App, code: KeyCode) {
    if let Some(action) = action_for_key(key(code), app.show_help) {
        app.apply(action);
    }
}

#[test]
fn test_quit_keys() {
    for code in [KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc] {
        assert_eq!(action_for_key(key(code), false), Some(Action::Quit));
    }
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(action_for_key(ctrl_c, false), Some(Action::Quit));
}

#[test]
fn test_release_events_are_ignored() {
    let mut release = key(KeyCode::Enter);
    release.kind = KeyEventKind::Release;
    assert_eq!(action_for_key(release, false), None);
}

#[test]
fn test_digit_keys_jump_to_tab() {
    assert_eq!(
        action_for_key(key(KeyCode::Char('1')), false),
        Some(Action::JumpToTab(0))
    );
    assert_eq!(
        action_for_key(key(KeyCode::Char('9')), false),
        Some(Action::JumpToTab(8))
    );
    assert_eq!(action_for_key(key(KeyCode::Char('0')), false), None);
}

#[test]
fn test_help_modal_only_accepts_close_keys() {
    assert_eq!(
        action_for_key(key(KeyCode::Esc), true),
        Some(Action::ToggleHelp)
    );
    assert_eq!(action_for_key(key(KeyCode::Enter), true), None);
    assert_eq!(action_for_key(key(KeyCode::Char('1')), true), None);
}

#[test]
fn test_enter_and_space_activate() {
    assert_eq!(
        action_for_key(key(KeyCode::Enter), false),
        Some(Action::Activate)
    );
    assert_eq!(
        action_for_key(key(KeyCode::Char(' ')), false),
        Some(Action::Activate)
    );
}

#[test]
fn test_enter_on_active_tab_toggles_menu() {
    let mut app = create_test_app();
    assert!(app.display.menu_visible);

    press(&mut app, KeyCode::Enter);
    assert!(!app.display.menu_visible);

    press(&mut app, KeyCode::Char(' '));
    assert!(app.display.menu_visible);
}

#[test]
fn test_arrow_then_enter_selects_next_tab() {
    let mut app = create_test_app();

    press(&mut app, KeyCode::Right);
    assert_eq!(app.display.active_tab.as_deref(), Some("tab1"));

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.display.active_tab.as_deref(), Some("tab2"));
    assert_eq!(app.display.items.len(), 4);
}

#[test]
fn test_digit_key_selects_tab() {
    let mut app = create_test_app();

    press(&mut app, KeyCode::Char('4'));
    assert_eq!(app.display.active_tab.as_deref(), Some("tab4"));
    assert_eq!(app.tab_cursor, 3);

    // Out of range digits do nothing
    press(&mut app, KeyCode::Char('8'));
    assert_eq!(app.display.active_tab.as_deref(), Some("tab4"));
}

#[tokio::test(start_paused = true)]
async fn test_enter_in_menu_calls_item() {
    let mut app = create_test_app();

    press(&mut app, KeyCode::Char('3'));
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus, FocusPane::Menu);
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Enter);

    let call = app.display.call.clone().expect("call shown");
    assert_eq!(call.status, CallStatus::Pending);
    assert_eq!(call.label, "Menu Item 3-2");
    assert_eq!(app.display.highlighted, Some(("tab3".to_string(), 2)));
    assert!(app.display.menu_visible);
}

#[test]
fn test_help_toggle() {
    let mut app = create_test_app();

    press(&mut app, KeyCode::Char('?'));
    assert!(app.show_help);

    // Quit is swallowed while help is open and closes it instead
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.show_help);
    assert!(!app.should_quit);
}
