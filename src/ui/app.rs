use crate::menu::{CallResult, CallStatus, InputEvent, MenuItem, Render, SelectionController};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Tabs,
    Menu,
}

/// What the status panel shows for the last call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallView {
    pub status: CallStatus,
    pub label: String,
    pub endpoint: String,
    pub delay_ms: u64,
}

/// Everything the controller has asked to be shown. This is the terminal
/// front-end's [`Render`] target; `ui::render` draws it each frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub active_tab: Option<String>,
    pub menu_visible: bool,
    pub items: Vec<MenuItem>,
    pub highlighted: Option<(String, usize)>,
    pub call: Option<CallView>,
}

impl DisplayState {
    pub fn is_call_pending(&self) -> bool {
        self.call
            .as_ref()
            .is_some_and(|c| c.status == CallStatus::Pending)
    }

    /// Whether the 0-based `position` in the visible menu is the highlighted item.
    pub fn is_highlighted(&self, position: usize) -> bool {
        match (&self.highlighted, &self.active_tab) {
            (Some((tab, index)), Some(active)) => tab == active && *index == position + 1,
            _ => false,
        }
    }
}

impl Render for DisplayState {
    fn render_active_tab(&mut self, tab_id: &str) {
        self.active_tab = Some(tab_id.to_string());
    }

    fn render_menu_visibility(&mut self, visible: bool) {
        self.menu_visible = visible;
    }

    fn render_menu_items(&mut self, items: &[MenuItem]) {
        self.items = items.to_vec();
    }

    fn render_highlight(&mut self, tab_id: &str, index: usize) {
        self.highlighted = Some((tab_id.to_string(), index));
    }

    fn render_call_status(
        &mut self,
        status: CallStatus,
        label: &str,
        endpoint: &str,
        delay_ms: u64,
    ) {
        self.call = Some(CallView {
            status,
            label: label.to_string(),
            endpoint: endpoint.to_string(),
            delay_ms,
        });
    }
}

/// User intents produced by the key map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    SwitchFocus,
    PrevTab,
    NextTab,
    /// Jump to and activate the tab at a 0-based position.
    JumpToTab(usize),
    PrevItem,
    NextItem,
    /// Enter/Space: click whatever the cursor is on.
    Activate,
}

pub struct App {
    pub controller: SelectionController,
    pub display: DisplayState,
    pub focus: FocusPane,
    /// Position of the tab cursor in the tab bar.
    pub tab_cursor: usize,
    /// 0-based position of the item cursor in the visible menu.
    pub item_cursor: usize,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    /// Create the app and activate the first tab.
    pub fn new(controller: SelectionController) -> Self {
        let mut app = Self {
            controller,
            display: DisplayState::default(),
            focus: FocusPane::Tabs,
            tab_cursor: 0,
            item_cursor: 0,
            show_help: false,
            should_quit: false,
        };
        app.controller.activate_first_tab(&mut app.display);
        app
    }

    pub fn tab_count(&self) -> usize {
        self.controller.tabs().len()
    }

    fn tab_id_at(&self, position: usize) -> Option<String> {
        self.controller.tabs().get(position).map(|t| t.id.clone())
    }

    fn menu_is_open(&self) -> bool {
        self.display.menu_visible && !self.display.items.is_empty()
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleHelp => self.toggle_help(),
            Action::SwitchFocus => self.toggle_focus(),
            Action::PrevTab => self.previous_tab(),
            Action::NextTab => self.next_tab(),
            Action::JumpToTab(position) => self.jump_to_tab(position),
            Action::PrevItem => self.previous_item(),
            Action::NextItem => self.next_item(),
            Action::Activate => self.activate(),
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::Tabs if self.menu_is_open() => FocusPane::Menu,
            _ => FocusPane::Tabs,
        };
    }

    pub fn next_tab(&mut self) {
        let count = self.tab_count();
        if count > 0 {
            self.tab_cursor = (self.tab_cursor + 1) % count;
        }
        self.focus = FocusPane::Tabs;
    }

    pub fn previous_tab(&mut self) {
        let count = self.tab_count();
        if count > 0 {
            self.tab_cursor = (self.tab_cursor + count - 1) % count;
        }
        self.focus = FocusPane::Tabs;
    }

    pub fn jump_to_tab(&mut self, position: usize) {
        if position < self.tab_count() {
            self.tab_cursor = position;
            self.focus = FocusPane::Tabs;
            self.activate();
        }
    }

    pub fn next_item(&mut self) {
        if !self.menu_is_open() {
            return;
        }
        if self.focus == FocusPane::Tabs {
            // Down from the tab bar drops into the menu
            self.focus = FocusPane::Menu;
            return;
        }
        if self.item_cursor + 1 < self.display.items.len() {
            self.item_cursor += 1;
        }
    }

    pub fn previous_item(&mut self) {
        if self.focus != FocusPane::Menu {
            return;
        }
        if self.item_cursor == 0 {
            self.focus = FocusPane::Tabs;
        } else {
            self.item_cursor -= 1;
        }
    }

    /// Click whatever the focused cursor is on.
    pub fn activate(&mut self) {
        match self.focus {
            FocusPane::Tabs => {
                if let Some(tab_id) = self.tab_id_at(self.tab_cursor) {
                    self.dispatch(InputEvent::TabClicked(tab_id));
                }
            }
            FocusPane::Menu => {
                if let Some(tab_id) = self.display.active_tab.clone() {
                    self.dispatch(InputEvent::MenuItemClicked(tab_id, self.item_cursor + 1));
                }
            }
        }
    }

    /// Feed an input event to the controller and keep cursors consistent
    /// with whatever it rendered.
    pub fn dispatch(&mut self, event: InputEvent) {
        let previous_tab = self.display.active_tab.clone();
        self.controller.dispatch(event, &mut self.display);

        if self.display.active_tab != previous_tab {
            self.item_cursor = 0;
        }
        if let Some(position) = self
            .display
            .active_tab
            .as_deref()
            .and_then(|id| self.controller.tabs().iter().position(|t| t.id == id))
        {
            self.tab_cursor = position;
        }
        if !self.menu_is_open() {
            self.focus = FocusPane::Tabs;
        }
        self.item_cursor = self
            .item_cursor
            .min(self.display.items.len().saturating_sub(1));
    }

    pub fn resolve_call(&mut self, result: &CallResult) {
        self.controller.resolve_call(result, &mut self.display);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::menu::SeededSampler;
    use std::sync::Arc;

    fn create_test_app() -> App {
        let settings = Config::default().validate().expect("defaults are valid");
        let (controller, _rx) =
            SelectionController::from_settings(&settings, Arc::new(SeededSampler::new(1)));
        App::new(controller)
    }

    #[test]
    fn test_new_activates_first_tab() {
        let app = create_test_app();
        assert_eq!(app.display.active_tab.as_deref(), Some("tab1"));
        assert!(app.display.menu_visible);
        assert_eq!(app.display.items.len(), 3);
        assert_eq!(app.focus, FocusPane::Tabs);
    }

    #[test]
    fn test_tab_cursor_wraps() {
        let mut app = create_test_app();
        app.previous_tab();
        assert_eq!(app.tab_cursor, 3);
        app.next_tab();
        assert_eq!(app.tab_cursor, 0);
    }

    #[test]
    fn test_moving_cursor_does_not_select() {
        let mut app = create_test_app();
        app.next_tab();
        assert_eq!(app.display.active_tab.as_deref(), Some("tab1"));
    }

    #[test]
    fn test_item_cursor_clamped() {
        let mut app = create_test_app();
        app.next_item();
        assert_eq!(app.focus, FocusPane::Menu);
        for _ in 0..10 {
            app.next_item();
        }
        assert_eq!(app.item_cursor, 2);
        for _ in 0..2 {
            app.previous_item();
        }
        assert_eq!(app.item_cursor, 0);
        app.previous_item();
        assert_eq!(app.focus, FocusPane::Tabs);
    }

    #[test]
    fn test_hidden_menu_returns_focus_to_tabs() {
        let mut app = create_test_app();
        app.toggle_focus();
        assert_eq!(app.focus, FocusPane::Menu);

        app.dispatch(InputEvent::TabClicked("tab1".to_string()));
        assert!(!app.display.menu_visible);
        assert_eq!(app.focus, FocusPane::Tabs);

        app.toggle_focus();
        assert_eq!(app.focus, FocusPane::Tabs);
    }

    #[test]
    fn test_switching_tab_resets_item_cursor() {
        let mut app = create_test_app();
        app.focus = FocusPane::Menu;
        app.item_cursor = 2;

        app.dispatch(InputEvent::TabClicked("tab3".to_string()));
        assert_eq!(app.item_cursor, 0);
        assert_eq!(app.tab_cursor, 2);
    }

    #[test]
    fn test_highlight_only_on_its_own_tab() {
        let mut display = DisplayState {
            active_tab: Some("tab1".to_string()),
            highlighted: Some(("tab1".to_string(), 2)),
            ..DisplayState::default()
        };
        assert!(display.is_highlighted(1));
        assert!(!display.is_highlighted(0));

        display.active_tab = Some("tab2".to_string());
        assert!(!display.is_highlighted(1));
    }
}
