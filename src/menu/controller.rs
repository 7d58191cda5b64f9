//! # Selection Controller
//!
//! Owns the [`SelectionState`] and turns input events into state transitions
//! and render calls. The controller never draws anything itself: everything
//! it wants shown goes through the [`Render`] trait, so the same state
//! machine drives the terminal UI and the tests.
//!
//! ## Transitions
//!
//! ```text
//! NoTabActive --select_tab(t)--> TabActive(t, visible)
//! TabActive(t, v) --select_tab(t)--> TabActive(t, !v)
//! TabActive(t, _) --select_tab(u)--> TabActive(u, visible)   (menu regenerated)
//! TabActive(t, v) --select_menu_item(..)--> TabActive(t, v)  (highlight + call)
//! ```

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, warn};

use crate::config::Settings;
use crate::menu::simulator::{CallHandle, CallOutcome, CallResult, CallSimulator, OutcomeSampler};
use crate::menu::tabs::{MenuItem, TabDescriptor};

/// Display state of a simulated call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStatus {
    Pending,
    Success,
    Failure,
}

impl From<&CallOutcome> for CallStatus {
    fn from(outcome: &CallOutcome) -> Self {
        match outcome {
            CallOutcome::Success => CallStatus::Success,
            CallOutcome::Failure { .. } => CallStatus::Failure,
        }
    }
}

/// Output side of the controller, implemented by the presentation layer.
pub trait Render {
    fn render_active_tab(&mut self, tab_id: &str);
    fn render_menu_visibility(&mut self, visible: bool);
    fn render_menu_items(&mut self, items: &[MenuItem]);
    /// Mark the 1-based `index` of `tab_id` as the single highlighted item.
    fn render_highlight(&mut self, tab_id: &str, index: usize);
    fn render_call_status(
        &mut self,
        status: CallStatus,
        label: &str,
        endpoint: &str,
        delay_ms: u64,
    );
}

/// Input events, independent of how the UI produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    TabClicked(String),
    /// Tab id and 1-based item index.
    MenuItemClicked(String, usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub active_tab: Option<String>,
    pub menu_visible: bool,
    /// Tab id and 1-based index of the highlighted item.
    pub highlighted: Option<(String, usize)>,
}

pub struct SelectionController {
    tabs: Vec<TabDescriptor>,
    state: SelectionState,
    simulator: CallSimulator,
    cancel_stale_calls: bool,
    outstanding: Option<CallHandle>,
}

impl SelectionController {
    pub fn new(
        tabs: Vec<TabDescriptor>,
        simulator: CallSimulator,
        cancel_stale_calls: bool,
    ) -> Self {
        Self {
            tabs,
            state: SelectionState::default(),
            simulator,
            cancel_stale_calls,
            outstanding: None,
        }
    }

    /// Build a controller from validated settings, returning the receiver on
    /// which simulated call results will arrive.
    pub fn from_settings(
        settings: &Settings,
        sampler: Arc<dyn OutcomeSampler>,
    ) -> (Self, UnboundedReceiver<CallResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let simulator = CallSimulator::new(
            settings.simulated_delay,
            settings.failure_probability,
            sampler,
            tx,
        );
        let controller = Self::new(settings.tabs.clone(), simulator, settings.cancel_stale_calls);
        (controller, rx)
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn tabs(&self) -> &[TabDescriptor] {
        &self.tabs
    }

    pub fn tab(&self, tab_id: &str) -> Option<&TabDescriptor> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    pub fn active_tab(&self) -> Option<&TabDescriptor> {
        self.state.active_tab.as_deref().and_then(|id| self.tab(id))
    }

    pub fn delay_ms(&self) -> u64 {
        self.simulator.delay().as_millis() as u64
    }

    /// Id of the most recently issued call, if any.
    pub fn outstanding_call(&self) -> Option<u64> {
        self.outstanding.as_ref().map(CallHandle::call_id)
    }

    /// Activate the first configured tab, as on startup.
    pub fn activate_first_tab(&mut self, view: &mut impl Render) {
        if let Some(id) = self.tabs.first().map(|t| t.id.clone()) {
            self.select_tab(&id, view);
        }
    }

    /// Route an input event to its transition.
    pub fn dispatch(&mut self, event: InputEvent, view: &mut impl Render) {
        match event {
            InputEvent::TabClicked(tab_id) => self.select_tab(&tab_id, view),
            InputEvent::MenuItemClicked(tab_id, index) => {
                self.select_menu_item(&tab_id, index, view);
            }
        }
    }

    /// Select a tab. Re-selecting the active tab toggles its menu; selecting
    /// another tab activates it with its menu shown and freshly generated.
    pub fn select_tab(&mut self, tab_id: &str, view: &mut impl Render) {
        let Some(tab) = self.tab(tab_id) else {
            warn!(tab_id, "ignoring selection of unknown tab");
            return;
        };

        if self.state.active_tab.as_deref() == Some(tab_id) {
            self.state.menu_visible = !self.state.menu_visible;
            debug!(tab_id, visible = self.state.menu_visible, "toggled menu");
            view.render_menu_visibility(self.state.menu_visible);
            return;
        }

        let items = tab.menu_items();
        self.state.active_tab = Some(tab_id.to_string());
        self.state.menu_visible = true;
        debug!(tab_id, items = items.len(), "activated tab");

        view.render_active_tab(tab_id);
        view.render_menu_visibility(true);
        view.render_menu_items(&items);
    }

    /// Select a menu item: highlight it and start a simulated call for it.
    ///
    /// Returns the id of the scheduled call, or `None` if the item does not
    /// exist.
    pub fn select_menu_item(
        &mut self,
        tab_id: &str,
        index: usize,
        view: &mut impl Render,
    ) -> Option<u64> {
        let Some(item) = self.tab(tab_id).and_then(|t| t.menu_item(index)) else {
            warn!(tab_id, index, "ignoring selection of unknown menu item");
            return None;
        };

        let handle = match self.simulator.simulate(&item.label, &item.endpoint) {
            Ok(handle) => handle,
            Err(e) => {
                warn!(tab_id, index, error = %e, "menu item cannot be called");
                return None;
            }
        };

        if self.cancel_stale_calls {
            if let Some(previous) = self.outstanding.take() {
                if !previous.is_finished() {
                    debug!(call_id = previous.call_id(), "cancelling superseded call");
                    previous.cancel();
                }
            }
        }

        let call_id = handle.call_id();
        self.outstanding = Some(handle);
        self.state.highlighted = Some((tab_id.to_string(), index));

        view.render_highlight(tab_id, index);
        view.render_call_status(
            CallStatus::Pending,
            &item.label,
            &item.endpoint,
            self.delay_ms(),
        );
        Some(call_id)
    }

    /// Show a resolved call. Results from older calls are still shown unless
    /// stale-call cancellation is enabled.
    pub fn resolve_call(&mut self, result: &CallResult, view: &mut impl Render) {
        if self.cancel_stale_calls && self.outstanding_call() != Some(result.call_id) {
            debug!(call_id = result.call_id, "dropping result of superseded call");
            return;
        }

        if let CallOutcome::Failure { reason } = &result.outcome {
            debug!(
                call_id = result.call_id,
                endpoint = %result.endpoint,
                %reason,
                "simulated call failed"
            );
        }

        view.render_call_status(
            CallStatus::from(&result.outcome),
            &result.item_label,
            &result.endpoint,
            self.delay_ms(),
        );
    }
}
