//! # UI Module
//!
//! This module provides the terminal front-end for the tab/menu controller.
//!
//! ## Components
//!
//! - [`App`] - Cursor/focus state plus the [`DisplayState`] the controller renders into
//! - [`keys`] - Key bindings, mapped onto tab and menu item clicks
//! - [`mod@render`] - Rendering functions for drawing the TUI
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │  1 tab1 │ 2 tab2 │ 3 tab3 │ 4 tab4               │
//! ├─────────────────────┬───────────────────────────┤
//! │                     │                           │
//! │   Menu Items        │      API Call Status      │
//! │   (active tab)      │  (pending / success /     │
//! │                     │   error)                  │
//! │                     │                           │
//! ├─────────────────────┴───────────────────────────┤
//! │                    Footer                        │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod keys;
pub mod render;

pub use app::{Action, App, DisplayState, FocusPane};
pub use render::render;
