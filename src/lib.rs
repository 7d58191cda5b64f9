//! Tabmenu - a tabbed menu TUI with simulated API calls
//!
//! This library provides the selection state machine behind the tabs, the
//! call simulator that stands in for a network request, the configuration
//! layer, and the terminal front-end that renders it all.

pub mod config;
pub mod error;
pub mod menu;
pub mod ui;
