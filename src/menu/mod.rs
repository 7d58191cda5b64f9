//! # Menu Module
//!
//! The tab/menu selection state machine and the call simulator behind it.
//!
//! ## Components
//!
//! - [`tabs`] - Tab descriptors and deterministic menu item generation
//! - [`controller`] - [`SelectionController`], the selection state machine
//! - [`simulator`] - [`CallSimulator`], the delayed, randomly failing mock call
//!
//! ## Flow
//!
//! ```text
//! InputEvent ──► SelectionController ──► Render (presentation layer)
//!                      │      ▲
//!             simulate │      │ resolve_call
//!                      ▼      │
//!                 CallSimulator ──(delay)──► CallResult channel
//! ```

pub mod controller;
pub mod simulator;
pub mod tabs;

pub use controller::{CallStatus, InputEvent, Render, SelectionController, SelectionState};
pub use simulator::{
    CallHandle, CallOutcome, CallResult, CallSimulator, OutcomeSampler, SeededSampler,
    ThreadRngSampler, SIMULATED_FAILURE_REASON,
};
pub use tabs::{parse_endpoint, MenuItem, TabDescriptor};
