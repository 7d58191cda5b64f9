//! Error types for the tabmenu library.
//!
//! Configuration problems are reported once at startup through
//! [`ConfigError`]. [`CallError`] covers requests the call simulator refuses
//! to schedule. A simulated failure is *not* an error: it is an ordinary
//! [`CallOutcome`](crate::menu::CallOutcome) shown to the user.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("simulated delay must be greater than 0 ms, got {0}")]
    NonPositiveDelay(i64),

    #[error("failure probability must be within [0, 1], got {0}")]
    ProbabilityOutOfRange(f64),

    #[error("tab '{tab}' has a negative item count ({count})")]
    NegativeItemCount { tab: String, count: i64 },

    #[error("tab id '{0}' must end with a menu number (e.g. 'tab1')")]
    MissingTabNumber(String),

    #[error("tabs '{first}' and '{second}' both use menu number {number}")]
    DuplicateTabNumber {
        first: String,
        second: String,
        number: u32,
    },

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("menu item label must not be empty")]
    EmptyLabel,

    #[error("endpoint '{0}' does not match /api/menu/item<n>-<i>")]
    MalformedEndpoint(String),
}
