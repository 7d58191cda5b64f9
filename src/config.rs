//! # Configuration
//!
//! The configuration surface is small: the simulated delay, the failure
//! probability, and how many menu items each tab owns.
//!
//! ## Overview
//!
//! [`Config`] is the raw, serde-facing form. It is read from a JSON file in
//! the user's config directory (or a path given on the command line), with
//! every field optional. [`Config::validate`] turns it into [`Settings`],
//! which is what the rest of the crate consumes. Validation happens once at
//! startup so a bad value never surfaces mid-interaction.
//!
//! ## File Location
//!
//! ```text
//! ~/.config/tabmenu/config.json
//! ```
//!
//! ## Example
//!
//! ```json
//! {
//!   "simulated_delay_ms": 1500,
//!   "failure_probability": 0.2,
//!   "tab_item_counts": { "tab1": 3, "tab2": 4, "tab3": 2, "tab4": 5 },
//!   "cancel_stale_calls": false
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::menu::TabDescriptor;

/// Raw configuration as written in the config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Delay before a simulated call resolves, in milliseconds. Must be > 0.
    #[serde(default = "default_delay_ms")]
    pub simulated_delay_ms: i64,

    /// Probability in `[0, 1]` that a simulated call fails.
    #[serde(default = "default_failure_probability")]
    pub failure_probability: f64,

    /// Number of menu items per tab id. Counts must be >= 0.
    #[serde(default = "default_tab_item_counts")]
    pub tab_item_counts: BTreeMap<String, i64>,

    /// Cancel the outstanding call when a new one is issued.
    #[serde(default)]
    pub cancel_stale_calls: bool,
}

fn default_delay_ms() -> i64 {
    1500
}

fn default_failure_probability() -> f64 {
    0.2
}

fn default_tab_item_counts() -> BTreeMap<String, i64> {
    [("tab1", 3), ("tab2", 4), ("tab3", 2), ("tab4", 5)]
        .into_iter()
        .map(|(id, count)| (id.to_string(), count))
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulated_delay_ms: default_delay_ms(),
            failure_probability: default_failure_probability(),
            tab_item_counts: default_tab_item_counts(),
            cancel_stale_calls: false,
        }
    }
}

/// Validated, immutable settings derived from a [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub simulated_delay: Duration,
    pub failure_probability: f64,
    /// Tabs ordered by menu number.
    pub tabs: Vec<TabDescriptor>,
    pub cancel_stale_calls: bool,
}

impl Settings {
    pub fn delay_ms(&self) -> u64 {
        self.simulated_delay.as_millis() as u64
    }
}

impl Config {
    /// Load configuration from the default location. A missing file yields
    /// `Config::default()`; an unreadable or malformed file is an error.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path. Returns `Config::default()`
    /// if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Return the path to the default config file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let dirs =
            directories::ProjectDirs::from("", "", "tabmenu").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.json"))
    }

    /// Check every value and build the [`Settings`] the app runs with.
    pub fn validate(&self) -> Result<Settings, ConfigError> {
        if self.simulated_delay_ms <= 0 {
            return Err(ConfigError::NonPositiveDelay(self.simulated_delay_ms));
        }
        // Also rejects NaN
        if !(0.0..=1.0).contains(&self.failure_probability) {
            return Err(ConfigError::ProbabilityOutOfRange(self.failure_probability));
        }

        let mut tabs = Vec::with_capacity(self.tab_item_counts.len());
        for (id, &count) in &self.tab_item_counts {
            let item_count = usize::try_from(count).map_err(|_| ConfigError::NegativeItemCount {
                tab: id.clone(),
                count,
            })?;
            let tab = TabDescriptor::new(id.as_str(), item_count)
                .ok_or_else(|| ConfigError::MissingTabNumber(id.clone()))?;
            tabs.push(tab);
        }

        tabs.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.id.cmp(&b.id)));
        if let Some(pair) = tabs.windows(2).find(|w| w[0].number == w[1].number) {
            return Err(ConfigError::DuplicateTabNumber {
                first: pair[0].id.clone(),
                second: pair[1].id.clone(),
                number: pair[0].number,
            });
        }

        Ok(Settings {
            simulated_delay: Duration::from_millis(self.simulated_delay_ms as u64),
            failure_probability: self.failure_probability,
            tabs,
            cancel_stale_calls: self.cancel_stale_calls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.simulated_delay_ms, 1500);
        assert_eq!(config.failure_probability, 0.2);
        assert_eq!(config.tab_item_counts.len(), 4);
        assert!(!config.cancel_stale_calls);
    }

    #[test]
    fn test_default_config_validates() {
        let settings = Config::default().validate().expect("defaults are valid");
        assert_eq!(settings.delay_ms(), 1500);

        let tabs: Vec<(&str, usize)> = settings
            .tabs
            .iter()
            .map(|t| (t.id.as_str(), t.item_count))
            .collect();
        assert_eq!(tabs, [("tab1", 3), ("tab2", 4), ("tab3", 2), ("tab4", 5)]);
    }

    #[test]
    fn test_deserialize_missing_fields_uses_defaults() {
        let config: Config = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config, Config::default());

        let config: Config =
            serde_json::from_str(r#"{"simulated_delay_ms": 10}"#).expect("deserialize");
        assert_eq!(config.simulated_delay_ms, 10);
        assert_eq!(config.failure_probability, 0.2);
    }

    #[test]
    fn test_deny_unknown_fields() {
        let json = r#"{"simulatedDelay": 1500}"#;
        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err(), "should reject unknown fields");
    }

    #[test]
    fn test_rejects_non_positive_delay() {
        for delay in [0, -1] {
            let config = Config {
                simulated_delay_ms: delay,
                ..Config::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::NonPositiveDelay(d)) if d == delay
            ));
        }
    }

    #[test]
    fn test_rejects_probability_out_of_range() {
        for p in [-0.01, 1.01, f64::NAN] {
            let config = Config {
                failure_probability: p,
                ..Config::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::ProbabilityOutOfRange(_))
            ));
        }
    }

    #[test]
    fn test_probability_bounds_are_inclusive() {
        for p in [0.0, 1.0] {
            let config = Config {
                failure_probability: p,
                ..Config::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_rejects_negative_item_count() {
        let mut config = Config::default();
        config.tab_item_counts.insert("tab2".to_string(), -1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeItemCount { ref tab, count: -1 }) if tab == "tab2"
        ));
    }

    #[test]
    fn test_zero_item_count_is_valid() {
        let mut config = Config::default();
        config.tab_item_counts.insert("tab5".to_string(), 0);
        let settings = config.validate().expect("zero items is valid");
        assert_eq!(settings.tabs.last().map(|t| t.item_count), Some(0));
    }

    #[test]
    fn test_rejects_tab_without_number() {
        let mut config = Config::default();
        config.tab_item_counts.insert("settings".to_string(), 2);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingTabNumber(ref id)) if id == "settings"
        ));
    }

    #[test]
    fn test_rejects_duplicate_tab_numbers() {
        let mut config = Config::default();
        config.tab_item_counts.insert("menu1".to_string(), 2);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateTabNumber { number: 1, .. })
        ));
    }

    #[test]
    fn test_leading_zero_suffix_collides_with_plain_number() {
        let mut config = Config::default();
        config.tab_item_counts.insert("tab01".to_string(), 2);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateTabNumber { number: 1, .. })
        ));

        config.tab_item_counts.remove("tab1");
        let settings = config.validate().expect("tab01 alone is valid");
        assert_eq!(settings.tabs[0].id, "tab01");
        assert_eq!(settings.tabs[0].suffix, "01");
    }

    #[test]
    fn test_tabs_sorted_numerically() {
        let config = Config {
            tab_item_counts: [("tab10", 1), ("tab2", 1), ("tab1", 1)]
                .into_iter()
                .map(|(id, n)| (id.to_string(), n))
                .collect(),
            ..Config::default()
        };
        let settings = config.validate().expect("valid");
        let ids: Vec<&str> = settings.tabs.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["tab1", "tab2", "tab10"]);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("config.json");
        fs::write(
            &config_path,
            r#"{"simulated_delay_ms": 250, "tab_item_counts": {"tab1": 1}}"#,
        )
        .expect("write");

        let loaded = Config::load_from(&config_path).expect("load_from");
        assert_eq!(loaded.simulated_delay_ms, 250);
        assert_eq!(loaded.tab_item_counts.len(), 1);
    }

    #[test]
    fn test_load_from_missing_file_returns_default() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("does_not_exist.json");

        let loaded = Config::load_from(&config_path).expect("load_from");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_load_from_malformed_file_is_error() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("config.json");
        fs::write(&config_path, "{ not json").expect("write");

        assert!(matches!(
            Config::load_from(&config_path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
