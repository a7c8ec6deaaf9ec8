//! Configuration settings and validation.

use crate::tree::filter::build_glob_set;
use crate::tree::TreeOptions;
use crate::watcher::DEFAULT_DEBOUNCE;
use crate::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Longest debounce accepted for the watcher.
const MAX_DEBOUNCE: Duration = Duration::from_secs(60);

/// Main configuration for a treeview run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory to scan.
    pub root: PathBuf,

    /// Tree building options.
    pub tree: TreeOptions,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON.
    pub log_json: bool,

    /// Debounce applied to filesystem events in watch mode.
    pub debounce: Duration,

    /// Keep running and follow filesystem changes.
    pub watch: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            tree: TreeOptions::default(),
            log_level: "warn".to_string(),
            log_json: false,
            debounce: DEFAULT_DEBOUNCE,
            watch: false,
        }
    }
}

impl Config {
    /// Create a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(Error::config("root path cannot be empty"));
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "invalid log level '{}', must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            )));
        }

        if self.debounce.is_zero() {
            return Err(Error::config("debounce cannot be 0"));
        }

        if self.debounce > MAX_DEBOUNCE {
            return Err(Error::config("debounce cannot exceed 60 seconds"));
        }

        let empty_entry = |list: &[PathBuf]| list.iter().any(|p| p.as_os_str().is_empty());
        if empty_entry(&self.tree.include) || empty_entry(&self.tree.exclude) {
            return Err(Error::config("include and exclude entries cannot be empty"));
        }

        build_glob_set(&self.tree.glob)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.debounce, Duration::from_millis(100));
        assert!(!config.watch);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_root() {
        let config = Config {
            root: PathBuf::new(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("root"));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let config = Config {
            log_level: "invalid".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log level"));
    }

    #[test]
    fn test_validate_debounce_bounds() {
        let zero = Config {
            debounce: Duration::ZERO,
            ..Default::default()
        };
        assert!(zero.validate().unwrap_err().to_string().contains("debounce"));

        let long = Config {
            debounce: Duration::from_secs(61),
            ..Default::default()
        };
        assert!(long.validate().unwrap_err().to_string().contains("60"));
    }

    #[test]
    fn test_validate_bad_glob() {
        let config = Config {
            tree: TreeOptions {
                glob: vec!["{a".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("glob"));
    }

    #[test]
    fn test_validate_empty_exclude_entry() {
        let config = Config {
            tree: TreeOptions {
                exclude: vec![PathBuf::new()],
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level_case_insensitive() {
        for level in ["TRACE", "Debug", "INFO", "Warn", "ERROR"] {
            let config = Config {
                log_level: level.to_string(),
                ..Default::default()
            };
            assert!(
                config.validate().is_ok(),
                "Level '{level}' should be valid (case insensitive)"
            );
        }
    }
}
