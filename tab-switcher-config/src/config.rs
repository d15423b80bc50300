//! Tab switcher configuration management.
//!
//! Covers:
//! - `load` / `save` (YAML file I/O with atomic write)
//! - XDG-compliant path helpers (`config_path`, `config_dir`)
//!
//! The strategy identifier is stored as a plain string. It is resolved by the
//! policy registry at startup, which falls back to the default policy when the
//! value is unknown, so a hand-edited or garbled value never prevents loading.

use crate::error::ConfigError;
use crate::types::LogLevel;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Identifier of the policy used when the config does not name one.
pub const DEFAULT_TAB_SWITCH_STRATEGY: &str = "visual_order";

fn default_tab_switch_strategy() -> String {
    DEFAULT_TAB_SWITCH_STRATEGY.to_string()
}

/// Persisted settings consumed by the tab switching core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Identifier of the ordering policy used for next/previous document.
    #[serde(default = "default_tab_switch_strategy")]
    pub tab_switch_strategy: String,

    /// Verbosity of the debug log file.
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_switch_strategy: default_tab_switch_strategy(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            log::info!("Loading existing config from {:?}", config_path);
            Ok(Self::load_from(&config_path)?)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save() {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            log::info!("Default config created successfully");
            Ok(config)
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(contents).map_err(ConfigError::Parse)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())?;
        Ok(())
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::Serialize)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = config_path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, config_path)?;

        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("tab-switcher")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // ~/.config/tab-switcher on all unix-likes, including macOS
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("tab-switcher")
            } else {
                PathBuf::from(".")
            }
        }
    }
}
