//! TOML-based host configuration.
//!
//! Holds settings for the environment that drives the controller, not the
//! user's session settings (those live in the key-value store):
//! - tick interval
//! - settings database file name
//! - default log filter
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{ConfigError, ValidationError};

/// Host configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Milliseconds between ticks. Each tick always counts as one second.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// SQLite file holding the settings, relative to the data directory.
    #[serde(default = "default_database_file")]
    pub database_file: String,
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_database_file() -> String {
    "tiktomato.db".into()
}
fn default_log_filter() -> String {
    "warn".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            database_file: default_database_file(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 3] = ["tick_interval_ms", "database_file", "log_filter"];

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "tick_interval_ms" => Some(self.tick_interval_ms.to_string()),
            "database_file" => Some(self.database_file.clone()),
            "log_filter" => Some(self.log_filter.clone()),
            _ => None,
        }
    }

    /// Set a config value by key. Does not persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        match key {
            "tick_interval_ms" => {
                let ms = value
                    .parse::<u64>()
                    .map_err(|_| ValidationError::invalid(key, format!("cannot parse '{value}' as number")))?;
                if ms == 0 {
                    return Err(ValidationError::invalid(key, "must be greater than 0"));
                }
                self.tick_interval_ms = ms;
            }
            "database_file" => {
                if value.trim().is_empty() {
                    return Err(ValidationError::invalid(key, "must not be empty"));
                }
                self.database_file = value.to_string();
            }
            "log_filter" => self.log_filter = value.to_string(),
            _ => return Err(ValidationError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}
