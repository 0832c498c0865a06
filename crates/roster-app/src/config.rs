//! Roster Configuration
//!
//! Where the durable slot lives and how the store is sized. Values come from an optional
//! JSON file, then `ROSTER_*` environment variables override them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const STORAGE_PATH_VAR: &str = "ROSTER_STORAGE_PATH";
pub const SLOT_KEY_VAR: &str = "ROSTER_SLOT_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid config file {}: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
}

/// Roster configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// File holding the durable slots (default: "roster-data.json")
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    /// Slot the user collection is stored under (default: "users")
    #[serde(default = "default_slot_key")]
    pub slot_key: String,

    /// Request channel capacity of the store actor (default: 32)
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("roster-data.json")
}

fn default_slot_key() -> String {
    "users".to_string()
}

fn default_channel_capacity() -> usize {
    32
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            slot_key: default_slot_key(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl RosterConfig {
    /// Reads `path` if given (a missing field takes its default), then applies the
    /// process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_overrides(|name| std::env::var(name).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.channel_capacity == 0 {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                reason: "channel_capacity must be at least 1".to_string(),
            });
        }
        Ok(config)
    }

    /// Applies `ROSTER_STORAGE_PATH` and `ROSTER_SLOT_KEY` as resolved by `lookup`.
    /// Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |name: &str| lookup(name).filter(|value: &String| !value.trim().is_empty());
        if let Some(path) = lookup(STORAGE_PATH_VAR) {
            self.storage_path = PathBuf::from(path);
        }
        if let Some(key) = lookup(SLOT_KEY_VAR) {
            self.slot_key = key;
        }
        self
    }
}
