//! Application configuration.
//!
//! Read from a JSON file in the platform config directory. A missing file means
//! defaults; a malformed file is an error so a typo is not silently ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::platform;
use crate::types::errors::ConfigError;

/// Environment variable overriding [`AppConfig::database_path`].
pub const DATABASE_ENV: &str = "CINETRACK_DB";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,
    /// `tracing` filter directive used when neither `RUST_LOG` nor `-v` is given.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            log_filter: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the config at `path`, or the platform default path when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(platform::default_config_path);

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Applies `CINETRACK_DB` if set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(db) = std::env::var(DATABASE_ENV) {
            if !db.trim().is_empty() {
                self.database_path = Some(PathBuf::from(db));
            }
        }
        self
    }

    /// The database file to open.
    pub fn resolved_database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(platform::default_database_path)
    }
}
