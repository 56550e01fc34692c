//! User configuration read from `~/.music-overview/config.toml`.
//!
//! A missing file is not an error: every field has a default, so the app runs
//! out of the box and the file only needs the keys a user wants to change.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;
use serde::Deserialize;
use thiserror::Error;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".music-overview";
const CONFIG_FILE_NAME: &str = "config.toml";
/// Lower bound for the input poll interval. Anything faster just burns CPU.
const MIN_TICK_RATE_MS: u64 = 16;

/// Errors that may occur while locating or reading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not locate home directory")]
    NoHomeDir,
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Tracing filter used when `RUST_LOG` is not set, e.g. `info` or
    /// `music_overview=debug`.
    pub log_level: String,
    /// Start with a few demo songs instead of an empty table.
    pub seed_demo_library: bool,
    /// How long the event loop waits for input before redrawing.
    pub tick_rate_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            seed_demo_library: true,
            tick_rate_ms: 250,
        }
    }
}

impl AppConfig {
    /// Load the configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&data_dir()?.join(CONFIG_FILE_NAME))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(MIN_TICK_RATE_MS))
    }
}

/// Resolve the application data directory inside the user's home.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDir)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
