//! Session configuration.
//!
//! Everything here is optional: a missing file or field falls back to the
//! defaults, and command-line flags override whatever the file says. Board
//! size is the only rule knob.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default snapshot file.
pub const DEFAULT_SAVE_PATH: &str = "game.save";

/// Default history export file.
pub const DEFAULT_EXPORT_PATH: &str = "history.csv";

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    Io(io::Error),
    /// Failed to parse the JSON content.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config file: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config JSON: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Settings for an interactive session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Board edge length. When unset the player is asked.
    pub board_size: Option<usize>,
    /// Where `save` writes the snapshot and `--load` reads it.
    pub save_path: PathBuf,
    /// Where the history table is exported.
    pub export_path: PathBuf,
    /// Seed for the opponent. When unset one is drawn from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board_size: None,
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Load configuration from a JSON file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if the content is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the string is not valid JSON.
    pub fn parse(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
