//! CLI command implementations for Paddy.

pub(crate) mod console;
pub(crate) mod play;
pub(crate) mod simulate;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;

/// Output format for the `simulate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SimulateFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<paddy::SetupError> for CliError {
    fn from(e: paddy::SetupError) -> Self {
        Self::new(format!("Invalid board: {e}"))
    }
}

impl From<paddy::config::ConfigError> for CliError {
    fn from(e: paddy::config::ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<paddy::persist::PersistError> for CliError {
    fn from(e: paddy::persist::PersistError) -> Self {
        Self::new(format!("Failed to load game: {e}"))
    }
}

impl From<paddy::session::InputError> for CliError {
    fn from(e: paddy::session::InputError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<paddy::session::SessionError> for CliError {
    fn from(e: paddy::session::SessionError) -> Self {
        Self::new(e.to_string())
    }
}
