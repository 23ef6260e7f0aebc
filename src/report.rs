//! History export.
//!
//! The exported table has one row per recorded round, 1-based, with both
//! sides' counters as they stood when the round began.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::game::{GameState, Side};
use crate::persist::write_atomic;

/// Header row of the exported table.
pub const HISTORY_HEADER: &str =
    "round,player_rice,player_water,player_farmers,agent_rice,agent_water,agent_farmers";

/// Errors from exporting history.
#[derive(Debug)]
pub enum ReportError {
    /// Writing the export failed.
    Io(io::Error),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for ReportError {
    fn from(e: io::Error) -> Self {
        ReportError::Io(e)
    }
}

/// Somewhere the round history can be exported to.
pub trait HistoryReporter {
    /// Export every recorded round of `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if the export could not be written.
    fn export_history(&mut self, state: &GameState) -> Result<(), ReportError>;
}

/// Render the history of both sides as CSV, header first.
#[must_use]
pub fn format_history_csv(state: &GameState) -> String {
    let player = state.history(Side::Player);
    let agent = state.history(Side::Agent);

    let mut out = String::from(HISTORY_HEADER);
    out.push('\n');
    for (idx, (p, a)) in player.iter().zip(agent).enumerate() {
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            idx + 1,
            p.rice,
            p.water,
            p.farmers,
            a.rice,
            a.water,
            a.farmers
        ));
    }
    out
}

/// Reporter writing CSV to a file.
#[derive(Debug, Clone)]
pub struct CsvReporter {
    path: PathBuf,
}

impl CsvReporter {
    /// Create a reporter writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the export file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryReporter for CsvReporter {
    fn export_history(&mut self, state: &GameState) -> Result<(), ReportError> {
        write_atomic(&self.path, &format_history_csv(state))?;
        info!(
            path = %self.path.display(),
            rounds = state.rounds_recorded(),
            "history exported"
        );
        Ok(())
    }
}

/// Reporter keeping every rendered export in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    /// Rendered exports, oldest first.
    pub exports: Vec<String>,
}

impl MemoryReporter {
    /// Create an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryReporter for MemoryReporter {
    fn export_history(&mut self, state: &GameState) -> Result<(), ReportError> {
        self.exports.push(format_history_csv(state));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_is_header_only() {
        let state = GameState::new(3).unwrap();
        assert_eq!(format_history_csv(&state), format!("{HISTORY_HEADER}\n"));
    }

    #[test]
    fn test_rows_are_one_based() {
        let mut state = GameState::new(3).unwrap();
        state.record_round();
        state.resources[Side::Agent].rice = 42;
        state.record_round();

        let csv = format_history_csv(&state);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HISTORY_HEADER);
        assert_eq!(lines[1], "1,10,10,3,10,10,3");
        assert_eq!(lines[2], "2,10,10,3,42,10,3");
    }

    #[test]
    fn test_memory_reporter_collects() {
        let state = GameState::new(2).unwrap();
        let mut reporter = MemoryReporter::new();
        reporter.export_history(&state).unwrap();
        reporter.export_history(&state).unwrap();
        assert_eq!(reporter.exports.len(), 2);
    }
}
