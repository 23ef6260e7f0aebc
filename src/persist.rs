//! Session snapshots for save/load.
//!
//! A snapshot is an explicit, versioned JSON document rather than a dump of
//! the in-memory types, so saves stay readable across releases. Unknown
//! fields are ignored and optional ones default, which keeps additive
//! changes backward compatible; a snapshot from a newer version is refused.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::game::{check_invariants, Board, Cell, GameState, PerSide, Resources, Side};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors from persistence operations.
#[derive(Debug)]
pub enum PersistError {
    /// Reading or writing the file failed.
    Io(io::Error),
    /// The file is not a valid snapshot document.
    Format(serde_json::Error),
    /// The snapshot was written by a newer version.
    UnsupportedVersion {
        /// Version found in the file.
        found: u32,
    },
    /// The document parsed but describes an impossible game.
    Corrupt(String),
    /// Nothing has been saved yet.
    NoSnapshot,
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "IO error: {e}"),
            PersistError::Format(e) => write!(f, "invalid snapshot: {e}"),
            PersistError::UnsupportedVersion { found } => write!(
                f,
                "snapshot version {found} is newer than supported version {SNAPSHOT_VERSION}"
            ),
            PersistError::Corrupt(msg) => write!(f, "corrupt snapshot: {msg}"),
            PersistError::NoSnapshot => write!(f, "no saved game found"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            PersistError::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        PersistError::Io(e)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::Format(e)
    }
}

/// Resource counters as stored in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcesRecord {
    /// Rice.
    pub rice: u32,
    /// Water.
    pub water: u32,
    /// Farmers.
    pub farmers: u32,
}

impl From<Resources> for ResourcesRecord {
    fn from(r: Resources) -> Self {
        Self {
            rice: r.rice,
            water: r.water,
            farmers: r.farmers,
        }
    }
}

impl From<ResourcesRecord> for Resources {
    fn from(r: ResourcesRecord) -> Self {
        Resources::new(r.rice, r.water, r.farmers)
    }
}

/// Everything stored for one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideRecord {
    /// Rice.
    pub rice: u32,
    /// Water.
    pub water: u32,
    /// Farmers.
    pub farmers: u32,
    /// Captured cells, home included.
    pub territories: u32,
    /// Resources at the start of every recorded round.
    #[serde(default)]
    pub history: Vec<ResourcesRecord>,
}

impl SideRecord {
    fn of(state: &GameState, side: Side) -> Self {
        let held = state.resources[side];
        Self {
            rice: held.rice,
            water: held.water,
            farmers: held.farmers,
            territories: state.territories[side],
            history: state.history(side).iter().copied().map(Into::into).collect(),
        }
    }

    fn resources(&self) -> Resources {
        Resources::new(self.rice, self.water, self.farmers)
    }

    fn history(&self) -> Vec<Resources> {
        self.history.iter().copied().map(Into::into).collect()
    }
}

/// Serialized form of a [`GameState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Format version, see [`SNAPSHOT_VERSION`].
    pub version: u32,
    /// Board edge length.
    pub board_size: usize,
    /// Cell markers in row-major order: `0` empty, positive cost, `-1`
    /// player, `-2` agent.
    pub cells: Vec<i32>,
    /// The human side.
    pub player: SideRecord,
    /// The scripted side.
    pub agent: SideRecord,
}

impl Snapshot {
    /// Capture the full state of a game.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            board_size: state.size(),
            cells: state.board.cells().iter().copied().map(Cell::to_marker).collect(),
            player: SideRecord::of(state, Side::Player),
            agent: SideRecord::of(state, Side::Agent),
        }
    }

    /// Rebuild the game this snapshot describes.
    ///
    /// # Errors
    ///
    /// Returns an error if the version is newer than this build understands
    /// or the contents do not describe a consistent game.
    pub fn restore(&self) -> Result<GameState, PersistError> {
        if self.version > SNAPSHOT_VERSION {
            return Err(PersistError::UnsupportedVersion {
                found: self.version,
            });
        }

        let cells = self
            .cells
            .iter()
            .map(|&marker| {
                Cell::from_marker(marker)
                    .ok_or_else(|| PersistError::Corrupt(format!("invalid cell marker {marker}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let cell_count = cells.len();
        let board = Board::from_cells(self.board_size, cells)
            .map_err(|e| PersistError::Corrupt(e.to_string()))?
            .ok_or_else(|| {
                PersistError::Corrupt(format!(
                    "{cell_count} cells do not fill a {0}x{0} board",
                    self.board_size
                ))
            })?;

        let state = GameState::from_parts(
            board,
            PerSide::new(self.player.resources(), self.agent.resources()),
            PerSide::new(self.player.territories, self.agent.territories),
            PerSide::new(self.player.history(), self.agent.history()),
        );

        if let Some(violation) = check_invariants(&state).into_iter().next() {
            return Err(PersistError::Corrupt(violation.message));
        }
        Ok(state)
    }

    /// Encode as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a snapshot document.
    pub fn from_json(text: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Somewhere a session can be saved to and loaded from.
pub trait SnapshotStore {
    /// Persist the full game state.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot could not be written. The previous
    /// snapshot, if any, is left in place.
    fn save(&mut self, state: &GameState) -> Result<(), PersistError>;

    /// Load the most recently saved game.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing was saved or the snapshot is unreadable.
    fn load(&self) -> Result<GameState, PersistError>;
}

/// Write `contents` to `path` through a sibling temporary file, so readers
/// see either the old file or the complete new one.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    let tmp = path.with_file_name(name);

    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })
}

/// Snapshot store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn save(&mut self, state: &GameState) -> Result<(), PersistError> {
        let json = Snapshot::capture(state).to_json()?;
        write_atomic(&self.path, &json)?;
        info!(path = %self.path.display(), "game saved");
        Ok(())
    }

    fn load(&self) -> Result<GameState, PersistError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(PersistError::NoSnapshot),
            Err(e) => return Err(e.into()),
        };
        let state = Snapshot::from_json(&text)?.restore()?;
        info!(path = %self.path.display(), rounds = state.rounds_recorded(), "game loaded");
        Ok(state)
    }
}

/// Snapshot store that keeps the encoded snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    encoded: Option<String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoded JSON of the last save, if any.
    #[must_use]
    pub fn encoded(&self) -> Option<&str> {
        self.encoded.as_deref()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, state: &GameState) -> Result<(), PersistError> {
        self.encoded = Some(Snapshot::capture(state).to_json()?);
        debug!("game saved to memory");
        Ok(())
    }

    fn load(&self) -> Result<GameState, PersistError> {
        let text = self.encoded.as_deref().ok_or(PersistError::NoSnapshot)?;
        Snapshot::from_json(text)?.restore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{apply_action, Action, Coord};

    fn played_state() -> GameState {
        let mut state = GameState::new(4).unwrap();
        state.record_round();
        apply_action(&mut state, Side::Player, Action::Capture(Coord::new(2, 2))).unwrap();
        apply_action(&mut state, Side::Agent, Action::Irrigate).unwrap();
        state.record_round();
        state.board.set(Coord::new(1, 3), Cell::Empty);
        state
    }

    #[test]
    fn test_snapshot_restores_state() {
        let state = played_state();
        let snapshot = Snapshot::capture(&state);
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.cells.len(), 16);
        assert_eq!(snapshot.restore().unwrap(), state);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(matches!(store.load(), Err(PersistError::NoSnapshot)));

        let state = played_state();
        store.save(&state).unwrap();
        assert!(store.encoded().unwrap().contains("\"board_size\": 4"));
        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn test_newer_version_rejected() {
        let mut snapshot = Snapshot::capture(&played_state());
        snapshot.version = SNAPSHOT_VERSION + 1;
        assert!(matches!(
            snapshot.restore(),
            Err(PersistError::UnsupportedVersion { found: 2 })
        ));
    }

    #[test]
    fn test_invalid_marker_rejected() {
        let mut snapshot = Snapshot::capture(&played_state());
        snapshot.cells[5] = -9;
        let err = snapshot.restore().unwrap_err();
        assert!(err.to_string().contains("invalid cell marker -9"));
    }

    #[test]
    fn test_wrong_cell_count_rejected() {
        let mut snapshot = Snapshot::capture(&played_state());
        snapshot.cells.pop();
        assert!(matches!(snapshot.restore(), Err(PersistError::Corrupt(_))));
    }

    #[test]
    fn test_inconsistent_counters_rejected() {
        let mut snapshot = Snapshot::capture(&played_state());
        snapshot.agent.territories = 5;
        assert!(matches!(snapshot.restore(), Err(PersistError::Corrupt(_))));
    }

    #[test]
    fn test_missing_history_and_unknown_fields() {
        let json = r#"{
            "version": 1,
            "board_size": 2,
            "cells": [-2, 2, 2, -1],
            "player": { "rice": 1, "water": 2, "farmers": 3, "territories": 1 },
            "agent": { "rice": 4, "water": 5, "farmers": 6, "territories": 1 },
            "saved_by": "someone"
        }"#;
        let state = Snapshot::from_json(json).unwrap().restore().unwrap();
        assert_eq!(state.resources[Side::Agent], Resources::new(4, 5, 6));
        assert_eq!(state.rounds_recorded(), 0);
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            Snapshot::from_json("not json"),
            Err(PersistError::Format(_))
        ));
    }
}
