// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Paddy: a turn-based rice-paddy territory game.
//!
//! A human player and a scripted opponent share an N×N board. Each round
//! both sides take one action (gather water, irrigate rice, recruit a
//! farmer, or spend farmers to capture a cell) and the first side holding
//! half the board wins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI (console frontend, simulate)  │
//! ├─────────────────────────────────────┤
//! │   Round controller (session)        │
//! ├──────────────┬──────────────────────┤
//! │  Game rules  │ Snapshots / export   │
//! └──────────────┴──────────────────────┘
//! ```
//!
//! The rules in [`game`] are written once and parameterised by [`Side`].
//! The opponent's randomness is injected through [`DecisionSource`], and
//! saving and exporting go through the [`SnapshotStore`] and
//! [`HistoryReporter`] traits.

pub mod agent;
pub mod config;
pub mod error;
pub mod game;
pub mod persist;
pub mod render;
pub mod report;
pub mod session;
pub mod simulate;

pub use agent::{DecisionSource, RandomAgent, ScriptedAgent};
pub use error::{ActionError, CaptureError, SetupError};

// Re-export key game types at crate root for convenience
pub use game::{
    Action, Board, Cell, Coord, GameState, Outcome, PerSide, Resources, Side, Target,
};
pub use persist::{FileStore, MemoryStore, SnapshotStore};
pub use report::{CsvReporter, HistoryReporter, MemoryReporter};
pub use session::{Frontend, Notice, PlayerChoice, RoundController};
