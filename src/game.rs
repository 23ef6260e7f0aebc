//! Game layer for Paddy.
//!
//! Implements the rules shared by both sides:
//! - Board of capturable cells with a home corner per side
//! - Rice, water and farmer stockpiles
//! - Actions (gather, irrigate, capture, recruit)
//! - Territory capture and the majority victory check

mod actions;
mod board;
mod invariants;
mod side;
mod state;
mod territory;
mod victory;

pub use actions::{
    apply_action, Action, ActionEffect, IRRIGATE_WATER_COST, RECRUIT_MIN_FARMERS,
    RECRUIT_RICE_COST, RECRUIT_WATER_COST, RICE_PER_IRRIGATE, WATER_PER_GATHER,
};
pub use board::{Board, Cell, Coord, Target, STARTING_CELL_COST};
pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use side::{PerSide, Side};
pub use state::{GameState, Resources};
pub use territory::{capture, Capture};
pub use victory::{evaluate, win_threshold, Outcome};
