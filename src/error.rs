//! Error types for the game rules.

use std::fmt;

use crate::game::{Cell, Coord, Resources, Target};

/// Largest board edge accepted when creating or restoring a game.
pub const MAX_BOARD_SIZE: usize = 64;

/// Reasons a new game cannot be set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    /// Board size must be at least 1.
    EmptyBoard,
    /// Board size exceeds [`MAX_BOARD_SIZE`].
    BoardTooLarge(usize),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::EmptyBoard => write!(f, "board size must be greater than zero"),
            SetupError::BoardTooLarge(size) => {
                write!(f, "board size {size} exceeds the maximum of {MAX_BOARD_SIZE}")
            }
        }
    }
}

impl std::error::Error for SetupError {}

/// A capture attempt that was rejected. No state was changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureError {
    /// Coordinates fall outside the board.
    OutOfBounds {
        /// The requested coordinates.
        target: Target,
        /// Board edge length.
        size: usize,
    },
    /// The cell is empty or already owned.
    NotCapturable {
        /// The requested cell.
        coord: Coord,
        /// What the cell holds.
        cell: Cell,
    },
    /// The side has fewer farmers than the cell costs.
    NotEnoughFarmers {
        /// The requested cell.
        coord: Coord,
        /// Farmers the cell costs.
        cost: u32,
        /// Farmers the side has.
        available: u32,
    },
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::OutOfBounds { target, size } => {
                write!(f, "coordinates {target} are outside the {size}x{size} board")
            }
            CaptureError::NotCapturable { coord, cell } => {
                write!(f, "cell {coord} cannot be captured ({cell})")
            }
            CaptureError::NotEnoughFarmers {
                coord,
                cost,
                available,
            } => write!(
                f,
                "cell {coord} needs {cost} farmers, only {available} available"
            ),
        }
    }
}

impl std::error::Error for CaptureError {}

/// An action whose precondition failed. No state was changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    /// Irrigating needs at least one unit of water.
    NotEnoughWater,
    /// Recruiting needs rice, water and an existing farmer all at once.
    CannotRecruit {
        /// Resources held when the attempt was made.
        held: Resources,
    },
    /// The capture rule rejected the target.
    Capture(CaptureError),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::NotEnoughWater => write!(f, "not enough water to irrigate"),
            ActionError::CannotRecruit { held } => write!(
                f,
                "not enough resources or farmers to recruit (have {held})"
            ),
            ActionError::Capture(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ActionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ActionError::Capture(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CaptureError> for ActionError {
    fn from(e: CaptureError) -> Self {
        ActionError::Capture(e)
    }
}
