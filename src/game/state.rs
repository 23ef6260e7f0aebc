//! Game state management.

use std::fmt;

use crate::error::SetupError;
use crate::game::{Board, PerSide, Side};

/// Stockpiles held by one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Resources {
    /// Rice, produced by irrigating.
    pub rice: u32,
    /// Water, gathered and spent on irrigation and recruiting.
    pub water: u32,
    /// Farmers, spent on capturing cells.
    pub farmers: u32,
}

impl Resources {
    /// What each side holds at the start of a game.
    pub const STARTING: Resources = Resources::new(10, 10, 3);

    /// Create a resource record.
    #[must_use]
    pub const fn new(rice: u32, water: u32, farmers: u32) -> Self {
        Self {
            rice,
            water,
            farmers,
        }
    }
}

impl fmt::Display for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rice {}, water {}, farmers {}",
            self.rice, self.water, self.farmers
        )
    }
}

/// Complete game state.
///
/// Fields are public so rules and tests can inspect them directly; mutation
/// should go through [`apply_action`](crate::game::apply_action) and
/// [`capture`](crate::game::capture) to keep the invariants intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// The grid.
    pub board: Board,
    /// Current stockpiles per side.
    pub resources: PerSide<Resources>,
    /// Number of cells each side has captured, home included.
    pub territories: PerSide<u32>,
    /// Resources at the start of every recorded round.
    history: PerSide<Vec<Resources>>,
}

impl GameState {
    /// Create a fresh game on an `size`×`size` board.
    ///
    /// # Errors
    ///
    /// Returns an error if the board size is zero or too large.
    pub fn new(size: usize) -> Result<Self, SetupError> {
        Ok(Self {
            board: Board::new(size)?,
            resources: PerSide::splat(Resources::STARTING),
            territories: PerSide::splat(1),
            history: PerSide::default(),
        })
    }

    /// Reassemble a state from its parts, as read back from a snapshot.
    pub(crate) fn from_parts(
        board: Board,
        resources: PerSide<Resources>,
        territories: PerSide<u32>,
        history: PerSide<Vec<Resources>>,
    ) -> Self {
        Self {
            board,
            resources,
            territories,
            history,
        }
    }

    /// Append the current resources of both sides to their histories.
    pub fn record_round(&mut self) {
        for side in Side::ALL {
            let current = self.resources[side];
            self.history[side].push(current);
        }
    }

    /// Number of rounds recorded so far.
    #[must_use]
    pub fn rounds_recorded(&self) -> usize {
        self.history[Side::Player].len()
    }

    /// Recorded history of one side, oldest first.
    #[must_use]
    pub fn history(&self, side: Side) -> &[Resources] {
        &self.history[side]
    }

    /// Board edge length.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.board.size()
    }

    /// Total number of cells (N²).
    #[must_use]
    pub const fn total_cells(&self) -> usize {
        self.board.cell_count()
    }
}
