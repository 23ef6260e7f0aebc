//! Board, cell and coordinate types.

use std::fmt;

use crate::error::{SetupError, MAX_BOARD_SIZE};
use crate::game::Side;

/// Farmers needed to capture each cell of a fresh board.
pub const STARTING_CELL_COST: u32 = 2;

/// A position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    /// Row index.
    pub x: usize,
    /// Column index.
    pub y: usize,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Coordinates as entered by a participant. May point anywhere, including
/// off the board on either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    /// Row index.
    pub x: i64,
    /// Column index.
    pub y: i64,
}

impl Target {
    /// Create a new target.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The board coordinate this target names, if it lies on a
    /// `size`×`size` board.
    #[must_use]
    pub fn on_board(self, size: usize) -> Option<Coord> {
        let x = usize::try_from(self.x).ok().filter(|&x| x < size)?;
        let y = usize::try_from(self.y).ok().filter(|&y| y < size)?;
        Some(Coord::new(x, y))
    }
}

impl From<Coord> for Target {
    fn from(coord: Coord) -> Self {
        Self {
            x: i64::try_from(coord.x).unwrap_or(i64::MAX),
            y: i64::try_from(coord.y).unwrap_or(i64::MAX),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Contents of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Free land nobody can claim.
    Empty,
    /// Unclaimed territory costing this many farmers to capture.
    Unclaimed(u32),
    /// Territory owned by a side.
    Owned(Side),
}

impl Cell {
    /// Integer marker: `0` empty, positive cost, `-1` player, `-2` agent.
    #[must_use]
    pub fn to_marker(self) -> i32 {
        match self {
            Cell::Empty => 0,
            Cell::Unclaimed(cost) => i32::try_from(cost).unwrap_or(i32::MAX),
            Cell::Owned(side) => side.marker(),
        }
    }

    /// Decode an integer marker. Returns `None` for negative values other
    /// than the two ownership markers.
    #[must_use]
    pub fn from_marker(marker: i32) -> Option<Cell> {
        match marker {
            0 => Some(Cell::Empty),
            m if m > 0 => u32::try_from(m).ok().map(Cell::Unclaimed),
            m => Side::from_marker(m).map(Cell::Owned),
        }
    }

    /// Farmers needed to capture this cell, if it can be captured at all.
    #[must_use]
    pub const fn capture_cost(self) -> Option<u32> {
        match self {
            Cell::Unclaimed(cost) if cost > 0 => Some(cost),
            _ => None,
        }
    }

    /// Owner of the cell, if any.
    #[must_use]
    pub const fn owner(self) -> Option<Side> {
        match self {
            Cell::Owned(side) => Some(side),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => write!(f, "empty"),
            Cell::Unclaimed(cost) => write!(f, "unclaimed, cost {cost}"),
            Cell::Owned(side) => write!(f, "owned by {side}"),
        }
    }
}

/// Square game board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Edge length.
    size: usize,
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
}

impl Board {
    /// Create a fresh board: every cell costs [`STARTING_CELL_COST`], the
    /// player's home is the bottom-right corner and the agent's home the
    /// top-left one.
    ///
    /// On a 1×1 board both homes are the same cell; the agent's is placed
    /// last and wins.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero or above [`MAX_BOARD_SIZE`].
    pub fn new(size: usize) -> Result<Self, SetupError> {
        Self::check_size(size)?;

        let mut board = Self {
            size,
            cells: vec![Cell::Unclaimed(STARTING_CELL_COST); size * size],
        };
        board.set(Self::home_of(size, Side::Player), Cell::Owned(Side::Player));
        board.set(Self::home_of(size, Side::Agent), Cell::Owned(Side::Agent));

        Ok(board)
    }

    /// Rebuild a board from row-major cells.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is invalid. Returns `Ok(None)` if the cell
    /// count does not match `size * size`.
    pub fn from_cells(size: usize, cells: Vec<Cell>) -> Result<Option<Self>, SetupError> {
        Self::check_size(size)?;
        if cells.len() != size * size {
            return Ok(None);
        }
        Ok(Some(Self { size, cells }))
    }

    fn check_size(size: usize) -> Result<(), SetupError> {
        if size == 0 {
            return Err(SetupError::EmptyBoard);
        }
        if size > MAX_BOARD_SIZE {
            return Err(SetupError::BoardTooLarge(size));
        }
        Ok(())
    }

    const fn home_of(size: usize, side: Side) -> Coord {
        match side {
            Side::Player => Coord::new(size - 1, size - 1),
            Side::Agent => Coord::new(0, 0),
        }
    }

    /// Edge length.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (N²).
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Home corner of a side.
    #[must_use]
    pub const fn home(&self, side: Side) -> Coord {
        Self::home_of(self.size, side)
    }

    /// Check if a coordinate is on the board.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.size && coord.y < self.size
    }

    fn index_of(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(coord.x * self.size + coord.y)
        } else {
            None
        }
    }

    /// Cell at the given coordinate.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index_of(coord).map(|idx| self.cells[idx])
    }

    /// Overwrite a cell.
    ///
    /// Returns `false` if the coordinate is out of bounds.
    pub fn set(&mut self, coord: Coord, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(coord) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Raw cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over one row of cells.
    pub fn row(&self, x: usize) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .chunks(self.size)
            .nth(x)
            .into_iter()
            .flatten()
            .copied()
    }

    /// Number of cells owned by a side.
    #[must_use]
    pub fn count_owned(&self, side: Side) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.owner() == Some(side))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_creation() {
        let board = Board::new(5).unwrap();
        assert_eq!(board.size(), 5);
        assert_eq!(board.cell_count(), 25);
        assert_eq!(board.get(Coord::new(4, 4)), Some(Cell::Owned(Side::Player)));
        assert_eq!(board.get(Coord::new(0, 0)), Some(Cell::Owned(Side::Agent)));
        assert_eq!(
            board.get(Coord::new(2, 3)),
            Some(Cell::Unclaimed(STARTING_CELL_COST))
        );
        assert_eq!(board.count_owned(Side::Player), 1);
        assert_eq!(board.count_owned(Side::Agent), 1);
    }

    #[test]
    fn test_board_single_cell() {
        let board = Board::new(1).unwrap();
        assert_eq!(board.get(Coord::new(0, 0)), Some(Cell::Owned(Side::Agent)));
        assert_eq!(board.count_owned(Side::Player), 0);
    }

    #[test]
    fn test_board_invalid_size() {
        assert_eq!(Board::new(0), Err(SetupError::EmptyBoard));
        assert_eq!(
            Board::new(MAX_BOARD_SIZE + 1),
            Err(SetupError::BoardTooLarge(MAX_BOARD_SIZE + 1))
        );
    }

    #[test]
    fn test_board_bounds() {
        let board = Board::new(3).unwrap();
        assert!(board.in_bounds(Coord::new(2, 2)));
        assert!(!board.in_bounds(Coord::new(3, 0)));
        assert!(!board.in_bounds(Coord::new(0, 3)));
        assert_eq!(board.get(Coord::new(3, 3)), None);
    }

    #[test]
    fn test_board_set_is_row_major() {
        let mut board = Board::new(3).unwrap();
        assert!(board.set(Coord::new(1, 2), Cell::Empty));
        assert_eq!(board.cells()[5], Cell::Empty);
        assert!(!board.set(Coord::new(5, 5), Cell::Empty));

        let row: Vec<_> = board.row(1).collect();
        assert_eq!(row.len(), 3);
        assert_eq!(row[2], Cell::Empty);
    }

    #[test]
    fn test_from_cells_rejects_wrong_length() {
        let cells = vec![Cell::Empty; 5];
        assert_eq!(Board::from_cells(2, cells), Ok(None));
    }

    #[test]
    fn test_cell_markers() {
        assert_eq!(Cell::from_marker(0), Some(Cell::Empty));
        assert_eq!(Cell::from_marker(4), Some(Cell::Unclaimed(4)));
        assert_eq!(Cell::from_marker(-1), Some(Cell::Owned(Side::Player)));
        assert_eq!(Cell::from_marker(-2), Some(Cell::Owned(Side::Agent)));
        assert_eq!(Cell::from_marker(-7), None);
        assert_eq!(Cell::Unclaimed(3).to_marker(), 3);
        assert_eq!(Cell::Owned(Side::Agent).to_marker(), -2);
    }

    #[test]
    fn test_target_on_board() {
        assert_eq!(Target::new(1, 2).on_board(3), Some(Coord::new(1, 2)));
        assert_eq!(Target::new(-1, 0).on_board(3), None);
        assert_eq!(Target::new(0, 3).on_board(3), None);
        assert_eq!(Target::from(Coord::new(4, 0)), Target::new(4, 0));
        assert_eq!(Target::new(-1, 2).to_string(), "(-1, 2)");
    }

    #[test]
    fn test_capture_cost() {
        assert_eq!(Cell::Unclaimed(2).capture_cost(), Some(2));
        assert_eq!(Cell::Empty.capture_cost(), None);
        assert_eq!(Cell::Owned(Side::Player).capture_cost(), None);
    }
}
