//! Territory capture, shared by both sides.

use tracing::info;

use crate::error::CaptureError;
use crate::game::{Cell, Coord, GameState, Side};

/// A successful capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    /// Side that took the cell.
    pub side: Side,
    /// The captured cell.
    pub coord: Coord,
    /// Farmers spent.
    pub cost: u32,
}

/// Capture the cell at `coord` for `side`.
///
/// The cell must hold an unclaimed cost `k` and the side needs at least `k`
/// farmers. On success the farmers are spent, the side's territory count
/// goes up by one and the cell is marked as owned.
///
/// # Errors
///
/// Returns an error without touching the state if the coordinates are off
/// the board, the cell is empty or owned, or the side has too few farmers.
pub fn capture(state: &mut GameState, side: Side, coord: Coord) -> Result<Capture, CaptureError> {
    let size = state.size();
    let cell = state
        .board
        .get(coord)
        .ok_or(CaptureError::OutOfBounds {
            target: coord.into(),
            size,
        })?;
    let cost = cell
        .capture_cost()
        .ok_or(CaptureError::NotCapturable { coord, cell })?;

    let available = state.resources[side].farmers;
    if available < cost {
        return Err(CaptureError::NotEnoughFarmers {
            coord,
            cost,
            available,
        });
    }

    state.resources[side].farmers = available - cost;
    state.territories[side] += 1;
    state.board.set(coord, Cell::Owned(side));

    info!(%side, %coord, cost, "cell captured");
    Ok(Capture { side, coord, cost })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Target;

    #[test]
    fn test_capture_success() {
        let mut state = GameState::new(5).unwrap();
        state.resources[Side::Player].farmers = 5;
        state.board.set(Coord::new(2, 2), Cell::Unclaimed(3));

        let result = capture(&mut state, Side::Player, Coord::new(2, 2)).unwrap();

        assert_eq!(result.cost, 3);
        assert_eq!(state.resources[Side::Player].farmers, 2);
        assert_eq!(state.territories[Side::Player], 2);
        assert_eq!(
            state.board.get(Coord::new(2, 2)),
            Some(Cell::Owned(Side::Player))
        );
    }

    #[test]
    fn test_capture_out_of_bounds() {
        let mut state = GameState::new(3).unwrap();
        let before = state.clone();

        let err = capture(&mut state, Side::Player, Coord::new(3, 0)).unwrap_err();

        assert_eq!(
            err,
            CaptureError::OutOfBounds {
                target: Target::new(3, 0),
                size: 3
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_capture_owned_cell_rejected() {
        let mut state = GameState::new(3).unwrap();
        let before = state.clone();

        let err = capture(&mut state, Side::Player, Coord::new(0, 0)).unwrap_err();

        assert!(matches!(err, CaptureError::NotCapturable { .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_capture_empty_cell_rejected() {
        let mut state = GameState::new(3).unwrap();
        state.board.set(Coord::new(1, 1), Cell::Empty);
        let before = state.clone();

        let err = capture(&mut state, Side::Agent, Coord::new(1, 1)).unwrap_err();

        assert_eq!(
            err,
            CaptureError::NotCapturable {
                coord: Coord::new(1, 1),
                cell: Cell::Empty
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_capture_not_enough_farmers() {
        let mut state = GameState::new(3).unwrap();
        state.resources[Side::Agent].farmers = 1;
        let before = state.clone();

        let err = capture(&mut state, Side::Agent, Coord::new(1, 1)).unwrap_err();

        assert!(matches!(
            err,
            CaptureError::NotEnoughFarmers {
                cost: 2,
                available: 1,
                ..
            }
        ));
        assert_eq!(state, before);
    }
}
