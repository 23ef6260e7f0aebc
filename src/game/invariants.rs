//! Game invariants - sanity checks that detect bugs.
//!
//! Every rule validates before it writes, so these should never trigger.
//! If they do, a mutation skipped one of the rules in this module's parent.

use crate::game::{Cell, GameState, Side};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

fn violation(message: String) -> InvariantViolation {
    InvariantViolation { message }
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
///
/// The 1×1 board is exempt from the ownership checks: both territory
/// counters start at 1 while its single cell belongs to the agent.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let board = &state.board;

    if board.cells().len() != board.cell_count() {
        violations.push(violation(format!(
            "Board holds {} cells, expected {}",
            board.cells().len(),
            board.cell_count()
        )));
    }

    if board.size() >= 2 {
        for side in Side::ALL {
            let home = board.home(side);
            if board.get(home) != Some(Cell::Owned(side)) {
                violations.push(violation(format!("Home of {side} at {home} is not owned")));
            }

            let owned = board.count_owned(side);
            let counted = state.territories[side];
            if u32::try_from(owned).ok() != Some(counted) {
                violations.push(violation(format!(
                    "Territory counter of {side} is {counted} but {owned} cells are owned"
                )));
            }
        }

        let claimed = u64::from(state.territories[Side::Player])
            + u64::from(state.territories[Side::Agent]);
        let total = u64::try_from(board.cell_count()).unwrap_or(u64::MAX);
        if claimed > total {
            violations.push(violation(format!(
                "Territories total {claimed} exceeds board size {total}"
            )));
        }
    }

    let player_rounds = state.history(Side::Player).len();
    let agent_rounds = state.history(Side::Agent).len();
    if player_rounds != agent_rounds {
        violations.push(violation(format!(
            "History lengths differ: player {player_rounds}, agent {agent_rounds}"
        )));
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{apply_action, Action, Coord};

    #[test]
    fn test_valid_game_passes() {
        let mut game = GameState::new(5).unwrap();
        apply_action(&mut game, Side::Player, Action::Capture(Coord::new(3, 3))).unwrap();
        game.record_round();
        assert!(check_invariants(&game).is_empty());
    }

    #[test]
    fn test_single_cell_board_passes() {
        let game = GameState::new(1).unwrap();
        assert!(check_invariants(&game).is_empty());
    }

    #[test]
    fn test_counter_mismatch_detected() {
        let mut game = GameState::new(4).unwrap();
        game.territories[Side::Agent] = 3;

        let violations = check_invariants(&game);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Territory counter of agent"));
    }

    #[test]
    fn test_lost_home_detected() {
        let mut game = GameState::new(3).unwrap();
        game.board.set(Coord::new(2, 2), Cell::Owned(Side::Agent));

        let violations = check_invariants(&game);
        assert!(violations.iter().any(|v| v.message.contains("Home of player")));
    }

    #[test]
    #[should_panic(expected = "Game invariant violations")]
    #[cfg(debug_assertions)]
    fn test_assert_invariants_panics() {
        let mut game = GameState::new(3).unwrap();
        game.territories[Side::Player] = 9;
        assert_invariants(&game);
    }
}
