//! Majority victory check.

use std::fmt;

use crate::game::{GameState, Side};

/// Result of evaluating a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Nobody has won yet.
    Continue,
    /// The human player holds enough territory.
    PlayerWin,
    /// The agent holds enough territory.
    AiWin,
}

impl Outcome {
    /// Whether the game is over.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Continue)
    }

    /// Winning side, if any.
    #[must_use]
    pub const fn winner(self) -> Option<Side> {
        match self {
            Outcome::Continue => None,
            Outcome::PlayerWin => Some(Side::Player),
            Outcome::AiWin => Some(Side::Agent),
        }
    }

    const fn for_winner(side: Side) -> Self {
        match side {
            Side::Player => Outcome::PlayerWin,
            Side::Agent => Outcome::AiWin,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Continue => write!(f, "game continues"),
            Outcome::PlayerWin => write!(f, "player wins"),
            Outcome::AiWin => write!(f, "agent wins"),
        }
    }
}

/// Territories a side needs to win: half the board, rounded down.
#[must_use]
pub fn win_threshold(total_cells: usize) -> u32 {
    u32::try_from(total_cells / 2).unwrap_or(u32::MAX)
}

/// Decide whether somebody has won.
///
/// The player is checked first, so when both sides reach the threshold in
/// the same evaluation the player wins.
#[must_use]
pub fn evaluate(state: &GameState) -> Outcome {
    let threshold = win_threshold(state.total_cells());
    Side::ALL
        .into_iter()
        .find(|&side| state.territories[side] >= threshold)
        .map_or(Outcome::Continue, Outcome::for_winner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_floors() {
        assert_eq!(win_threshold(1), 0);
        assert_eq!(win_threshold(4), 2);
        assert_eq!(win_threshold(25), 12);
    }

    #[test]
    fn test_fresh_game_continues() {
        let state = GameState::new(5).unwrap();
        assert_eq!(evaluate(&state), Outcome::Continue);
    }

    #[test]
    fn test_single_cell_board_player_wins() {
        let state = GameState::new(1).unwrap();
        assert_eq!(evaluate(&state), Outcome::PlayerWin);
    }

    #[test]
    fn test_player_checked_first() {
        let mut state = GameState::new(2).unwrap();
        state.territories[Side::Player] = 2;
        state.territories[Side::Agent] = 2;
        assert_eq!(evaluate(&state), Outcome::PlayerWin);
    }

    #[test]
    fn test_agent_wins() {
        let mut state = GameState::new(3).unwrap();
        state.territories[Side::Agent] = 4;
        assert_eq!(evaluate(&state), Outcome::AiWin);
        assert_eq!(Outcome::AiWin.winner(), Some(Side::Agent));
        assert!(Outcome::AiWin.is_terminal());
        assert!(!Outcome::Continue.is_terminal());
    }
}
