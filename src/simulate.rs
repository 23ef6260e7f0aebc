//! Headless matches: both sides driven by random decision sources.
//!
//! Used for balance statistics and benchmarking. Each match owns its own
//! state, so many can run in parallel.

use tracing::warn;

use crate::agent::{AgentMove, DecisionSource, RandomAgent};
use crate::error::SetupError;
use crate::game::{GameState, Outcome, PerSide, Target};
use crate::persist::MemoryStore;
use crate::report::MemoryReporter;
use crate::session::{Frontend, InputError, Notice, PlayerChoice, RoundController};

/// Settings for one headless match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    /// Board edge length.
    pub board_size: usize,
    /// Rounds after which an undecided match is abandoned.
    pub max_rounds: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            board_size: 5,
            max_rounds: 500,
        }
    }
}

/// Result of one headless match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    /// Seed the match was played with.
    pub seed: u64,
    /// Final outcome; `Continue` if the round limit was hit.
    pub outcome: Outcome,
    /// Rounds played.
    pub rounds: u32,
    /// Territories held at the end.
    pub territories: PerSide<u32>,
    /// Human-side actions that were rejected.
    pub failed_actions: u32,
}

/// Frontend that plays the human side with a [`DecisionSource`].
///
/// Only resource actions are chosen; it never saves or exports.
#[derive(Debug, Clone)]
pub struct AutoPilot<D> {
    source: D,
    failed_actions: u32,
}

impl<D: DecisionSource> AutoPilot<D> {
    /// Create a pilot drawing from `source`.
    #[must_use]
    pub fn new(source: D) -> Self {
        Self {
            source,
            failed_actions: 0,
        }
    }

    /// Number of actions the rules rejected.
    #[must_use]
    pub fn failed_actions(&self) -> u32 {
        self.failed_actions
    }
}

impl<D: DecisionSource> Frontend for AutoPilot<D> {
    fn show_state(&mut self, _state: &GameState) {}

    fn choose_command(&mut self) -> Result<PlayerChoice, InputError> {
        Ok(match self.source.pick_move() {
            AgentMove::GatherWater => PlayerChoice::GatherWater,
            AgentMove::Irrigate => PlayerChoice::Irrigate,
            AgentMove::Capture => PlayerChoice::Capture,
            AgentMove::Recruit => PlayerChoice::Recruit,
        })
    }

    fn capture_target(&mut self, size: usize) -> Result<Target, InputError> {
        Ok(self.source.pick_coord(size).into())
    }

    fn notify(&mut self, notice: &Notice) {
        if let Notice::ActionFailed(_) = notice {
            self.failed_actions += 1;
        }
    }
}

/// Play one random-vs-random match.
///
/// Both sides draw from independent streams of `seed`, so the same seed and
/// config always produce the same result.
///
/// # Errors
///
/// Returns an error if the configured board size is invalid.
pub fn run_match(seed: u64, config: &MatchConfig) -> Result<MatchResult, SetupError> {
    let state = GameState::new(config.board_size)?;
    let mut controller = RoundController::new(
        state,
        AutoPilot::new(RandomAgent::with_stream(seed, 0)),
        RandomAgent::with_stream(seed, 1),
        MemoryStore::new(),
        MemoryReporter::new(),
    );

    let outcome = controller
        .run(Some(config.max_rounds))
        .unwrap_or_else(|e| {
            warn!(seed, error = %e, "match aborted");
            Outcome::Continue
        });

    Ok(MatchResult {
        seed,
        outcome,
        rounds: controller.rounds_played(),
        territories: controller.state().territories,
        failed_actions: controller.frontend().failed_actions(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::check_invariants;

    #[test]
    fn test_match_is_deterministic() {
        let config = MatchConfig::default();
        let a = run_match(99, &config).unwrap();
        let b = run_match(99, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_match_respects_round_limit() {
        let config = MatchConfig {
            board_size: 12,
            max_rounds: 3,
        };
        let result = run_match(5, &config).unwrap();
        assert_eq!(result.outcome, Outcome::Continue);
        assert_eq!(result.rounds, 3);
    }

    #[test]
    fn test_single_cell_match_ends_immediately() {
        let config = MatchConfig {
            board_size: 1,
            max_rounds: 10,
        };
        let result = run_match(0, &config).unwrap();
        assert_eq!(result.outcome, Outcome::PlayerWin);
        assert_eq!(result.rounds, 1);
    }

    #[test]
    fn test_invalid_board_size() {
        let config = MatchConfig {
            board_size: 0,
            max_rounds: 10,
        };
        assert_eq!(run_match(1, &config), Err(SetupError::EmptyBoard));
    }

    #[test]
    fn test_autopilot_counts_failures() {
        let mut pilot = AutoPilot::new(RandomAgent::new(1));
        pilot.notify(&Notice::ActionFailed(crate::error::ActionError::NotEnoughWater));
        pilot.notify(&Notice::Saved);
        assert_eq!(pilot.failed_actions(), 1);
    }

    #[test]
    fn test_state_stays_consistent() {
        let state = GameState::new(4).unwrap();
        let mut controller = RoundController::new(
            state,
            AutoPilot::new(RandomAgent::new(8)),
            RandomAgent::new(9),
            MemoryStore::new(),
            MemoryReporter::new(),
        );
        controller.run(Some(50)).unwrap();
        assert!(check_invariants(controller.state()).is_empty());
    }
}
