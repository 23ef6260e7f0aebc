//! Decision sources for the scripted opponent.
//!
//! The opponent never plans: every round it draws one of the four resource
//! actions uniformly, and for a capture it draws coordinates uniformly over
//! the whole board. The draws come from a [`DecisionSource`] so tests can
//! substitute fixed sequences for real randomness.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::game::{Action, Coord};

/// Kind of action the opponent picks, before any coordinates are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentMove {
    /// Gather water.
    GatherWater,
    /// Irrigate for rice.
    Irrigate,
    /// Capture a cell.
    Capture,
    /// Recruit a farmer.
    Recruit,
}

impl AgentMove {
    /// Every move the opponent can pick.
    pub const ALL: [AgentMove; 4] = [
        AgentMove::GatherWater,
        AgentMove::Irrigate,
        AgentMove::Capture,
        AgentMove::Recruit,
    ];
}

/// Source of the opponent's choices.
pub trait DecisionSource {
    /// Pick the next move.
    fn pick_move(&mut self) -> AgentMove;

    /// Pick capture coordinates on a `size`×`size` board.
    fn pick_coord(&mut self, size: usize) -> Coord;
}

/// Draw a complete action from `source`.
///
/// Coordinates are only drawn when the move is a capture.
#[must_use]
pub fn next_action<D: DecisionSource + ?Sized>(source: &mut D, size: usize) -> Action {
    match source.pick_move() {
        AgentMove::GatherWater => Action::GatherWater,
        AgentMove::Irrigate => Action::Irrigate,
        AgentMove::Capture => Action::Capture(source.pick_coord(size)),
        AgentMove::Recruit => Action::Recruit,
    }
}

/// Uniform random opponent backed by a seedable `ChaCha8` generator.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: ChaCha8Rng,
    seed: u64,
}

impl RandomAgent {
    /// Create an agent with a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an agent on an independent stream of the same seed.
    ///
    /// Agents sharing a seed but not a stream produce unrelated draws.
    #[must_use]
    pub fn with_stream(seed: u64, stream: u64) -> Self {
        let mut agent = Self::new(seed);
        agent.rng.set_stream(stream);
        agent
    }

    /// Create an agent seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this agent was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl DecisionSource for RandomAgent {
    fn pick_move(&mut self) -> AgentMove {
        AgentMove::ALL[self.rng.gen_range(0..AgentMove::ALL.len())]
    }

    fn pick_coord(&mut self, size: usize) -> Coord {
        let size = size.max(1);
        Coord::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size))
    }
}

/// Replays fixed moves and coordinates, then falls back to gathering water
/// at the origin.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAgent {
    moves: VecDeque<AgentMove>,
    coords: VecDeque<Coord>,
}

impl ScriptedAgent {
    /// Create an agent replaying `moves` and `coords` in order.
    #[must_use]
    pub fn new(
        moves: impl IntoIterator<Item = AgentMove>,
        coords: impl IntoIterator<Item = Coord>,
    ) -> Self {
        Self {
            moves: moves.into_iter().collect(),
            coords: coords.into_iter().collect(),
        }
    }

    /// Number of scripted moves not yet replayed.
    #[must_use]
    pub fn remaining_moves(&self) -> usize {
        self.moves.len()
    }
}

impl DecisionSource for ScriptedAgent {
    fn pick_move(&mut self) -> AgentMove {
        self.moves.pop_front().unwrap_or(AgentMove::GatherWater)
    }

    fn pick_coord(&mut self, _size: usize) -> Coord {
        self.coords.pop_front().unwrap_or(Coord::new(0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_agent_deterministic() {
        let mut a = RandomAgent::new(42);
        let mut b = RandomAgent::new(42);
        for _ in 0..50 {
            assert_eq!(next_action(&mut a, 5), next_action(&mut b, 5));
        }
    }

    #[test]
    fn test_random_agent_streams_differ() {
        let mut a = RandomAgent::with_stream(7, 0);
        let mut b = RandomAgent::with_stream(7, 1);
        let draws_a: Vec<_> = (0..32).map(|_| a.pick_coord(64)).collect();
        let draws_b: Vec<_> = (0..32).map(|_| b.pick_coord(64)).collect();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn test_random_coords_in_bounds() {
        let mut agent = RandomAgent::new(3);
        for _ in 0..200 {
            let coord = agent.pick_coord(4);
            assert!(coord.x < 4 && coord.y < 4);
        }
    }

    #[test]
    fn test_random_agent_covers_all_moves() {
        let mut agent = RandomAgent::new(1);
        let picked: Vec<_> = (0..200).map(|_| agent.pick_move()).collect();
        for mv in AgentMove::ALL {
            assert!(picked.contains(&mv), "{mv:?} never picked");
        }
    }

    #[test]
    fn test_scripted_agent_replays_then_falls_back() {
        let mut agent = ScriptedAgent::new(
            [AgentMove::Capture, AgentMove::Recruit],
            [Coord::new(2, 1)],
        );
        assert_eq!(next_action(&mut agent, 3), Action::Capture(Coord::new(2, 1)));
        assert_eq!(next_action(&mut agent, 3), Action::Recruit);
        assert_eq!(agent.remaining_moves(), 0);
        assert_eq!(next_action(&mut agent, 3), Action::GatherWater);
    }
}
