#![no_main]

//! Round sequence fuzzer.
//!
//! Applies arbitrary actions for both sides, with coordinates that may fall
//! off the board, recording a round after each pair. Checks that:
//! 1. No action panics
//! 2. A rejected action changes nothing
//! 3. Invariants hold after every round
//! 4. The victory check never panics

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use paddy::game::{apply_action, check_invariants, evaluate, Action, Coord, GameState, Side};

/// A fuzzer-generated action.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzAction {
    Gather,
    Irrigate,
    Recruit,
    Capture { x: u8, y: u8 },
}

impl FuzzAction {
    fn to_action(self) -> Action {
        match self {
            FuzzAction::Gather => Action::GatherWater,
            FuzzAction::Irrigate => Action::Irrigate,
            FuzzAction::Recruit => Action::Recruit,
            FuzzAction::Capture { x, y } => Action::Capture(Coord::new(x.into(), y.into())),
        }
    }
}

/// Structured input for round fuzzing.
#[derive(Arbitrary, Debug)]
struct RoundsInput {
    /// Board size seed.
    size: u8,
    /// Pairs of (player, agent) actions, one pair per round.
    rounds: Vec<(FuzzAction, FuzzAction)>,
}

fuzz_target!(|input: RoundsInput| {
    // Cap values to avoid excessive runtime
    let size = usize::from(input.size % 16) + 1;
    let Ok(mut state) = GameState::new(size) else {
        return;
    };

    for (player, agent) in input.rounds.into_iter().take(200) {
        state.record_round();
        for (side, action) in [(Side::Player, player), (Side::Agent, agent)] {
            let before = state.clone();
            if apply_action(&mut state, side, action.to_action()).is_err() {
                assert_eq!(state, before, "rejected action mutated state");
            }
        }

        let violations = check_invariants(&state);
        assert!(violations.is_empty(), "invariants violated: {violations:?}");

        if evaluate(&state).is_terminal() {
            break;
        }
    }
});
