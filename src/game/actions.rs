//! Resource actions, applied identically for either side.

use std::fmt;

use tracing::debug;

use crate::error::ActionError;
use crate::game::{capture, Capture, Coord, GameState, Side};

/// Water added by one gather action.
pub const WATER_PER_GATHER: u32 = 5;

/// Water spent by one irrigate action.
pub const IRRIGATE_WATER_COST: u32 = 1;

/// Rice produced by one irrigate action.
pub const RICE_PER_IRRIGATE: u32 = 3;

/// Rice spent to recruit a farmer.
pub const RECRUIT_RICE_COST: u32 = 5;

/// Water spent to recruit a farmer.
pub const RECRUIT_WATER_COST: u32 = 3;

/// Farmers a side must already have to train a new one.
pub const RECRUIT_MIN_FARMERS: u32 = 1;

/// One resource action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Add water.
    GatherWater,
    /// Turn water into rice.
    Irrigate,
    /// Capture a cell with farmers.
    Capture(Coord),
    /// Turn rice and water into a farmer.
    Recruit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::GatherWater => write!(f, "gather water"),
            Action::Irrigate => write!(f, "irrigate"),
            Action::Capture(coord) => write!(f, "capture {coord}"),
            Action::Recruit => write!(f, "recruit"),
        }
    }
}

/// What a successful action changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEffect {
    /// Water was added.
    Gathered {
        /// Amount added.
        water: u32,
    },
    /// Water was turned into rice.
    Irrigated {
        /// Rice produced.
        rice: u32,
    },
    /// A cell was captured.
    Captured(Capture),
    /// A farmer was recruited.
    Recruited,
}

/// Apply one action for `side`.
///
/// Preconditions are checked before anything is debited, so a failed action
/// leaves the state exactly as it was.
///
/// # Errors
///
/// Returns an error if the side cannot afford the action or the capture
/// target is invalid.
pub fn apply_action(
    state: &mut GameState,
    side: Side,
    action: Action,
) -> Result<ActionEffect, ActionError> {
    let effect = match action {
        Action::GatherWater => {
            let held = &mut state.resources[side];
            held.water = held.water.saturating_add(WATER_PER_GATHER);
            ActionEffect::Gathered {
                water: WATER_PER_GATHER,
            }
        }
        Action::Irrigate => {
            let held = &mut state.resources[side];
            if held.water < IRRIGATE_WATER_COST {
                return Err(ActionError::NotEnoughWater);
            }
            held.water -= IRRIGATE_WATER_COST;
            held.rice = held.rice.saturating_add(RICE_PER_IRRIGATE);
            ActionEffect::Irrigated {
                rice: RICE_PER_IRRIGATE,
            }
        }
        Action::Capture(coord) => ActionEffect::Captured(capture(state, side, coord)?),
        Action::Recruit => {
            let held = &mut state.resources[side];
            let affordable = held.rice >= RECRUIT_RICE_COST
                && held.water >= RECRUIT_WATER_COST
                && held.farmers >= RECRUIT_MIN_FARMERS;
            if !affordable {
                return Err(ActionError::CannotRecruit { held: *held });
            }
            held.rice -= RECRUIT_RICE_COST;
            held.water -= RECRUIT_WATER_COST;
            held.farmers = held.farmers.saturating_add(1);
            ActionEffect::Recruited
        }
    };

    debug!(%side, %action, resources = %state.resources[side], "action applied");
    Ok(effect)
}
