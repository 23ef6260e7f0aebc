//! The two participants and per-side storage.

use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the two symmetric participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The human player.
    Player,
    /// The scripted opponent.
    Agent,
}

impl Side {
    /// Both sides in turn order.
    pub const ALL: [Side; 2] = [Side::Player, Side::Agent];

    /// Board marker for cells owned by this side.
    #[must_use]
    pub const fn marker(self) -> i32 {
        match self {
            Side::Player => -1,
            Side::Agent => -2,
        }
    }

    /// Side owning cells with the given marker.
    #[must_use]
    pub const fn from_marker(marker: i32) -> Option<Side> {
        match marker {
            -1 => Some(Side::Player),
            -2 => Some(Side::Agent),
            _ => None,
        }
    }

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Agent,
            Side::Agent => Side::Player,
        }
    }

    /// Single-letter symbol used on the rendered board.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Side::Player => 'P',
            Side::Agent => 'A',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Agent => write!(f, "agent"),
        }
    }
}

/// One value per side, indexed by [`Side`].
///
/// Lets every rule be written once and applied to whichever side is acting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PerSide<T> {
    player: T,
    agent: T,
}

impl<T> PerSide<T> {
    /// Create from the player's and the agent's value.
    #[must_use]
    pub const fn new(player: T, agent: T) -> Self {
        Self { player, agent }
    }

    /// Create with the same value for both sides.
    #[must_use]
    pub fn splat(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            player: value.clone(),
            agent: value,
        }
    }

    /// Iterate over `(side, value)` pairs in turn order.
    #[must_use]
    pub fn iter(&self) -> std::array::IntoIter<(Side, &T), 2> {
        [(Side::Player, &self.player), (Side::Agent, &self.agent)].into_iter()
    }

    /// Apply `f` to both values.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PerSide<U> {
        PerSide {
            player: f(self.player),
            agent: f(self.agent),
        }
    }
}

impl<'a, T> IntoIterator for &'a PerSide<T> {
    type Item = (Side, &'a T);
    type IntoIter = std::array::IntoIter<(Side, &'a T), 2>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Index<Side> for PerSide<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        match side {
            Side::Player => &self.player,
            Side::Agent => &self.agent,
        }
    }
}

impl<T> IndexMut<Side> for PerSide<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        match side {
            Side::Player => &mut self.player,
            Side::Agent => &mut self.agent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_roundtrip() {
        for side in Side::ALL {
            assert_eq!(Side::from_marker(side.marker()), Some(side));
        }
        assert_eq!(Side::from_marker(0), None);
        assert_eq!(Side::from_marker(-3), None);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Side::Player.opponent(), Side::Agent);
        assert_eq!(Side::Agent.opponent(), Side::Player);
    }

    #[test]
    fn test_per_side_indexing() {
        let mut values = PerSide::new(1, 2);
        assert_eq!(values[Side::Player], 1);
        assert_eq!(values[Side::Agent], 2);

        values[Side::Agent] += 5;
        assert_eq!(values[Side::Agent], 7);
    }

    #[test]
    fn test_per_side_iter_order() {
        let values = PerSide::splat("x");
        let sides: Vec<_> = values.iter().map(|(side, _)| side).collect();
        assert_eq!(sides, vec![Side::Player, Side::Agent]);
    }

    #[test]
    fn test_per_side_map() {
        let doubled = PerSide::new(2, 3).map(|v| v * 2);
        assert_eq!(doubled, PerSide::new(4, 6));
    }
}
