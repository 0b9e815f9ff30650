//! Player identity.

use serde::{Deserialize, Serialize};

/// The minimum number of players in a game.
pub const MIN_PLAYERS: usize = 2;

/// The maximum number of players in a game.
pub const MAX_PLAYERS: usize = 4;

/// A 0-based player index. Anything that may be unowned holds an
/// `Option<PlayerId>` rather than a sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Returns the index as a `usize` for slice access.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterates over the ids of a game with `count` players.
    pub fn all(count: usize) -> impl Iterator<Item = PlayerId> {
        (0..count.min(MAX_PLAYERS) as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}
