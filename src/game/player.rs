//! Players, hands and event cards.

use crate::board::{PlayerId, Pos, TileType};

/// A bonus/event card awarded by the rules layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCard {
    LandmarkFormed { anchor: Pos },
    HeadquartersEstablished { anchor: Pos },
    /// The player's stack survived a contest with `remaining` agents.
    ContestWon { pos: Pos, remaining: u32 },
}

/// An event card stamped with the turn it was earned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerEvent {
    pub turn: u32,
    pub card: EventCard,
}

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub landmark_count: u32,
    pub hq_count: u32,
    pub hand: Vec<TileType>,
    pub events: Vec<PlayerEvent>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Player {
            id,
            name: name.into(),
            landmark_count: 0,
            hq_count: 0,
            hand: Vec::new(),
            events: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_starts_empty() {
        let p = Player::new(PlayerId(2), "Cy");
        assert_eq!(p.id, PlayerId(2));
        assert_eq!(p.name, "Cy");
        assert_eq!(p.landmark_count, 0);
        assert_eq!(p.hq_count, 0);
        assert!(p.hand.is_empty());
        assert!(p.events.is_empty());
    }
}
