//! Landmarks and agent stacks.

use super::owner::PlayerId;
use super::position::Pos;
use super::tile::TileType;

/// Index of a landmark in the board's landmark list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LandmarkId(pub u16);

impl LandmarkId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Three fused tiles. Occupies its anchor cell and covers the other two
/// member cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landmark {
    pub id: LandmarkId,
    /// Position of the Housing member.
    pub anchor: Pos,
    pub owner: PlayerId,
    pub is_hq: bool,
    /// Member positions and types in Housing, Commerce, Industry order.
    pub members: [(Pos, TileType); 3],
}

impl Landmark {
    /// Returns true if `pos` is one of the three member cells.
    pub fn covers(&self, pos: Pos) -> bool {
        self.members.iter().any(|&(p, _)| p == pos)
    }
}

/// One player's agents on one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentStack {
    pub pos: Pos,
    pub owner: PlayerId,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_all_members_only() {
        let lm = Landmark {
            id: LandmarkId(0),
            anchor: Pos::new(0, 0),
            owner: PlayerId(0),
            is_hq: false,
            members: [
                (Pos::new(0, 0), TileType::Housing),
                (Pos::new(1, 0), TileType::Commerce),
                (Pos::new(0, 1), TileType::Industry),
            ],
        };
        assert!(lm.covers(Pos::new(0, 0)));
        assert!(lm.covers(Pos::new(1, 0)));
        assert!(lm.covers(Pos::new(0, 1)));
        assert!(!lm.covers(Pos::new(1, 1)));
    }
}
