//! Board state representation.
//!
//! Holds every cell of the 8×8 grid together with the landmark list and the
//! agent overlay. Cells are a closed set of variants, so a cell can never be
//! both covered by a landmark and hold a standing tile.

use super::landmark::{AgentStack, Landmark, LandmarkId};
use super::owner::PlayerId;
use super::position::{all_positions, Pos, CELL_COUNT};
use super::tile::{Tile, TileType};
use crate::error::{GameError, PlacementFault};

/// The game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Setup,
    Playing,
    GameOver,
}

impl Phase {
    /// Returns the lowercase name used by the command protocol.
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Playing => "playing",
            Phase::GameOver => "gameover",
        }
    }

    /// Parses a phase from its protocol name.
    pub fn from_name(s: &str) -> Option<Phase> {
        match s {
            "setup" => Some(Phase::Setup),
            "playing" => Some(Phase::Playing),
            "gameover" => Some(Phase::GameOver),
            _ => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Contents of a single cell. Agents are tracked separately and may overlay
/// any variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Standing(Tile),
    /// The Housing cell of a landmark.
    LandmarkAnchor(LandmarkId),
    /// A non-anchor member cell of a landmark.
    LandmarkCovered(LandmarkId),
}

impl Cell {
    /// Returns the landmark this cell belongs to, if any.
    pub const fn landmark(self) -> Option<LandmarkId> {
        match self {
            Cell::LandmarkAnchor(id) | Cell::LandmarkCovered(id) => Some(id),
            _ => None,
        }
    }
}

/// Complete board contents at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
    landmarks: Vec<Landmark>,
    agents: Vec<AgentStack>,
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Board {
    /// Creates a board with no tiles, landmarks or agents.
    pub fn empty() -> Self {
        Board {
            cells: [Cell::Empty; CELL_COUNT],
            landmarks: Vec::new(),
            agents: Vec::new(),
        }
    }

    /// Returns the raw cell, or `None` when off the board.
    pub fn cell_at(&self, pos: Pos) -> Option<Cell> {
        pos.index().map(|i| self.cells[i])
    }

    /// Returns the standing tile at `pos`. Empty cells, landmark cells and
    /// off-board positions all yield `None`.
    pub fn tile_at(&self, pos: Pos) -> Option<Tile> {
        match self.cell_at(pos)? {
            Cell::Standing(tile) => Some(tile),
            _ => None,
        }
    }

    /// Checks that a tile could be placed at `pos`.
    pub fn check_vacant(&self, pos: Pos) -> Result<(), GameError> {
        match self.cell_at(pos) {
            None => Err(GameError::placement(pos, PlacementFault::OutOfBounds)),
            Some(Cell::Empty) => Ok(()),
            Some(Cell::Standing(_)) => Err(GameError::placement(pos, PlacementFault::Occupied)),
            Some(Cell::LandmarkAnchor(_) | Cell::LandmarkCovered(_)) => {
                Err(GameError::placement(pos, PlacementFault::Landmark))
            }
        }
    }

    /// Places a standing tile. Fails if the cell is off the board, holds a
    /// tile, or belongs to a landmark.
    pub fn set_tile(&mut self, pos: Pos, tile_type: TileType, owner: PlayerId) -> Result<(), GameError> {
        self.check_vacant(pos)?;
        if let Some(idx) = pos.index() {
            self.cells[idx] = Cell::Standing(Tile::new(tile_type, owner));
        }
        Ok(())
    }

    /// Clears a standing tile and returns it. Landmark cells are untouched.
    pub fn remove_tile(&mut self, pos: Pos) -> Option<Tile> {
        let idx = pos.index()?;
        match self.cells[idx] {
            Cell::Standing(tile) => {
                self.cells[idx] = Cell::Empty;
                Some(tile)
            }
            _ => None,
        }
    }

    /// Iterates over all standing tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Pos, Tile)> + '_ {
        all_positions().filter_map(move |p| self.tile_at(p).map(|t| (p, t)))
    }

    /// Returns the landmark anchored at `pos`.
    pub fn landmark_at(&self, pos: Pos) -> Option<&Landmark> {
        match self.cell_at(pos)? {
            Cell::LandmarkAnchor(id) => self.landmarks.get(id.index()),
            _ => None,
        }
    }

    /// Returns the landmark whose footprint includes `pos`.
    pub fn landmark_covering(&self, pos: Pos) -> Option<&Landmark> {
        let id = self.cell_at(pos)?.landmark()?;
        self.landmarks.get(id.index())
    }

    /// Returns every landmark in formation order.
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub(crate) fn landmark_mut(&mut self, anchor: Pos) -> Option<&mut Landmark> {
        match self.cell_at(anchor)? {
            Cell::LandmarkAnchor(id) => self.landmarks.get_mut(id.index()),
            _ => None,
        }
    }

    /// Rewrites the three member cells into a landmark. Members must be
    /// in Housing, Commerce, Industry order and already validated.
    pub(crate) fn insert_landmark(&mut self, members: [(Pos, TileType); 3], owner: PlayerId) -> LandmarkId {
        let id = LandmarkId(self.landmarks.len() as u16);
        let anchor = members[0].0;
        for (i, &(pos, _)) in members.iter().enumerate() {
            if let Some(idx) = pos.index() {
                self.cells[idx] = if i == 0 {
                    Cell::LandmarkAnchor(id)
                } else {
                    Cell::LandmarkCovered(id)
                };
            }
        }
        self.landmarks.push(Landmark { id, anchor, owner, is_hq: false, members });
        id
    }

    /// Returns the agent stacks at `pos`, one per owner.
    pub fn agents_at(&self, pos: Pos) -> impl Iterator<Item = &AgentStack> + '_ {
        self.agents.iter().filter(move |s| s.pos == pos)
    }

    /// Returns every agent stack in creation order.
    pub fn agents(&self) -> &[AgentStack] {
        &self.agents
    }

    /// Returns the size of `owner`'s stack at `pos` (0 if none).
    pub fn agent_count(&self, pos: Pos, owner: PlayerId) -> u32 {
        self.agents
            .iter()
            .find(|s| s.pos == pos && s.owner == owner)
            .map_or(0, |s| s.count)
    }

    /// Adds one agent to `owner`'s stack at `pos`, creating it if needed.
    /// No cap is enforced here.
    pub fn add_agent(&mut self, pos: Pos, owner: PlayerId) -> Result<u32, GameError> {
        self.add_agents(pos, owner, 1)
    }

    /// Adds `n` agents at once. Returns the new stack size.
    pub fn add_agents(&mut self, pos: Pos, owner: PlayerId, n: u32) -> Result<u32, GameError> {
        if !pos.in_bounds() {
            return Err(GameError::placement(pos, PlacementFault::OutOfBounds));
        }
        match self.agents.iter_mut().find(|s| s.pos == pos && s.owner == owner) {
            Some(stack) => {
                stack.count = stack.count.saturating_add(n);
                Ok(stack.count)
            }
            None if n == 0 => Ok(0),
            None => {
                self.agents.push(AgentStack { pos, owner, count: n });
                Ok(n)
            }
        }
    }

    /// Removes up to `n` agents from `owner`'s stack at `pos`, dropping the
    /// stack when it empties. Returns how many were removed.
    pub fn remove_agents(&mut self, pos: Pos, owner: PlayerId, n: u32) -> u32 {
        let Some(i) = self.agents.iter().position(|s| s.pos == pos && s.owner == owner) else {
            return 0;
        };
        let removed = n.min(self.agents[i].count);
        self.agents[i].count -= removed;
        if self.agents[i].count == 0 {
            self.agents.remove(i);
        }
        removed
    }

    /// Iterates over empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        all_positions().filter(move |&p| self.cell_at(p) == Some(Cell::Empty))
    }

    /// Returns true when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }
}
