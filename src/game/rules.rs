//! Game rules layered on the state primitives.
//!
//! Placement with automatic fusion, hands, headquarters, agent deployment
//! and contests. Each operation is all-or-nothing like the primitives it is
//! built from.

use rand::Rng;

use crate::board::{draw_tile, LandmarkId, PlayerId, Pos, TileType};
use crate::detect::detect;
use crate::error::{GameError, MoveFault, PlacementFault};

use super::player::{EventCard, Player};
use super::state::GameState;

/// Outcome of resolving the agent stacks on one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContestOutcome {
    /// Fewer than two owners have agents there.
    NoContest,
    /// The largest stacks tied and every stack was removed.
    Stalemate,
    Won { winner: PlayerId, remaining: u32 },
}

impl GameState {
    /// Places a tile, then fuses the first trinity it completes.
    pub fn place_and_fuse(
        &mut self,
        pos: Pos,
        tile_type: TileType,
        owner: PlayerId,
    ) -> Result<Option<LandmarkId>, GameError> {
        self.place_tile(pos, tile_type, owner)?;
        self.fuse_at(pos)
    }

    /// Fuses the first trinity completed by the standing tile at `pos`.
    ///
    /// Every detected trinity contains that tile, so at most one landmark
    /// can form per call. When several are possible the first in detector
    /// order (row-major by housing, commerce, industry) is formed. Returns
    /// `None` when the cell holds no standing tile or completes nothing.
    pub fn fuse_at(&mut self, pos: Pos) -> Result<Option<LandmarkId>, GameError> {
        let Some(tile) = self.board.tile_at(pos) else {
            return Ok(None);
        };
        let found = detect(&self.board, pos, tile.tile_type, tile.owner);
        let Some(trinity) = found.first() else {
            return Ok(None);
        };
        if found.len() > 1 {
            tracing::debug!(%pos, options = found.len(), "placement completes several trinities");
        }
        let id = self.form_landmark(trinity, tile.owner)?;
        self.record_event(tile.owner, EventCard::LandmarkFormed { anchor: trinity.housing });
        Ok(Some(id))
    }

    /// Tops every hand up to the configured size from the draw pool.
    pub fn deal_hands(&mut self, rng: &mut impl Rng) {
        let size = self.config.hand_size;
        for player in &mut self.players {
            while player.hand.len() < size {
                player.hand.push(draw_tile(rng));
            }
        }
    }

    /// Plays the current player's tile in `slot` at `pos` with fusion, then
    /// draws a replacement.
    pub fn play_from_hand(
        &mut self,
        slot: usize,
        pos: Pos,
        rng: &mut impl Rng,
    ) -> Result<Option<LandmarkId>, GameError> {
        let owner = self.current;
        let tile_type = *self
            .hand(owner)
            .get(slot)
            .ok_or(GameError::IllegalMove(MoveFault::NoSuchHandSlot(slot)))?;

        let formed = self.place_and_fuse(pos, tile_type, owner)?;

        if let Some(player) = self.players.get_mut(owner.index()) {
            player.hand.remove(slot);
            player.hand.push(draw_tile(rng));
        }
        Ok(formed)
    }

    /// Upgrades `owner`'s landmark anchored at `anchor` to a headquarters.
    pub fn upgrade_to_headquarters(&mut self, anchor: Pos, owner: PlayerId) -> Result<(), GameError> {
        self.require_playing()?;
        self.require_turn(owner)?;
        let landmark = self.board.landmark_at(anchor).ok_or(GameError::NoLandmark(anchor))?;
        if landmark.owner != owner {
            return Err(GameError::NotOwner { anchor, owner: landmark.owner });
        }
        if landmark.is_hq {
            return Err(GameError::AlreadyHeadquarters(anchor));
        }

        if let Some(lm) = self.board.landmark_mut(anchor) {
            lm.is_hq = true;
        }
        if let Some(p) = self.players.get_mut(owner.index()) {
            p.hq_count += 1;
        }
        self.record_event(owner, EventCard::HeadquartersEstablished { anchor });
        tracing::info!(%anchor, %owner, "headquarters established");
        Ok(())
    }

    /// Returns true if `owner` has a headquarters anchored on or next to
    /// `pos`.
    pub fn has_headquarters_near(&self, pos: Pos, owner: PlayerId) -> bool {
        self.board
            .landmarks()
            .iter()
            .any(|lm| lm.owner == owner && lm.is_hq && (lm.anchor == pos || lm.anchor.is_adjacent(pos)))
    }

    /// Deploys one of `owner`'s agents at `pos`.
    ///
    /// Requires `owner`'s turn, a headquarters anchored on or orthogonally
    /// next to `pos`, and room under the configured stack cap.
    pub fn deploy_agent(&mut self, pos: Pos, owner: PlayerId) -> Result<u32, GameError> {
        self.require_playing()?;
        self.require_turn(owner)?;
        if !pos.in_bounds() {
            return Err(GameError::placement(pos, PlacementFault::OutOfBounds));
        }
        if !self.has_headquarters_near(pos, owner) {
            return Err(GameError::IllegalMove(MoveFault::NoHeadquartersInReach(owner)));
        }
        if let Some(cap) = self.config.max_agents_per_stack {
            if self.board.agent_count(pos, owner) >= cap {
                return Err(GameError::IllegalMove(MoveFault::StackFull(cap)));
            }
        }
        self.place_agent(pos, owner)
    }

    /// Resolves the stacks at `pos` by attrition.
    ///
    /// The largest stack loses as many agents as the second largest holds
    /// and every other stack is removed. A tie for largest removes all.
    pub fn resolve_contest(&mut self, pos: Pos) -> Result<ContestOutcome, GameError> {
        self.require_playing()?;
        if !pos.in_bounds() {
            return Err(GameError::placement(pos, PlacementFault::OutOfBounds));
        }

        let mut stacks: Vec<(PlayerId, u32)> =
            self.board.agents_at(pos).map(|s| (s.owner, s.count)).collect();
        if stacks.len() < 2 {
            return Ok(ContestOutcome::NoContest);
        }
        stacks.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let (top, top_count) = stacks[0];
        let second_count = stacks[1].1;
        if top_count == second_count {
            for &(owner, count) in &stacks {
                self.board.remove_agents(pos, owner, count);
            }
            tracing::info!(%pos, "contest ended in stalemate");
            return Ok(ContestOutcome::Stalemate);
        }

        for &(owner, count) in &stacks[1..] {
            self.board.remove_agents(pos, owner, count);
        }
        self.board.remove_agents(pos, top, second_count);
        let remaining = top_count - second_count;
        self.record_event(top, EventCard::ContestWon { pos, remaining });
        tracing::info!(%pos, winner = %top, remaining, "contest won");
        Ok(ContestOutcome::Won { winner: top, remaining })
    }

    /// The game ends when no empty cell is left.
    pub fn is_game_over(&self) -> bool {
        self.board.is_full()
    }

    /// Players ranked by headquarters, then landmarks, then seat order.
    pub fn standings(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by(|a, b| {
            b.hq_count
                .cmp(&a.hq_count)
                .then(b.landmark_count.cmp(&a.landmark_count))
                .then(a.id.cmp(&b.id))
        });
        ranked
    }
}
