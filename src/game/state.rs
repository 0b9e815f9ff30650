//! Authoritative game state.
//!
//! `GameState` owns the board, the seated players and the turn/phase
//! bookkeeping. Every mutation validates first and only then writes, so a
//! returned error always means nothing changed.

use crate::board::{
    AgentStack, Board, Landmark, LandmarkId, Phase, PlayerId, Pos, Tile, TileType,
};
use crate::config::{ConfigError, GameConfig};
use crate::detect::{is_tromino, Trinity};
use crate::error::{GameError, MoveFault, PlacementFault};

use super::player::{EventCard, Player, PlayerEvent};

/// Complete state of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(super) board: Board,
    pub(super) players: Vec<Player>,
    pub(super) turn: u32,
    pub(super) current: PlayerId,
    pub(super) phase: Phase,
    pub(super) config: GameConfig,
}

impl GameState {
    /// Creates a game in the `Setup` phase on turn 1 with player 0 to move.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        GameState::with_board(config, Board::empty())
    }

    /// Creates a game around an existing board, e.g. one parsed from an
    /// ASCII fixture.
    pub fn with_board(config: GameConfig, board: Board) -> Result<Self, ConfigError> {
        config.validate()?;
        let players = config
            .players
            .iter()
            .zip(PlayerId::all(config.player_count()))
            .map(|(name, id)| Player::new(id, name.clone()))
            .collect();
        Ok(GameState {
            board,
            players,
            turn: 1,
            current: PlayerId(0),
            phase: Phase::Setup,
            config,
        })
    }

    // ----- queries -----

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn tile_at(&self, pos: Pos) -> Option<Tile> {
        self.board.tile_at(pos)
    }

    pub fn landmark_at(&self, pos: Pos) -> Option<&Landmark> {
        self.board.landmark_at(pos)
    }

    pub fn landmarks(&self) -> &[Landmark] {
        self.board.landmarks()
    }

    pub fn agents_at(&self, pos: Pos) -> impl Iterator<Item = &AgentStack> + '_ {
        self.board.agents_at(pos)
    }

    pub fn agents(&self) -> &[AgentStack] {
        self.board.agents()
    }

    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Returns the player's hand, empty for an unknown id.
    pub fn hand(&self, id: PlayerId) -> &[TileType] {
        self.player(id).map(|p| p.hand.as_slice()).unwrap_or(&[])
    }

    /// Returns the player's accumulated event cards, empty for an unknown id.
    pub fn events(&self, id: PlayerId) -> &[PlayerEvent] {
        self.player(id).map(|p| p.events.as_slice()).unwrap_or(&[])
    }

    // ----- guards -----

    pub(super) fn require_playing(&self) -> Result<(), GameError> {
        if self.phase == Phase::Playing {
            Ok(())
        } else {
            Err(GameError::IllegalMove(MoveFault::WrongPhase(self.phase)))
        }
    }

    pub(super) fn require_turn(&self, owner: PlayerId) -> Result<(), GameError> {
        if owner == self.current {
            Ok(())
        } else {
            Err(GameError::IllegalMove(MoveFault::NotYourTurn {
                current: self.current,
                requested: owner,
            }))
        }
    }

    fn require_player(&self, owner: PlayerId) -> Result<(), GameError> {
        if owner.index() < self.players.len() {
            Ok(())
        } else {
            Err(GameError::InvalidPlayer { index: owner.index(), count: self.players.len() })
        }
    }

    pub(super) fn record_event(&mut self, owner: PlayerId, card: EventCard) {
        let turn = self.turn;
        if let Some(p) = self.players.get_mut(owner.index()) {
            p.events.push(PlayerEvent { turn, card });
        }
    }

    // ----- mutations -----

    /// Places a standing tile for `owner`. Runs no detection.
    ///
    /// Checks, in order: the phase is `Playing`, it is `owner`'s turn, the
    /// cell is on the board and vacant.
    pub fn place_tile(&mut self, pos: Pos, tile_type: TileType, owner: PlayerId) -> Result<(), GameError> {
        self.require_playing()?;
        self.require_turn(owner)?;
        self.board.set_tile(pos, tile_type, owner)?;
        tracing::debug!(%pos, %tile_type, %owner, "tile placed");
        Ok(())
    }

    /// Fuses a detected trinity into a landmark anchored at its Housing cell.
    ///
    /// Fails with `DuplicateFormation` if a landmark is already anchored
    /// there, and with `InvalidFormation` if the request is stale: the cells
    /// are not a tromino or no longer hold `owner`'s tiles of the labelled
    /// types.
    pub fn form_landmark(&mut self, trinity: &Trinity, owner: PlayerId) -> Result<LandmarkId, GameError> {
        let anchor = trinity.housing;
        if self.board.landmark_at(anchor).is_some() {
            return Err(GameError::DuplicateFormation(anchor));
        }
        self.require_player(owner)?;
        if !is_tromino(trinity.positions()) {
            return Err(GameError::formation(anchor, "members are not a connected tromino"));
        }
        let members = trinity.members();
        for (pos, tile_type) in members {
            if self.board.tile_at(pos) != Some(Tile::new(tile_type, owner)) {
                return Err(GameError::formation(
                    anchor,
                    format!("{pos} no longer holds {owner}'s {tile_type}"),
                ));
            }
        }

        for (pos, _) in members {
            self.board.remove_tile(pos);
        }
        let id = self.board.insert_landmark(members, owner);
        if let Some(p) = self.players.get_mut(owner.index()) {
            p.landmark_count += 1;
        }
        tracing::info!(%anchor, %owner, "landmark formed");
        Ok(id)
    }

    /// Adds one agent to `owner`'s stack at `pos`. Caps and reach are rules
    /// layered on top (see `deploy_agent`).
    pub fn place_agent(&mut self, pos: Pos, owner: PlayerId) -> Result<u32, GameError> {
        self.require_playing()?;
        if !pos.in_bounds() {
            return Err(GameError::placement(pos, PlacementFault::OutOfBounds));
        }
        self.require_player(owner)?;
        let count = self.board.add_agent(pos, owner)?;
        tracing::debug!(%pos, %owner, count, "agent placed");
        Ok(count)
    }

    /// Removes up to `n` of `owner`'s agents at `pos`. Returns how many were
    /// removed.
    pub fn remove_agents(&mut self, pos: Pos, owner: PlayerId, n: u32) -> u32 {
        self.board.remove_agents(pos, owner, n)
    }

    /// Sets the player to move. Only the index range is checked.
    pub fn set_current_player(&mut self, index: usize) -> Result<(), GameError> {
        if index >= self.players.len() {
            return Err(GameError::InvalidPlayer { index, count: self.players.len() });
        }
        self.current = PlayerId(index as u8);
        Ok(())
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Sets the turn number. Turns start at 1.
    pub fn set_turn_number(&mut self, turn: u32) -> Result<(), GameError> {
        if turn == 0 {
            return Err(GameError::InvalidTurnNumber);
        }
        self.turn = turn;
        Ok(())
    }
}
