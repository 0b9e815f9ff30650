//! Driver session state.
//!
//! Holds the game in progress, the base configuration and the RNG used for
//! hand draws, and executes parsed commands. Every command answers with one
//! line (`ok`, `landmark <x> <y>`, `error <message>`, ...) except `show`,
//! which prints the grid.

use std::io::{self, Write};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{LandmarkId, Phase, PlayerId, Pos, TileType};
use crate::config::{ConfigError, GameConfig};
use crate::error::GameError;
use crate::game::{ContestOutcome, GameState};
use crate::protocol::ascii::{encode_ascii, parse_ascii, AsciiError};
use crate::protocol::parser::Command;

/// Errors reported back to the driver as `error <message>`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("no game in progress")]
    NoGame,

    #[error("game has already started")]
    AlreadyStarted,

    #[error("no trinity completed at {0}")]
    NoTrinity(Pos),

    #[error("position uses {owner} but the game has {count} players")]
    UnknownOwner { owner: PlayerId, count: usize },

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Ascii(#[from] AsciiError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// What `next` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Play passed on.
    Continue { player: PlayerId, turn: u32 },
    /// The board is full; the game is over.
    Finished { winner: PlayerId },
}

fn rng_from_seed(seed: u64) -> SmallRng {
    if seed == 0 {
        SmallRng::from_entropy()
    } else {
        SmallRng::seed_from_u64(seed)
    }
}

fn anchor_of(game: &GameState, id: LandmarkId) -> Option<Pos> {
    game.landmarks().get(id.index()).map(|lm| lm.anchor)
}

fn landmark_line(formed: Option<Pos>) -> String {
    match formed {
        Some(anchor) => format!("landmark {} {}", anchor.x, anchor.y),
        None => "ok".to_string(),
    }
}

/// Holds the mutable state of the driver between commands.
pub struct Engine {
    game: Option<GameState>,
    config: GameConfig,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates an engine with the default configuration and no game.
    pub fn new() -> Self {
        Engine::with_config(GameConfig::default())
    }

    /// Creates an engine whose games start from `config`.
    pub fn with_config(config: GameConfig) -> Self {
        let rng = rng_from_seed(config.seed);
        Engine { game: None, config, rng }
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    fn game_ref(&self) -> Result<&GameState, EngineError> {
        self.game.as_ref().ok_or(EngineError::NoGame)
    }

    fn game_mut(&mut self) -> Result<&mut GameState, EngineError> {
        self.game.as_mut().ok_or(EngineError::NoGame)
    }

    /// Starts a fresh game in setup and deals every hand.
    pub fn new_game(&mut self, players: Option<usize>) -> Result<(), EngineError> {
        let mut config = self.config.clone();
        if let Some(n) = players {
            config.players = GameConfig::with_players(n).players;
        }
        let mut game = GameState::new(config)?;
        game.deal_hands(&mut self.rng);
        tracing::info!(players = game.player_count(), "new game");
        self.game = Some(game);
        Ok(())
    }

    /// Replaces the game with one built around a parsed grid. The player
    /// setup of the current game is kept, or the base config if none.
    pub fn set_position(&mut self, grid: &str) -> Result<(), EngineError> {
        let board = parse_ascii(grid)?;
        let config = match &self.game {
            Some(game) => game.config().clone(),
            None => self.config.clone(),
        };

        let count = config.player_count();
        let stray = board
            .tiles()
            .map(|(_, t)| t.owner)
            .chain(board.agents().iter().map(|s| s.owner))
            .find(|owner| owner.index() >= count);
        if let Some(owner) = stray {
            return Err(EngineError::UnknownOwner { owner, count });
        }

        let mut game = GameState::with_board(config, board)?;
        game.deal_hands(&mut self.rng);
        self.game = Some(game);
        Ok(())
    }

    /// Moves from setup into play.
    pub fn start(&mut self) -> Result<(), EngineError> {
        let game = self.game_mut()?;
        if game.phase() != Phase::Setup {
            return Err(EngineError::AlreadyStarted);
        }
        game.advance_phase();
        Ok(())
    }

    /// Places a tile for the current player. Returns the anchor of the
    /// landmark it completed, if any.
    pub fn place(&mut self, pos: Pos, tile_type: TileType) -> Result<Option<Pos>, EngineError> {
        let game = self.game_mut()?;
        let owner = game.current_player();
        let formed = game.place_and_fuse(pos, tile_type, owner)?;
        Ok(formed.and_then(|id| anchor_of(game, id)))
    }

    /// Plays a tile from the current player's hand.
    pub fn play(&mut self, slot: usize, pos: Pos) -> Result<Option<Pos>, EngineError> {
        let game = self.game.as_mut().ok_or(EngineError::NoGame)?;
        let formed = game.play_from_hand(slot, pos, &mut self.rng)?;
        Ok(formed.and_then(|id| anchor_of(game, id)))
    }

    /// Fuses the trinity completed by the standing tile at `pos`.
    pub fn form(&mut self, pos: Pos) -> Result<Pos, EngineError> {
        let game = self.game_mut()?;
        game.fuse_at(pos)?
            .and_then(|id| anchor_of(game, id))
            .ok_or(EngineError::NoTrinity(pos))
    }

    /// Deploys one agent for the current player.
    pub fn deploy(&mut self, pos: Pos) -> Result<u32, EngineError> {
        let game = self.game_mut()?;
        let owner = game.current_player();
        Ok(game.deploy_agent(pos, owner)?)
    }

    /// Upgrades the current player's landmark at `anchor`.
    pub fn upgrade(&mut self, anchor: Pos) -> Result<(), EngineError> {
        let game = self.game_mut()?;
        let owner = game.current_player();
        Ok(game.upgrade_to_headquarters(anchor, owner)?)
    }

    pub fn contest(&mut self, pos: Pos) -> Result<ContestOutcome, EngineError> {
        Ok(self.game_mut()?.resolve_contest(pos)?)
    }

    /// Passes play on, or ends the game once the board is full.
    pub fn next(&mut self) -> Result<Progress, EngineError> {
        let game = self.game_mut()?;
        if game.phase() == Phase::GameOver || game.is_game_over() {
            game.set_phase(Phase::GameOver);
            let winner = game
                .standings()
                .first()
                .map_or(PlayerId(0), |p| p.id);
            tracing::info!(%winner, "game over");
            return Ok(Progress::Finished { winner });
        }
        game.advance_turn();
        Ok(Progress::Continue {
            player: game.current_player(),
            turn: game.turn(),
        })
    }

    pub fn set_phase(&mut self, phase: Phase) -> Result<(), EngineError> {
        self.game_mut()?.set_phase(phase);
        Ok(())
    }

    /// Returns the board as an ASCII grid.
    pub fn show(&self) -> Result<String, EngineError> {
        Ok(encode_ascii(self.game_ref()?.board()))
    }

    /// Returns a one-line summary: phase, turn, player to move and hand.
    pub fn status(&self) -> Result<String, EngineError> {
        let game = self.game_ref()?;
        let current = game.current_player();
        let hand: String = game.hand(current).iter().map(|t| t.letter()).collect();
        Ok(format!(
            "phase {} turn {} player {} hand {}",
            game.phase(),
            game.turn(),
            current,
            if hand.is_empty() { "-" } else { hand.as_str() }
        ))
    }

    /// Executes one command and writes its response.
    pub fn execute<W: Write>(&mut self, cmd: Command, out: &mut W) -> io::Result<()> {
        let ok = |()| "ok".to_string();
        let response = match cmd {
            Command::NewGame { players } => self.new_game(players).map(ok),
            Command::Position { grid } => self.set_position(&grid).map(ok),
            Command::Start => self.start().map(ok),
            Command::Place { pos, tile_type } => self.place(pos, tile_type).map(landmark_line),
            Command::Play { slot, pos } => self.play(slot, pos).map(landmark_line),
            Command::Form { pos } => self.form(pos).map(|anchor| landmark_line(Some(anchor))),
            Command::Agent { pos } => self.deploy(pos).map(|_| "ok".to_string()),
            Command::Hq { pos } => self.upgrade(pos).map(ok),
            Command::Contest { pos } => self.contest(pos).map(|outcome| match outcome {
                ContestOutcome::NoContest => "nocontest".to_string(),
                ContestOutcome::Stalemate => "stalemate".to_string(),
                ContestOutcome::Won { winner, remaining } => format!("won {winner} {remaining}"),
            }),
            Command::Next => self.next().map(|progress| match progress {
                Progress::Continue { .. } => "ok".to_string(),
                Progress::Finished { winner } => format!("winner {winner}"),
            }),
            Command::Phase { phase } => self.set_phase(phase).map(ok),
            Command::Show => self.show(),
            Command::Status => self.status(),
            Command::Quit => return Ok(()),
        };

        match response {
            Ok(text) => writeln!(out, "{text}")?,
            Err(e) => {
                tracing::warn!(error = %e, "command rejected");
                writeln!(out, "error {e}")?;
            }
        }
        out.flush()
    }
}
