//! Turn and phase sequencing.
//!
//! Play passes to `(current + 1) mod player_count`. The turn number moves
//! according to the configured `TurnCounting`:
//!
//! - `PerCycle`: increments when play wraps back to player 0, so every
//!   player acts once per turn number;
//! - `PerMove`: increments on every advance.
//!
//! Phase flow: Setup -> Playing -> GameOver. GameOver is terminal.

use crate::board::{Phase, PlayerId};
use crate::config::TurnCounting;

use super::state::GameState;

/// Computes the next (player, turn number) from the current ones.
///
/// The turn number saturates at `u32::MAX`.
pub fn next_turn(
    current: PlayerId,
    turn: u32,
    player_count: usize,
    counting: TurnCounting,
) -> (PlayerId, u32) {
    let count = player_count.max(1);
    let next = (current.index() + 1) % count;
    let next_turn = match counting {
        TurnCounting::PerCycle if next == 0 => turn.saturating_add(1),
        TurnCounting::PerCycle => turn,
        TurnCounting::PerMove => turn.saturating_add(1),
    };
    (PlayerId(next as u8), next_turn)
}

/// Returns the phase that follows `phase`.
pub fn next_phase(phase: Phase) -> Phase {
    match phase {
        Phase::Setup => Phase::Playing,
        Phase::Playing | Phase::GameOver => Phase::GameOver,
    }
}

impl GameState {
    /// Passes play to the next player, moving the turn number per the
    /// configured convention.
    pub fn advance_turn(&mut self) {
        let (next, turn) = next_turn(
            self.current,
            self.turn,
            self.players.len(),
            self.config.turn_counting,
        );
        self.current = next;
        self.turn = turn;
        tracing::debug!(player = %next, turn, "turn advanced");
    }

    /// Moves to the next phase and returns it.
    pub fn advance_phase(&mut self) -> Phase {
        self.phase = next_phase(self.phase);
        tracing::info!(phase = %self.phase, "phase changed");
        self.phase
    }
}
