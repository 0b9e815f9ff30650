//! Rule violations reported by the board and game state.
//!
//! Every variant is a local, recoverable condition: the call that produced
//! it made no change to the state.

use crate::board::{Phase, PlayerId, Pos};

/// Why a cell cannot take a tile or agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlacementFault {
    #[error("coordinates are off the board")]
    OutOfBounds,

    #[error("cell already holds a tile")]
    Occupied,

    #[error("cell is part of a landmark")]
    Landmark,
}

/// Why an otherwise well-formed action is not allowed right now.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveFault {
    #[error("actions are only allowed while playing, phase is {0}")]
    WrongPhase(Phase),

    #[error("it is {current}'s turn, not {requested}'s")]
    NotYourTurn { current: PlayerId, requested: PlayerId },

    #[error("hand has no slot {0}")]
    NoSuchHandSlot(usize),

    #[error("{0} has no headquarters within reach")]
    NoHeadquartersInReach(PlayerId),

    #[error("agent stack is at its cap of {0}")]
    StackFull(u32),
}

/// Errors returned by game-state mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid placement at {pos}: {reason}")]
    InvalidPlacement { pos: Pos, reason: PlacementFault },

    #[error("illegal move: {0}")]
    IllegalMove(MoveFault),

    #[error("invalid formation anchored at {anchor}: {reason}")]
    InvalidFormation { anchor: Pos, reason: String },

    #[error("a landmark is already anchored at {0}")]
    DuplicateFormation(Pos),

    #[error("player index {index} out of range for {count} players")]
    InvalidPlayer { index: usize, count: usize },

    #[error("turn number must be at least 1")]
    InvalidTurnNumber,

    #[error("no landmark anchored at {0}")]
    NoLandmark(Pos),

    #[error("landmark at {anchor} belongs to {owner}")]
    NotOwner { anchor: Pos, owner: PlayerId },

    #[error("landmark at {0} is already a headquarters")]
    AlreadyHeadquarters(Pos),
}

impl GameError {
    pub(crate) fn placement(pos: Pos, reason: PlacementFault) -> Self {
        GameError::InvalidPlacement { pos, reason }
    }

    pub(crate) fn formation(anchor: Pos, reason: impl Into<String>) -> Self {
        GameError::InvalidFormation { anchor, reason: reason.into() }
    }
}
