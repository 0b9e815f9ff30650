//! Game state, turn sequencing and rules.

pub mod player;
pub mod rules;
pub mod state;
pub mod turn;

pub use player::{EventCard, Player, PlayerEvent};
pub use rules::ContestOutcome;
pub use state::GameState;
pub use turn::{next_phase, next_turn};
