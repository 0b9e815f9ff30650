//! Game configuration.
//!
//! A `GameConfig` can be built in code or loaded from a JSON file. Every
//! field has a default, so a file only needs the keys it changes:
//!
//! ```json
//! { "players": ["Ada", "Brook", "Cy"], "turn_counting": "per_move" }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::board::{MAX_PLAYERS, MIN_PLAYERS};

/// How the turn number advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnCounting {
    /// Increment when play wraps back to player 0.
    #[default]
    PerCycle,
    /// Increment on every turn advance.
    PerMove,
}

/// Errors that can occur while loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("a game needs 2 to 4 players, got {0}")]
    PlayerCount(usize),

    #[error("hand size must be at least 1")]
    HandSize,
}

/// Engine settings for one game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Display names, one per player, in turn order.
    pub players: Vec<String>,
    /// Tiles held in each hand.
    pub hand_size: usize,
    pub turn_counting: TurnCounting,
    /// Cap on one player's agents in one cell. `None` means unlimited.
    pub max_agents_per_stack: Option<u32>,
    /// RNG seed for hand draws. 0 uses entropy.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            players: vec!["Player 1".to_string(), "Player 2".to_string()],
            hand_size: 3,
            turn_counting: TurnCounting::PerCycle,
            max_agents_per_stack: Some(5),
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Creates a default configuration for `count` players named
    /// "Player 1".."Player n".
    pub fn with_players(count: usize) -> Self {
        GameConfig {
            players: (1..=count).map(|i| format!("Player {i}")).collect(),
            ..GameConfig::default()
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Checks the player count and hand size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&n) {
            return Err(ConfigError::PlayerCount(n));
        }
        if self.hand_size == 0 {
            return Err(ConfigError::HandSize);
        }
        Ok(())
    }
}

/// Parses and validates a configuration from a JSON string.
pub fn parse_config(json: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Loads and validates a configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.player_count(), 2);
        assert_eq!(config.turn_counting, TurnCounting::PerCycle);
    }

    #[test]
    fn with_players_names_everyone() {
        let config = GameConfig::with_players(4);
        assert_eq!(config.players, vec!["Player 1", "Player 2", "Player 3", "Player 4"]);
    }

    #[test]
    fn parse_partial_json_keeps_defaults() {
        let config = parse_config(r#"{"players": ["Ada", "Brook", "Cy"], "turn_counting": "per_move"}"#).unwrap();
        assert_eq!(config.player_count(), 3);
        assert_eq!(config.turn_counting, TurnCounting::PerMove);
        assert_eq!(config.hand_size, 3);
        assert_eq!(config.max_agents_per_stack, Some(5));
    }

    #[test]
    fn parse_rejects_bad_player_counts() {
        assert!(matches!(parse_config(r#"{"players": ["Solo"]}"#), Err(ConfigError::PlayerCount(1))));
        assert!(matches!(
            parse_config(r#"{"players": ["a", "b", "c", "d", "e"]}"#),
            Err(ConfigError::PlayerCount(5))
        ));
    }

    #[test]
    fn parse_rejects_zero_hand() {
        assert!(matches!(parse_config(r#"{"hand_size": 0}"#), Err(ConfigError::HandSize)));
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(matches!(parse_config("{players"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/trinity.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/trinity.json"));
    }

    #[test]
    fn null_cap_means_unlimited() {
        let config = parse_config(r#"{"max_agents_per_stack": null}"#).unwrap();
        assert_eq!(config.max_agents_per_stack, None);
    }
}
