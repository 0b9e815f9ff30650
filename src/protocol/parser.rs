//! Driver command parser.
//!
//! Parses incoming lines from raw text into structured `Command` variants
//! that the driver loop can dispatch on.

use crate::board::{Phase, Pos, TileType};

/// A parsed driver command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a fresh game, optionally overriding the player count.
    NewGame { players: Option<usize> },

    /// Load a board from an ASCII grid with `/`-separated rows.
    Position { grid: String },

    /// Leave setup and begin play.
    Start,

    /// Place a tile of the given type for the current player.
    Place { pos: Pos, tile_type: TileType },

    /// Play the current player's hand slot at a position.
    Play { slot: usize, pos: Pos },

    /// Fuse the trinity completed by the tile at a position.
    Form { pos: Pos },

    /// Deploy one agent for the current player.
    Agent { pos: Pos },

    /// Upgrade the current player's landmark to a headquarters.
    Hq { pos: Pos },

    /// Resolve the agent stacks on a cell.
    Contest { pos: Pos },

    /// Pass play to the next player.
    Next,

    /// Force the phase.
    Phase { phase: Phase },

    /// Print the board grid.
    Show,

    /// Print phase, turn and current player.
    Status,

    /// Terminate the driver.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens[0] {
        "start" => Some(Command::Start),
        "next" => Some(Command::Next),
        "show" => Some(Command::Show),
        "status" => Some(Command::Status),
        "quit" => Some(Command::Quit),

        "newgame" => parse_newgame(&tokens),
        "position" => parse_position(&tokens, trimmed),
        "place" => parse_place(&tokens),
        "play" => parse_play(&tokens),
        "form" => parse_at(&tokens).map(|pos| Command::Form { pos }),
        "agent" => parse_at(&tokens).map(|pos| Command::Agent { pos }),
        "hq" => parse_at(&tokens).map(|pos| Command::Hq { pos }),
        "contest" => parse_at(&tokens).map(|pos| Command::Contest { pos }),
        "phase" => parse_phase(&tokens),

        other => {
            tracing::warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses two coordinate tokens.
fn parse_pos(x: &str, y: &str) -> Option<Pos> {
    match (x.parse::<i32>(), y.parse::<i32>()) {
        (Ok(x), Ok(y)) => Some(Pos::new(x, y)),
        _ => {
            tracing::warn!(x, y, "invalid coordinates");
            None
        }
    }
}

/// Parses `<cmd> <x> <y>`.
fn parse_at(tokens: &[&str]) -> Option<Pos> {
    if tokens.len() != 3 {
        tracing::warn!(command = tokens[0], "malformed command: expected '<x> <y>'");
        return None;
    }
    parse_pos(tokens[1], tokens[2])
}

/// Parses `newgame [players]`.
fn parse_newgame(tokens: &[&str]) -> Option<Command> {
    match tokens.get(1) {
        None => Some(Command::NewGame { players: None }),
        Some(n) => match n.parse::<usize>() {
            Ok(players) => Some(Command::NewGame { players: Some(players) }),
            Err(_) => {
                tracing::warn!(value = n, "invalid player count");
                None
            }
        },
    }
}

/// Parses `position <grid>`, capturing everything after the keyword.
fn parse_position(tokens: &[&str], full_line: &str) -> Option<Command> {
    if tokens.len() < 2 {
        tracing::warn!("malformed position: expected 'position <row>/<row>/...'");
        return None;
    }
    let grid = full_line
        .strip_prefix("position")
        .unwrap_or("")
        .trim()
        .to_string();
    Some(Command::Position { grid })
}

/// Parses `place <x> <y> <H|C|I>`.
fn parse_place(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 4 {
        tracing::warn!("malformed place: expected 'place <x> <y> <H|C|I>'");
        return None;
    }
    let pos = parse_pos(tokens[1], tokens[2])?;
    let mut letters = tokens[3].chars();
    match (letters.next().and_then(TileType::from_letter), letters.next()) {
        (Some(tile_type), None) => Some(Command::Place { pos, tile_type }),
        _ => {
            tracing::warn!(value = tokens[3], "unknown tile type");
            None
        }
    }
}

/// Parses `play <slot> <x> <y>`.
fn parse_play(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 4 {
        tracing::warn!("malformed play: expected 'play <slot> <x> <y>'");
        return None;
    }
    let slot = match tokens[1].parse::<usize>() {
        Ok(s) => s,
        Err(_) => {
            tracing::warn!(value = tokens[1], "invalid hand slot");
            return None;
        }
    };
    let pos = parse_pos(tokens[2], tokens[3])?;
    Some(Command::Play { slot, pos })
}

/// Parses `phase <setup|playing|gameover>`.
fn parse_phase(tokens: &[&str]) -> Option<Command> {
    let name = tokens.get(1).copied().unwrap_or("");
    match Phase::from_name(name) {
        Some(phase) => Some(Command::Phase { phase }),
        None => {
            tracing::warn!(value = name, "unknown phase");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_commands() {
        assert_eq!(parse_command("start"), Some(Command::Start));
        assert_eq!(parse_command("next"), Some(Command::Next));
        assert_eq!(parse_command("show"), Some(Command::Show));
        assert_eq!(parse_command("status"), Some(Command::Status));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("\t"), None);
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse_command("foobar"), None);
    }

    #[test]
    fn parse_newgame_with_and_without_count() {
        assert_eq!(parse_command("newgame"), Some(Command::NewGame { players: None }));
        assert_eq!(
            parse_command("newgame 4"),
            Some(Command::NewGame { players: Some(4) })
        );
        assert_eq!(parse_command("newgame many"), None);
    }

    #[test]
    fn parse_position_keeps_whole_grid() {
        let grid = "H C . . . . . ./I . . . . . . ./. . . . . . . ./. . . . . . . ./. . . . . . . ./. . . . . . . ./. . . . . . . ./. . . . . . . .";
        let cmd = parse_command(&format!("position {grid}")).unwrap();
        assert_eq!(cmd, Command::Position { grid: grid.to_string() });
    }

    #[test]
    fn parse_position_malformed_returns_none() {
        assert_eq!(parse_command("position"), None);
    }

    #[test]
    fn parse_place_command() {
        assert_eq!(
            parse_command("place 3 4 C"),
            Some(Command::Place { pos: Pos::new(3, 4), tile_type: TileType::Commerce })
        );
        assert_eq!(
            parse_command("place 0 0 i"),
            Some(Command::Place { pos: Pos::new(0, 0), tile_type: TileType::Industry })
        );
    }

    #[test]
    fn parse_place_accepts_off_board_coordinates() {
        assert_eq!(
            parse_command("place -1 9 H"),
            Some(Command::Place { pos: Pos::new(-1, 9), tile_type: TileType::Housing })
        );
    }

    #[test]
    fn parse_place_malformed_returns_none() {
        assert_eq!(parse_command("place 1 2"), None);
        assert_eq!(parse_command("place 1 2 X"), None);
        assert_eq!(parse_command("place 1 2 HC"), None);
        assert_eq!(parse_command("place a 2 H"), None);
    }

    #[test]
    fn parse_play_command() {
        assert_eq!(
            parse_command("play 2 5 6"),
            Some(Command::Play { slot: 2, pos: Pos::new(5, 6) })
        );
        assert_eq!(parse_command("play -1 5 6"), None);
        assert_eq!(parse_command("play 0 5"), None);
    }

    #[test]
    fn parse_positional_commands() {
        let pos = Pos::new(2, 7);
        assert_eq!(parse_command("form 2 7"), Some(Command::Form { pos }));
        assert_eq!(parse_command("agent 2 7"), Some(Command::Agent { pos }));
        assert_eq!(parse_command("hq 2 7"), Some(Command::Hq { pos }));
        assert_eq!(parse_command("contest 2 7"), Some(Command::Contest { pos }));
        assert_eq!(parse_command("hq 2"), None);
        assert_eq!(parse_command("agent 2 7 8"), None);
    }

    #[test]
    fn parse_phase_names() {
        for (name, phase) in [
            ("setup", Phase::Setup),
            ("playing", Phase::Playing),
            ("gameover", Phase::GameOver),
        ] {
            let cmd = parse_command(&format!("phase {name}")).unwrap();
            assert_eq!(cmd, Command::Phase { phase });
        }
        assert_eq!(parse_command("phase"), None);
        assert_eq!(parse_command("phase overtime"), None);
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(parse_command("  show  \r"), Some(Command::Show));
        assert_eq!(
            parse_command("\tform   1  1 "),
            Some(Command::Form { pos: Pos::new(1, 1) })
        );
    }
}
