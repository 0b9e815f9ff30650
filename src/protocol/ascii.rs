//! ASCII grid encoding and decoding.
//!
//! A board is 8 rows of 8 whitespace-separated tokens. Rows are separated by
//! newlines or `/`, so a grid also fits on one command line. Row index is
//! `y`, token index within a row is `x`.
//!
//! Token grammar: `[tile][agents]*`
//!
//! - tile: `.` for empty, `H`/`C`/`I` for player 0, `h`/`c`/`i` for player 1,
//!   optionally followed by a digit `d` setting the owner to `d - 1`
//! - agents: `@<n>` for owner `n - 1`, optionally followed by `x<count>`
//!
//! Landmarks encode as `L<d>` (or `Q<d>` for a headquarters) on the anchor
//! and `+` on covered cells. Those tokens are output only.

use crate::board::{Board, Cell, PlayerId, Pos, TileType, BOARD_SIZE, MAX_PLAYERS};

/// Errors that can occur during grid parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AsciiError {
    #[error("expected 8 rows, got {0}")]
    WrongRowCount(usize),

    #[error("row {row}: expected 8 cells, got {count}")]
    WrongColumnCount { row: usize, count: usize },

    #[error("invalid cell token: '{0}'")]
    InvalidToken(String),

    #[error("invalid owner digit in '{0}'")]
    InvalidOwner(String),

    #[error("invalid agent count in '{0}'")]
    InvalidAgentCount(String),

    #[error("landmark cells cannot be loaded: '{0}'")]
    LandmarkUnsupported(String),
}

/// Maps an owner digit (`1`..=`4`) to a player.
fn parse_owner_digit(c: char, token: &str) -> Result<PlayerId, AsciiError> {
    match c.to_digit(10) {
        Some(d) if d >= 1 && d as usize <= MAX_PLAYERS => Ok(PlayerId((d - 1) as u8)),
        _ => Err(AsciiError::InvalidOwner(token.to_string())),
    }
}

/// Parses the tile part of a token. Returns the tile (if any) and the
/// unconsumed rest.
fn parse_tile_part(token: &str) -> Result<(Option<(TileType, PlayerId)>, &str), AsciiError> {
    let mut chars = token.chars();
    let first = chars
        .next()
        .ok_or_else(|| AsciiError::InvalidToken(token.to_string()))?;

    match first {
        '.' => Ok((None, &token[1..])),
        '@' => Ok((None, token)),
        'L' | 'Q' | '+' => Err(AsciiError::LandmarkUnsupported(token.to_string())),
        c => {
            let tile_type =
                TileType::from_letter(c).ok_or_else(|| AsciiError::InvalidToken(token.to_string()))?;
            let mut owner = if c.is_ascii_uppercase() { PlayerId(0) } else { PlayerId(1) };
            let mut rest = &token[1..];
            if let Some(d) = rest.chars().next().filter(|d| d.is_ascii_digit()) {
                owner = parse_owner_digit(d, token)?;
                rest = &rest[1..];
            }
            Ok((Some((tile_type, owner)), rest))
        }
    }
}

/// Parses the agent parts of a token into `(owner, count)` pairs.
fn parse_agent_parts(rest: &str, token: &str) -> Result<Vec<(PlayerId, u32)>, AsciiError> {
    let mut stacks = Vec::new();
    for part in rest.split('@').skip(1) {
        let mut chars = part.chars();
        let owner = match chars.next() {
            Some(d) => parse_owner_digit(d, token)?,
            None => return Err(AsciiError::InvalidToken(token.to_string())),
        };
        let tail = chars.as_str();
        let count = if tail.is_empty() {
            1
        } else {
            let digits = tail
                .strip_prefix('x')
                .ok_or_else(|| AsciiError::InvalidToken(token.to_string()))?;
            match digits.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(AsciiError::InvalidAgentCount(token.to_string())),
            }
        };
        stacks.push((owner, count));
    }
    Ok(stacks)
}

fn parse_token(token: &str, pos: Pos, board: &mut Board) -> Result<(), AsciiError> {
    let (tile, rest) = parse_tile_part(token)?;
    if !rest.is_empty() && !rest.starts_with('@') {
        return Err(AsciiError::InvalidToken(token.to_string()));
    }
    let stacks = parse_agent_parts(rest, token)?;

    // Positions come from the row/column loop, so they are always on the
    // board and the cell is still empty.
    if let Some((tile_type, owner)) = tile {
        board
            .set_tile(pos, tile_type, owner)
            .map_err(|_| AsciiError::InvalidToken(token.to_string()))?;
    }
    for (owner, count) in stacks {
        board
            .add_agents(pos, owner, count)
            .map_err(|_| AsciiError::InvalidToken(token.to_string()))?;
    }
    Ok(())
}

/// Parses an ASCII grid into a board.
pub fn parse_ascii(s: &str) -> Result<Board, AsciiError> {
    let rows: Vec<&str> = s
        .split(|c: char| c == '\n' || c == '/')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .collect();
    if rows.len() != BOARD_SIZE as usize {
        return Err(AsciiError::WrongRowCount(rows.len()));
    }

    let mut board = Board::empty();
    for (y, row) in rows.iter().enumerate() {
        let tokens: Vec<&str> = row.split_whitespace().collect();
        if tokens.len() != BOARD_SIZE as usize {
            return Err(AsciiError::WrongColumnCount { row: y, count: tokens.len() });
        }
        for (x, token) in tokens.iter().enumerate() {
            parse_token(token, Pos::new(x as i32, y as i32), &mut board)?;
        }
    }
    Ok(board)
}

/// Writes a tile letter with its owner marking.
fn push_owned_letter(out: &mut String, letter: char, owner: PlayerId) {
    match owner.0 {
        0 => out.push(letter.to_ascii_uppercase()),
        1 => out.push(letter.to_ascii_lowercase()),
        n => {
            out.push(letter.to_ascii_uppercase());
            out.push_str(&(n + 1).to_string());
        }
    }
}

fn encode_cell(board: &Board, pos: Pos) -> String {
    let mut token = String::new();
    match board.cell_at(pos).unwrap_or_default() {
        Cell::Empty => {}
        Cell::Standing(tile) => push_owned_letter(&mut token, tile.tile_type.letter(), tile.owner),
        Cell::LandmarkAnchor(_) => {
            if let Some(lm) = board.landmark_at(pos) {
                token.push(if lm.is_hq { 'Q' } else { 'L' });
                token.push_str(&(lm.owner.0 + 1).to_string());
            }
        }
        Cell::LandmarkCovered(_) => token.push('+'),
    }

    let mut stacks: Vec<_> = board.agents_at(pos).filter(|s| s.count > 0).collect();
    stacks.sort_by_key(|s| s.owner);
    for stack in stacks {
        token.push('@');
        token.push_str(&(stack.owner.0 + 1).to_string());
        if stack.count > 1 {
            token.push('x');
            token.push_str(&stack.count.to_string());
        }
    }

    if token.is_empty() {
        token.push('.');
    }
    token
}

/// Encodes a board as an ASCII grid, one row per line.
pub fn encode_ascii(board: &Board) -> String {
    (0..BOARD_SIZE)
        .map(|y| {
            (0..BOARD_SIZE)
                .map(|x| encode_cell(board, Pos::new(x, y)))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
