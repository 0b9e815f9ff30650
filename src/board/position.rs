//! Grid coordinates and orthogonal adjacency.
//!
//! The board is a fixed 8×8 grid. `x` is the column, `y` the row, both
//! 0-based from the top-left corner. Positions may be constructed out of
//! range so that callers can be told *why* a request is invalid; every board
//! accessor checks `in_bounds` first.

/// Width and height of the board.
pub const BOARD_SIZE: i32 = 8;

/// Number of cells on the board.
pub const CELL_COUNT: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

/// Unit offsets for the four orthogonal directions: up, right, down, left.
const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// A cell coordinate.
///
/// Ordering is row-major (`y` first, then `x`), which gives detection
/// results and encodings a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    /// Returns true if the position lies on the board.
    pub const fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < BOARD_SIZE && self.y >= 0 && self.y < BOARD_SIZE
    }

    /// Returns the row-major cell index, or `None` when out of range.
    pub const fn index(self) -> Option<usize> {
        if self.in_bounds() {
            Some((self.y * BOARD_SIZE + self.x) as usize)
        } else {
            None
        }
    }

    /// Inverse of `index`.
    pub const fn from_index(idx: usize) -> Pos {
        let idx = idx as i32;
        Pos::new(idx % BOARD_SIZE, idx / BOARD_SIZE)
    }

    /// Iterates over the in-bounds orthogonal neighbours.
    pub fn neighbors(self) -> impl Iterator<Item = Pos> {
        ORTHOGONAL
            .into_iter()
            .map(move |(dx, dy)| Pos::new(self.x + dx, self.y + dy))
            .filter(|p| p.in_bounds())
    }

    /// Returns true if `other` shares an edge with `self`.
    pub const fn is_adjacent(self, other: Pos) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx + dy == 1
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Iterates over every board position in row-major order.
pub fn all_positions() -> impl Iterator<Item = Pos> {
    (0..CELL_COUNT).map(Pos::from_index)
}
