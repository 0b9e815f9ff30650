//! Board representation and game-state types.
//!
//! Contains the tile catalog, coordinates, the cell grid with its landmark
//! list and agent overlay.

pub mod landmark;
pub mod owner;
pub mod position;
pub mod state;
pub mod tile;

pub use landmark::{AgentStack, Landmark, LandmarkId};
pub use owner::{PlayerId, MAX_PLAYERS, MIN_PLAYERS};
pub use position::{all_positions, Pos, BOARD_SIZE, CELL_COUNT};
pub use state::{Board, Cell, Phase};
pub use tile::{draw_tile, Tile, TileInfo, TileType, ALL_TILE_TYPES, TILE_CATALOG};
