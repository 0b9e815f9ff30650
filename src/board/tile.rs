//! Tile types and the static tile catalog.
//!
//! The catalog is a compile-time lookup table indexed by the `TileType`
//! discriminant. It carries display properties and the draw-pool weight used
//! when dealing hands.

use std::sync::OnceLock;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::owner::PlayerId;

/// The number of distinct tile types.
pub const TILE_TYPE_COUNT: usize = 3;

/// A tile type. Exactly one of each is needed to form a landmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileType {
    Housing = 0,
    Commerce = 1,
    Industry = 2,
}

/// All tile types in catalog order.
pub const ALL_TILE_TYPES: [TileType; TILE_TYPE_COUNT] =
    [TileType::Housing, TileType::Commerce, TileType::Industry];

/// Fixed properties of a tile type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileInfo {
    pub name: &'static str,
    /// Uppercase letter used by the ASCII grid format.
    pub letter: char,
    /// Display colour as 0xRRGGBB.
    pub color: u32,
    /// Relative weight in the draw pool.
    pub weight: u32,
}

/// Catalog entries, indexed by `TileType as usize`.
pub static TILE_CATALOG: [TileInfo; TILE_TYPE_COUNT] = [
    TileInfo { name: "Housing", letter: 'H', color: 0x4caf50, weight: 4 },
    TileInfo { name: "Commerce", letter: 'C', color: 0x2196f3, weight: 3 },
    TileInfo { name: "Industry", letter: 'I', color: 0xff9800, weight: 3 },
];

impl TileType {
    /// Returns the catalog entry for this type.
    pub fn info(self) -> &'static TileInfo {
        &TILE_CATALOG[self as usize]
    }

    /// Returns the uppercase ASCII letter.
    pub fn letter(self) -> char {
        self.info().letter
    }

    /// Parses a tile type from its letter, case-insensitively.
    pub fn from_letter(c: char) -> Option<TileType> {
        match c.to_ascii_uppercase() {
            'H' => Some(TileType::Housing),
            'C' => Some(TileType::Commerce),
            'I' => Some(TileType::Industry),
            _ => None,
        }
    }

    /// Returns the type that completes `{self, other}` to the full set, or
    /// `None` when the two are equal.
    pub fn third(self, other: TileType) -> Option<TileType> {
        if self == other {
            return None;
        }
        ALL_TILE_TYPES.into_iter().find(|&t| t != self && t != other)
    }
}

impl std::fmt::Display for TileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.info().name)
    }
}

/// A standing tile: its type and owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub tile_type: TileType,
    pub owner: PlayerId,
}

impl Tile {
    pub const fn new(tile_type: TileType, owner: PlayerId) -> Self {
        Self { tile_type, owner }
    }
}

/// The draw distribution over `ALL_TILE_TYPES`, built once from the catalog.
fn draw_weights() -> &'static WeightedIndex<u32> {
    static WEIGHTS: OnceLock<WeightedIndex<u32>> = OnceLock::new();
    WEIGHTS.get_or_init(|| {
        // The catalog is a non-empty constant with positive weights.
        WeightedIndex::new(TILE_CATALOG.iter().map(|info| info.weight))
            .expect("tile catalog weights must be positive")
    })
}

/// Draws one tile type from the catalog's weighted pool.
pub fn draw_tile(rng: &mut impl Rng) -> TileType {
    ALL_TILE_TYPES[draw_weights().sample(rng)]
}
