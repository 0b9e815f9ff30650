//! Trinity detection.
//!
//! A trinity is three same-owner standing tiles, one of each type, laid out
//! as a connected tromino under 4-adjacency: a straight line of three or an
//! "L". In both shapes one cell (the centre) touches the other two. The
//! detector is triggered per placement, so the new tile is always a member
//! and is either the centre or an arm:
//!
//! - as the centre, any two of its partner neighbours with complementary
//!   types complete a trinity;
//! - as an arm, a partner neighbour N1 is the centre and the third type must
//!   sit on one of N1's other neighbours.
//!
//! A "partner" is a standing tile of the same owner and a different type.

use crate::board::{Board, PlayerId, Pos, TileType};

/// A qualifying triple, labelled by type. `housing` is the landmark anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Trinity {
    pub housing: Pos,
    pub commerce: Pos,
    pub industry: Pos,
}

impl Trinity {
    /// Builds a trinity from three typed members in any order. Returns
    /// `None` unless the types are exactly one of each.
    pub fn from_members(members: [(Pos, TileType); 3]) -> Option<Trinity> {
        let find = |t: TileType| {
            let mut hits = members.iter().filter(|&&(_, mt)| mt == t);
            match (hits.next(), hits.next()) {
                (Some(&(p, _)), None) => Some(p),
                _ => None,
            }
        };
        Some(Trinity {
            housing: find(TileType::Housing)?,
            commerce: find(TileType::Commerce)?,
            industry: find(TileType::Industry)?,
        })
    }

    /// Member positions and types in Housing, Commerce, Industry order.
    pub fn members(&self) -> [(Pos, TileType); 3] {
        [
            (self.housing, TileType::Housing),
            (self.commerce, TileType::Commerce),
            (self.industry, TileType::Industry),
        ]
    }

    /// Member positions in Housing, Commerce, Industry order.
    pub fn positions(&self) -> [Pos; 3] {
        [self.housing, self.commerce, self.industry]
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.positions().contains(&pos)
    }
}

/// Returns true if the three positions are distinct, on the board, and form
/// a straight or L tromino.
pub fn is_tromino(cells: [Pos; 3]) -> bool {
    let [a, b, c] = cells;
    if a == b || b == c || a == c {
        return false;
    }
    if !cells.iter().all(|p| p.in_bounds()) {
        return false;
    }
    (a.is_adjacent(b) && a.is_adjacent(c))
        || (b.is_adjacent(a) && b.is_adjacent(c))
        || (c.is_adjacent(a) && c.is_adjacent(b))
}

/// Returns the partner type at `pos`: a standing tile owned by `owner` whose
/// type differs from `exclude`.
fn partner(board: &Board, pos: Pos, owner: PlayerId, exclude: TileType) -> Option<TileType> {
    board
        .tile_at(pos)
        .filter(|t| t.owner == owner && t.tile_type != exclude)
        .map(|t| t.tile_type)
}

/// Finds every trinity that the tile of `tile_type` owned by `owner` at
/// `pos` belongs to.
///
/// The result is deduplicated and sorted by (housing, commerce, industry)
/// in row-major order. It is empty when the tile completes nothing.
pub fn detect(board: &Board, pos: Pos, tile_type: TileType, owner: PlayerId) -> Vec<Trinity> {
    let mut found: Vec<Trinity> = Vec::new();
    if !pos.in_bounds() {
        return found;
    }

    let partners: Vec<(Pos, TileType)> = pos
        .neighbors()
        .filter_map(|n| partner(board, n, owner, tile_type).map(|t| (n, t)))
        .collect();

    // New tile as the centre.
    for (i, &(a, ta)) in partners.iter().enumerate() {
        for &(b, tb) in &partners[i + 1..] {
            if ta == tb {
                continue;
            }
            if let Some(t) = Trinity::from_members([(pos, tile_type), (a, ta), (b, tb)]) {
                found.push(t);
            }
        }
    }

    // New tile as an arm: the partner is the centre.
    for &(center, center_type) in &partners {
        let Some(third) = tile_type.third(center_type) else {
            continue;
        };
        for arm in center.neighbors().filter(|&n| n != pos) {
            let completes = board
                .tile_at(arm)
                .is_some_and(|t| t.owner == owner && t.tile_type == third);
            if !completes {
                continue;
            }
            if let Some(t) =
                Trinity::from_members([(pos, tile_type), (center, center_type), (arm, third)])
            {
                found.push(t);
            }
        }
    }

    found.sort_unstable();
    found.dedup();
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    const P0: PlayerId = PlayerId(0);
    const P1: PlayerId = PlayerId(1);

    fn board_with(tiles: &[(i32, i32, TileType, PlayerId)]) -> Board {
        let mut board = Board::empty();
        for &(x, y, t, o) in tiles {
            board.set_tile(Pos::new(x, y), t, o).unwrap();
        }
        board
    }

    use TileType::{Commerce as C, Housing as H, Industry as I};

    #[test]
    fn from_members_requires_one_of_each() {
        let t = Trinity::from_members([
            (Pos::new(1, 0), C),
            (Pos::new(0, 0), H),
            (Pos::new(2, 0), I),
        ])
        .unwrap();
        assert_eq!(t.housing, Pos::new(0, 0));
        assert_eq!(t.commerce, Pos::new(1, 0));
        assert_eq!(t.industry, Pos::new(2, 0));

        assert!(Trinity::from_members([
            (Pos::new(0, 0), H),
            (Pos::new(1, 0), H),
            (Pos::new(2, 0), I),
        ])
        .is_none());
    }

    #[test]
    fn tromino_shapes() {
        assert!(is_tromino([Pos::new(0, 0), Pos::new(1, 0), Pos::new(2, 0)]));
        assert!(is_tromino([Pos::new(0, 0), Pos::new(1, 0), Pos::new(0, 1)]));
        assert!(is_tromino([Pos::new(2, 2), Pos::new(2, 4), Pos::new(2, 3)]));
        // Gap.
        assert!(!is_tromino([Pos::new(0, 0), Pos::new(1, 0), Pos::new(3, 0)]));
        // Diagonal chain.
        assert!(!is_tromino([Pos::new(0, 0), Pos::new(1, 1), Pos::new(2, 2)]));
        // Repeated cell.
        assert!(!is_tromino([Pos::new(0, 0), Pos::new(1, 0), Pos::new(0, 0)]));
        // Off board.
        assert!(!is_tromino([Pos::new(-1, 0), Pos::new(0, 0), Pos::new(1, 0)]));
    }

    #[test]
    fn corner_l_detected_from_last_arm() {
        let board = board_with(&[(0, 0, H, P0), (1, 0, C, P0), (0, 1, I, P0)]);
        let found = detect(&board, Pos::new(0, 1), I, P0);
        assert_eq!(
            found,
            vec![Trinity {
                housing: Pos::new(0, 0),
                commerce: Pos::new(1, 0),
                industry: Pos::new(0, 1),
            }]
        );
    }

    #[test]
    fn line_detected_with_new_tile_as_centre() {
        let board = board_with(&[(3, 3, H, P1), (4, 3, I, P1), (5, 3, C, P1)]);
        let found = detect(&board, Pos::new(4, 3), I, P1);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].housing, Pos::new(3, 3));
    }

    #[test]
    fn vertical_line_detected_from_either_end() {
        let board = board_with(&[(6, 1, C, P0), (6, 2, I, P0), (6, 3, H, P0)]);
        for (pos, t) in [(Pos::new(6, 1), C), (Pos::new(6, 3), H)] {
            let found = detect(&board, pos, t, P0);
            assert_eq!(found.len(), 1, "from {pos}");
            assert_eq!(found[0].housing, Pos::new(6, 3));
        }
    }

    #[test]
    fn gap_is_not_detected() {
        let board = board_with(&[(0, 0, H, P0), (1, 0, C, P0), (3, 0, I, P0)]);
        assert!(detect(&board, Pos::new(3, 0), I, P0).is_empty());
        assert!(detect(&board, Pos::new(0, 0), H, P0).is_empty());
    }

    #[test]
    fn diagonal_is_not_detected() {
        let board = board_with(&[(0, 0, H, P0), (1, 1, C, P0), (2, 2, I, P0)]);
        assert!(detect(&board, Pos::new(1, 1), C, P0).is_empty());
        assert!(detect(&board, Pos::new(2, 2), I, P0).is_empty());
    }

    #[test]
    fn duplicate_types_are_not_detected() {
        let board = board_with(&[(0, 0, H, P0), (1, 0, C, P0), (2, 0, C, P0)]);
        assert!(detect(&board, Pos::new(2, 0), C, P0).is_empty());
        assert!(detect(&board, Pos::new(1, 0), C, P0).is_empty());
    }

    #[test]
    fn mixed_ownership_is_not_detected() {
        let board = board_with(&[(0, 0, H, P0), (0, 1, I, P0), (1, 0, C, P1)]);
        assert!(detect(&board, Pos::new(1, 0), C, P1).is_empty());
        assert!(detect(&board, Pos::new(0, 1), I, P0).is_empty());
    }

    #[test]
    fn two_types_are_not_enough() {
        let board = board_with(&[(0, 0, H, P0), (1, 0, C, P0)]);
        assert!(detect(&board, Pos::new(1, 0), C, P0).is_empty());
    }

    #[test]
    fn centre_with_two_options_reports_both() {
        // C at the centre, H above, I left and right.
        let board = board_with(&[
            (3, 2, H, P0),
            (2, 3, I, P0),
            (3, 3, C, P0),
            (4, 3, I, P0),
        ]);
        let found = detect(&board, Pos::new(3, 3), C, P0);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|t| t.housing == Pos::new(3, 2)));
        assert!(found.iter().all(|t| t.contains(Pos::new(3, 3))));
        assert!(found[0] < found[1]);
    }

    #[test]
    fn line_reported_once_with_extra_partner() {
        // A second Commerce next to the new Housing has no Industry in reach.
        let board = board_with(&[
            (1, 1, H, P0),
            (2, 1, C, P0),
            (3, 1, I, P0),
            (1, 2, C, P0),
        ]);
        let found = detect(&board, Pos::new(1, 1), H, P0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].commerce, Pos::new(2, 1));
        assert_eq!(found[0].industry, Pos::new(3, 1));
    }

    #[test]
    fn off_board_position_detects_nothing() {
        let board = board_with(&[(0, 0, H, P0), (1, 0, C, P0)]);
        assert!(detect(&board, Pos::new(-1, 0), I, P0).is_empty());
    }
}
