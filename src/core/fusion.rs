//! Fusion engine - merge groups of same-colored adjacent pieces
//!
//! A merge group is two or more pieces whose occupied cells are mutually
//! reachable through 4-adjacency of same-colored occupancy. `fuse` replaces
//! a group with one fragment spanning the union of its cells; removal and
//! insertion happen inside one call so no intermediate state is observable.

use std::collections::HashSet;

use crate::core::board::Board;
use crate::core::flood::flood_fill;
use crate::types::PieceId;

/// Result of fusing one merge group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusionResult {
    pub fragment_id: PieceId,
    /// The pieces absorbed into the fragment, in group order
    pub absorbed: Vec<PieceId>,
    /// Duplicate cells dropped when the union was deduplicated
    pub eliminated_cells: u32,
}

/// Find all merge groups on the board. Pieces are seeded in insertion
/// order; each unvisited piece flood-fills same-colored occupancy across
/// piece boundaries, and the distinct pieces reached form a group when
/// there are at least two of them.
pub fn find_merge_groups(board: &Board) -> Vec<Vec<PieceId>> {
    let mut visited: HashSet<PieceId> = HashSet::new();
    let mut groups = Vec::new();

    for piece in board.pieces() {
        if visited.contains(&piece.id()) {
            continue;
        }

        let seed_color = piece.color();
        let cells = piece.occupied_cells();
        let Some(&start) = cells.first() else {
            continue;
        };

        let region = flood_fill(board.width(), board.height(), start, |x, y| {
            board
                .cell_owner(x, y)
                .and_then(|id| board.find(id))
                .is_some_and(|p| p.color() == seed_color)
        });

        // Distinct pieces in first-reached order
        let mut group: Vec<PieceId> = Vec::new();
        for (x, y) in &region.cells {
            if let Some(id) = board.cell_owner(*x, *y) {
                if !group.contains(&id) {
                    group.push(id);
                }
            }
        }

        visited.extend(group.iter().copied());
        if group.len() >= 2 {
            groups.push(group);
        }
    }

    groups
}

/// Fuse a merge group into a single fragment. The fragment's cells are the
/// deduplicated union of the group's cells, relative to the union's minimum
/// row/col; its color is the group's (uniform) color. Returns None when the
/// group has no live cells.
pub fn fuse(board: &mut Board, group: &[PieceId]) -> Option<FusionResult> {
    let mut all_cells: Vec<(i8, i8)> = Vec::new();
    let mut color = None;

    for &id in group {
        let piece = board.find(id)?;
        if color.is_none() {
            color = Some(piece.color());
        }
        all_cells.extend(piece.occupied_cells());
    }

    let color = color?;
    if all_cells.is_empty() {
        return None;
    }

    let min_x = all_cells.iter().map(|&(x, _)| x).min()?;
    let min_y = all_cells.iter().map(|&(_, y)| y).min()?;

    let mut seen = HashSet::new();
    let mut relative: Vec<(i8, i8)> = Vec::new();
    let mut eliminated = 0u32;
    for (x, y) in all_cells {
        if seen.insert((x, y)) {
            relative.push((x - min_x, y - min_y));
        } else {
            eliminated += 1;
        }
    }

    for &id in group {
        board.remove_piece(id);
    }
    let fragment_id = board.insert_fragment(color, min_x, min_y, relative);

    Some(FusionResult {
        fragment_id,
        absorbed: group.to_vec(),
        eliminated_cells: eliminated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_adjacent_singles_form_one_group() {
        let mut board = Board::new();
        let a = board.insert_template(PieceKind::Single, 0, 3, 3).unwrap();
        let b = board.insert_template(PieceKind::Single, 0, 3, 4).unwrap();

        let groups = find_merge_groups(&board);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
        assert!(groups[0].contains(&a));
        assert!(groups[0].contains(&b));
    }

    #[test]
    fn test_different_colors_do_not_group() {
        let mut board = Board::new();
        board.insert_template(PieceKind::Single, 0, 3, 3).unwrap();
        board.insert_template(PieceKind::T, 0, 4, 3).unwrap();

        assert!(find_merge_groups(&board).is_empty());
    }

    #[test]
    fn test_diagonal_is_not_adjacent() {
        let mut board = Board::new();
        board.insert_template(PieceKind::Single, 0, 3, 3).unwrap();
        board.insert_template(PieceKind::Single, 0, 4, 4).unwrap();

        assert!(find_merge_groups(&board).is_empty());
    }

    #[test]
    fn test_fuse_replaces_group_with_fragment() {
        let mut board = Board::new();
        let a = board.insert_template(PieceKind::Single, 0, 3, 3).unwrap();
        let b = board.insert_template(PieceKind::Single, 0, 4, 3).unwrap();

        let result = fuse(&mut board, &[a, b]).unwrap();
        assert_eq!(result.eliminated_cells, 0);
        assert_eq!(board.pieces().len(), 1);

        let fragment = board.find(result.fragment_id).unwrap();
        assert!(fragment.is_fragment());
        assert_eq!(fragment.cell_count(), 2);
        assert_eq!(fragment.origin(), (3, 3));
        assert_eq!(board.cell_owner(3, 3), Some(result.fragment_id));
        assert_eq!(board.cell_owner(4, 3), Some(result.fragment_id));
    }

    #[test]
    fn test_cross_kind_same_color_fusion() {
        // L2 and Single share a color by catalog design
        let mut board = Board::new();
        let a = board.insert_template(PieceKind::L2, 0, 1, 1).unwrap();
        let b = board.insert_template(PieceKind::Single, 0, 3, 2).unwrap();

        let groups = find_merge_groups(&board);
        assert_eq!(groups.len(), 1);

        let result = fuse(&mut board, &groups[0]).unwrap();
        assert_eq!(result.absorbed.len(), 2);
        assert_eq!(board.find(result.fragment_id).unwrap().cell_count(), 4);
        let _ = (a, b);
    }
}
