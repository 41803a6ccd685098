//! Consistency repair - detect and correct grid/piece mismatches
//!
//! Orphan cells (grid cells naming a piece that no longer exists) and ghost
//! pieces (pieces with no cells on the grid) are only reachable through a
//! bug elsewhere; repair restores the invariant instead of surfacing an
//! error. Rebuilding the grid from the piece list is the single source of
//! truth recovery path and is idempotent.

use std::collections::HashSet;

use crate::core::board::Board;
use crate::types::PieceId;

/// Cross-check of grid occupancy against the piece list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub grid_cell_count: u32,
    pub piece_cell_count: u32,
    /// Ids present in the grid but absent from the piece list
    pub orphan_ids: Vec<PieceId>,
    /// Ids present in the piece list but absent from the grid
    pub ghost_ids: Vec<PieceId>,
}

impl ValidationReport {
    pub fn is_consistent(&self) -> bool {
        self.grid_cell_count == self.piece_cell_count
            && self.orphan_ids.is_empty()
            && self.ghost_ids.is_empty()
    }
}

/// Compare the grid against the piece list without mutating either
pub fn validate(board: &Board) -> ValidationReport {
    let mut grid_cell_count = 0u32;
    let mut grid_ids: HashSet<PieceId> = HashSet::new();
    for cell in board.grid_cells() {
        if let Some(id) = cell {
            grid_cell_count += 1;
            grid_ids.insert(*id);
        }
    }

    let mut piece_cell_count = 0u32;
    let mut piece_ids: HashSet<PieceId> = HashSet::new();
    for piece in board.pieces() {
        piece_cell_count += piece.cell_count() as u32;
        piece_ids.insert(piece.id());
    }

    let mut orphan_ids: Vec<PieceId> = grid_ids.difference(&piece_ids).copied().collect();
    let mut ghost_ids: Vec<PieceId> = piece_ids.difference(&grid_ids).copied().collect();
    orphan_ids.sort_unstable();
    ghost_ids.sort_unstable();

    ValidationReport {
        grid_cell_count,
        piece_cell_count,
        orphan_ids,
        ghost_ids,
    }
}

/// Restore the grid/piece invariant: zero every orphan cell, then rebuild
/// the entire grid by re-placing every tracked piece
pub fn repair(board: &mut Board) {
    let report = validate(board);

    if !report.orphan_ids.is_empty() {
        let orphans: HashSet<PieceId> = report.orphan_ids.iter().copied().collect();
        for y in 0..board.height() as i8 {
            for x in 0..board.width() as i8 {
                if board
                    .cell_owner(x, y)
                    .is_some_and(|id| orphans.contains(&id))
                {
                    board.clear_cell(x, y);
                }
            }
        }
    }

    board.rebuild_grid();
}
