//! Line-clear engine - detect and clear fully occupied rows and columns
//!
//! A clear pass zeroes the union of all complete lines, deletes or
//! fragments every piece that intersected them, re-splits fragments that
//! became disconnected, runs consistency repair, and applies gravity for
//! cleared rows (columns are not gravity-shifted). Chain reactions are
//! driven from the chain controller, not from here.

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::core::flood::{flood_fill, Region};
use crate::core::repair;
use crate::types::{Line, LineKind, PieceId, MAX_LINES};

/// Result of one clear pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClearOutcome {
    /// Distinct cells zeroed (row/column intersections count once)
    pub cells_cleared: u32,
    /// Pieces deleted because every cell they had was cleared
    pub removed: Vec<PieceId>,
    /// Fragments created from partially cleared pieces, after splitting
    pub fragments: Vec<PieceId>,
}

/// Detect every fully occupied row and column. Both axes are checked
/// independently; one pass may report rows and columns at the same time.
pub fn find_complete_lines(board: &Board) -> ArrayVec<Line, MAX_LINES> {
    let mut lines = ArrayVec::new();

    for y in 0..board.height() as i8 {
        if (0..board.width() as i8).all(|x| board.is_occupied(x, y)) {
            lines.push(Line::row(y as u8));
        }
    }

    for x in 0..board.width() as i8 {
        if (0..board.height() as i8).all(|y| board.is_occupied(x, y)) {
            lines.push(Line::col(x as u8));
        }
    }

    lines
}

/// Clear the given lines: zero their union, delete or fragment affected
/// pieces, split disconnected fragments, repair, and apply row gravity.
pub fn clear_lines(board: &mut Board, lines: &[Line]) -> ClearOutcome {
    let mut outcome = ClearOutcome::default();
    let width = board.width() as usize;
    let height = board.height() as usize;

    // 1. Mark the union of all listed line cells and zero them in the grid.
    let mut cleared = vec![false; width * height];
    for line in lines {
        match line.kind {
            LineKind::Row => {
                let y = line.index as i8;
                for x in 0..board.width() as i8 {
                    cleared[line.index as usize * width + x as usize] = true;
                    board.clear_cell(x, y);
                }
            }
            LineKind::Col => {
                let x = line.index as i8;
                for y in 0..board.height() as i8 {
                    cleared[y as usize * width + line.index as usize] = true;
                    board.clear_cell(x, y);
                }
            }
        }
    }
    outcome.cells_cleared = cleared.iter().filter(|&&c| c).count() as u32;

    let was_cleared = |x: i8, y: i8| -> bool {
        x >= 0
            && (x as usize) < width
            && y >= 0
            && (y as usize) < height
            && cleared[y as usize * width + x as usize]
    };

    // 2. Classify every piece: untouched, fully cleared, or partially
    //    cleared. Partial survivors become fragments at the original origin.
    let mut new_fragments: Vec<PieceId> = Vec::new();
    for id in board.piece_ids() {
        let (origin, cells, color) = match board.find(id) {
            Some(piece) => (piece.origin(), piece.occupied_cells(), piece.color()),
            None => continue,
        };

        let (hit, survivors): (Vec<(i8, i8)>, Vec<(i8, i8)>) =
            cells.into_iter().partition(|&(x, y)| was_cleared(x, y));

        if hit.is_empty() {
            continue;
        }

        board.remove_piece(id);
        if survivors.is_empty() {
            outcome.removed.push(id);
        } else {
            let relative: Vec<(i8, i8)> = survivors
                .iter()
                .map(|&(x, y)| (x - origin.0, y - origin.1))
                .collect();
            let fragment_id = board.insert_fragment(color, origin.0, origin.1, relative);
            new_fragments.push(fragment_id);
        }
    }

    // 3. A clear can bisect a piece; re-partition each new fragment into
    //    connected components and split when more than one is found.
    for id in new_fragments {
        let components = fragment_components(board, id);
        if components.len() <= 1 {
            outcome.fragments.push(id);
            continue;
        }

        let color = match board.find(id) {
            Some(piece) => piece.color(),
            None => continue,
        };
        board.remove_piece(id);
        for component in components {
            let split_id = board.insert_fragment(
                color,
                component.min_x,
                component.min_y,
                component.relative_cells(),
            );
            outcome.fragments.push(split_id);
        }
    }

    // 4. Repair before gravity moves anything.
    repair::repair(board);

    // 5. Gravity: pieces whose origin row is strictly above a cleared row
    //    drop one cell per cleared row, bottom-most cleared row first.
    let mut cleared_rows: Vec<i8> = lines
        .iter()
        .filter(|line| line.kind == LineKind::Row)
        .map(|line| line.index as i8)
        .collect();
    cleared_rows.sort_unstable_by(|a, b| b.cmp(a));

    for row in cleared_rows {
        for id in board.piece_ids() {
            let above = board
                .find(id)
                .is_some_and(|piece| piece.origin().1 < row);
            if above {
                board.erase(id);
                if let Some(piece) = board.find_mut(id) {
                    let (x, y) = piece.origin();
                    piece.set_origin(x, y + 1);
                }
                board.place(id);
            }
        }
    }

    outcome
}

/// Connected components among the cells the grid currently attributes to
/// one piece
fn fragment_components(board: &Board, id: PieceId) -> Vec<Region> {
    let cells = match board.find(id) {
        Some(piece) => piece.occupied_cells(),
        None => return Vec::new(),
    };

    let mut claimed = vec![false; board.width() as usize * board.height() as usize];
    let mut components = Vec::new();

    for (x, y) in cells {
        if board.cell_owner(x, y) != Some(id) {
            continue;
        }
        let idx = y as usize * board.width() as usize + x as usize;
        if claimed[idx] {
            continue;
        }

        let region = flood_fill(board.width(), board.height(), (x, y), |cx, cy| {
            board.cell_owner(cx, cy) == Some(id)
        });
        for &(cx, cy) in &region.cells {
            claimed[cy as usize * board.width() as usize + cx as usize] = true;
        }
        components.push(region);
    }

    components
}
