//! Rotation - center-of-mass-preserving rotation with wall kicks
//!
//! A rotation proposes the origin that keeps the piece's world centroid
//! fixed (rounded to the nearest cell) and, when that placement is blocked,
//! searches a small ordered set of kick offsets, nearest first. Fragments
//! never rotate. A full 4-step cycle snaps the piece back to its pre-cycle
//! origin when that position is still legal, undoing centroid-rounding
//! drift.

use crate::core::board::Board;
use crate::core::catalog;
use crate::core::piece::Piece;
use crate::types::{PieceId, ROTATION_STATES};

/// Kick offsets, each axis in {0, +/-1, +/-2}, ordered nearest first
const KICK_OFFSETS: [(i8, i8); 25] = [
    (0, 0),
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
    (0, -2),
    (0, 2),
    (-2, 0),
    (2, 0),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
    (-2, -2),
    (-2, 2),
    (2, -2),
    (2, 2),
];

fn centroid(cells: &[(i8, i8)]) -> (f64, f64) {
    let n = cells.len() as f64;
    let sum_x: i32 = cells.iter().map(|&(x, _)| i32::from(x)).sum();
    let sum_y: i32 = cells.iter().map(|&(_, y)| i32::from(y)).sum();
    (f64::from(sum_x) / n, f64::from(sum_y) / n)
}

/// Try to rotate a template piece one quarter turn clockwise. Returns true
/// and commits the new shape/position on success; on failure the piece
/// keeps its prior shape and position. Fragments are rejected
/// unconditionally.
pub fn try_rotate_piece(board: &mut Board, id: PieceId) -> bool {
    let (kind, rotation, x, y, cycle_origin) = match board.find(id) {
        Some(Piece::Template(t)) => (t.kind, t.rotation, t.x, t.y, t.cycle_origin),
        Some(Piece::Fragment(_)) | None => return false,
    };

    let old_cells: Vec<(i8, i8)> = catalog::shape_cells(kind, rotation)
        .into_iter()
        .map(|(dx, dy)| (x + dx, y + dy))
        .collect();
    if old_cells.is_empty() {
        return false;
    }
    let world_centroid = centroid(&old_cells);

    let new_rotation = (rotation + 1) % ROTATION_STATES;
    let new_rel = catalog::shape_cells(kind, new_rotation);
    let local_centroid = centroid(&new_rel);

    // Origin aligning the new shape's centroid with the old world centroid
    let base_x = (world_centroid.0 - local_centroid.0).round() as i8;
    let base_y = (world_centroid.1 - local_centroid.1).round() as i8;

    board.erase(id);

    let fits = |ox: i8, oy: i8, board: &Board| {
        new_rel
            .iter()
            .all(|&(dx, dy)| board.is_empty(ox + dx, oy + dy))
    };

    let mut landing = None;
    for (kx, ky) in KICK_OFFSETS {
        let ox = base_x + kx;
        let oy = base_y + ky;
        if fits(ox, oy, board) {
            landing = Some((ox, oy));
            break;
        }
    }

    let Some((mut ox, mut oy)) = landing else {
        // Every candidate failed: restore the prior placement
        board.place(id);
        return false;
    };

    // Completing the 4-step cycle snaps back to the pre-cycle origin when
    // that position is currently legal
    if new_rotation == 0 && (ox, oy) != cycle_origin && fits(cycle_origin.0, cycle_origin.1, board)
    {
        ox = cycle_origin.0;
        oy = cycle_origin.1;
    }

    if let Some(Piece::Template(t)) = board.find_mut(id) {
        if t.rotation == 0 {
            t.cycle_origin = (t.x, t.y);
        }
        t.rotation = new_rotation;
        t.x = ox;
        t.y = oy;
        if new_rotation == 0 {
            t.cycle_origin = (ox, oy);
        }
    }
    board.place(id);
    true
}
