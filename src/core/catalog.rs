//! Piece catalog - canonical shapes, colors, and spawn weights
//!
//! The catalog is configuration data consumed by the engine core: each kind
//! maps to a canonical cell matrix (rows of 0/1), a palette color, and a
//! spawn weight. Shapes for non-zero rotation states are derived by rotating
//! the canonical matrix 90 degrees clockwise per state.

use crate::types::{PieceColor, PieceKind, ROTATION_STATES};

/// Canonical shape matrix for a kind, rows top to bottom
pub fn canonical_shape(kind: PieceKind) -> &'static [&'static [u8]] {
    match kind {
        PieceKind::I => &[&[1, 1, 1, 1]],
        PieceKind::O => &[&[1, 1], &[1, 1]],
        PieceKind::T => &[&[0, 1, 0], &[1, 1, 1]],
        PieceKind::S => &[&[0, 1, 1], &[1, 1, 0]],
        PieceKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
        PieceKind::L => &[&[1, 0, 0], &[1, 1, 1]],
        PieceKind::J => &[&[0, 0, 1], &[1, 1, 1]],
        PieceKind::I3 => &[&[1, 1, 1]],
        PieceKind::L2 => &[&[1, 0], &[1, 1]],
        PieceKind::Single => &[&[1]],
    }
}

/// Palette color of a kind. Colors are shared across kinds so that
/// cross-kind fusion happens by design.
pub fn color_of(kind: PieceKind) -> PieceColor {
    match kind {
        PieceKind::I | PieceKind::O => PieceColor::Ivory,
        PieceKind::T | PieceKind::S => PieceColor::Orange,
        PieceKind::Z | PieceKind::L => PieceColor::Ember,
        PieceKind::J | PieceKind::I3 => PieceColor::Amber,
        PieceKind::L2 | PieceKind::Single => PieceColor::Gold,
    }
}

/// Spawn weight of a kind, out of a total of 100
pub fn spawn_weight(kind: PieceKind) -> u32 {
    match kind {
        PieceKind::Single => 10,
        PieceKind::L2 => 10,
        PieceKind::I3 => 10,
        PieceKind::O => 15,
        PieceKind::T => 15,
        PieceKind::I => 15,
        PieceKind::S => 10,
        PieceKind::L => 7,
        PieceKind::J => 5,
        PieceKind::Z => 3,
    }
}

/// Rotate a shape matrix 90 degrees clockwise: `rotated[c][rows-1-r] = m[r][c]`
pub fn rotate_matrix<R: AsRef<[u8]>>(matrix: &[R]) -> Vec<Vec<u8>> {
    let rows = matrix.len();
    let cols = matrix.first().map_or(0, |r| r.as_ref().len());
    let mut rotated = vec![vec![0u8; rows]; cols];

    for (r, row) in matrix.iter().enumerate() {
        for (c, &v) in row.as_ref().iter().enumerate() {
            rotated[c][rows - 1 - r] = v;
        }
    }

    rotated
}

/// Shape matrix for a kind at the given rotation state (0-3)
pub fn shape_matrix(kind: PieceKind, rotation: u8) -> Vec<Vec<u8>> {
    let canonical = canonical_shape(kind);
    let mut shape: Vec<Vec<u8>> = canonical.iter().map(|row| row.to_vec()).collect();

    for _ in 0..(rotation % ROTATION_STATES) {
        shape = rotate_matrix(&shape);
    }

    shape
}

/// Occupied cell offsets (dx, dy) of a kind at the given rotation state
pub fn shape_cells(kind: PieceKind, rotation: u8) -> Vec<(i8, i8)> {
    let shape = shape_matrix(kind, rotation);
    let mut cells = Vec::new();

    for (r, row) in shape.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            if v != 0 {
                cells.push((c as i8, r as i8));
            }
        }
    }

    cells
}
