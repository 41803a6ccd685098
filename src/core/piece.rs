//! Piece model - tagged union of template and fragment pieces
//!
//! A template piece derives its cells from the catalog shape of its kind
//! rotated by its rotation state. A fragment stores an explicit relative
//! cell set and never rotates. Exhaustive matching on the variant keeps the
//! two behaviors from silently falling through into each other.

use crate::core::catalog;
use crate::types::{PieceColor, PieceId, PieceKind};

/// Catalog-shaped piece with a rotation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePiece {
    pub id: PieceId,
    pub kind: PieceKind,
    /// Top-left anchor of the shape's bounding box
    pub x: i8,
    pub y: i8,
    /// Quarter turns clockwise from the canonical shape (0-3)
    pub rotation: u8,
    /// Origin the last time the rotation state was 0; rotating back to
    /// state 0 snaps here when legal, correcting centroid-rounding drift
    pub cycle_origin: (i8, i8),
}

/// Irregular piece produced by fusion or partial clearing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentPiece {
    pub id: PieceId,
    pub x: i8,
    pub y: i8,
    pub color: PieceColor,
    /// Relative (dx, dy) offsets from the origin
    pub cells: Vec<(i8, i8)>,
}

/// A live piece owned by the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Template(TemplatePiece),
    Fragment(FragmentPiece),
}

impl Piece {
    pub fn id(&self) -> PieceId {
        match self {
            Piece::Template(t) => t.id,
            Piece::Fragment(f) => f.id,
        }
    }

    pub fn color(&self) -> PieceColor {
        match self {
            Piece::Template(t) => catalog::color_of(t.kind),
            Piece::Fragment(f) => f.color,
        }
    }

    pub fn origin(&self) -> (i8, i8) {
        match self {
            Piece::Template(t) => (t.x, t.y),
            Piece::Fragment(f) => (f.x, f.y),
        }
    }

    pub fn set_origin(&mut self, x: i8, y: i8) {
        match self {
            Piece::Template(t) => {
                t.x = x;
                t.y = y;
            }
            Piece::Fragment(f) => {
                f.x = x;
                f.y = y;
            }
        }
    }

    /// Catalog kind, if this is a template piece
    pub fn kind(&self) -> Option<PieceKind> {
        match self {
            Piece::Template(t) => Some(t.kind),
            Piece::Fragment(_) => None,
        }
    }

    pub fn is_fragment(&self) -> bool {
        matches!(self, Piece::Fragment(_))
    }

    /// Cell offsets relative to the origin
    pub fn relative_cells(&self) -> Vec<(i8, i8)> {
        match self {
            Piece::Template(t) => catalog::shape_cells(t.kind, t.rotation),
            Piece::Fragment(f) => f.cells.clone(),
        }
    }

    /// Absolute board cells occupied by this piece
    pub fn occupied_cells(&self) -> Vec<(i8, i8)> {
        let (ox, oy) = self.origin();
        self.relative_cells()
            .into_iter()
            .map(|(dx, dy)| (ox + dx, oy + dy))
            .collect()
    }

    pub fn cell_count(&self) -> usize {
        match self {
            Piece::Template(t) => catalog::shape_cells(t.kind, t.rotation).len(),
            Piece::Fragment(f) => f.cells.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(kind: PieceKind, x: i8, y: i8, rotation: u8) -> Piece {
        Piece::Template(TemplatePiece {
            id: 1,
            kind,
            x,
            y,
            rotation,
            cycle_origin: (x, y),
        })
    }

    #[test]
    fn test_template_cells_follow_rotation() {
        let piece = template(PieceKind::I, 2, 3, 0);
        assert_eq!(piece.occupied_cells(), vec![(2, 3), (3, 3), (4, 3), (5, 3)]);

        let piece = template(PieceKind::I, 2, 3, 1);
        assert_eq!(piece.occupied_cells(), vec![(2, 3), (2, 4), (2, 5), (2, 6)]);
    }

    #[test]
    fn test_fragment_cells_are_stored() {
        let piece = Piece::Fragment(FragmentPiece {
            id: 7,
            x: 1,
            y: 2,
            color: PieceColor::Gold,
            cells: vec![(0, 0), (1, 0), (1, 1)],
        });
        assert_eq!(piece.occupied_cells(), vec![(1, 2), (2, 2), (2, 3)]);
        assert_eq!(piece.cell_count(), 3);
        assert!(piece.is_fragment());
        assert_eq!(piece.kind(), None);
    }
}
