//! Read-only snapshots of the engine state for observers
//!
//! A snapshot is a detached copy: renderers and tests can hold it across
//! engine mutations without borrowing the live state. The grid uses 0 for
//! empty cells because piece ids start at 1.

use crate::core::piece::Piece;
use crate::core::spawn::QueuedPiece;
use crate::types::{PieceColor, PieceId, PieceKind};

/// One live piece as seen by observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceSnapshot {
    pub id: PieceId,
    /// Catalog kind; None for fragments
    pub kind: Option<PieceKind>,
    pub color: PieceColor,
    pub x: i8,
    pub y: i8,
    /// Rotation state; None for fragments
    pub rotation: Option<u8>,
    /// Absolute board cells
    pub cells: Vec<(i8, i8)>,
}

impl From<&Piece> for PieceSnapshot {
    fn from(piece: &Piece) -> Self {
        let (x, y) = piece.origin();
        let rotation = match piece {
            Piece::Template(t) => Some(t.rotation),
            Piece::Fragment(_) => None,
        };
        Self {
            id: piece.id(),
            kind: piece.kind(),
            color: piece.color(),
            x,
            y,
            rotation,
            cells: piece.occupied_cells(),
        }
    }
}

/// Full engine state at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major occupancy grid; 0 means empty
    pub grid: Vec<PieceId>,
    pub pieces: Vec<PieceSnapshot>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub busy: bool,
    pub game_over: bool,
    pub selected: Option<PieceId>,
    pub next_queue: Vec<QueuedPiece>,
}

impl GameSnapshot {
    /// Id occupying (x, y), 0 when empty or out of bounds
    pub fn cell(&self, x: i8, y: i8) -> PieceId {
        if x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8 {
            return 0;
        }
        self.grid[y as usize * self.width as usize + x as usize]
    }
}
