//! Board module - owns the occupancy grid and every live piece
//!
//! The grid is a flat row-major array of cells; each cell is empty or holds
//! the id of exactly one live piece. The board is the single owner of both
//! the grid and the piece list and is the only component that writes either,
//! which is what keeps the grid/piece invariant enforceable at one seam.
//! Coordinates: (x, y) with x in 0..width (left to right) and y in
//! 0..height (top to bottom).

use anyhow::{bail, Result};

use crate::core::piece::{FragmentPiece, Piece, TemplatePiece};
use crate::types::{
    Cell, PieceColor, PieceId, PieceKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, MAX_BOARD_DIM,
};

/// The game board with its live pieces
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    grid: Vec<Cell>,
    /// Live pieces in insertion order
    pieces: Vec<Piece>,
    /// Next id to allocate; ids start at 1 so 0 can mean "empty"
    next_id: PieceId,
}

impl Board {
    /// Create an empty board with the default 7x7 dimensions
    pub fn new() -> Self {
        let width = DEFAULT_BOARD_WIDTH;
        let height = DEFAULT_BOARD_HEIGHT;
        Self {
            width,
            height,
            grid: vec![None; width as usize * height as usize],
            pieces: Vec::new(),
            next_id: 1,
        }
    }

    /// Create an empty board with explicit dimensions
    pub fn with_size(width: u8, height: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            bail!("board dimensions must be positive: {}x{}", width, height);
        }
        if width > MAX_BOARD_DIM || height > MAX_BOARD_DIM {
            bail!(
                "board dimensions exceed {}: {}x{}",
                MAX_BOARD_DIM,
                width,
                height
            );
        }
        Ok(Self {
            width,
            height,
            grid: vec![None; width as usize * height as usize],
            pieces: Vec::new(),
            next_id: 1,
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y). Returns None if out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.grid[idx])
    }

    /// Id of the piece occupying (x, y), if any
    pub fn cell_owner(&self, x: i8, y: i8) -> Option<PieceId> {
        self.get(x, y).flatten()
    }

    /// Check if position is within bounds and empty
    pub fn is_empty(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn in_bounds(&self, x: i8, y: i8) -> bool {
        self.index(x, y).is_some()
    }

    /// Check that every listed absolute cell is in bounds and empty
    pub fn can_place_cells(&self, cells: &[(i8, i8)]) -> bool {
        cells.iter().all(|&(x, y)| self.is_empty(x, y))
    }

    /// Check whether `piece` could occupy the board with its origin at (x, y).
    /// The piece's current cells count as occupied; callers moving a placed
    /// piece erase it first (see `move_piece_by`).
    pub fn can_place(&self, piece: &Piece, x: i8, y: i8) -> bool {
        piece
            .relative_cells()
            .iter()
            .all(|&(dx, dy)| self.is_empty(x + dx, y + dy))
    }

    /// Write the piece's id into every cell it occupies
    pub fn place(&mut self, id: PieceId) {
        let cells = match self.find(id) {
            Some(piece) => piece.occupied_cells(),
            None => return,
        };
        for (x, y) in cells {
            if let Some(idx) = self.index(x, y) {
                self.grid[idx] = Some(id);
            }
        }
    }

    /// Erase the piece from the grid, touching only cells that hold its own
    /// id (stale overlapping writes are left for repair)
    pub fn erase(&mut self, id: PieceId) {
        let cells = match self.find(id) {
            Some(piece) => piece.occupied_cells(),
            None => return,
        };
        for (x, y) in cells {
            if let Some(idx) = self.index(x, y) {
                if self.grid[idx] == Some(id) {
                    self.grid[idx] = None;
                }
            }
        }
    }

    /// Place a new template piece if every cell it needs is free.
    /// Returns the allocated id, or None without mutation when blocked.
    pub fn insert_template(
        &mut self,
        kind: PieceKind,
        rotation: u8,
        x: i8,
        y: i8,
    ) -> Option<PieceId> {
        let id = self.next_id;
        let piece = Piece::Template(TemplatePiece {
            id,
            kind,
            x,
            y,
            rotation: rotation % crate::types::ROTATION_STATES,
            cycle_origin: (x, y),
        });

        if !self.can_place(&piece, x, y) {
            return None;
        }

        self.next_id += 1;
        self.pieces.push(piece);
        self.place(id);
        Some(id)
    }

    /// Insert a fragment and write it onto the grid. Used by fusion and
    /// fragment splitting, where the target cells were just vacated.
    pub fn insert_fragment(
        &mut self,
        color: PieceColor,
        x: i8,
        y: i8,
        cells: Vec<(i8, i8)>,
    ) -> PieceId {
        let id = self.next_id;
        self.next_id += 1;
        self.pieces.push(Piece::Fragment(FragmentPiece {
            id,
            x,
            y,
            color,
            cells,
        }));
        self.place(id);
        id
    }

    /// Remove a piece from the board: erase its cells, drop it from the list
    pub fn remove_piece(&mut self, id: PieceId) -> Option<Piece> {
        self.erase(id);
        let idx = self.pieces.iter().position(|p| p.id() == id)?;
        Some(self.pieces.remove(idx))
    }

    /// Translate a piece by (dx, dy): erase, test, and either commit or roll
    /// back to the original position. The piece is never left off-grid.
    pub fn move_piece_by(&mut self, id: PieceId, dx: i8, dy: i8) -> bool {
        let (ox, oy, rel) = match self.find(id) {
            Some(piece) => {
                let (ox, oy) = piece.origin();
                (ox, oy, piece.relative_cells())
            }
            None => return false,
        };

        self.erase(id);

        let target: Vec<(i8, i8)> = rel
            .iter()
            .map(|&(cx, cy)| (ox + dx + cx, oy + dy + cy))
            .collect();

        if self.can_place_cells(&target) {
            if let Some(piece) = self.find_mut(id) {
                piece.set_origin(ox + dx, oy + dy);
            }
            self.place(id);
            true
        } else {
            self.place(id);
            false
        }
    }

    /// Look up a piece by id
    pub fn find(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    pub(crate) fn find_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id() == id)
    }

    /// Live pieces in insertion order
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Ids of live pieces in insertion order
    pub fn piece_ids(&self) -> Vec<PieceId> {
        self.pieces.iter().map(|p| p.id()).collect()
    }

    /// Number of occupied grid cells
    pub fn occupied_cell_count(&self) -> u32 {
        self.grid.iter().filter(|cell| cell.is_some()).count() as u32
    }

    /// The raw grid, row-major
    pub fn grid_cells(&self) -> &[Cell] {
        &self.grid
    }

    /// Zero one grid cell without touching the piece list
    pub(crate) fn clear_cell(&mut self, x: i8, y: i8) {
        if let Some(idx) = self.index(x, y) {
            self.grid[idx] = None;
        }
    }

    /// Zero the whole grid and re-place every tracked piece. This is the
    /// recovery path used by consistency repair.
    pub fn rebuild_grid(&mut self) {
        for cell in &mut self.grid {
            *cell = None;
        }
        for id in self.piece_ids() {
            self.place(id);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(6, 0), Some(6));
        assert_eq!(board.index(0, 1), Some(7));
        assert_eq!(board.index(6, 6), Some(48));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(7, 0), None);
        assert_eq!(board.index(0, 7), None);
    }

    #[test]
    fn test_with_size_validation() {
        assert!(Board::with_size(8, 8).is_ok());
        assert!(Board::with_size(0, 7).is_err());
        assert!(Board::with_size(7, 17).is_err());
    }

    #[test]
    fn test_insert_template_writes_grid() {
        let mut board = Board::new();
        let id = board.insert_template(PieceKind::O, 0, 2, 3).unwrap();

        assert_eq!(board.cell_owner(2, 3), Some(id));
        assert_eq!(board.cell_owner(3, 3), Some(id));
        assert_eq!(board.cell_owner(2, 4), Some(id));
        assert_eq!(board.cell_owner(3, 4), Some(id));
        assert_eq!(board.occupied_cell_count(), 4);
    }

    #[test]
    fn test_insert_blocked_is_noop() {
        let mut board = Board::new();
        board.insert_template(PieceKind::O, 0, 2, 3).unwrap();

        // Overlapping placement is rejected without mutation
        assert!(board.insert_template(PieceKind::Single, 0, 2, 3).is_none());
        assert_eq!(board.pieces().len(), 1);
        assert_eq!(board.occupied_cell_count(), 4);

        // Out of bounds is rejected too
        assert!(board.insert_template(PieceKind::I, 0, 5, 0).is_none());
    }

    #[test]
    fn test_erase_keeps_foreign_cells() {
        let mut board = Board::new();
        let a = board.insert_template(PieceKind::Single, 0, 1, 1).unwrap();
        let b = board.insert_template(PieceKind::Single, 0, 2, 1).unwrap();

        // Simulate a stale overlapping write: b's cell claims to be a's
        let idx = board.index(1, 1).unwrap();
        board.grid[idx] = Some(b);
        board.erase(a);

        // a erased nothing because the cell no longer holds its id
        assert_eq!(board.cell_owner(1, 1), Some(b));
        assert_eq!(board.cell_owner(2, 1), Some(b));
    }

    #[test]
    fn test_move_piece_commit_and_rollback() {
        let mut board = Board::new();
        let id = board.insert_template(PieceKind::Single, 0, 0, 0).unwrap();
        let blocker = board.insert_template(PieceKind::Single, 0, 2, 0).unwrap();

        assert!(board.move_piece_by(id, 1, 0));
        assert_eq!(board.find(id).unwrap().origin(), (1, 0));
        assert_eq!(board.cell_owner(1, 0), Some(id));
        assert_eq!(board.cell_owner(0, 0), None);

        // Blocked move rolls back, leaving the grid unchanged
        assert!(!board.move_piece_by(id, 1, 0));
        assert_eq!(board.find(id).unwrap().origin(), (1, 0));
        assert_eq!(board.cell_owner(1, 0), Some(id));
        assert_eq!(board.cell_owner(2, 0), Some(blocker));

        // Off-board move rolls back too
        assert!(!board.move_piece_by(id, 0, -1));
        assert_eq!(board.cell_owner(1, 0), Some(id));
    }

    #[test]
    fn test_remove_piece() {
        let mut board = Board::new();
        let id = board.insert_template(PieceKind::L2, 0, 4, 4).unwrap();
        let removed = board.remove_piece(id).unwrap();

        assert_eq!(removed.id(), id);
        assert!(board.pieces().is_empty());
        assert_eq!(board.occupied_cell_count(), 0);
        assert!(board.remove_piece(id).is_none());
    }

    #[test]
    fn test_rebuild_grid_restores_cells() {
        let mut board = Board::new();
        let id = board.insert_template(PieceKind::I3, 0, 1, 1).unwrap();

        board.clear_cell(2, 1);
        assert_eq!(board.occupied_cell_count(), 2);

        board.rebuild_grid();
        assert_eq!(board.occupied_cell_count(), 3);
        assert_eq!(board.cell_owner(2, 1), Some(id));
    }
}
