//! Core module - pure engine logic with no I/O
//!
//! Contains the board, piece model, connectivity analysis, fusion and
//! line-clear engines, consistency repair, and the chain controller.

pub mod board;
pub mod catalog;
pub mod chain;
pub mod flood;
pub mod fusion;
pub mod game_state;
pub mod line_clear;
pub mod piece;
pub mod repair;
pub mod rotate;
pub mod scoring;
pub mod snapshot;
pub mod spawn;

// Re-export commonly used types
pub use board::Board;
pub use catalog::{canonical_shape, rotate_matrix, shape_cells};
pub use chain::{run_chain, ChainReport};
pub use flood::{flood_fill, Region};
pub use fusion::{find_merge_groups, fuse, FusionResult};
pub use game_state::{GameConfig, GameState};
pub use line_clear::{clear_lines, find_complete_lines, ClearOutcome};
pub use piece::{FragmentPiece, Piece, TemplatePiece};
pub use repair::{repair, validate, ValidationReport};
pub use rotate::try_rotate_piece;
pub use scoring::ScoreKeeper;
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use spawn::{PieceQueue, QueuedPiece, SimpleRng};
