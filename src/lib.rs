//! fusion-grid: a turn-based grid puzzle simulation engine.
//!
//! Players place polyomino pieces on a bounded board; same-colored adjacent
//! pieces fuse into irregular fragments; fully occupied rows and columns
//! clear, splitting fragments and shifting pieces down. The engine owns the
//! authoritative board state and exposes commands, queries, and a drainable
//! event stream; rendering and input live entirely outside this crate.

pub mod core;
pub mod types;
