//! Core types shared across the engine
//! This module contains pure data types with no external dependencies

/// Default board dimensions (the 7x7 configuration)
pub const DEFAULT_BOARD_WIDTH: u8 = 7;
pub const DEFAULT_BOARD_HEIGHT: u8 = 7;

/// Upper bound on either board dimension
pub const MAX_BOARD_DIM: u8 = 16;

/// Maximum number of simultaneously complete lines (rows + columns)
pub const MAX_LINES: usize = 2 * MAX_BOARD_DIM as usize;

/// Score tuning
pub const MOVE_COST: i32 = 1;
pub const ROTATE_COST: i32 = 1;
pub const POINTS_PER_CLEARED_CELL: i32 = 1;
pub const POINTS_PER_FUSED_CELL: i32 = 1;
pub const DEFAULT_INITIAL_SCORE: u32 = 100;

/// Level advances once per this many cleared lines
pub const LINES_PER_LEVEL: u32 = 5;

/// Rotation states per template piece (quarter turns clockwise)
pub const ROTATION_STATES: u8 = 4;

/// Unique identifier of a live piece. Zero is never allocated; the grid
/// snapshot uses 0 for empty cells.
pub type PieceId = u32;

/// Cell on the grid (None = empty, Some = owned by that piece)
pub type Cell = Option<PieceId>;

/// Catalog piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
    I3,
    L2,
    Single,
}

impl PieceKind {
    /// All kinds, in catalog order
    pub const ALL: [PieceKind; 10] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::I3,
        PieceKind::L2,
        PieceKind::Single,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "i3" => Some(PieceKind::I3),
            "l2" => Some(PieceKind::L2),
            "single" => Some(PieceKind::Single),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::I3 => "i3",
            PieceKind::L2 => "l2",
            PieceKind::Single => "single",
        }
    }
}

/// Piece color palette. Several kinds share a color by design; fusion
/// eligibility is decided by color, not kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    Ivory,
    Orange,
    Ember,
    Amber,
    Gold,
}

impl PieceColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceColor::Ivory => "ivory",
            PieceColor::Orange => "orange",
            PieceColor::Ember => "ember",
            PieceColor::Amber => "amber",
            PieceColor::Gold => "gold",
        }
    }
}

/// Axis of a complete line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Row,
    Col,
}

/// One fully occupied row or column at detection time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    pub kind: LineKind,
    pub index: u8,
}

impl Line {
    pub fn row(index: u8) -> Self {
        Self {
            kind: LineKind::Row,
            index,
        }
    }

    pub fn col(index: u8) -> Self {
        Self {
            kind: LineKind::Col,
            index,
        }
    }
}

/// Why a score delta was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreReason {
    Move,
    Rotate,
    LineClear,
    Fusion,
}

impl ScoreReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreReason::Move => "move",
            ScoreReason::Rotate => "rotate",
            ScoreReason::LineClear => "line_clear",
            ScoreReason::Fusion => "fusion",
        }
    }
}

/// Terminal condition that ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    ScoreExhausted,
    NoPlacement,
}

impl GameOverReason {
    /// Human-readable reason surfaced with the game-over event
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverReason::ScoreExhausted => "insufficient score for the attempted action",
            GameOverReason::NoPlacement => "no legal placement for the next piece",
        }
    }
}

/// Result of issuing a command to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command committed and any chain reaction has settled
    Committed,
    /// Illegal operation; state unchanged, no score cost
    Rejected,
    /// A chain reaction is in progress (or the game is over); retry later
    Blocked,
}

impl CommandOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, CommandOutcome::Committed)
    }
}

/// Events produced for rendering/UI/audio observers, drained via
/// `GameState::drain_events`.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A merge group was fused into one fragment
    PiecesFused {
        pieces: Vec<PieceId>,
        result: PieceId,
        color: PieceColor,
    },
    /// Complete lines were cleared
    LinesCleared {
        lines: Vec<Line>,
        cells_cleared: u32,
    },
    /// The score changed; `score` is the value after applying `delta`
    ScoreChanged {
        delta: i32,
        reason: ScoreReason,
        score: u32,
    },
    /// The game ended
    GameOver { reason: GameOverReason },
    /// The chain reaction finished; input may resume
    Settled,
}
