//! Game state module - the command facade over the engine core
//!
//! This module ties together the board, the spawn queue, scoring, and the
//! chain controller behind a small command API. Every command returns a
//! `CommandOutcome`; illegal operations are rejected without mutation or
//! score cost, and all commands are refused while a chain reaction is in
//! flight or after game over. Observers read state through snapshots and
//! drain the event list between commands.

use anyhow::Result;

use crate::core::board::Board;
use crate::core::catalog;
use crate::core::chain;
use crate::core::rotate::try_rotate_piece;
use crate::core::scoring::ScoreKeeper;
use crate::core::snapshot::{GameSnapshot, PieceSnapshot};
use crate::core::spawn::{PieceQueue, QueuedPiece, SimpleRng};
use crate::types::{
    CommandOutcome, GameEvent, GameOverReason, PieceId, PieceKind, ScoreReason,
    DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_INITIAL_SCORE, MOVE_COST, ROTATE_COST,
    ROTATION_STATES,
};

/// Engine construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    pub initial_score: u32,
    /// Seed for piece drawing and spawn placement
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            initial_score: DEFAULT_INITIAL_SCORE,
            seed: 1,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    queue: PieceQueue,
    /// Spawn-placement randomness, independent of the draw stream
    rng: SimpleRng,
    score: ScoreKeeper,
    selected: Option<PieceId>,
    /// True while a chain reaction is resolving
    busy: bool,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game with the default 7x7 configuration
    pub fn new(seed: u32) -> Self {
        let config = GameConfig {
            seed,
            ..GameConfig::default()
        };
        // Default dimensions are always valid
        Self::with_config(config).unwrap_or_else(|_| unreachable!())
    }

    /// Create a game from an explicit configuration
    pub fn with_config(config: GameConfig) -> Result<Self> {
        Ok(Self {
            board: Board::with_size(config.width, config.height)?,
            queue: PieceQueue::new(config.seed),
            rng: SimpleRng::new(config.seed.wrapping_add(1)),
            score: ScoreKeeper::new(config.initial_score),
            selected: None,
            busy: false,
            events: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn level(&self) -> u32 {
        self.score.level()
    }

    pub fn lines_cleared(&self) -> u32 {
        self.score.lines()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_game_over(&self) -> bool {
        self.score.is_game_over()
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.score.game_over()
    }

    pub fn selected(&self) -> Option<PieceId> {
        self.selected
    }

    /// Upcoming pieces, soonest first
    pub fn next_queue(&self) -> Vec<QueuedPiece> {
        self.queue.preview()
    }

    /// Take all events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Detached copy of the full state for observers
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            grid: self
                .board
                .grid_cells()
                .iter()
                .map(|cell| cell.unwrap_or(0))
                .collect(),
            pieces: self.board.pieces().iter().map(PieceSnapshot::from).collect(),
            score: self.score.score(),
            level: self.score.level(),
            lines: self.score.lines(),
            busy: self.busy,
            game_over: self.score.is_game_over(),
            selected: self.selected,
            next_queue: self.queue.preview(),
        }
    }

    /// Place a template piece at an explicit position and select it.
    /// Free of score cost; the placement is not chained until confirmed.
    pub fn request_placement(
        &mut self,
        kind: PieceKind,
        rotation: u8,
        x: i8,
        y: i8,
    ) -> CommandOutcome {
        if let Some(blocked) = self.guard() {
            return blocked;
        }
        match self.board.insert_template(kind, rotation, x, y) {
            Some(id) => {
                self.selected = Some(id);
                CommandOutcome::Committed
            }
            None => CommandOutcome::Rejected,
        }
    }

    /// Select a live piece as the target of move and rotate commands
    pub fn select_piece(&mut self, id: PieceId) -> CommandOutcome {
        if let Some(blocked) = self.guard() {
            return blocked;
        }
        if self.board.find(id).is_none() {
            return CommandOutcome::Rejected;
        }
        self.selected = Some(id);
        CommandOutcome::Committed
    }

    /// Move the selected piece one cell along one axis. Costs one point
    /// when it commits; a blocked or malformed move costs nothing.
    pub fn request_move(&mut self, dx: i8, dy: i8) -> CommandOutcome {
        if let Some(blocked) = self.guard() {
            return blocked;
        }
        if !is_unit_step(dx, dy) {
            return CommandOutcome::Rejected;
        }
        let Some(id) = self.selected else {
            return CommandOutcome::Rejected;
        };

        if !self.board.move_piece_by(id, dx, dy) {
            return CommandOutcome::Rejected;
        }
        self.score
            .apply(-MOVE_COST, ScoreReason::Move, &mut self.events);
        CommandOutcome::Committed
    }

    /// Shift every piece one cell along one axis. Pieces nearest the
    /// destination edge move first so they vacate cells for the rest.
    /// Costs one point when at least one piece moved.
    pub fn request_move_all(&mut self, dx: i8, dy: i8) -> CommandOutcome {
        if let Some(blocked) = self.guard() {
            return blocked;
        }
        if !is_unit_step(dx, dy) {
            return CommandOutcome::Rejected;
        }

        let mut ids = self.board.piece_ids();
        ids.sort_by_key(|&id| {
            let (x, y) = match self.board.find(id) {
                Some(piece) => piece.origin(),
                None => (0, 0),
            };
            match (dx, dy) {
                (1, 0) => -i32::from(x),
                (-1, 0) => i32::from(x),
                (0, 1) => -i32::from(y),
                _ => i32::from(y),
            }
        });

        let mut moved_any = false;
        for id in ids {
            if self.board.move_piece_by(id, dx, dy) {
                moved_any = true;
            }
        }

        if !moved_any {
            return CommandOutcome::Rejected;
        }
        self.score
            .apply(-MOVE_COST, ScoreReason::Move, &mut self.events);
        CommandOutcome::Committed
    }

    /// Rotate the selected piece one quarter turn clockwise. Costs one
    /// point when it commits; fragments and blocked rotations cost nothing.
    pub fn request_rotate(&mut self) -> CommandOutcome {
        if let Some(blocked) = self.guard() {
            return blocked;
        }
        let Some(id) = self.selected else {
            return CommandOutcome::Rejected;
        };

        if !try_rotate_piece(&mut self.board, id) {
            return CommandOutcome::Rejected;
        }
        self.score
            .apply(-ROTATE_COST, ScoreReason::Rotate, &mut self.events);
        CommandOutcome::Committed
    }

    /// Confirm the current arrangement: deselect, run the chain reaction to
    /// a fixed point, then check that the game can continue.
    pub fn request_confirm(&mut self) -> CommandOutcome {
        if let Some(blocked) = self.guard() {
            return blocked;
        }
        self.selected = None;
        self.settle_chain();

        if !self.score.is_game_over() && !self.any_placement_exists() {
            self.score
                .fail(GameOverReason::NoPlacement, &mut self.events);
        }
        CommandOutcome::Committed
    }

    /// Draw the next piece from the queue and place it at a random legal
    /// position, preferring its drawn rotation. No legal position for any
    /// rotation ends the game.
    pub fn request_new_piece(&mut self) -> CommandOutcome {
        if let Some(blocked) = self.guard() {
            return blocked;
        }
        let drawn = self.queue.draw();

        let mut rotation = drawn.rotation;
        let mut positions = self.legal_positions(drawn.kind, rotation);
        if positions.is_empty() {
            for r in 0..ROTATION_STATES {
                if r == drawn.rotation {
                    continue;
                }
                positions = self.legal_positions(drawn.kind, r);
                if !positions.is_empty() {
                    rotation = r;
                    break;
                }
            }
        }

        if positions.is_empty() {
            self.score
                .fail(GameOverReason::NoPlacement, &mut self.events);
            return CommandOutcome::Committed;
        }

        let (x, y) = positions[self.rng.next_range(positions.len() as u32) as usize];
        if let Some(id) = self.board.insert_template(drawn.kind, rotation, x, y) {
            self.selected = Some(id);
        }
        CommandOutcome::Committed
    }

    fn guard(&self) -> Option<CommandOutcome> {
        if self.busy || self.score.is_game_over() {
            Some(CommandOutcome::Blocked)
        } else {
            None
        }
    }

    /// Drive fusion and line clearing to a fixed point. Commands are
    /// blocked for the duration; a pending zero score finalizes here.
    fn settle_chain(&mut self) {
        self.busy = true;
        chain::run_chain(&mut self.board, &mut self.score, &mut self.events);
        self.score.settle(&mut self.events);
        self.busy = false;
        self.events.push(GameEvent::Settled);
    }

    fn legal_positions(&self, kind: PieceKind, rotation: u8) -> Vec<(i8, i8)> {
        let rel = catalog::shape_cells(kind, rotation);
        let mut positions = Vec::new();
        for y in 0..self.board.height() as i8 {
            for x in 0..self.board.width() as i8 {
                if rel.iter().all(|&(dx, dy)| self.board.is_empty(x + dx, y + dy)) {
                    positions.push((x, y));
                }
            }
        }
        positions
    }

    /// Whether any catalog piece fits anywhere in any rotation
    fn any_placement_exists(&self) -> bool {
        PieceKind::ALL.iter().any(|&kind| {
            (0..ROTATION_STATES).any(|rotation| !self.legal_positions(kind, rotation).is_empty())
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

fn is_unit_step(dx: i8, dy: i8) -> bool {
    (dx.abs() == 1 && dy == 0) || (dx == 0 && dy.abs() == 1)
}
