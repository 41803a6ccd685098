//! Scoring module - clamped score updates and the game-over policy
//!
//! Every scored event goes through one clamped-update function: a delta
//! that would take the score negative clamps to zero and ends the game at
//! once; a delta that lands exactly on zero only marks a pending game over,
//! finalized when the chain reaction settles without the score having
//! recovered. A negative score is never observable.

use crate::types::{GameEvent, GameOverReason, ScoreReason, LINES_PER_LEVEL};

/// Score, level, and terminal-condition state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreKeeper {
    score: u32,
    lines: u32,
    pending_zero: bool,
    game_over: Option<GameOverReason>,
}

impl ScoreKeeper {
    pub fn new(initial_score: u32) -> Self {
        Self {
            score: initial_score,
            lines: 0,
            pending_zero: initial_score == 0,
            game_over: None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total lines cleared this game
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Level advances once per `LINES_PER_LEVEL` cleared lines
    pub fn level(&self) -> u32 {
        self.lines / LINES_PER_LEVEL + 1
    }

    pub fn game_over(&self) -> Option<GameOverReason> {
        self.game_over
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    /// Apply a score delta. Returns false when the delta exhausted the
    /// score (clamped to zero, game over triggered).
    pub fn apply(&mut self, delta: i32, reason: ScoreReason, events: &mut Vec<GameEvent>) -> bool {
        if self.game_over.is_some() {
            return false;
        }

        let tentative = i64::from(self.score) + i64::from(delta);
        if tentative < 0 {
            self.score = 0;
            events.push(GameEvent::ScoreChanged {
                delta,
                reason,
                score: 0,
            });
            self.fail(GameOverReason::ScoreExhausted, events);
            return false;
        }

        self.score = tentative as u32;
        self.pending_zero = self.score == 0;
        events.push(GameEvent::ScoreChanged {
            delta,
            reason,
            score: self.score,
        });
        true
    }

    pub fn record_lines(&mut self, count: u32) {
        self.lines += count;
    }

    /// Trigger game over with the given reason (first reason wins)
    pub fn fail(&mut self, reason: GameOverReason, events: &mut Vec<GameEvent>) {
        if self.game_over.is_none() {
            self.game_over = Some(reason);
            events.push(GameEvent::GameOver { reason });
        }
    }

    /// Called when a chain reaction settles: a pending zero that did not
    /// recover finalizes into game over.
    pub fn settle(&mut self, events: &mut Vec<GameEvent>) {
        if self.score > 0 {
            self.pending_zero = false;
        } else if self.pending_zero && self.game_over.is_none() {
            self.fail(GameOverReason::ScoreExhausted, events);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_and_level() {
        let mut events = Vec::new();
        let mut keeper = ScoreKeeper::new(10);

        assert!(keeper.apply(-1, ScoreReason::Move, &mut events));
        assert!(keeper.apply(7, ScoreReason::LineClear, &mut events));
        assert_eq!(keeper.score(), 16);
        assert_eq!(keeper.level(), 1);

        keeper.record_lines(5);
        assert_eq!(keeper.level(), 2);
        assert_eq!(keeper.lines(), 5);
    }

    #[test]
    fn test_negative_clamps_and_ends_game() {
        let mut events = Vec::new();
        let mut keeper = ScoreKeeper::new(0);

        assert!(!keeper.apply(-1, ScoreReason::Move, &mut events));
        assert_eq!(keeper.score(), 0);
        assert_eq!(keeper.game_over(), Some(GameOverReason::ScoreExhausted));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_exact_zero_is_pending_until_settle() {
        let mut events = Vec::new();
        let mut keeper = ScoreKeeper::new(1);

        assert!(keeper.apply(-1, ScoreReason::Move, &mut events));
        assert_eq!(keeper.score(), 0);
        assert!(!keeper.is_game_over(), "exact zero is pending, not final");

        keeper.settle(&mut events);
        assert_eq!(keeper.game_over(), Some(GameOverReason::ScoreExhausted));
    }

    #[test]
    fn test_zero_rescued_by_later_reward() {
        let mut events = Vec::new();
        let mut keeper = ScoreKeeper::new(1);

        keeper.apply(-1, ScoreReason::Move, &mut events);
        keeper.apply(7, ScoreReason::LineClear, &mut events);
        keeper.settle(&mut events);

        assert!(!keeper.is_game_over());
        assert_eq!(keeper.score(), 7);
    }

    #[test]
    fn test_no_score_change_after_game_over() {
        let mut events = Vec::new();
        let mut keeper = ScoreKeeper::new(0);
        keeper.apply(-5, ScoreReason::Rotate, &mut events);

        let before = events.len();
        assert!(!keeper.apply(10, ScoreReason::LineClear, &mut events));
        assert_eq!(keeper.score(), 0);
        assert_eq!(events.len(), before);
    }
}
