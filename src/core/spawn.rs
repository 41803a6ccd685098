//! Spawn module - deterministic weighted piece generation
//!
//! Draws upcoming pieces with the catalog's spawn weights and gives each a
//! random initial rotation. Uses a simple LCG so games are reproducible
//! from a seed; the engine core has no dependency on a system RNG.

use std::collections::VecDeque;

use crate::core::catalog;
use crate::types::{PieceKind, ROTATION_STATES};

/// Number of upcoming pieces kept visible for preview
pub const PREVIEW_LEN: usize = 2;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// One upcoming piece: a kind plus its initial rotation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuedPiece {
    pub kind: PieceKind,
    pub rotation: u8,
}

/// Weighted piece generator with a short preview queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceQueue {
    queue: VecDeque<QueuedPiece>,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            queue: VecDeque::with_capacity(PREVIEW_LEN),
            rng: SimpleRng::new(seed),
        };
        queue.refill();
        queue
    }

    fn refill(&mut self) {
        while self.queue.len() < PREVIEW_LEN {
            let kind = self.draw_kind();
            let rotation = self.rng.next_range(ROTATION_STATES as u32) as u8;
            self.queue.push_back(QueuedPiece { kind, rotation });
        }
    }

    /// Draw a kind according to the catalog spawn weights
    fn draw_kind(&mut self) -> PieceKind {
        let total: u32 = PieceKind::ALL.iter().map(|&k| catalog::spawn_weight(k)).sum();
        let mut roll = self.rng.next_range(total);

        for kind in PieceKind::ALL {
            let weight = catalog::spawn_weight(kind);
            if roll < weight {
                return kind;
            }
            roll -= weight;
        }
        // Weights cover the whole range; the loop always returns.
        PieceKind::Single
    }

    /// The upcoming pieces, soonest first
    pub fn preview(&self) -> Vec<QueuedPiece> {
        self.queue.iter().copied().collect()
    }

    /// Take the next piece and refill the preview
    pub fn draw(&mut self) -> QueuedPiece {
        let next = self.queue.pop_front();
        self.refill();
        match next {
            Some(piece) => piece,
            // Queue is refilled on construction and after every draw.
            None => self.queue[0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_is_deterministic() {
        let mut a = SimpleRng::new(42);
        let mut b = SimpleRng::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_queue_preview_matches_draws() {
        let mut queue = PieceQueue::new(7);
        let preview = queue.preview();
        assert_eq!(preview.len(), PREVIEW_LEN);

        assert_eq!(queue.draw(), preview[0]);
        assert_eq!(queue.draw(), preview[1]);
        assert_eq!(queue.preview().len(), PREVIEW_LEN);
    }

    #[test]
    fn test_rotations_stay_in_range() {
        let mut queue = PieceQueue::new(99);
        for _ in 0..64 {
            let piece = queue.draw();
            assert!(piece.rotation < ROTATION_STATES);
        }
    }

    #[test]
    fn test_all_kinds_eventually_spawn() {
        let mut queue = PieceQueue::new(1234);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(queue.draw().kind);
        }
        assert_eq!(seen.len(), PieceKind::ALL.len());
    }
}
