//! Chain controller - sequences fusion and line clearing to a fixed point
//!
//! An explicit state machine (`Merging -> LineChecking -> Settled`) driven
//! by a synchronous loop, which makes termination and tests tractable.
//! Merging carries a progress guard: a pass that fails to strictly shrink
//! the merge-group count aborts merging for this invocation rather than
//! looping forever, at the cost of possibly leaving mergeable pieces
//! unmerged in pathological configurations.

use crate::core::board::Board;
use crate::core::fusion::{find_merge_groups, fuse};
use crate::core::line_clear::{clear_lines, find_complete_lines};
use crate::core::scoring::ScoreKeeper;
use crate::types::{
    GameEvent, ScoreReason, POINTS_PER_CLEARED_CELL, POINTS_PER_FUSED_CELL,
};

/// Chain-controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainPhase {
    Idle,
    Merging,
    LineChecking,
    Settled,
}

/// What one chain-reaction invocation did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChainReport {
    pub fusions: u32,
    pub lines_cleared: u32,
    pub cells_cleared: u32,
    /// Clear rounds run (each may re-trigger fusion)
    pub rounds: u32,
}

/// Run the merge -> clear loop until no merges or clears remain. Score
/// deltas and observer events are applied as each stage commits.
pub fn run_chain(
    board: &mut Board,
    score: &mut ScoreKeeper,
    events: &mut Vec<GameEvent>,
) -> ChainReport {
    let mut report = ChainReport::default();
    let mut phase = ChainPhase::Merging;

    loop {
        match phase {
            ChainPhase::Idle | ChainPhase::Settled => break,
            ChainPhase::Merging => {
                merge_pass(board, score, events, &mut report);
                phase = ChainPhase::LineChecking;
            }
            ChainPhase::LineChecking => {
                let lines = find_complete_lines(board);
                if lines.is_empty() {
                    phase = ChainPhase::Settled;
                    continue;
                }

                let outcome = clear_lines(board, &lines);
                report.rounds += 1;
                report.lines_cleared += lines.len() as u32;
                report.cells_cleared += outcome.cells_cleared;

                score.record_lines(lines.len() as u32);
                score.apply(
                    outcome.cells_cleared as i32 * POINTS_PER_CLEARED_CELL,
                    ScoreReason::LineClear,
                    events,
                );
                events.push(GameEvent::LinesCleared {
                    lines: lines.to_vec(),
                    cells_cleared: outcome.cells_cleared,
                });

                // Clearing can create new color adjacencies; fuse before
                // re-checking for lines.
                merge_pass(board, score, events, &mut report);
            }
        }
    }

    report
}

/// Fuse merge groups one at a time until none remain or the progress guard
/// trips. Fusing one group can change adjacency for the rest, so groups are
/// recomputed after every fusion.
fn merge_pass(
    board: &mut Board,
    score: &mut ScoreKeeper,
    events: &mut Vec<GameEvent>,
    report: &mut ChainReport,
) {
    let mut prev_count: Option<usize> = None;

    loop {
        let groups = find_merge_groups(board);
        if groups.is_empty() {
            break;
        }
        // Progress guard: abort rather than risk a non-terminating cycle.
        if prev_count.is_some_and(|prev| groups.len() >= prev) {
            break;
        }
        prev_count = Some(groups.len());

        let Some(result) = fuse(board, &groups[0]) else {
            break;
        };
        let color = match board.find(result.fragment_id) {
            Some(piece) => piece.color(),
            None => break,
        };

        if result.eliminated_cells > 0 {
            score.apply(
                result.eliminated_cells as i32 * POINTS_PER_FUSED_CELL,
                ScoreReason::Fusion,
                events,
            );
        }
        events.push(GameEvent::PiecesFused {
            pieces: result.absorbed,
            result: result.fragment_id,
            color,
        });
        report.fusions += 1;
    }
}
