// Hunt/target shot selection for the computer opponent.
//
// Target mode drains a FIFO of cells adjacent to earlier hits; hunt mode
// picks uniformly among all untried cells. Neighbours are queued in the
// fixed order up, down, left, right.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use rand::Rng;

use crate::board::{Board, ShotOutcome, GRID};

/// What the AI remembers between its shots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct AiMemory {
    target_queue: VecDeque<(usize, usize)>,
}

impl AiMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells queued for target mode, next first. May contain duplicates and
    /// cells that have since been tried; those are skipped when drained.
    pub fn target_queue(&self) -> &VecDeque<(usize, usize)> {
        &self.target_queue
    }

    /// True when no lead is pending.
    pub fn is_hunting(&self) -> bool {
        self.target_queue.is_empty()
    }
}

/// In-bounds orthogonal neighbours of (`row`, `col`): up, down, left, right.
pub fn neighbours(row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    let up = row.checked_sub(1).map(|r| (r, col));
    let down = (row + 1 < GRID).then(|| (row + 1, col));
    let left = col.checked_sub(1).map(|c| (row, c));
    let right = (col + 1 < GRID).then(|| (row, col + 1));
    [up, down, left, right].into_iter().flatten()
}

/// Next cell to fire at on `board`.
///
/// Queued cells that were tried in the meantime are discarded. Returns `None`
/// only when every cell of the board has been tried.
pub fn choose_target<R: Rng + ?Sized>(
    board: &Board,
    memory: &mut AiMemory,
    rng: &mut R,
) -> Option<(usize, usize)> {
    while let Some((row, col)) = memory.target_queue.pop_front() {
        if board.is_untried(row, col) {
            log::trace!("target mode: ({}, {})", row, col);
            return Some((row, col));
        }
    }
    hunt(board, rng)
}

/// Uniform pick among untried cells.
pub fn hunt<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<(usize, usize)> {
    let candidates: Vec<(usize, usize)> = board.untried_cells().collect();
    if candidates.is_empty() {
        return None;
    }
    let pick = candidates[rng.random_range(0..candidates.len())];
    log::trace!(
        "hunt mode: ({}, {}) of {} candidates",
        pick.0,
        pick.1,
        candidates.len()
    );
    Some(pick)
}

/// Update `memory` after the AI's shot at `target` resolved to `outcome`.
/// `board` must already reflect the shot.
pub fn observe(
    board: &Board,
    memory: &mut AiMemory,
    target: (usize, usize),
    outcome: &ShotOutcome,
) {
    if outcome.already_tried || !outcome.hit {
        return;
    }
    let (row, col) = target;
    memory
        .target_queue
        .extend(neighbours(row, col).filter(|&(r, c)| board.is_untried(r, c)));
}
