use crate::game::{BoardMove, Position};
use fxhash::FxHashMap;
use rayon::prelude::*;

/// Leaf counts below each root move, keyed by the move's notation.
pub type PerftResult = FxHashMap<String, u64>;

/// Below this depth a parallel divide isn't worth the scheduling.
pub const DEFAULT_PARALLEL_DEPTH: usize = 3;

/// Number of leaf nodes of the legal move tree of the given depth.
pub fn perft(position: &Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves();

    // Bulk counting
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|board_move| count_after(position, board_move, depth - 1))
        .sum()
}

fn count_after(position: &Position, board_move: BoardMove, depth: usize) -> u64 {
    let mut child = *position;
    child.make_move(board_move);

    perft(&child, depth)
}

pub fn divide(position: &Position, depth: usize) -> PerftResult {
    if depth == 0 {
        return PerftResult::default();
    }

    position
        .legal_moves()
        .into_iter()
        .map(|board_move| {
            let count = count_after(position, board_move, depth - 1);
            log::debug!("{}: {}", board_move, count);

            (board_move.unparse(), count)
        })
        .collect()
}

/// Like [`divide`], but each root move is counted as its own rayon task.
/// Depths up to `threshold` are counted sequentially.
pub fn parallel_divide(position: &Position, depth: usize, threshold: usize) -> PerftResult {
    if depth <= threshold {
        return divide(position, depth);
    }

    position
        .legal_moves()
        .into_par_iter()
        .map(|board_move| (board_move.unparse(), count_after(position, board_move, depth - 1)))
        .collect()
}

pub fn total(result: &PerftResult) -> u64 {
    result.values().sum()
}
