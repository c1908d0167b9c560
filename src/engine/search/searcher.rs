use std::cmp::Reverse;

use crate::game::evaluate::{CHECKMATE_SCORE, Evaluator};
use crate::game::{BoardMove, Piece, Position};

use super::results::{SearchResult, SearchStats};

pub const CASTLING_SCORE: i32 = 200_000;
pub const CAPTURE_SCORE: i32 = 100_000;
pub const PROMOTION_SCORE: i32 = 50_000;

/// Fixed-depth negamax search with alpha-beta pruning
pub struct Search<'a> {
    pub evaluator: &'a Evaluator,
    pub stats: SearchStats,
}

impl<'a> Search<'a> {
    pub fn new(evaluator: &'a Evaluator) -> Self {
        Self {
            evaluator,
            stats: SearchStats::new(),
        }
    }

    /// Search the position to the given depth; the score is relative to the side to move.
    pub fn run(&mut self, position: &Position, depth: usize) -> SearchResult {
        self.stats = SearchStats::new();

        let mut result = self.alpha_beta(position, depth, -CHECKMATE_SCORE, CHECKMATE_SCORE);
        result.nodes = self.stats.nodes;

        log::info!(
            "depth {} result {} nodes {} time {}ms nps {}",
            depth,
            result,
            self.stats.nodes,
            self.stats.get_elapsed_ms(),
            self.stats.get_nps()
        );

        result
    }

    /// Alpha-beta search with negamax, failing hard on the beta bound
    fn alpha_beta(&mut self, position: &Position, depth: usize, mut alpha: i32, beta: i32) -> SearchResult {
        self.stats.increment_nodes();

        if depth == 0 {
            return SearchResult::leaf(self.evaluator.evaluate(position));
        }

        let mut moves = position.legal_moves();

        if moves.is_empty() {
            // checkmate or stalemate
            if position.is_in_check(position.side) {
                return SearchResult::leaf(-CHECKMATE_SCORE);
            }

            return SearchResult::leaf(0);
        }

        self.order_moves(position, &mut moves);

        let mut best: Option<(BoardMove, i32)> = None;

        for board_move in moves {
            let mut child = *position;
            child.make_move(board_move);

            let value = -self.alpha_beta(&child, depth - 1, -beta, -alpha).evaluation;

            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((board_move, value));
            }

            if value >= beta {
                return SearchResult::with_move(board_move, beta);
            }

            alpha = alpha.max(value);
        }

        match best {
            Some((best_move, value)) => SearchResult::with_move(best_move, value),
            None => SearchResult::leaf(alpha),
        }
    }

    /// Sort moves so that the most promising ones are searched first; ties keep generation order
    pub fn order_moves(&self, position: &Position, moves: &mut [BoardMove]) {
        moves.sort_by_cached_key(|board_move| Reverse(self.score_move(position, board_move)));
    }

    /// Castling first, then captures by MVV-LVA, then promotions by the promoted piece, then the rest
    pub fn score_move(&self, position: &Position, board_move: &BoardMove) -> i32 {
        match *board_move {
            BoardMove::Castle(_) => CASTLING_SCORE,
            BoardMove::Normal {
                from_piece,
                to_piece,
                to,
                ..
            } => {
                let attacker = self.evaluator.piece_value(from_piece.piece);

                if let Some(victim) = position.piece_at(to) {
                    CAPTURE_SCORE + self.evaluator.piece_value(victim.piece) * 10 - attacker
                } else if from_piece.piece == Piece::Pawn && position.en_passant == Some(to) {
                    CAPTURE_SCORE + self.evaluator.piece_value(Piece::Pawn) * 9
                } else if from_piece != to_piece {
                    PROMOTION_SCORE + self.evaluator.piece_value(to_piece.piece)
                } else {
                    0
                }
            }
        }
    }
}
