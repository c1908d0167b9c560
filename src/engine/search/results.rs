use crate::game::BoardMove;
use std::fmt::{Display, Formatter, Result};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<BoardMove>, // None at leaves and in positions without legal moves
    pub evaluation: i32,
    pub nodes: u64, // filled in for the root result only
}

impl Display for SearchResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.best_move {
            Some(best_move) => write!(f, "{} ({})", best_move.unparse(), self.evaluation),
            None => write!(f, "(none) ({})", self.evaluation),
        }
    }
}

impl SearchResult {
    pub fn leaf(evaluation: i32) -> Self {
        Self {
            best_move: None,
            evaluation,
            nodes: 0,
        }
    }

    pub fn with_move(best_move: BoardMove, evaluation: i32) -> Self {
        Self {
            best_move: Some(best_move),
            evaluation,
            nodes: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchStats {
    pub nodes: u64,
    pub start_time: Instant,
}

impl Default for SearchStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStats {
    pub fn new() -> Self {
        Self {
            nodes: 0,
            start_time: Instant::now(),
        }
    }

    pub fn increment_nodes(&mut self) {
        self.nodes += 1;
    }

    pub fn get_elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    pub fn get_nps(&self) -> u64 {
        let elapsed_secs = self.start_time.elapsed().as_secs_f64();
        if elapsed_secs > 0.0 {
            (self.nodes as f64 / elapsed_secs) as u64
        } else {
            0
        }
    }
}
