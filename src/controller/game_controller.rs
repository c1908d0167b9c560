use crate::engine::perft::{self, DEFAULT_PARALLEL_DEPTH, PerftResult};
use crate::engine::search::{Search, SearchResult};
use crate::game::{
    BoardMove, BoardSquare, BoardSquareExt, Color, Evaluator, FenError, MoveParseError, Position,
};
use crate::utils::{Bitboard, BitboardExt};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::time::Instant;

pub const MAX_THREADS: usize = 1024;
pub const MAX_PARALLEL_DEPTH: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option {name}")]
    InvalidOptionValue { name: String, value: String },

    #[error("failed to build the thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub struct GameController {
    pub position: Position,
    pub evaluator: Evaluator,

    pub threads: usize,        // 0 means rayon's global pool
    pub parallel: bool,        // whether perft fans out root moves
    pub parallel_depth: usize, // perft depths up to this are counted sequentially

    thread_pool: Option<ThreadPool>,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

impl GameController {
    pub fn new() -> Self {
        Self {
            position: Position::default(),
            evaluator: Evaluator::default(),
            threads: 0,
            parallel: true,
            parallel_depth: DEFAULT_PARALLEL_DEPTH,
            thread_pool: None,
        }
    }

    pub fn new_game(&mut self) {
        self.position = Position::default();
    }

    pub fn new_game_from_fen(&mut self, fen: &str) -> Result<(), FenError> {
        self.position = Position::new(Some(fen))?;
        Ok(())
    }

    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ControllerError> {
        let invalid = || ControllerError::InvalidOptionValue {
            name: name.to_string(),
            value: value.to_string(),
        };

        match name.to_lowercase().as_str() {
            "threads" => match value.parse::<usize>() {
                Ok(threads) if threads <= MAX_THREADS => {
                    self.thread_pool = match threads {
                        0 => None,
                        _ => Some(ThreadPoolBuilder::new().num_threads(threads).build()?),
                    };
                    self.threads = threads;
                }
                _ => return Err(invalid()),
            },
            "paralleldepth" => match value.parse::<usize>() {
                Ok(depth) if depth <= MAX_PARALLEL_DEPTH => self.parallel_depth = depth,
                _ => return Err(invalid()),
            },
            "parallel" => match value.to_lowercase().as_str() {
                "true" => self.parallel = true,
                "false" => self.parallel = false,
                _ => return Err(invalid()),
            },
            _ => return Err(ControllerError::UnknownOption(name.to_string())),
        }

        log::debug!("option {} set to {}", name, value);
        Ok(())
    }

    pub fn legal_moves(&self) -> Vec<BoardMove> {
        self.position.legal_moves()
    }

    pub fn try_move_piece(&mut self, long_algebraic_notation: &str) -> Result<BoardMove, MoveParseError> {
        let board_move = BoardMove::parse_legal(long_algebraic_notation, &self.position)?;

        self.position.make_move(board_move);
        log::debug!("played {}, now {}", board_move, self.position);

        Ok(board_move)
    }

    /// Perft broken down by root move, in parallel unless disabled.
    pub fn perft(&self, depth: usize) -> PerftResult {
        let start = Instant::now();

        let result = match (self.parallel, &self.thread_pool) {
            (false, _) => perft::divide(&self.position, depth),
            (true, Some(pool)) => {
                pool.install(|| perft::parallel_divide(&self.position, depth, self.parallel_depth))
            }
            (true, None) => perft::parallel_divide(&self.position, depth, self.parallel_depth),
        };

        Self::log_perft(depth, &result, start);
        result
    }

    /// Sequential perft broken down by root move.
    pub fn divide(&self, depth: usize) -> PerftResult {
        let start = Instant::now();
        let result = perft::divide(&self.position, depth);

        Self::log_perft(depth, &result, start);
        result
    }

    fn log_perft(depth: usize, result: &PerftResult, start: Instant) {
        let nodes = perft::total(result);
        let elapsed = start.elapsed().as_secs_f64();
        let nps = if elapsed > 0.0 { (nodes as f64 / elapsed) as u64 } else { 0 };

        log::info!(
            "perft {} nodes {} time {}ms nps {}",
            depth,
            nodes,
            start.elapsed().as_millis(),
            nps
        );
    }

    pub fn search(&self, depth: usize) -> SearchResult {
        Search::new(&self.evaluator).run(&self.position, depth)
    }

    /// Legal moves of the piece standing on the square.
    pub fn moves_from(&self, square: BoardSquare) -> Vec<BoardMove> {
        let side = self.position.side;

        self.legal_moves()
            .into_iter()
            .filter(|board_move| match *board_move {
                BoardMove::Normal { from, .. } => from == square,
                BoardMove::Castle(right) => right.squares().king_from == square && right.color() == side,
            })
            .collect()
    }

    pub fn print_with_moves(&self, moves: &[BoardMove]) {
        const RESET: &str = "\x1b[0m";
        const LIGHT_SQUARE_BG: &str = "\x1b[48;5;172m";
        const DARK_SQUARE_BG: &str = "\x1b[48;5;130m";
        const WHITE_PIECE: &str = "\x1b[1;97m";
        const BLACK_PIECE: &str = "\x1b[1;30m";
        const MOVE_HIGHLIGHT: &str = "\x1b[1;34m";
        const HEADING_BG: &str = "\x1b[48;5;240m";

        let (heading_text, heading_color) = match self.position.side {
            Color::White => ("White to move", WHITE_PIECE),
            Color::Black => ("Black to move", BLACK_PIECE),
        };

        // 8 squares, 3 characters each
        let board_width = 24;
        let padding = (board_width - heading_text.len()) / 2;
        let right_padding = board_width - heading_text.len() - padding;

        println!(
            "{}{}{}{}{}{}",
            HEADING_BG,
            " ".repeat(padding),
            heading_color,
            heading_text,
            " ".repeat(right_padding),
            RESET
        );

        let targets: Bitboard = moves
            .iter()
            .map(|board_move| match *board_move {
                BoardMove::Normal { to, .. } => to.to_mask(),
                BoardMove::Castle(right) => right.squares().king_to.to_mask(),
            })
            .fold(0, |acc, mask| acc | mask);

        for y in (0..8).rev() {
            let mut line = String::new();

            for x in 0..8 {
                let square = BoardSquare::from_position(x, y);

                line.push_str(match (x + y) % 2 {
                    1 => LIGHT_SQUARE_BG,
                    _ => DARK_SQUARE_BG,
                });

                match self.position.piece_at(square) {
                    Some(piece) => {
                        let piece_color = match piece.color {
                            Color::White => WHITE_PIECE,
                            Color::Black => BLACK_PIECE,
                        };

                        let highlight = if targets.is_set(square) { MOVE_HIGHLIGHT } else { piece_color };
                        line.push_str(&format!("{} {} {}", highlight, piece.piece.to_emoji(), RESET));
                    }
                    None if targets.is_set(square) => {
                        line.push_str(&format!("{} ● {}", MOVE_HIGHLIGHT, RESET));
                    }
                    None => line.push_str("   "),
                }

                line.push_str(RESET);
            }

            println!("{}", line);
        }
    }

    pub fn print(&self) {
        self.print_with_moves(&[]);
    }
}
