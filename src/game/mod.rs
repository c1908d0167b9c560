pub mod apply;
pub mod attacks;
pub mod board;
pub mod castling;
pub mod error;
pub mod evaluate;
pub mod movegen;
pub mod moves;
pub mod pieces;
pub mod square;

pub use attacks::KingAttackers;
pub use board::{Position, STARTING_FEN};
pub use castling::{CastlingRight, CastlingRights};
pub use error::{FenError, MoveParseError};
pub use evaluate::{Evaluator, CHECKMATE_SCORE};
pub use moves::BoardMove;
pub use pieces::{Color, ColoredPiece, Piece};
pub use square::{BoardSquare, BoardSquareExt};
