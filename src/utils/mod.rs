pub mod bitboard;
pub mod cli;

pub use bitboard::*;
pub use cli::*;
