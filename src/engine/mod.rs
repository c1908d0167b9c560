pub mod perft;
pub mod search;
