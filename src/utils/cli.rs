use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "seven")]
#[command(about = "Bitboard chess move generator, perft verifier and searcher", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
pub struct Cli {
    /// Position to start from (the standard initial position if omitted)
    #[arg(long, value_name = "FEN")]
    pub fen: Option<String>,

    /// Engine option, e.g. `Threads=4` or `Parallel=false` (repeatable)
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE", value_parser = parse_option)]
    pub options: Vec<(String, String)>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the legal moves of the position
    Moves,
    /// Count the leaf nodes of the move tree, broken down by root move
    Perft {
        #[arg(value_name = "DEPTH")]
        depth: usize,
    },
    /// Like perft, but always counted sequentially
    Divide {
        #[arg(value_name = "DEPTH")]
        depth: usize,
    },
    /// Search for the best move to a fixed depth
    Search {
        #[arg(value_name = "DEPTH")]
        depth: usize,
    },
    /// Print the position as FEN
    Fen,
    /// Draw the board, optionally highlighting where the piece on SQUARE can move
    Show {
        #[arg(value_name = "SQUARE")]
        square: Option<String>,
    },
    /// Play the given moves in order and print the resulting FEN
    Play {
        #[arg(value_name = "MOVES")]
        moves: Vec<String>,
    },
}

fn parse_option(option: &str) -> Result<(String, String), String> {
    match option.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", option)),
    }
}
