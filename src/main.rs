use anyhow::{Context, bail};
use clap::Parser;
use seven::controller::GameController;
use seven::engine::perft::{PerftResult, total};
use seven::game::{BoardSquare, BoardSquareExt};
use seven::utils::{Cli, Commands};

fn print_perft(result: &PerftResult) {
    let mut moves = result.iter().collect::<Vec<_>>();
    moves.sort();

    for (notation, count) in moves {
        println!("{}: {}", notation, count);
    }

    println!("\nNodes: {}", total(result));
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut controller = GameController::new();

    for (name, value) in &cli.options {
        controller.set_option(name, value)?;
    }

    if let Some(fen) = &cli.fen {
        controller
            .new_game_from_fen(fen)
            .with_context(|| format!("could not load position '{}'", fen))?;
    }

    match cli.command {
        Commands::Moves => {
            let moves = controller.legal_moves();

            for board_move in &moves {
                println!("{}", board_move);
            }

            println!("\nMoves: {}", moves.len());
        }
        Commands::Perft { depth } => print_perft(&controller.perft(depth)),
        Commands::Divide { depth } => print_perft(&controller.divide(depth)),
        Commands::Search { depth } => {
            let result = controller.search(depth);

            match result.best_move {
                Some(best_move) => println!("bestmove {} score {}", best_move, result.evaluation),
                None => println!("bestmove (none) score {}", result.evaluation),
            }
        }
        Commands::Fen => println!("{}", controller.position),
        Commands::Show { square } => match square {
            Some(square) => match BoardSquare::parse(&square) {
                Some(square) => controller.print_with_moves(&controller.moves_from(square)),
                None => bail!("invalid square '{}'", square),
            },
            None => controller.print(),
        },
        Commands::Play { moves } => {
            for notation in &moves {
                if let Err(error) = controller.try_move_piece(notation) {
                    log::warn!("rejected {}: {}", notation, error);
                    return Err(error.into());
                }
            }

            println!("{}", controller.position);
        }
    }

    Ok(())
}
