use crate::controller::{ControllerError, GameController};
use crate::engine::perft;
use crate::engine::search::Search;
use crate::game::*;
use crate::utils::{BitboardExt, RANK_1, ray_between, reverse};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

fn position(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn notations(moves: &[BoardMove]) -> Vec<String> {
    let mut notations = moves.iter().map(|board_move| board_move.unparse()).collect::<Vec<_>>();
    notations.sort();
    notations
}

#[test]
fn test_position() {
    let mut controller = GameController::new();

    for position in [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
    ] {
        controller.new_game_from_fen(position).unwrap();

        assert_eq!(
            controller.position.to_fen(),
            position,
            "FEN mismatch for position: {}",
            position
        );
    }
}

#[test]
fn test_position_defaults() {
    assert_eq!(Position::default().to_fen(), STARTING_FEN);
    assert_eq!(Position::new(None).unwrap(), Position::default());
    assert_eq!(Position::new(Some("  ")).unwrap(), Position::default());

    // missing clocks fall back to 0 and 1
    let position = position("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -");
    assert_eq!(position.halfmove_clock, 0);
    assert_eq!(position.fullmove_number, 1);
}

#[test]
fn test_fen_errors() {
    let cases = [
        ("", FenError::MissingField("piece placement")),
        ("8/8/8/8/8/8/8 w - - 0 1", FenError::RankCount(7)),
        (
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            FenError::RankOverflow(6),
        ),
        (
            "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            FenError::RankUnderflow(7),
        ),
        (
            "rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            FenError::UnknownPiece('x'),
        ),
        (
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR z KQkq - 0 1",
            FenError::InvalidSideToMove("z".to_string()),
        ),
        (
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KX - 0 1",
            FenError::InvalidCastling('X'),
        ),
        (
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1",
            FenError::InvalidEnPassant("e4".to_string()),
        ),
        (
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq",
            FenError::MissingField("en passant"),
        ),
        ("8/8/8/8/8/8/8/7k w - - 0 1", FenError::MissingKing(Color::White)),
        (
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 garbage extra",
            FenError::TooManyFields(8),
        ),
    ];

    for (fen, expected) in cases {
        assert_eq!(Position::from_fen(fen), Err(expected), "for FEN '{}'", fen);
    }
}

#[test]
fn test_perft_positions_easy() {
    test_perft_positions_depth(0, 3);
}

#[test]
fn test_perft_positions_hard() {
    test_perft_positions_depth(4, 5);
}

fn test_perft_positions_depth(min_depth: usize, max_depth: usize) {
    let mut controller = GameController::new();
    let mut failures: Vec<_> = Vec::new();
    let mut total = 0;

    // https://www.chessprogramming.org/Perft_Results
    let test_positions = [
        // Position 1: Starting position
        (
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            vec![(0, 1), (1, 20), (2, 400), (3, 8902), (4, 197281), (5, 4865609)],
        ),
        // Position 2: Kiwipete
        (
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
            vec![(1, 48), (2, 2039), (3, 97862), (4, 4085603)],
        ),
        // Position 3: Rook endgame with discovered checks and en passant pins
        (
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -",
            vec![(1, 14), (2, 191), (3, 2812), (4, 43238), (5, 674624)],
        ),
        // Position 4: Promotions and castling rights on one side
        (
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -",
            vec![(1, 6), (2, 264), (3, 9467), (4, 422333)],
        ),
        // Position 5
        (
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            vec![(1, 44), (2, 1486), (3, 62379), (4, 2103487)],
        ),
        // Position 6: Balanced middle game position
        (
            "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
            vec![(1, 46), (2, 2079), (3, 89890), (4, 3894594)],
        ),
    ];

    for (position_fen, depth_counts) in test_positions.iter() {
        println!("Testing position: {}", position_fen);
        controller.new_game_from_fen(position_fen).unwrap();

        for &(depth, expected_count) in depth_counts {
            if !(min_depth <= depth && depth <= max_depth) {
                continue;
            }

            let start_time = Instant::now();

            // a divide of depth 0 has no root moves to report
            let total_nodes = match depth {
                0 => perft::perft(&controller.position, 0),
                _ => perft::total(&controller.perft(depth)),
            };

            let elapsed = start_time.elapsed();

            println!(
                "  Depth {}: {} nodes (expected: {}) - {:?}",
                depth, total_nodes, expected_count, elapsed
            );

            if total_nodes != expected_count {
                failures.push(format!(
                    "Position: {}, Depth: {}, Expected: {}, Got: {}",
                    position_fen, depth, expected_count, total_nodes
                ));
            }

            total += 1;
        }
    }

    if !failures.is_empty() {
        for failure in &failures {
            println!("{}", failure);
        }

        panic!("Perft test failed with {}/{} error(s)", failures.len(), total);
    }
}

#[test]
fn test_perft_sequential_matches_parallel() {
    let position = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");

    let sequential = perft::divide(&position, 3);
    let parallel = perft::parallel_divide(&position, 3, 0);

    assert_eq!(sequential, parallel);
    assert_eq!(perft::total(&sequential), perft::perft(&position, 3));
    assert!(perft::divide(&position, 0).is_empty());
}

#[test]
fn test_divide_start_position() {
    let result = perft::divide(&Position::default(), 2);

    assert_eq!(result.len(), 20);
    assert!(result.values().all(|&count| count == 20));
    assert_eq!(result.get("g1f3"), Some(&20));
}

#[test]
fn test_double_check_only_king_moves() {
    // knight on d3 and rook on e8 both check the king
    let position = position("4r2k/8/8/Q7/8/3n3R/8/4K3 w - - 0 1");

    assert_eq!(position.king_attackers(Color::White).count(), 2);

    let moves = position.legal_moves();
    assert_eq!(notations(&moves), vec!["e1d1", "e1d2", "e1f1"]);
}

#[test]
fn test_single_check_evasions() {
    // the bishop can block on e2 or the king steps aside, nothing else
    let position = position("4r2k/8/8/8/8/8/3B4/3QK3 w - - 0 1");
    let moves = notations(&position.legal_moves());

    assert_eq!(moves, vec!["d1e2", "d2e3", "e1f1", "e1f2"]);
}

#[test]
fn test_pinned_pieces() {
    let rook_pinned = position("4r1k1/8/8/8/4R3/8/8/4K3 w - - 0 1");
    let rook_moves = rook_pinned
        .legal_moves()
        .into_iter()
        .filter(|board_move| matches!(board_move, BoardMove::Normal { from: 28, .. }))
        .collect::<Vec<_>>();

    assert_eq!(notations(&rook_moves), vec!["e4e2", "e4e3", "e4e5", "e4e6", "e4e7", "e4e8"]);

    let pawn_pinned = position("4k3/8/8/8/8/2b5/3P4/4K3 w - - 0 1");
    let pawn_moves = pawn_pinned
        .legal_moves()
        .into_iter()
        .filter(|board_move| matches!(board_move, BoardMove::Normal { from_piece, .. } if from_piece.piece == Piece::Pawn))
        .collect::<Vec<_>>();

    assert_eq!(notations(&pawn_moves), vec!["d2c3"]);

    let knight_pinned = position("4k3/8/8/8/8/8/8/r2NK3 w - - 0 1");
    assert!(
        knight_pinned
            .legal_moves()
            .iter()
            .all(|board_move| !matches!(board_move, BoardMove::Normal { from_piece, .. } if from_piece.piece == Piece::Knight))
    );
}

#[test]
fn test_promotions() {
    let white = position("1n6/P7/8/8/8/8/8/k6K w - - 0 1");
    let pawn_moves = white
        .legal_moves()
        .into_iter()
        .filter(|board_move| board_move.is_promotion())
        .collect::<Vec<_>>();

    assert_eq!(
        notations(&pawn_moves),
        vec!["a7a8B", "a7a8N", "a7a8Q", "a7a8R", "a7b8B", "a7b8N", "a7b8Q", "a7b8R"]
    );

    let black = position("K7/8/8/8/8/8/p7/7k b - - 0 1");
    let moves = notations(&black.legal_moves());

    for notation in ["a2a1q", "a2a1r", "a2a1b", "a2a1n"] {
        assert!(moves.contains(&notation.to_string()), "missing {}", notation);
    }

    let mut promoted = black;
    promoted.make_move(BoardMove::parse("a2a1N", &black).unwrap());

    assert_eq!(
        promoted.piece_at(u8::A1),
        Some(ColoredPiece::new(Piece::Knight, Color::Black))
    );
    assert_eq!(promoted.pieces(Piece::Pawn, Color::Black), 0);
}

#[test]
fn test_en_passant() {
    let before = position("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let capture = BoardMove::parse_legal("e5f6", &before).unwrap();

    // d6 is not the en passant square
    assert!(BoardMove::parse_legal("e5d6", &before).is_err());

    let mut after = before;
    after.make_move(capture);

    let f5 = BoardSquare::parse("f5").unwrap();
    let f6 = BoardSquare::parse("f6").unwrap();

    assert_eq!(after.piece_at(f5), None);
    assert_eq!(after.piece_at(f6), Some(ColoredPiece::new(Piece::Pawn, Color::White)));
    assert_eq!(after.en_passant, None);
    assert_eq!(after.halfmove_clock, 0);
}

#[test]
fn test_en_passant_rank_pin() {
    // taking on c6 would empty the fifth rank between the king and the rook
    let position = position("8/8/8/KPp4r/8/8/8/7k w - c6 0 1");
    let moves = notations(&position.legal_moves());

    assert!(!moves.contains(&"b5c6".to_string()));
    assert!(moves.contains(&"b5b6".to_string()));
}

#[test]
fn test_castling() {
    let both = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let moves = both.legal_moves();

    assert!(moves.contains(&BoardMove::Castle(CastlingRight::WhiteKingSide)));
    assert!(moves.contains(&BoardMove::Castle(CastlingRight::WhiteQueenSide)));

    let black = position("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
    let moves = black.legal_moves();

    assert!(moves.contains(&BoardMove::Castle(CastlingRight::BlackKingSide)));
    assert!(moves.contains(&BoardMove::Castle(CastlingRight::BlackQueenSide)));

    // f1 is attacked, so the king may not pass through it
    let attacked_path = position("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1");
    let moves = attacked_path.legal_moves();

    assert!(!moves.contains(&BoardMove::Castle(CastlingRight::WhiteKingSide)));
    assert!(moves.contains(&BoardMove::Castle(CastlingRight::WhiteQueenSide)));

    // b1 is attacked, but the king never crosses it
    let attacked_rook_path = position("1r2k2r/8/8/8/8/8/8/R3K2R w KQk - 0 1");
    assert!(
        attacked_rook_path
            .legal_moves()
            .contains(&BoardMove::Castle(CastlingRight::WhiteQueenSide))
    );

    // no castling out of check
    let in_check = position("4k3/8/8/8/8/8/8/R3K2r w Q - 0 1");
    assert!(!in_check.legal_moves().iter().any(|board_move| board_move.is_castle()));

    // no castling over a piece
    let blocked = position("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1");
    assert!(!blocked.legal_moves().iter().any(|board_move| board_move.is_castle()));
}

#[test]
fn test_castling_moves_both_pieces() {
    let mut position = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    position.make_move(BoardMove::parse_legal("O-O", &position).unwrap());

    assert_eq!(position.to_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");

    position.make_move(BoardMove::parse_legal("o-o-o", &position).unwrap());

    assert_eq!(position.to_fen(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 2 2");
}

#[test]
fn test_move_bookkeeping() {
    let mut controller = GameController::new();

    controller.try_move_piece("e2e4").unwrap();
    assert_eq!(
        controller.position.to_fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );

    controller.try_move_piece("g8f6").unwrap();
    assert_eq!(
        controller.position.to_fen(),
        "rnbqkb1r/pppppppp/5n2/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 1 2"
    );

    controller.try_move_piece("e1e2").unwrap();
    assert_eq!(controller.position.castling.to_string(), "kq");

    // capturing a rook on its home square takes away that side's right
    controller
        .new_game_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 5 10")
        .unwrap();
    controller.try_move_piece("a1a8").unwrap();

    assert_eq!(controller.position.castling.to_string(), "Kk");
    assert_eq!(controller.position.halfmove_clock, 0);
    assert_eq!(controller.position.fullmove_number, 10);
}

#[test]
fn test_clocks_saturate() {
    let mut position = position("4k3/8/8/8/8/8/8/4K2R w K - 4294967295 4294967295");

    position.make_move(BoardMove::parse_legal("h1h2", &position).unwrap());
    assert_eq!(position.halfmove_clock, u32::MAX);

    position.make_move(BoardMove::parse_legal("e8d8", &position).unwrap());
    assert_eq!(position.halfmove_clock, u32::MAX);
    assert_eq!(position.fullmove_number, u32::MAX);

    let mut castled = self::position("4k3/8/8/8/8/8/8/4K2R w K - 4294967295 1");
    castled.make_move(BoardMove::Castle(CastlingRight::WhiteKingSide));
    assert_eq!(castled.halfmove_clock, u32::MAX);
}

#[test]
fn test_new_game_resets_position() {
    let mut controller = GameController::new();

    controller.try_move_piece("e2e4").unwrap();
    assert_ne!(controller.position, Position::default());

    controller.new_game();
    assert_eq!(controller.position, Position::default());
}

#[test]
fn test_position_copies_are_independent() {
    let original = Position::default();
    let mut copy = original;

    copy.make_move(BoardMove::parse_legal("e2e4", &copy).unwrap());

    assert_eq!(original, Position::default());
    assert_ne!(original, copy);
}

#[test]
fn test_mirroring() {
    let kiwipete = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let mirrored = kiwipete.mirrored();

    assert_eq!(mirrored.side, Color::Black);
    assert_eq!(mirrored.mirrored(), kiwipete);
    assert_eq!(
        mirrored.to_fen(),
        "r3k2r/pppbbppp/2n2q1P/1P2p3/3pn3/BN2PNP1/P1PPQPB1/R3K2R b KQkq - 0 1"
    );

    let reflected = kiwipete
        .legal_moves()
        .iter()
        .map(|board_move| board_move.mirrored())
        .collect::<Vec<_>>();

    assert_eq!(notations(&mirrored.legal_moves()), notations(&reflected));
}

#[test]
fn test_checkmate_and_stalemate() {
    let fools_mate = position("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");

    assert!(fools_mate.is_checkmate());
    assert!(!fools_mate.is_stalemate());

    let stalemate = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");

    assert!(stalemate.is_stalemate());
    assert!(!stalemate.is_checkmate());
    assert!(!Position::default().is_checkmate());
}

#[test]
fn test_search_terminal_positions() {
    let evaluator = Evaluator::default();

    let fools_mate = position("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    let result = Search::new(&evaluator).run(&fools_mate, 3);

    assert_eq!(result.best_move, None);
    assert_eq!(result.evaluation, -CHECKMATE_SCORE);

    let stalemate = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    let result = Search::new(&evaluator).run(&stalemate, 3);

    assert_eq!(result.best_move, None);
    assert_eq!(result.evaluation, 0);
}

#[test]
fn test_search_finds_mate_in_one() {
    let mut controller = GameController::new();
    controller.new_game_from_fen("6k1/5ppp/8/8/8/8/8/R6K w - - 0 1").unwrap();

    let result = controller.search(2);

    assert_eq!(result.best_move.map(|m| m.unparse()), Some("a1a8".to_string()));
    assert_eq!(result.evaluation, CHECKMATE_SCORE);
    assert!(result.nodes > 1);
}

#[test]
fn test_search_takes_hanging_queen() {
    let mut controller = GameController::new();
    controller.new_game_from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();

    let result = controller.search(2);

    assert_eq!(result.best_move.map(|m| m.unparse()), Some("d1d5".to_string()));
    assert!(result.evaluation > 0);
}

#[test]
fn test_move_ordering() {
    let evaluator = Evaluator::default();
    let search = Search::new(&evaluator);
    let position = position("r3k2r/1P6/8/8/8/8/8/R3K2R w KQkq - 0 1");

    let mut moves = position.legal_moves();
    search.order_moves(&position, &mut moves);

    assert!(moves[0].is_castle());
    assert!(moves[1].is_castle());

    // pawn takes rook beats rook takes rook
    assert!(moves[2].unparse().starts_with("b7a8"));

    let scores = moves
        .iter()
        .map(|board_move| search.score_move(&position, board_move))
        .collect::<Vec<_>>();

    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    assert_eq!(scores.last(), Some(&0));

    let rook_takes_rook = BoardMove::parse("a1a8", &position).unwrap();
    let queen_promotion = BoardMove::parse("b7b8q", &position).unwrap();
    let knight_promotion = BoardMove::parse("b7b8n", &position).unwrap();

    assert!(search.score_move(&position, &rook_takes_rook) > search.score_move(&position, &queen_promotion));
    assert!(search.score_move(&position, &queen_promotion) > search.score_move(&position, &knight_promotion));
}

#[test]
fn test_evaluation() {
    let evaluator = Evaluator::default();

    assert_eq!(evaluator.evaluate(&Position::default()), 0);

    for fen in [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ] {
        let position = position(fen);
        assert_eq!(
            evaluator.evaluate(&position),
            evaluator.evaluate(&position.mirrored()),
            "asymmetric evaluation of {}",
            fen
        );
    }

    // an extra queen is good for its owner, whoever is to move
    let white_up = position("3qk3/8/8/8/8/8/8/2QQK3 w - - 0 1");
    let black_to_move = position("3qk3/8/8/8/8/8/8/2QQK3 b - - 0 1");

    assert!(evaluator.evaluate(&white_up) > 0);
    assert_eq!(evaluator.evaluate(&black_to_move), -evaluator.evaluate(&white_up));
}

#[test]
fn test_move_parsing() {
    let start = Position::default();

    assert_eq!(
        BoardMove::parse("e2", &start),
        Err(MoveParseError::InvalidLength("e2".to_string()))
    );
    assert_eq!(
        BoardMove::parse("e2e9", &start),
        Err(MoveParseError::InvalidSquare("e2e9".to_string()))
    );
    assert_eq!(
        BoardMove::parse("e3e4", &start),
        Err(MoveParseError::EmptySource("e3".to_string()))
    );
    assert_eq!(
        BoardMove::parse("e7e5", &start),
        Err(MoveParseError::EmptySource("e7".to_string()))
    );
    assert_eq!(
        BoardMove::parse_legal("e2e5", &start),
        Err(MoveParseError::Illegal("e2e5".to_string()))
    );

    let promotion = position("1n6/P7/8/8/8/8/8/k6K w - - 0 1");

    assert_eq!(
        BoardMove::parse("a7a8x", &promotion),
        Err(MoveParseError::InvalidPromotion('x'))
    );
    assert_eq!(
        BoardMove::parse("a7a8q", &promotion),
        BoardMove::parse("a7a8Q", &promotion)
    );

    let kiwipete = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");

    for board_move in kiwipete.legal_moves() {
        assert_eq!(BoardMove::parse(&board_move.unparse(), &kiwipete), Ok(board_move));
    }
}

#[test]
fn test_controller_options() {
    let mut controller = GameController::new();

    assert!(matches!(
        controller.set_option("Hash", "64"),
        Err(ControllerError::UnknownOption(_))
    ));
    assert!(matches!(
        controller.set_option("Threads", "many"),
        Err(ControllerError::InvalidOptionValue { .. })
    ));
    assert!(matches!(
        controller.set_option("ParallelDepth", "17"),
        Err(ControllerError::InvalidOptionValue { .. })
    ));
    assert!(matches!(
        controller.set_option("parallel", "maybe"),
        Err(ControllerError::InvalidOptionValue { .. })
    ));

    controller.set_option("Threads", "2").unwrap();
    controller.set_option("ParallelDepth", "1").unwrap();
    assert_eq!(controller.threads, 2);
    assert_eq!(controller.parallel_depth, 1);

    assert_eq!(perft::total(&controller.perft(3)), 8902);

    controller.set_option("Parallel", "false").unwrap();
    assert!(!controller.parallel);
    assert_eq!(perft::total(&controller.perft(3)), 8902);
}

#[test]
fn test_moves_from_square() {
    let mut controller = GameController::new();

    let knight_moves = controller.moves_from(BoardSquare::parse("g1").unwrap());
    assert_eq!(notations(&knight_moves), vec!["g1f3", "g1h3"]);

    controller
        .new_game_from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1")
        .unwrap();
    let king_moves = controller.moves_from(u8::E8);

    assert!(king_moves.contains(&BoardMove::Castle(CastlingRight::BlackKingSide)));
    assert!(controller.moves_from(u8::E1).is_empty());
}

#[test]
fn test_bitboard_helpers() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..1000 {
        let n: u64 = rng.random();
        assert_eq!(reverse(n), n.reverse_bits());
    }

    assert_eq!(ray_between(u8::A1, u8::H8).count_ones(), 6);
    assert_eq!(ray_between(u8::E1, u8::E8).count_ones(), 6);
    assert_eq!(ray_between(u8::A1, u8::H1), RANK_1 & !(1 | 1 << 7));
    assert_eq!(ray_between(u8::A1, BoardSquare::parse("b3").unwrap()), 0);
    assert_eq!(ray_between(u8::E1, u8::F1), 0);
}

#[test]
fn test_attacked_squares() {
    let start = Position::default();

    // every square of the third rank, and nothing else
    assert_eq!(start.attacked_squares(Color::White), RANK_1 << 16);
    assert_eq!(start.attacked_squares(Color::Black), RANK_1 << 40);

    let en_passant = position("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    assert!(
        en_passant
            .attacked_squares(Color::White)
            .is_set(BoardSquare::parse("f6").unwrap())
    );
}

#[test]
fn test_random_playouts() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..50 {
        let mut position = Position::default();

        for _ in 0..200 {
            let moves = position.legal_moves();

            assert_eq!(position.mirrored().mirrored(), position);
            assert_eq!(position.mirrored().legal_moves().len(), moves.len());
            assert_eq!(Position::from_fen(&position.to_fen()), Ok(position));

            if moves.is_empty() {
                break;
            }

            let mover = position.side;
            let board_move = moves[rng.random_range(0..moves.len())];

            position.make_move(board_move);

            assert!(
                !position.is_in_check(mover),
                "{} leaves the king in check, now {}",
                board_move,
                position
            );
        }
    }
}
