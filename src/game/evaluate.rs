use crate::game::board::Position;
use crate::game::pieces::{Color, Piece};
use crate::utils::{Bitboard, BitboardExt};
use strum::{EnumCount, IntoEnumIterator};

/// Score of being checkmated is the negation of this.
pub const CHECKMATE_SCORE: i32 = i32::MAX;

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 20_000;

pub const BISHOP_PAIR_BONUS: i32 = 66;
pub const KNIGHT_PAIR_BONUS: i32 = -64;
pub const ROOK_PAIR_BONUS: i32 = -100;
pub const QUEEN_PAIR_BONUS: i32 = -180;
pub const NO_PAWNS_BONUS: i32 = -300;

pub type PieceSquareTable = [i32; 64];

// Tables are written from white's point of view with the 8th rank on top,
// so a white piece on square s reads entry s ^ 56 and a black one reads entry s.

#[rustfmt::skip]
const PAWN_TABLE: PieceSquareTable = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: PieceSquareTable = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: PieceSquareTable = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: PieceSquareTable = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: PieceSquareTable = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_TABLE: PieceSquareTable = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

/// Adjustments for owning two or more of a piece type, or no pawns at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairBonuses {
    pub bishop_pair: i32,
    pub knight_pair: i32,
    pub rook_pair: i32,
    pub queen_pair: i32,
    pub no_pawns: i32,
}

impl Default for PairBonuses {
    fn default() -> Self {
        PairBonuses {
            bishop_pair: BISHOP_PAIR_BONUS,
            knight_pair: KNIGHT_PAIR_BONUS,
            rook_pair: ROOK_PAIR_BONUS,
            queen_pair: QUEEN_PAIR_BONUS,
            no_pawns: NO_PAWNS_BONUS,
        }
    }
}

/// Static evaluation: material, piece-square tables and pair bonuses.
///
/// All numbers are plain data so that a different set can be plugged into the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluator {
    pub material: [i32; Piece::COUNT],
    pub tables: [PieceSquareTable; Piece::COUNT],
    pub bonuses: PairBonuses,
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator {
            material: [
                PAWN_VALUE,
                KNIGHT_VALUE,
                BISHOP_VALUE,
                ROOK_VALUE,
                QUEEN_VALUE,
                KING_VALUE,
            ],
            tables: [
                PAWN_TABLE,
                KNIGHT_TABLE,
                BISHOP_TABLE,
                ROOK_TABLE,
                QUEEN_TABLE,
                KING_TABLE,
            ],
            bonuses: PairBonuses::default(),
        }
    }
}

impl Evaluator {
    pub fn piece_value(&self, piece: Piece) -> i32 {
        self.material[piece as usize]
    }

    /// Score of the position in centipawns, relative to the side to move.
    pub fn evaluate(&self, position: &Position) -> i32 {
        let score = self.side_score(position, Color::White) - self.side_score(position, Color::Black);

        match position.side {
            Color::White => score,
            Color::Black => -score,
        }
    }

    fn side_score(&self, position: &Position, color: Color) -> i32 {
        let mut score = 0;

        for piece in Piece::iter() {
            let pieces = position.pieces(piece, color);
            let table = &self.tables[piece as usize];

            score += pieces.count_ones() as i32 * self.piece_value(piece);
            score += pieces
                .iter_positions()
                .map(|square| match color {
                    Color::White => table[(square ^ 56) as usize],
                    Color::Black => table[square as usize],
                })
                .sum::<i32>();
        }

        score + self.pair_bonus(position, color)
    }

    fn pair_bonus(&self, position: &Position, color: Color) -> i32 {
        let pair = |piece: Piece, bonus: i32| {
            let pieces: Bitboard = position.pieces(piece, color);
            if pieces.count_ones() >= 2 { bonus } else { 0 }
        };

        let no_pawns = match position.pieces(Piece::Pawn, color) {
            0 => self.bonuses.no_pawns,
            _ => 0,
        };

        pair(Piece::Bishop, self.bonuses.bishop_pair)
            + pair(Piece::Knight, self.bonuses.knight_pair)
            + pair(Piece::Rook, self.bonuses.rook_pair)
            + pair(Piece::Queen, self.bonuses.queen_pair)
            + no_pawns
    }
}
