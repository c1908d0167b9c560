use super::board::Position;
use super::pieces::{Color, Piece};
use super::square::BoardSquareExt;
use crate::utils::{
    bishop_attacks, rook_attacks, Bitboard, BitboardExt, FILE_A, FILE_H, KING_ATTACKS,
    KNIGHT_ATTACKS, PAWN_ATTACKS,
};

/// The pieces giving check to a king.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KingAttackers {
    pub attackers: Bitboard,
    pub sliding: bool, // at least one attacker is a bishop, rook or queen
}

impl KingAttackers {
    pub fn count(&self) -> u32 {
        self.attackers.count_ones()
    }
}

/// Squares attacked by a whole set of pawns of the given color.
pub fn pawn_attacks(pawns: Bitboard, color: Color) -> Bitboard {
    match color {
        Color::White => ((pawns << 7) & !FILE_H) | ((pawns << 9) & !FILE_A),
        Color::Black => ((pawns >> 9) & !FILE_H) | ((pawns >> 7) & !FILE_A),
    }
}

impl Position {
    /// Every square attacked by `color`, sliders being stopped by `occupancy`.
    /// Squares holding `color`'s own pieces are included (they are defended).
    pub fn attacks_by(&self, color: Color, occupancy: Bitboard) -> Bitboard {
        let mut attacks = pawn_attacks(self.pieces(Piece::Pawn, color), color);

        for square in self.pieces(Piece::Knight, color).iter_positions() {
            attacks |= KNIGHT_ATTACKS[square as usize];
        }

        let queens = self.pieces(Piece::Queen, color);

        for square in (self.pieces(Piece::Bishop, color) | queens).iter_positions() {
            attacks |= bishop_attacks(square, occupancy);
        }

        for square in (self.pieces(Piece::Rook, color) | queens).iter_positions() {
            attacks |= rook_attacks(square, occupancy);
        }

        for square in self.pieces(Piece::King, color).iter_positions() {
            attacks |= KING_ATTACKS[square as usize];
        }

        attacks
    }

    /// Squares `color` could move to or capture on: attacks landing on empty or enemy squares,
    /// plus the en-passant target when `color` is to move and one of its pawns can reach it.
    pub fn attacked_squares(&self, color: Color) -> Bitboard {
        let mut squares = self.attacks_by(color, self.occupancy()) & !self.occupied(color);

        if let Some(target) = self.en_passant {
            let capturers = PAWN_ATTACKS[!color as usize][target as usize] & self.pieces(Piece::Pawn, color);

            if self.side == color && capturers != 0 {
                squares |= target.to_mask();
            }
        }

        squares
    }

    /// Squares the king of `color` must not step on.
    ///
    /// The king itself is removed from the occupancy, so a slider checking it also covers
    /// the squares behind the king along the checking line.
    pub fn king_danger(&self, color: Color) -> Bitboard {
        let occupancy = self.occupancy() & !self.pieces(Piece::King, color);

        self.attacks_by(!color, occupancy)
    }

    pub fn king_attackers(&self, color: Color) -> KingAttackers {
        let king = self.king_square(color) as usize;
        let them = !color;
        let occupancy = self.occupancy();
        let queens = self.pieces(Piece::Queen, them);

        let leapers = (PAWN_ATTACKS[color as usize][king] & self.pieces(Piece::Pawn, them))
            | (KNIGHT_ATTACKS[king] & self.pieces(Piece::Knight, them));

        let sliders = (bishop_attacks(king as u8, occupancy) & (self.pieces(Piece::Bishop, them) | queens))
            | (rook_attacks(king as u8, occupancy) & (self.pieces(Piece::Rook, them) | queens));

        KingAttackers {
            attackers: leapers | sliders,
            sliding: sliders != 0,
        }
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_attackers(color).attackers != 0
    }
}
