use super::pieces::Color;
use super::square::{BoardSquare, BoardSquareExt};
use crate::utils::Bitboard;
use std::fmt::{Display, Formatter, Result};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum CastlingRight {
    WhiteKingSide,
    WhiteQueenSide,
    BlackKingSide,
    BlackQueenSide,
}

/// Where the king and rook start and end when castling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CastlingSquares {
    pub king_from: BoardSquare,
    pub king_to: BoardSquare,
    pub rook_from: BoardSquare,
    pub rook_to: BoardSquare,
}

impl CastlingRight {
    pub const fn bit(self) -> u8 {
        match self {
            CastlingRight::WhiteKingSide => 0b1000,
            CastlingRight::WhiteQueenSide => 0b0100,
            CastlingRight::BlackKingSide => 0b0010,
            CastlingRight::BlackQueenSide => 0b0001,
        }
    }

    pub const fn color(self) -> Color {
        match self {
            CastlingRight::WhiteKingSide | CastlingRight::WhiteQueenSide => Color::White,
            CastlingRight::BlackKingSide | CastlingRight::BlackQueenSide => Color::Black,
        }
    }

    pub const fn mirrored(self) -> Self {
        match self {
            CastlingRight::WhiteKingSide => CastlingRight::BlackKingSide,
            CastlingRight::WhiteQueenSide => CastlingRight::BlackQueenSide,
            CastlingRight::BlackKingSide => CastlingRight::WhiteKingSide,
            CastlingRight::BlackQueenSide => CastlingRight::WhiteQueenSide,
        }
    }

    pub fn squares(self) -> CastlingSquares {
        match self {
            CastlingRight::WhiteKingSide => CastlingSquares {
                king_from: u8::E1,
                king_to: u8::G1,
                rook_from: u8::H1,
                rook_to: u8::F1,
            },
            CastlingRight::WhiteQueenSide => CastlingSquares {
                king_from: u8::E1,
                king_to: u8::C1,
                rook_from: u8::A1,
                rook_to: u8::D1,
            },
            CastlingRight::BlackKingSide => CastlingSquares {
                king_from: u8::E8,
                king_to: u8::G8,
                rook_from: u8::H8,
                rook_to: u8::F8,
            },
            CastlingRight::BlackQueenSide => CastlingSquares {
                king_from: u8::E8,
                king_to: u8::C8,
                rook_from: u8::A8,
                rook_to: u8::D8,
            },
        }
    }

    /// Squares between king and rook, all of which must be empty.
    pub fn empty_path(self) -> Bitboard {
        let CastlingSquares {
            king_from,
            rook_from,
            ..
        } = self.squares();

        crate::utils::ray_between(king_from, rook_from)
    }

    /// Squares the king stands on, crosses, or lands on; none may be attacked.
    pub fn king_path(self) -> Bitboard {
        let CastlingSquares {
            king_from, king_to, ..
        } = self.squares();

        crate::utils::ray_between(king_from, king_to) | king_from.to_mask() | king_to.to_mask()
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'K' => Some(CastlingRight::WhiteKingSide),
            'Q' => Some(CastlingRight::WhiteQueenSide),
            'k' => Some(CastlingRight::BlackKingSide),
            'q' => Some(CastlingRight::BlackQueenSide),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            CastlingRight::WhiteKingSide => 'K',
            CastlingRight::WhiteQueenSide => 'Q',
            CastlingRight::BlackKingSide => 'k',
            CastlingRight::BlackQueenSide => 'q',
        }
    }

    pub fn notation(self) -> &'static str {
        match self {
            CastlingRight::WhiteKingSide => "O-O",
            CastlingRight::WhiteQueenSide => "O-O-O",
            CastlingRight::BlackKingSide => "o-o",
            CastlingRight::BlackQueenSide => "o-o-o",
        }
    }

    pub fn from_notation(notation: &str) -> Option<Self> {
        CastlingRight::iter().find(|right| right.notation() == notation)
    }
}

/// The 4-bit KQkq set. Rights are only ever removed during a game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    pub fn has(self, right: CastlingRight) -> bool {
        self.0 & right.bit() != 0
    }

    pub fn insert(&mut self, right: CastlingRight) {
        self.0 |= right.bit();
    }

    pub fn remove(&mut self, right: CastlingRight) {
        self.0 &= !right.bit();
    }

    pub fn remove_color(&mut self, color: Color) {
        for right in CastlingRight::iter().filter(|right| right.color() == color) {
            self.remove(right);
        }
    }

    /// Swaps the white and black halves of the nibble.
    pub fn mirrored(self) -> Self {
        CastlingRights(((self.0 >> 2) | (self.0 << 2)) & 0b1111)
    }

    pub fn iter(self) -> impl Iterator<Item = CastlingRight> {
        CastlingRight::iter().filter(move |right| self.has(*right))
    }
}

impl Display for CastlingRights {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.0 == 0 {
            return write!(f, "-");
        }

        for right in self.iter() {
            write!(f, "{}", right.to_char())?;
        }

        Ok(())
    }
}
