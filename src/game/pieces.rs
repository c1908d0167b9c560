use std::ops::Not;
use strum::EnumCount;
use strum_macros::{EnumCount, EnumIter, FromRepr};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount, FromRepr)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount, FromRepr)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl Piece {
    pub fn from_char(c: char) -> Option<Piece> {
        match c {
            'p' => Some(Piece::Pawn),
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            'k' => Some(Piece::King),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Piece::Pawn   => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook   => 'r',
            Piece::Queen  => 'q',
            Piece::King   => 'k',
        }
    }

    pub fn to_emoji(self) -> char {
        // colored through ANSI codes when printed
        match self {
            Piece::Pawn => '♟',
            Piece::Knight => '♞',
            Piece::Bishop => '♝',
            Piece::Rook => '♜',
            Piece::Queen => '♛',
            Piece::King => '♚',
        }
    }
}

/// The pieces a pawn may promote to, in the order moves are generated.
pub const PROMOTION_PIECES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

/// A piece of a given color; also the index of its bitboard within a position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColoredPiece {
    pub piece: Piece,
    pub color: Color,
}

impl ColoredPiece {
    pub const fn new(piece: Piece, color: Color) -> Self {
        Self { piece, color }
    }

    /// Board id: white pieces occupy 0..6, black pieces 6..12.
    pub const fn index(self) -> usize {
        self.color as usize * Piece::COUNT + self.piece as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        let color = Color::from_repr(index / Piece::COUNT)?;
        let piece = Piece::from_repr(index % Piece::COUNT)?;

        Some(Self { piece, color })
    }

    /// Same piece, other color (the board id shifted by the six-piece offset).
    pub fn flipped(self) -> Self {
        Self {
            piece: self.piece,
            color: !self.color,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let piece = Piece::from_char(c.to_ascii_lowercase())?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        Some(Self { piece, color })
    }

    pub fn to_char(self) -> char {
        match self.color {
            Color::White => self.piece.to_char().to_ascii_uppercase(),
            Color::Black => self.piece.to_char(),
        }
    }
}
