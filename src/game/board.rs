use super::castling::{CastlingRight, CastlingRights};
use super::error::FenError;
use super::pieces::{Color, ColoredPiece, Piece};
use super::square::{BoardSquare, BoardSquareExt};
use crate::utils::{Bitboard, BitboardExt};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use strum::{EnumCount, IntoEnumIterator};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Number of piece bitboards; white pieces first, then black.
pub const BOARD_COUNT: usize = Color::COUNT * Piece::COUNT;

/// A full chess position.
///
/// The position is a plain value: copying it gives an independent position,
/// which is how the move generator and searcher explore children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub boards: [Bitboard; BOARD_COUNT],

    pub side: Color,
    pub en_passant: Option<BoardSquare>, // target square behind a pawn that just double-pushed
    pub castling: CastlingRights,

    pub halfmove_clock: u32,  // halfmoves since the last capture or pawn advance
    pub fullmove_number: u32, // incremented after black's move
}

impl Position {
    /// A position with no pieces and white to move.
    pub fn empty() -> Self {
        Position {
            boards: [0; BOARD_COUNT],
            side: Color::White,
            en_passant: None,
            castling: CastlingRights::NONE,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Parses the FEN, falling back to the starting position when none (or a blank one) is given.
    pub fn new(fen: Option<&str>) -> Result<Self, FenError> {
        match fen {
            Some(fen) if !fen.trim().is_empty() => Position::from_fen(fen),
            _ => Position::from_fen(STARTING_FEN),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut parts = fen.split_whitespace();
        let mut position = Position::empty();

        let placement = parts.next().ok_or(FenError::MissingField("piece placement"))?;
        position.read_placement(placement)?;

        position.side = match parts.next() {
            Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(FenError::InvalidSideToMove(other.to_string())),
            None => return Err(FenError::MissingField("side to move")),
        };

        let castling = parts.next().ok_or(FenError::MissingField("castling"))?;
        if castling != "-" {
            for c in castling.chars() {
                let right = CastlingRight::from_char(c).ok_or(FenError::InvalidCastling(c))?;
                position.castling.insert(right);
            }
        }

        position.en_passant = match parts.next() {
            Some("-") => None,
            Some(square) => Some(
                BoardSquare::parse(square)
                    .filter(|s| s.get_y() == 2 || s.get_y() == 5)
                    .ok_or_else(|| FenError::InvalidEnPassant(square.to_string()))?,
            ),
            None => return Err(FenError::MissingField("en passant")),
        };

        // the clocks are optional, as plenty of test suites omit them
        position.halfmove_clock = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
        position.fullmove_number = parts.next().and_then(|s| s.parse().ok()).unwrap_or(1);

        let extra = parts.count();
        if extra != 0 {
            return Err(FenError::TooManyFields(6 + extra));
        }

        for color in Color::iter() {
            if position.pieces(Piece::King, color).count_ones() != 1 {
                return Err(FenError::MissingKing(color));
            }
        }

        Ok(position)
    }

    fn read_placement(&mut self, placement: &str) -> Result<(), FenError> {
        let ranks = placement.split('/').collect::<Vec<_>>();

        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        for (i, rank) in ranks.iter().enumerate() {
            // FEN starts at the 8th rank
            let y = 7 - i as u8;
            let mut x = 0u32;

            for c in rank.chars() {
                if let Some(empty) = c.to_digit(10) {
                    x += empty;
                } else {
                    let piece = ColoredPiece::from_char(c).ok_or(FenError::UnknownPiece(c))?;

                    if x < 8 {
                        self.boards[piece.index()] |= BoardSquare::from_position(x as u8, y).to_mask();
                    }

                    x += 1;
                }

                if x > 8 {
                    return Err(FenError::RankOverflow(y as usize + 1));
                }
            }

            if x != 8 {
                return Err(FenError::RankUnderflow(y as usize + 1));
            }
        }

        Ok(())
    }

    pub fn to_fen(&self) -> String {
        let mut placement = String::new();

        for y in (0..8).rev() {
            let mut empty = 0;

            for x in 0..8 {
                match self.piece_at(BoardSquare::from_position(x, y)) {
                    Some(piece) => {
                        if empty != 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }

                        placement.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }

            if empty != 0 {
                placement.push_str(&empty.to_string());
            }

            if y != 0 {
                placement.push('/');
            }
        }

        let side = match self.side {
            Color::White => 'w',
            Color::Black => 'b',
        };

        let en_passant = self
            .en_passant
            .map(|square| square.unparse())
            .unwrap_or_else(|| "-".to_string());

        format!(
            "{} {} {} {} {} {}",
            placement, side, self.castling, en_passant, self.halfmove_clock, self.fullmove_number
        )
    }

    /// The colour-swapped, vertically flipped position: every white piece becomes a black
    /// piece on the mirrored square (and vice versa), the side to move flips, castling rights
    /// swap sides and the en-passant square is mirrored. Applying it twice is the identity.
    pub fn mirrored(&self) -> Position {
        let mut boards = [0; BOARD_COUNT];

        for (index, board) in self.boards.iter().enumerate() {
            boards[(index + Piece::COUNT) % BOARD_COUNT] = board.flip_vertical();
        }

        Position {
            boards,
            side: !self.side,
            en_passant: self.en_passant.map(|square| square.flip_vertical()),
            castling: self.castling.mirrored(),
            ..*self
        }
    }

    #[inline(always)]
    pub fn pieces(&self, piece: Piece, color: Color) -> Bitboard {
        self.boards[ColoredPiece::new(piece, color).index()]
    }

    pub fn occupied(&self, color: Color) -> Bitboard {
        let start = color as usize * Piece::COUNT;

        self.boards[start..start + Piece::COUNT]
            .iter()
            .fold(0, |acc, board| acc | board)
    }

    pub fn occupancy(&self) -> Bitboard {
        self.boards.iter().fold(0, |acc, board| acc | board)
    }

    pub fn piece_at(&self, square: BoardSquare) -> Option<ColoredPiece> {
        self.boards
            .iter()
            .position(|board| board.is_set(square))
            .and_then(ColoredPiece::from_index)
    }

    pub fn king_square(&self, color: Color) -> BoardSquare {
        self.pieces(Piece::King, color).next_index()
    }
}

impl Default for Position {
    fn default() -> Self {
        const BACK_RANK: [Piece; 8] = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];

        let mut position = Position::empty();

        for (x, piece) in BACK_RANK.iter().enumerate() {
            let x = x as u8;

            position.boards[ColoredPiece::new(*piece, Color::White).index()] |=
                BoardSquare::from_position(x, 0).to_mask();
            position.boards[ColoredPiece::new(*piece, Color::Black).index()] |=
                BoardSquare::from_position(x, 7).to_mask();

            position.boards[ColoredPiece::new(Piece::Pawn, Color::White).index()] |=
                BoardSquare::from_position(x, 1).to_mask();
            position.boards[ColoredPiece::new(Piece::Pawn, Color::Black).index()] |=
                BoardSquare::from_position(x, 6).to_mask();
        }

        position.castling = CastlingRights::ALL;
        position
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        Position::from_fen(fen)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}
