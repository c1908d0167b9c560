use super::board::Position;
use super::castling::CastlingRight;
use super::error::MoveParseError;
use super::pieces::{ColoredPiece, Piece};
use super::square::{BoardSquare, BoardSquareExt};
use std::fmt::{Display, Formatter};

/// A move as produced by the generator and consumed by the applier.
///
/// A normal move records the piece leaving `from` and the piece arriving on `to`;
/// the two only differ for promotions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoardMove {
    Castle(CastlingRight),
    Normal {
        from_piece: ColoredPiece,
        to_piece: ColoredPiece,
        from: BoardSquare,
        to: BoardSquare,
    },
}

impl BoardMove {
    pub fn normal(piece: ColoredPiece, from: BoardSquare, to: BoardSquare) -> Self {
        BoardMove::Normal {
            from_piece: piece,
            to_piece: piece,
            from,
            to,
        }
    }

    pub fn promotion(pawn: ColoredPiece, promoted: Piece, from: BoardSquare, to: BoardSquare) -> Self {
        BoardMove::Normal {
            from_piece: pawn,
            to_piece: ColoredPiece::new(promoted, pawn.color),
            from,
            to,
        }
    }

    pub fn is_castle(&self) -> bool {
        matches!(self, BoardMove::Castle(_))
    }

    pub fn is_promotion(&self) -> bool {
        match self {
            BoardMove::Normal {
                from_piece,
                to_piece,
                ..
            } => from_piece != to_piece,
            BoardMove::Castle(_) => false,
        }
    }

    /// The same move seen from the reflected position.
    pub fn mirrored(&self) -> Self {
        match *self {
            BoardMove::Castle(right) => BoardMove::Castle(right.mirrored()),
            BoardMove::Normal {
                from_piece,
                to_piece,
                from,
                to,
            } => BoardMove::Normal {
                from_piece: from_piece.flipped(),
                to_piece: to_piece.flipped(),
                from: from.flip_vertical(),
                to: to.flip_vertical(),
            },
        }
    }

    /// Long algebraic notation; promotions carry the piece letter, uppercase for white.
    pub fn unparse(&self) -> String {
        match self {
            BoardMove::Castle(right) => right.notation().to_string(),
            BoardMove::Normal {
                from_piece,
                to_piece,
                from,
                to,
            } => {
                let mut notation = format!("{}{}", from.unparse(), to.unparse());

                if from_piece != to_piece {
                    notation.push(to_piece.to_char());
                }

                notation
            }
        }
    }

    /// Reads a move in long algebraic notation (or castling notation) against a position.
    ///
    /// The promotion letter is case-insensitive; the promoted piece takes the mover's color.
    /// This checks the notation only, see [`BoardMove::parse_legal`] for legality.
    pub fn parse(notation: &str, position: &Position) -> Result<Self, MoveParseError> {
        if let Some(right) = CastlingRight::from_notation(notation) {
            return Ok(BoardMove::Castle(right));
        }

        if !notation.is_ascii() {
            return Err(MoveParseError::InvalidSquare(notation.to_string()));
        }

        if notation.len() != 4 && notation.len() != 5 {
            return Err(MoveParseError::InvalidLength(notation.to_string()));
        }

        let (from, to) = match (
            BoardSquare::parse(&notation[0..2]),
            BoardSquare::parse(&notation[2..4]),
        ) {
            (Some(from), Some(to)) => (from, to),
            _ => return Err(MoveParseError::InvalidSquare(notation.to_string())),
        };

        let from_piece = position
            .piece_at(from)
            .filter(|piece| piece.color == position.side)
            .ok_or_else(|| MoveParseError::EmptySource(from.unparse()))?;

        let to_piece = match notation.chars().nth(4) {
            None => from_piece,
            Some(c) => match Piece::from_char(c.to_ascii_lowercase()) {
                Some(piece @ (Piece::Queen | Piece::Rook | Piece::Bishop | Piece::Knight)) => {
                    ColoredPiece::new(piece, from_piece.color)
                }
                _ => return Err(MoveParseError::InvalidPromotion(c)),
            },
        };

        Ok(BoardMove::Normal {
            from_piece,
            to_piece,
            from,
            to,
        })
    }

    /// Like [`BoardMove::parse`], but also requires the move to be legal in the position.
    pub fn parse_legal(notation: &str, position: &Position) -> Result<Self, MoveParseError> {
        let board_move = BoardMove::parse(notation, position)?;

        if position.legal_moves().contains(&board_move) {
            Ok(board_move)
        } else {
            Err(MoveParseError::Illegal(notation.to_string()))
        }
    }
}

impl Display for BoardMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.unparse())
    }
}
