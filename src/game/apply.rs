use super::board::Position;
use super::castling::CastlingRight;
use super::moves::BoardMove;
use super::pieces::{Color, ColoredPiece, Piece};
use super::square::{BoardSquare, BoardSquareExt};
use crate::utils::BitboardExt;
use strum::IntoEnumIterator;

impl Position {
    /// Plays a move, which is assumed to be legal in this position.
    pub fn make_move(&mut self, board_move: BoardMove) {
        match board_move {
            BoardMove::Castle(right) => self.castle(right),
            BoardMove::Normal {
                from_piece,
                to_piece,
                from,
                to,
            } => self.move_piece(from_piece, to_piece, from, to),
        }
    }

    fn castle(&mut self, right: CastlingRight) {
        let color = right.color();
        let squares = right.squares();

        self.boards[ColoredPiece::new(Piece::King, color).index()] ^=
            squares.king_from.to_mask() | squares.king_to.to_mask();
        self.boards[ColoredPiece::new(Piece::Rook, color).index()] ^=
            squares.rook_from.to_mask() | squares.rook_to.to_mask();

        self.castling.remove_color(color);
        self.en_passant = None;
        self.halfmove_clock = self.halfmove_clock.saturating_add(1);

        self.finish_turn();
    }

    fn move_piece(&mut self, from_piece: ColoredPiece, to_piece: ColoredPiece, from: BoardSquare, to: BoardSquare) {
        let opponent = !from_piece.color;
        let is_pawn = from_piece.piece == Piece::Pawn;

        self.boards[from_piece.index()] &= !from.to_mask();

        let captured = if is_pawn && self.en_passant == Some(to) {
            // the captured pawn sits behind the target square
            let square = match from_piece.color {
                Color::White => to - 8,
                Color::Black => to + 8,
            };

            self.boards[ColoredPiece::new(Piece::Pawn, opponent).index()] &= !square.to_mask();
            true
        } else {
            let mut captured = false;

            for piece in Piece::iter() {
                let board = &mut self.boards[ColoredPiece::new(piece, opponent).index()];

                if board.is_set(to) {
                    *board &= !to.to_mask();
                    captured = true;
                }
            }

            captured
        };

        self.boards[to_piece.index()] |= to.to_mask();

        self.en_passant = if is_pawn && from.abs_diff(to) == 16 {
            Some((from + to) / 2)
        } else {
            None
        };

        self.update_castling_rights();

        self.halfmove_clock = if is_pawn || captured {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };

        self.finish_turn();
    }

    /// Drops every right whose king or rook has left its home square.
    fn update_castling_rights(&mut self) {
        for right in self.castling.iter() {
            let color = right.color();
            let squares = right.squares();

            let king_home = self.pieces(Piece::King, color).is_set(squares.king_from);
            let rook_home = self.pieces(Piece::Rook, color).is_set(squares.rook_from);

            if !(king_home && rook_home) {
                self.castling.remove(right);
            }
        }
    }

    fn finish_turn(&mut self) {
        if self.side == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side = !self.side;
    }
}
