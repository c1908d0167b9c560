use super::board::Position;
use super::castling::CastlingRight;
use super::moves::BoardMove;
use super::pieces::{Color, ColoredPiece, Piece, PROMOTION_PIECES};
use super::square::{BoardSquare, BoardSquareExt};
use crate::utils::{
    bishop_attacks, queen_attacks, ray_between, rook_attacks, shared_line, Bitboard, BitboardExt,
    FILE_A, FILE_H, FILE_MASKS, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS, RANK_2, RANK_4, RANK_6,
    RANK_8, RANK_MASKS,
};

const fn white(piece: Piece) -> ColoredPiece {
    ColoredPiece::new(piece, Color::White)
}

const PAWN: ColoredPiece = white(Piece::Pawn);
const KNIGHT: ColoredPiece = white(Piece::Knight);
const BISHOP: ColoredPiece = white(Piece::Bishop);
const ROOK: ColoredPiece = white(Piece::Rook);
const QUEEN: ColoredPiece = white(Piece::Queen);
const KING: ColoredPiece = white(Piece::King);

impl Position {
    /// All legal moves of the side to move.
    ///
    /// Generation always happens from white's point of view: for black, the position is
    /// mirrored first and the resulting moves are mirrored back.
    pub fn legal_moves(&self) -> Vec<BoardMove> {
        match self.side {
            Color::White => MoveGenerator::new(self).generate(),
            Color::Black => MoveGenerator::new(&self.mirrored())
                .generate()
                .into_iter()
                .map(|board_move| board_move.mirrored())
                .collect(),
        }
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_in_check(self.side) && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check(self.side) && self.legal_moves().is_empty()
    }
}

/// White's pieces that are free to move anywhere (not pinned).
#[derive(Copy, Clone, Debug)]
struct Movable {
    pawns: Bitboard,
    knights: Bitboard,
    bishops: Bitboard,
    rooks: Bitboard,
    queens: Bitboard,
}

impl Movable {
    fn is_empty(&self) -> bool {
        self.pawns | self.knights | self.bishops | self.rooks | self.queens == 0
    }

    fn remove(&mut self, square: BoardSquare) {
        let mask = !square.to_mask();

        self.pawns &= mask;
        self.knights &= mask;
        self.bishops &= mask;
        self.rooks &= mask;
        self.queens &= mask;
    }
}

/// Legal move generation for a position with white to move.
struct MoveGenerator<'a> {
    position: &'a Position,
    moves: Vec<BoardMove>,

    king: BoardSquare,
    ours: Bitboard,
    theirs: Bitboard,
    occupancy: Bitboard,
}

impl<'a> MoveGenerator<'a> {
    fn new(position: &'a Position) -> Self {
        let ours = position.occupied(Color::White);
        let theirs = position.occupied(Color::Black);

        MoveGenerator {
            position,
            moves: Vec::with_capacity(64),
            king: position.king_square(Color::White),
            ours,
            theirs,
            occupancy: ours | theirs,
        }
    }

    fn generate(mut self) -> Vec<BoardMove> {
        let danger = self.position.king_danger(Color::White);

        self.push_targets(KING, self.king, KING_ATTACKS[self.king as usize] & !danger & !self.ours);

        let attackers = self.position.king_attackers(Color::White);

        let mut movable = Movable {
            pawns: self.position.pieces(Piece::Pawn, Color::White),
            knights: self.position.pieces(Piece::Knight, Color::White),
            bishops: self.position.pieces(Piece::Bishop, Color::White),
            rooks: self.position.pieces(Piece::Rook, Color::White),
            queens: self.position.pieces(Piece::Queen, Color::White),
        };

        // only the king can answer a double check
        if attackers.count() > 1 || movable.is_empty() {
            log::trace!("{} king-only moves in {}", self.moves.len(), self.position);
            return self.moves;
        }

        self.push_en_passant();

        // pinned pieces only move along their pin line, which also blocks a check from
        // elsewhere, so their moves are only of use when not in check
        let pin_moves = self.pinned_moves(&mut movable);

        if attackers.count() == 1 {
            let attacker = attackers.attackers.next_index();

            self.push_moves_onto(attacker, &movable);

            if attackers.sliding {
                for square in ray_between(self.king, attacker).iter_positions() {
                    self.push_moves_onto(square, &movable);
                    self.push_pushes_onto(square, movable.pawns);
                }
            }

            log::trace!("{} check evasions in {}", self.moves.len(), self.position);
            return self.moves;
        }

        self.push_pseudo_legal(&movable);
        self.moves.extend(pin_moves);
        self.push_castling(danger);

        log::trace!("{} moves in {}", self.moves.len(), self.position);
        self.moves
    }

    fn push_targets(&mut self, piece: ColoredPiece, from: BoardSquare, targets: Bitboard) {
        for to in targets.iter_positions() {
            self.moves.push(BoardMove::normal(piece, from, to));
        }
    }

    /// A pawn move, expanded into all four promotions when it reaches the last rank.
    fn push_pawn_move(moves: &mut Vec<BoardMove>, from: BoardSquare, to: BoardSquare) {
        if RANK_8.is_set(to) {
            for piece in PROMOTION_PIECES {
                moves.push(BoardMove::promotion(PAWN, piece, from, to));
            }
        } else {
            moves.push(BoardMove::normal(PAWN, from, to));
        }
    }

    /// En-passant captures, each checked by playing it on a copy of the position: removing
    /// two pawns from the same rank can expose the king in a way pin detection doesn't see.
    fn push_en_passant(&mut self) {
        let Some(target) = self.position.en_passant else {
            return;
        };

        let captured = target - 8;

        if !RANK_6.is_set(target) || !self.position.pieces(Piece::Pawn, Color::Black).is_set(captured) {
            return;
        }

        let capturers = PAWN_ATTACKS[Color::Black as usize][target as usize]
            & self.position.pieces(Piece::Pawn, Color::White);

        for from in capturers.iter_positions() {
            let mut simulated = *self.position;

            simulated.boards[PAWN.index()] ^= from.to_mask() | target.to_mask();
            simulated.boards[PAWN.flipped().index()] &= !captured.to_mask();

            if !simulated.is_in_check(Color::White) {
                self.moves.push(BoardMove::normal(PAWN, from, target));
            }
        }
    }

    /// Finds pieces pinned to the king, removes them from `movable` and returns the moves
    /// they can still make along their pin line.
    fn pinned_moves(&self, movable: &mut Movable) -> Vec<BoardMove> {
        let mut moves = Vec::new();

        let their_queens = self.position.pieces(Piece::Queen, Color::Black);
        let straight = self.position.pieces(Piece::Rook, Color::Black) | their_queens;
        let diagonal = self.position.pieces(Piece::Bishop, Color::Black) | their_queens;

        let king = self.king as usize;
        let orthogonal_lines = RANK_MASKS[king] | FILE_MASKS[king];

        let candidates = (straight & orthogonal_lines) | (diagonal & !orthogonal_lines);

        for pinner in candidates.iter_positions() {
            let line = shared_line(self.king, pinner);
            if line == 0 {
                continue;
            }

            let between = ray_between(self.king, pinner);
            let blockers = between & self.ours;

            if between & self.theirs != 0 || blockers.count_ones() != 1 {
                continue;
            }

            let pinned = blockers.next_index();
            let is_straight = line & orthogonal_lines == line;

            let slider = if movable.queens.is_set(pinned) {
                Some(QUEEN)
            } else if is_straight && movable.rooks.is_set(pinned) {
                Some(ROOK)
            } else if !is_straight && movable.bishops.is_set(pinned) {
                Some(BISHOP)
            } else {
                None
            };

            if let Some(piece) = slider {
                let along_line = (between & !pinned.to_mask()) | pinner.to_mask();

                for to in along_line.iter_positions() {
                    moves.push(BoardMove::normal(piece, pinned, to));
                }
            } else if movable.pawns.is_set(pinned) {
                if FILE_MASKS[king].is_set(pinner) {
                    Self::push_pawn_pushes(&mut moves, pinned, self.occupancy);
                } else if !is_straight && PAWN_ATTACKS[Color::White as usize][pinned as usize].is_set(pinner) {
                    Self::push_pawn_move(&mut moves, pinned, pinner);
                }
            }

            movable.remove(pinned);
        }

        moves
    }

    /// Single and double pushes of the pawn on `from`.
    fn push_pawn_pushes(moves: &mut Vec<BoardMove>, from: BoardSquare, occupancy: Bitboard) {
        let single = from + 8;

        if single > 63 || occupancy.is_set(single) {
            return;
        }

        Self::push_pawn_move(moves, from, single);

        let double = from + 16;
        if RANK_2.is_set(from) && !occupancy.is_set(double) {
            moves.push(BoardMove::normal(PAWN, from, double));
        }
    }

    /// Moves by free pieces that capture on or move to `square`, found by looking at the
    /// attacks from `square` backwards. Pawn pushes are handled by [`Self::push_pushes_onto`].
    fn push_moves_onto(&mut self, square: BoardSquare, movable: &Movable) {
        let index = square as usize;

        if self.theirs.is_set(square) {
            for from in (PAWN_ATTACKS[Color::Black as usize][index] & movable.pawns).iter_positions() {
                Self::push_pawn_move(&mut self.moves, from, square);
            }
        }

        let sources = [
            (KNIGHT, KNIGHT_ATTACKS[index] & movable.knights),
            (BISHOP, bishop_attacks(square, self.occupancy) & movable.bishops),
            (ROOK, rook_attacks(square, self.occupancy) & movable.rooks),
            (QUEEN, queen_attacks(square, self.occupancy) & movable.queens),
        ];

        for (piece, from_squares) in sources {
            for from in from_squares.iter_positions() {
                self.moves.push(BoardMove::normal(piece, from, square));
            }
        }
    }

    /// Pawn pushes landing on the empty `square`.
    fn push_pushes_onto(&mut self, square: BoardSquare, pawns: Bitboard) {
        if square < 8 {
            return;
        }

        let single = square - 8;

        if pawns.is_set(single) {
            Self::push_pawn_move(&mut self.moves, single, square);
        } else if RANK_4.is_set(square) && !self.occupancy.is_set(single) && pawns.is_set(square - 16) {
            self.moves.push(BoardMove::normal(PAWN, square - 16, square));
        }
    }

    fn push_pseudo_legal(&mut self, movable: &Movable) {
        let empty = !self.occupancy;

        let single = (movable.pawns << 8) & empty;
        for to in single.iter_positions() {
            Self::push_pawn_move(&mut self.moves, to - 8, to);
        }

        let double = (movable.pawns << 16) & empty & (empty << 8) & RANK_4;
        for to in double.iter_positions() {
            self.moves.push(BoardMove::normal(PAWN, to - 16, to));
        }

        let left = (movable.pawns << 7) & self.theirs & !FILE_H;
        for to in left.iter_positions() {
            Self::push_pawn_move(&mut self.moves, to - 7, to);
        }

        let right = (movable.pawns << 9) & self.theirs & !FILE_A;
        for to in right.iter_positions() {
            Self::push_pawn_move(&mut self.moves, to - 9, to);
        }

        for from in movable.knights.iter_positions() {
            self.push_targets(KNIGHT, from, KNIGHT_ATTACKS[from as usize] & !self.ours);
        }

        for from in movable.bishops.iter_positions() {
            self.push_targets(BISHOP, from, bishop_attacks(from, self.occupancy) & !self.ours);
        }

        for from in movable.rooks.iter_positions() {
            self.push_targets(ROOK, from, rook_attacks(from, self.occupancy) & !self.ours);
        }

        for from in movable.queens.iter_positions() {
            self.push_targets(QUEEN, from, queen_attacks(from, self.occupancy) & !self.ours);
        }
    }

    fn push_castling(&mut self, danger: Bitboard) {
        for right in [CastlingRight::WhiteKingSide, CastlingRight::WhiteQueenSide] {
            if !self.position.castling.has(right) {
                continue;
            }

            let squares = right.squares();

            let in_place = self.king == squares.king_from
                && self.position.pieces(Piece::Rook, Color::White).is_set(squares.rook_from);

            if in_place && self.occupancy & right.empty_path() == 0 && danger & right.king_path() == 0 {
                self.moves.push(BoardMove::Castle(right));
            }
        }
    }
}
