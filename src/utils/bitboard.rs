use crate::game::{BoardSquare, Color};
use strum::EnumCount;

pub type Bitboard = u64;

pub trait BitboardExt {
    fn next_index(&self) -> BoardSquare;
    fn is_set(&self, index: BoardSquare) -> bool;
    fn iter_positions(&self) -> BitboardIterator;
    fn flip_vertical(&self) -> Bitboard;
}

// used like this because we can't have a const fn as a trait,
// but we want to use it for the compile-time bitmap calculation
pub const fn position_to_bitmask(x: u32, y: u32) -> u64 {
    1u64 << (x + y * 8)
}

pub const fn is_position_valid(x: isize, y: isize) -> bool {
    x >= 0 && x < 8 && y >= 0 && y < 8
}

impl BitboardExt for u64 {
    fn next_index(&self) -> BoardSquare {
        self.trailing_zeros() as BoardSquare
    }

    fn is_set(&self, index: BoardSquare) -> bool {
        self & (1 << index) != 0
    }

    fn iter_positions(&self) -> BitboardIterator {
        BitboardIterator { remaining: *self }
    }

    // ranks are bytes, so a vertical mirror is a byte swap
    fn flip_vertical(&self) -> Bitboard {
        self.swap_bytes()
    }
}

pub struct BitboardIterator {
    remaining: u64,
}

impl Iterator for BitboardIterator {
    type Item = BoardSquare;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let index = self.remaining.trailing_zeros() as u8;
        self.remaining &= self.remaining - 1; // Clear the lowest set bit

        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.remaining.count_ones() as usize;
        (count, Some(count))
    }
}

type SquareBitboards = [Bitboard; 64];
type PawnAttackBitboards = [SquareBitboards; Color::COUNT];

pub const RANK_1: Bitboard = 0x0000_0000_0000_00FF;
pub const RANK_2: Bitboard = RANK_1 << 8;
pub const RANK_4: Bitboard = RANK_1 << 24;
pub const RANK_6: Bitboard = RANK_1 << 40;
pub const RANK_8: Bitboard = RANK_1 << 56;
pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_H: Bitboard = FILE_A << 7;

const KNIGHT_DELTAS: [[i8; 2]; 8] = [
    [1, 2],
    [2, 1],
    [-1, 2],
    [-2, 1],
    [1, -2],
    [2, -1],
    [-1, -2],
    [-2, -1],
];

const KING_DELTAS: [[i8; 2]; 8] = [
    [1, 0],
    [0, 1],
    [-1, 0],
    [0, -1],
    [1, 1],
    [1, -1],
    [-1, 1],
    [-1, -1],
];

const fn create_bitboard_for_piece(x: usize, y: usize, deltas: &[[i8; 2]], slider: bool) -> Bitboard {
    let mut bitboard = 0;

    let mut i = 0;
    while i < deltas.len() {
        let dx = deltas[i][0];
        let dy = deltas[i][1];

        let mut nx = x as i8;
        let mut ny = y as i8;

        loop {
            nx += dx;
            ny += dy;

            if !is_position_valid(nx as isize, ny as isize) {
                break;
            }

            bitboard |= position_to_bitmask(nx as u32, ny as u32);

            if !slider {
                break;
            }
        }

        i += 1;
    }

    bitboard
}

const fn calculate_square_bitboards(deltas: &[[i8; 2]], slider: bool, include_self: bool) -> SquareBitboards {
    let mut bitboards = [0; 64];

    let mut square = 0;
    while square < 64 {
        let (x, y) = (square % 8, square / 8);

        bitboards[square] = create_bitboard_for_piece(x, y, deltas, slider);

        if include_self {
            bitboards[square] |= position_to_bitmask(x as u32, y as u32);
        }

        square += 1;
    }

    bitboards
}

const fn calculate_pawn_attack_moves() -> PawnAttackBitboards {
    let mut bitboards = [[0; 64]; Color::COUNT];

    let mut color = 0;
    while color < Color::COUNT {
        // white pawns capture towards rank 8, black ones towards rank 1
        let deltas = match color {
            0 => [[-1, 1], [1, 1]],
            _ => [[-1, -1], [1, -1]],
        };

        bitboards[color] = calculate_square_bitboards(&deltas, false, false);

        color += 1;
    }

    bitboards
}

pub const KNIGHT_ATTACKS: SquareBitboards = calculate_square_bitboards(&KNIGHT_DELTAS, false, false);
pub const KING_ATTACKS: SquareBitboards = calculate_square_bitboards(&KING_DELTAS, false, false);

/// Squares attacked by a pawn of the given color standing on the given square.
pub const PAWN_ATTACKS: PawnAttackBitboards = calculate_pawn_attack_moves();

// Line masks contain the square they are indexed by, which the o-2r trick relies on.
pub const RANK_MASKS: SquareBitboards = calculate_square_bitboards(&[[1, 0], [-1, 0]], true, true);
pub const FILE_MASKS: SquareBitboards = calculate_square_bitboards(&[[0, 1], [0, -1]], true, true);
pub const DIAGONAL_MASKS: SquareBitboards = calculate_square_bitboards(&[[1, 1], [-1, -1]], true, true);
pub const ANTI_DIAGONAL_MASKS: SquareBitboards =
    calculate_square_bitboards(&[[1, -1], [-1, 1]], true, true);

/// Reverses the bit order of a 64-bit word by swapping ever wider groups of bits.
pub const fn reverse(mut n: u64) -> u64 {
    n = ((n >> 1) & 0x5555_5555_5555_5555) | ((n & 0x5555_5555_5555_5555) << 1);
    n = ((n >> 2) & 0x3333_3333_3333_3333) | ((n & 0x3333_3333_3333_3333) << 2);
    n = ((n >> 4) & 0x0F0F_0F0F_0F0F_0F0F) | ((n & 0x0F0F_0F0F_0F0F_0F0F) << 4);
    n = ((n >> 8) & 0x00FF_00FF_00FF_00FF) | ((n & 0x00FF_00FF_00FF_00FF) << 8);
    n = ((n >> 16) & 0x0000_FFFF_0000_FFFF) | ((n & 0x0000_FFFF_0000_FFFF) << 16);
    (n >> 32) | (n << 32)
}

/// Reach of a slider on `square` along a single line, up to and including the first
/// blocker in both directions.
///
/// Subtracting twice the slider bit from the masked occupancy borrows through the
/// empty squares up to the first blocker above the slider; doing the same on the
/// reversed board covers the squares below it.
#[inline(always)]
pub const fn line_attacks(square: BoardSquare, occupancy: Bitboard, mask: Bitboard) -> Bitboard {
    let slider = 1u64 << square;
    let line = (occupancy | slider) & mask;

    let forward = line.wrapping_sub(slider << 1);
    let backward = reverse(reverse(line).wrapping_sub(reverse(slider) << 1));

    (forward ^ backward) & mask
}

#[inline(always)]
pub const fn rook_attacks(square: BoardSquare, occupancy: Bitboard) -> Bitboard {
    line_attacks(square, occupancy, RANK_MASKS[square as usize])
        | line_attacks(square, occupancy, FILE_MASKS[square as usize])
}

#[inline(always)]
pub const fn bishop_attacks(square: BoardSquare, occupancy: Bitboard) -> Bitboard {
    line_attacks(square, occupancy, DIAGONAL_MASKS[square as usize])
        | line_attacks(square, occupancy, ANTI_DIAGONAL_MASKS[square as usize])
}

#[inline(always)]
pub const fn queen_attacks(square: BoardSquare, occupancy: Bitboard) -> Bitboard {
    rook_attacks(square, occupancy) | bishop_attacks(square, occupancy)
}

/// The line (rank, file, diagonal or anti-diagonal) shared by two squares, or 0.
pub const fn shared_line(a: BoardSquare, b: BoardSquare) -> Bitboard {
    let (a, b) = (a as usize, b as usize);
    let other = 1u64 << b;

    if a == b {
        0
    } else if RANK_MASKS[a] & other != 0 {
        RANK_MASKS[a]
    } else if FILE_MASKS[a] & other != 0 {
        FILE_MASKS[a]
    } else if DIAGONAL_MASKS[a] & other != 0 {
        DIAGONAL_MASKS[a]
    } else if ANTI_DIAGONAL_MASKS[a] & other != 0 {
        ANTI_DIAGONAL_MASKS[a]
    } else {
        0
    }
}

/// Squares strictly between two aligned squares; 0 when they share no line.
pub const fn ray_between(a: BoardSquare, b: BoardSquare) -> Bitboard {
    let (min, max) = if a < b { (a, b) } else { (b, a) };

    // bits above min and below max
    let span = ((1u64 << max) - 1) & !((1u64 << min) | ((1u64 << min) - 1));

    shared_line(a, b) & span
}
