use crate::utils::Bitboard;

pub type BoardSquare = u8;

#[allow(dead_code)]
pub trait BoardSquareExt {
    fn get_x(&self) -> u8;
    fn get_y(&self) -> u8;
    fn parse(string: &str) -> Option<BoardSquare>;
    fn unparse(&self) -> String;
    fn from_position(x: u8, y: u8) -> BoardSquare;
    fn to_mask(&self) -> Bitboard;
    fn flip_vertical(&self) -> BoardSquare;

    const A1: BoardSquare = 0;
    const C1: BoardSquare = 2;
    const D1: BoardSquare = 3;
    const E1: BoardSquare = 4;
    const F1: BoardSquare = 5;
    const G1: BoardSquare = 6;
    const H1: BoardSquare = 7;

    const A8: BoardSquare = 56;
    const C8: BoardSquare = 58;
    const D8: BoardSquare = 59;
    const E8: BoardSquare = 60;
    const F8: BoardSquare = 61;
    const G8: BoardSquare = 62;
    const H8: BoardSquare = 63;
}

impl BoardSquareExt for u8 {
    fn get_x(&self) -> u8 {
        self % 8
    }

    fn get_y(&self) -> u8 {
        self / 8
    }

    fn parse(string: &str) -> Option<BoardSquare> {
        let mut chars = string.chars();

        match (chars.next(), chars.next(), chars.next()) {
            (Some(file @ 'a'..='h'), Some(rank @ '1'..='8'), None) => Some(
                BoardSquare::from_position(file as u8 - b'a', rank as u8 - b'1'),
            ),
            _ => None,
        }
    }

    fn unparse(&self) -> String {
        format!(
            "{}{}",
            (self.get_x() + b'a') as char,
            (self.get_y() + b'1') as char
        )
    }

    fn from_position(x: u8, y: u8) -> BoardSquare {
        x + y * 8
    }

    fn to_mask(&self) -> Bitboard {
        1 << self
    }

    fn flip_vertical(&self) -> BoardSquare {
        self ^ 56
    }
}
