//! 先後

/// 先手 / 後手。先手は段の小さい方（1段目）へ進む
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    pub const NUM: usize = 2;
    pub const ALL: [Color; Color::NUM] = [Color::Black, Color::White];

    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// テーブルの添字
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 先手基準の差分に掛ける符号（先手 +1、後手 -1）
    ///
    /// 近接駒の利きは先手向きの差分で書き、後手はこれで盤を180度回す。
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::Black => 1,
            Color::White => -1,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.opponent()
    }
}
