//! 指し手

use super::{PieceType, Square};

/// 16bitの指し手。置換表にはこの値をそのまま入れる
///
/// | bit   | 内容                                   |
/// |-------|----------------------------------------|
/// | 0-6   | 移動先                                 |
/// | 7-13  | 移動元（駒打ちなら打つ駒種）           |
/// | 14    | 駒打ち                                 |
/// | 15    | 成り                                   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Move(u16);

const SQ_BITS: u16 = 0x7F;
const FROM_SHIFT: u32 = 7;
const DROP: u16 = 1 << 14;
const PROMOTE: u16 = 1 << 15;

impl Move {
    /// 指し手なし（置換表の空き）
    pub const NONE: Move = Move(0);

    #[inline]
    pub const fn new_move(from: Square, to: Square, promote: bool) -> Move {
        let flag = if promote { PROMOTE } else { 0 };
        Move(to.raw() as u16 | (from.raw() as u16) << FROM_SHIFT | flag)
    }

    #[inline]
    pub const fn new_drop(piece_type: PieceType, to: Square) -> Move {
        Move(to.raw() as u16 | (piece_type as u16) << FROM_SHIFT | DROP)
    }

    /// 置換表から読んだ値をそのまま指し手に戻す
    #[inline]
    pub const fn from_u16(value: u16) -> Move {
        Move(value)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    const fn low_field(self) -> u8 {
        (self.0 & SQ_BITS) as u8
    }

    #[inline]
    const fn high_field(self) -> u8 {
        ((self.0 >> FROM_SHIFT) & SQ_BITS) as u8
    }

    #[inline]
    pub const fn to(self) -> Square {
        // SAFETY: 生成時に有効な升から作っている
        unsafe { Square::from_u8_unchecked(self.low_field()) }
    }

    /// 移動元。駒打ちには使わない
    #[inline]
    pub const fn from(self) -> Square {
        debug_assert!(!self.is_drop());
        // SAFETY: 駒打ちでなければ移動元の升が入っている
        unsafe { Square::from_u8_unchecked(self.high_field()) }
    }

    #[inline]
    pub const fn drop_piece_type(self) -> Option<PieceType> {
        if self.is_drop() { PieceType::from_u8(self.high_field()) } else { None }
    }

    #[inline]
    pub const fn is_drop(self) -> bool {
        self.0 & DROP != 0
    }

    #[inline]
    pub const fn is_promote(self) -> bool {
        self.0 & PROMOTE != 0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }

    /// "G*5b" / "3e2c" / "2d2c+"。指し手なしは "none"
    pub fn to_usi(self) -> String {
        if self.is_none() {
            return "none".to_string();
        }
        if let Some(pt) = self.drop_piece_type() {
            return format!("{}*{}", pt.to_usi_char(), self.to().to_usi());
        }
        let suffix = if self.is_promote() { "+" } else { "" };
        format!("{}{}{suffix}", self.from().to_usi(), self.to().to_usi())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};

    #[test]
    fn test_board_move_fields() {
        let from = Square::new(File::File3, Rank::Rank5);
        let to = Square::new(File::File2, Rank::Rank3);
        let m = Move::new_move(from, to, false);
        assert_eq!((m.from(), m.to()), (from, to));
        assert!(!m.is_drop());
        assert_eq!(m.drop_piece_type(), None);
        assert_eq!(m.to_usi(), "3e2c");
        assert_eq!(Move::new_move(from, to, true).to_usi(), "3e2c+");
    }

    #[test]
    fn test_drop_fields() {
        let m = Move::new_drop(PieceType::Silver, Square::SQ_99);
        assert!(m.is_drop());
        assert!(!m.is_promote());
        assert_eq!(m.to(), Square::SQ_99);
        assert_eq!(m.drop_piece_type(), Some(PieceType::Silver));
        assert_eq!(m.to_usi(), "S*9i");
    }

    #[test]
    fn test_tt_encoding_is_lossless() {
        let m = Move::new_drop(PieceType::Knight, Square::SQ_55);
        assert_eq!(Move::from_u16(m.raw()), m);
        assert!(Move::NONE.is_none());
        assert_eq!(Move::NONE.to_usi(), "none");
    }
}
