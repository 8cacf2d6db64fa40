//! 手駒（Hand / HandKind）

use super::PieceType;

/// 手駒（32bit packed）
///
/// ビット配置:
/// - bit 0-4:   歩 (5bit, 最大18枚)
/// - bit 5-7:   香 (3bit, 最大4枚)
/// - bit 8-10:  桂 (3bit, 最大4枚)
/// - bit 11-13: 銀 (3bit, 最大4枚)
/// - bit 14-16: 金 (3bit, 最大4枚)
/// - bit 17-18: 角 (2bit, 最大2枚)
/// - bit 19-20: 飛 (2bit, 最大2枚)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Hand(u32);

impl Hand {
    /// 空の手駒
    pub const EMPTY: Hand = Hand(0);

    /// 駒種ごとの (shift, mask)、HAND_PIECES順
    const LAYOUT: [(u32, u32); PieceType::HAND_NUM] = [
        (0, 0x1F),
        (5, 0x07),
        (8, 0x07),
        (11, 0x07),
        (14, 0x07),
        (17, 0x03),
        (19, 0x03),
    ];

    /// 指定駒種の枚数を取得
    #[inline]
    pub const fn count(self, pt: PieceType) -> u32 {
        match pt.hand_index() {
            Some(i) => {
                let (shift, mask) = Self::LAYOUT[i];
                (self.0 >> shift) & mask
            }
            None => 0,
        }
    }

    /// 1枚追加
    #[inline]
    pub const fn add(self, pt: PieceType) -> Hand {
        match pt.hand_index() {
            Some(i) => Hand(self.0 + (1 << Self::LAYOUT[i].0)),
            None => self,
        }
    }

}

/// 手駒の有無だけを1駒種1bitで表したもの
///
/// bitの位置はHAND_PIECESの順（bit0=歩 ... bit6=飛）。
/// 1手詰めのテーブル引きで「持っている駒種」の集合演算に使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct HandKind(u8);

impl HandKind {
    pub const EMPTY: HandKind = HandKind(0);

    /// 手駒から駒種の有無を抜き出す
    #[inline]
    pub const fn from_hand(hand: Hand) -> HandKind {
        let mut bits = 0u8;
        let mut i = 0;
        while i < PieceType::HAND_NUM {
            let (shift, mask) = Hand::LAYOUT[i];
            if (hand.0 >> shift) & mask != 0 {
                bits |= 1 << i;
            }
            i += 1;
        }
        HandKind(bits)
    }

    /// 駒種を1つ加える
    #[inline]
    pub const fn with(self, pt: PieceType) -> HandKind {
        match pt.hand_index() {
            Some(i) => HandKind(self.0 | (1 << i)),
            None => self,
        }
    }

    /// 指定駒種を含むか
    #[inline]
    pub const fn contains(self, pt: PieceType) -> bool {
        match pt.hand_index() {
            Some(i) => self.0 & (1 << i) != 0,
            None => false,
        }
    }

    /// 共通部分
    #[inline]
    pub const fn intersect(self, other: HandKind) -> HandKind {
        HandKind(self.0 & other.0)
    }
}
