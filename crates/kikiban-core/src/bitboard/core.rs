//! Bitboard（128bit盤面表現）

use crate::types::Square;

use super::masks::RANK_BB;

/// Bitboard（128bit、16バイトアラインメント）
///
/// 縦型配置:
/// - p[0]: 1-7筋 (bit 0-62使用、bit 63未使用)
/// - p[1]: 8-9筋 (bit 0-17使用)
///
/// p[0]のbit63を空けておくことで、p[0]とp[1]をORで1つのu64に畳んでも
/// (`merge`) 升が重ならないマスクを作れる。遠方駒テーブルのpextはこれに依存する。
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(C, align(16))]
pub struct Bitboard {
    p: [u64; 2],
}

impl Bitboard {
    /// 空のBitboard
    pub const EMPTY: Bitboard = Bitboard { p: [0, 0] };

    /// 全マスが立っているBitboard
    pub const ALL: Bitboard = Bitboard {
        p: [0x7FFF_FFFF_FFFF_FFFF, 0x0003_FFFF],
    };

    /// p[0]とp[1]の境界（この升番号以降がp[1]）
    pub const PART_BORDER: usize = 63;

    /// 内部配列を直接指定して生成
    #[inline]
    pub const fn new(p0: u64, p1: u64) -> Bitboard {
        Bitboard { p: [p0, p1] }
    }

    /// 単一マスのBitboard
    #[inline]
    pub const fn from_square(sq: Square) -> Bitboard {
        let idx = sq.index();
        if idx < Self::PART_BORDER {
            Bitboard { p: [1u64 << idx, 0] }
        } else {
            Bitboard { p: [0, 1u64 << (idx - Self::PART_BORDER)] }
        }
    }

    /// 升がp[0]とp[1]のどちらに属するか
    #[inline]
    pub const fn part(sq: Square) -> usize {
        (sq.index() >= Self::PART_BORDER) as usize
    }

    /// 空かどうか
    #[inline]
    pub const fn is_empty(self) -> bool {
        (self.p[0] | self.p[1]) == 0
    }

    /// 空でないかどうか
    #[inline]
    pub const fn is_not_empty(self) -> bool {
        !self.is_empty()
    }

    /// ビットが立っている数
    #[inline]
    pub const fn count(self) -> u32 {
        self.p[0].count_ones() + self.p[1].count_ones()
    }

    /// 2つ以上のビットが立っているか
    #[inline]
    pub const fn more_than_one(self) -> bool {
        if self.p[0] != 0 && (self.p[0] & (self.p[0] - 1)) != 0 {
            return true;
        }
        if self.p[1] != 0 && (self.p[1] & (self.p[1] - 1)) != 0 {
            return true;
        }
        self.p[0] != 0 && self.p[1] != 0
    }

    /// p[0]とp[1]をORで1つのu64に畳む
    ///
    /// 両者が同じビット位置を共有しているときは升が潰れるため、
    /// 呼び出し側は `cross_over()` が偽であるマスクを掛けてから使うこと。
    #[inline]
    pub const fn merge(self) -> u64 {
        self.p[0] | self.p[1]
    }

    /// p[0]とp[1]が同じビット位置を共有しているか
    #[inline]
    pub const fn cross_over(self) -> bool {
        (self.p[0] & self.p[1]) != 0
    }

    /// self & !rhs
    #[inline]
    pub const fn and_not(self, rhs: Bitboard) -> Bitboard {
        Bitboard {
            p: [self.p[0] & !rhs.p[0], self.p[1] & !rhs.p[1]],
        }
    }

    /// 全升を1段目方向に1升ずらす（1段目にあったビットは消える）
    #[inline]
    pub fn shift_up(self) -> Bitboard {
        Bitboard {
            p: [self.p[0] >> 1, self.p[1] >> 1],
        }
        .and_not(RANK_BB[8])
    }

    /// 全升を9段目方向に1升ずらす（9段目にあったビットは消える）
    #[inline]
    pub fn shift_down(self) -> Bitboard {
        Bitboard {
            p: [self.p[0] << 1, self.p[1] << 1],
        }
        .and_not(RANK_BB[0])
            & Bitboard::ALL
    }

    /// 最下位ビットのSquareを取得して消す
    #[inline]
    pub fn pop(&mut self) -> Square {
        if self.is_empty() {
            assert_lv!(false, "pop() called on empty Bitboard");
            return Square::SQ_11;
        }

        if self.p[0] != 0 {
            let idx = self.p[0].trailing_zeros();
            self.p[0] &= self.p[0] - 1;
            // SAFETY: idx < 63 で有効なSquare範囲内
            unsafe { Square::from_u8_unchecked(idx as u8) }
        } else {
            let idx = self.p[1].trailing_zeros();
            self.p[1] &= self.p[1] - 1;
            // SAFETY: 63 + idx < 81 で有効なSquare範囲内
            unsafe { Square::from_u8_unchecked(Self::PART_BORDER as u8 + idx as u8) }
        }
    }

    /// 最下位ビットのSquareを取得（空ならNone）
    #[inline]
    pub fn lsb(self) -> Option<Square> {
        if self.p[0] != 0 {
            Square::from_u8(self.p[0].trailing_zeros() as u8)
        } else if self.p[1] != 0 {
            Square::from_u8(Self::PART_BORDER as u8 + self.p[1].trailing_zeros() as u8)
        } else {
            None
        }
    }

    /// 指定マスにビットが立っているか
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        let idx = sq.index();
        if idx < Self::PART_BORDER {
            (self.p[0] >> idx) & 1 != 0
        } else {
            (self.p[1] >> (idx - Self::PART_BORDER)) & 1 != 0
        }
    }

    /// ビットを立てる
    #[inline]
    pub fn set(&mut self, sq: Square) {
        *self |= Bitboard::from_square(sq);
    }

    /// ビットを消す
    #[inline]
    pub fn clear(&mut self, sq: Square) {
        *self = self.and_not(Bitboard::from_square(sq));
    }

    /// ビットをXOR（トグル）
    #[inline]
    pub fn toggle(&mut self, sq: Square) {
        *self ^= Bitboard::from_square(sq);
    }

    /// p[0]を取得
    #[inline]
    pub const fn p0(self) -> u64 {
        self.p[0]
    }

    /// p[1]を取得
    #[inline]
    pub const fn p1(self) -> u64 {
        self.p[1]
    }

    /// const文脈用のOR
    #[inline]
    pub const fn or(self, rhs: Bitboard) -> Bitboard {
        Bitboard {
            p: [self.p[0] | rhs.p[0], self.p[1] | rhs.p[1]],
        }
    }

    /// イテレータを返す
    #[inline]
    pub const fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }
}

// ビット演算
impl std::ops::BitAnd for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard {
            p: [self.p[0] & rhs.p[0], self.p[1] & rhs.p[1]],
        }
    }
}

impl std::ops::BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.p[0] &= rhs.p[0];
        self.p[1] &= rhs.p[1];
    }
}

impl std::ops::BitOr for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        self.or(rhs)
    }
}

impl std::ops::BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.p[0] |= rhs.p[0];
        self.p[1] |= rhs.p[1];
    }
}

impl std::ops::BitXor for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard {
            p: [self.p[0] ^ rhs.p[0], self.p[1] ^ rhs.p[1]],
        }
    }
}

impl std::ops::BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.p[0] ^= rhs.p[0];
        self.p[1] ^= rhs.p[1];
    }
}

impl std::ops::Sub for Bitboard {
    type Output = Bitboard;

    /// 差集合
    #[inline]
    fn sub(self, rhs: Bitboard) -> Bitboard {
        self.and_not(rhs)
    }
}

impl std::ops::Not for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn not(self) -> Bitboard {
        // 未使用ビットはマスク
        Bitboard::ALL.and_not(self)
    }
}

impl std::fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Bitboard {{")?;
        // 盤面形式で表示（1段目から9段目、9筋から1筋）
        for rank in 0..9u8 {
            write!(f, "  ")?;
            for file in (0..9u8).rev() {
                let on = Square::from_u8(file * 9 + rank).is_some_and(|sq| self.contains(sq));
                write!(f, "{}", if on { "●" } else { "・" })?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

/// Bitboardイテレータ
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.pop())
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitboardIter {}
