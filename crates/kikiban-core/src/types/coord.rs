//! 盤上の座標（筋・段・升）
//!
//! 升番号は縦型Bitboardに合わせて `file * 9 + rank`。
//! 1一 = 0, 1九 = 8, 2一 = 9, ..., 9九 = 80。

/// 筋と段は同じ形をしているのでまとめて定義する
macro_rules! board_axis {
    ($(#[$doc:meta])* $name:ident, $usi_base:literal, [$($v:ident = $n:literal),+ $(,)?]) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($v = $n),+
        }

        impl $name {
            pub const NUM: usize = 9;
            pub const ALL: [$name; 9] = [$($name::$v),+];

            #[inline]
            pub const fn index(self) -> usize {
                self as usize
            }

            /// USI表記の1文字
            #[inline]
            pub const fn to_usi_char(self) -> char {
                ($usi_base + self as u8) as char
            }
        }
    };
}

board_axis!(
    /// 筋（USIでは '1'..'9'）
    File,
    b'1',
    [
        File1 = 0, File2 = 1, File3 = 2, File4 = 3, File5 = 4,
        File6 = 5, File7 = 6, File8 = 7, File9 = 8,
    ]
);

board_axis!(
    /// 段（USIでは 'a'..'i'）。Rank1 が先手から見て奥
    Rank,
    b'a',
    [
        Rank1 = 0, Rank2 = 1, Rank3 = 2, Rank4 = 3, Rank5 = 4,
        Rank6 = 5, Rank7 = 6, Rank8 = 7, Rank9 = 8,
    ]
);

/// 升（0..81）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    pub const NUM: usize = 81;

    pub const SQ_11: Square = Square(0);
    /// 1手詰めテーブルの基準玉位置
    pub const SQ_55: Square = Square(40);
    pub const SQ_99: Square = Square(80);

    #[inline]
    pub const fn new(file: File, rank: Rank) -> Square {
        Square(file as u8 * 9 + rank as u8)
    }

    #[inline]
    pub const fn file(self) -> File {
        File::ALL[(self.0 / 9) as usize]
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.0 % 9) as usize]
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn from_u8(n: u8) -> Option<Square> {
        if (n as usize) < Self::NUM { Some(Square(n)) } else { None }
    }

    /// # Safety
    /// `n < 81` であること
    #[inline]
    pub const unsafe fn from_u8_unchecked(n: u8) -> Square {
        debug_assert!((n as usize) < Self::NUM);
        Square(n)
    }

    /// (筋, 段) だけずらした升。盤外なら None
    ///
    /// 筋と段を別々に範囲チェックする（段の端で隣の筋に回り込まない）。
    #[inline]
    pub const fn offset(self, df: i32, dr: i32) -> Option<Square> {
        let f = (self.0 / 9) as i32 + df;
        let r = (self.0 % 9) as i32 + dr;
        if 0 <= f && f < 9 && 0 <= r && r < 9 {
            Some(Square((f * 9 + r) as u8))
        } else {
            None
        }
    }

    /// "5e" のようなUSI表記
    pub fn to_usi(self) -> String {
        format!("{}{}", self.file().to_usi_char(), self.rank().to_usi_char())
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::NUM as u8).map(Square)
    }
}
