//! 置換表に格納する探索結果の型（評価値・深さ・Bound）

/// 評価値。置換表には i16 で格納する
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Value(i32);

impl Value {
    pub const ZERO: Value = Value(0);
    /// 値なし（静的評価を持たないエントリなど）
    pub const NONE: Value = Value(32002);

    #[inline]
    pub const fn new(v: i32) -> Value {
        Value(v)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// 16bitのエントリに切り詰めずに入るか
    #[inline]
    pub const fn fits_entry(self) -> bool {
        i16::MIN as i32 <= self.0 && self.0 <= i16::MAX as i32
    }
}

/// 探索深さ
pub type Depth = i32;

/// エントリの depth8 は `depth - DEPTH_ENTRY_OFFSET`。0 は未使用エントリを表す
pub const DEPTH_ENTRY_OFFSET: Depth = -3;

/// 格納値の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Bound {
    #[default]
    None = 0,
    /// 真の値はこれ以下
    Upper = 1,
    /// 真の値はこれ以上
    Lower = 2,
    Exact = 3,
}

impl Bound {
    /// 下位2bitだけを見る
    #[inline]
    pub const fn from_bits(n: u8) -> Bound {
        match n & 3 {
            1 => Bound::Upper,
            2 => Bound::Lower,
            3 => Bound::Exact,
            _ => Bound::None,
        }
    }
}
