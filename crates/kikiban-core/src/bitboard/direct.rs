//! 8方向（Direct）と2升間の方向テーブル

use crate::types::Square;

/// 8方向の単一レイ
///
/// 並びは升番号の差分（-10, -9, -8, -1, +1, +8, +9, +10）の昇順。
/// 1手詰めの周囲8升パターンもこの順でbitを割り当てる。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direct {
    RU = 0,
    R = 1,
    RD = 2,
    U = 3,
    D = 4,
    LU = 5,
    L = 6,
    LD = 7,
}

impl Direct {
    pub const NUM: usize = 8;

    pub const ALL: [Direct; 8] = [
        Direct::RU,
        Direct::R,
        Direct::RD,
        Direct::U,
        Direct::D,
        Direct::LU,
        Direct::L,
        Direct::LD,
    ];

    #[inline]
    pub const fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Direct::RU),
            1 => Some(Direct::R),
            2 => Some(Direct::RD),
            3 => Some(Direct::U),
            4 => Some(Direct::D),
            5 => Some(Direct::LU),
            6 => Some(Direct::L),
            7 => Some(Direct::LD),
            _ => None,
        }
    }

    /// (筋の差分, 段の差分)。筋は正で9筋側、段は正で9段側
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direct::RU => (-1, -1),
            Direct::R => (-1, 0),
            Direct::RD => (-1, 1),
            Direct::U => (0, -1),
            Direct::D => (0, 1),
            Direct::LU => (1, -1),
            Direct::L => (1, 0),
            Direct::LD => (1, 1),
        }
    }

    /// 差分から方向を引く（隣接8方向以外はNone）
    #[inline]
    pub const fn from_delta(df: i32, dr: i32) -> Option<Direct> {
        match (df, dr) {
            (-1, -1) => Some(Direct::RU),
            (-1, 0) => Some(Direct::R),
            (-1, 1) => Some(Direct::RD),
            (0, -1) => Some(Direct::U),
            (0, 1) => Some(Direct::D),
            (1, -1) => Some(Direct::LU),
            (1, 0) => Some(Direct::L),
            (1, 1) => Some(Direct::LD),
            _ => None,
        }
    }

    /// 逆方向
    #[inline]
    pub const fn reverse(self) -> Direct {
        // 差分の昇順に並べてあるので 7 - n が逆向き
        match Direct::from_u8(7 - self as u8) {
            Some(d) => d,
            None => self,
        }
    }

    /// 方向bit（1 << self）
    #[inline]
    pub const fn bit(self) -> u8 {
        1u8 << self as u8
    }

    /// 斜め方向か
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        let (df, dr) = self.delta();
        df != 0 && dr != 0
    }
}

/// 方向bitの集合を1つずつ取り出すイテレータ
pub fn directs(bits: u8) -> impl Iterator<Item = Direct> {
    Direct::ALL.into_iter().filter(move |d| bits & d.bit() != 0)
}

/// sq1から見たsq2の方向（直線上/斜めのみ）を返す
#[inline]
pub fn direct_of(sq1: Square, sq2: Square) -> Option<Direct> {
    const fn signum(v: i32) -> i32 {
        if v < 0 {
            -1
        } else if v > 0 {
            1
        } else {
            0
        }
    }

    const fn build_direct_table() -> [[u8; Square::NUM]; Square::NUM] {
        let mut t = [[u8::MAX; Square::NUM]; Square::NUM];
        let mut s1 = 0;
        while s1 < Square::NUM {
            let f1 = (s1 / 9) as i32;
            let r1 = (s1 % 9) as i32;
            let mut s2 = 0;
            while s2 < Square::NUM {
                let df = (s2 / 9) as i32 - f1;
                let dr = (s2 % 9) as i32 - r1;
                let aligned = (df == 0 || dr == 0 || df * df == dr * dr) && s1 != s2;
                if aligned {
                    if let Some(d) = Direct::from_delta(signum(df), signum(dr)) {
                        t[s1][s2] = d as u8;
                    }
                }
                s2 += 1;
            }
            s1 += 1;
        }
        t
    }

    static DIRECT_TABLE: [[u8; Square::NUM]; Square::NUM] = build_direct_table();

    Direct::from_u8(DIRECT_TABLE[sq1.index()][sq2.index()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};

    #[test]
    fn test_direct_of_basic() {
        let c = Square::SQ_55;
        assert_eq!(direct_of(c, Square::new(File::File4, Rank::Rank4)), Some(Direct::RU));
        assert_eq!(direct_of(c, Square::new(File::File6, Rank::Rank5)), Some(Direct::L));
        assert_eq!(direct_of(c, Square::new(File::File5, Rank::Rank7)), Some(Direct::D));
        assert_eq!(direct_of(c, Square::new(File::File7, Rank::Rank4)), None);
        assert_eq!(direct_of(c, c), None);
    }

    #[test]
    fn test_direct_reverse_and_delta() {
        for d in Direct::ALL {
            let (df, dr) = d.delta();
            assert_eq!(d.reverse().delta(), (-df, -dr));
            assert_eq!(Direct::from_delta(df, dr), Some(d));
            // 升番号の差分は file*9 + rank
            let sq_delta = df * 9 + dr;
            assert_eq!(Square::SQ_55.offset(df, dr).map(|s| s.index() as i32 - 40), Some(sq_delta));
        }
        assert_eq!(Direct::from_delta(0, 0), None);
    }

    #[test]
    fn test_directs_iter() {
        let bits = Direct::U.bit() | Direct::LD.bit();
        let v: Vec<_> = directs(bits).collect();
        assert_eq!(v, vec![Direct::U, Direct::LD]);
        assert!(Direct::RU.is_diagonal());
        assert!(!Direct::L.is_diagonal());
    }
}
