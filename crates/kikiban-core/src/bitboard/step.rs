//! 近接駒の利きテーブル（StepTables）
//!
//! 歩・桂・銀・金・玉の1手先と、遠方駒テーブルの構築に使う
//! 空盤上のレイ（香・角・飛）や仮想的なマスク（十字・斜め十字・クイーン）。

use crate::types::{Color, Square};

use super::Bitboard;

/// 近接利きの種類
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StepClass {
    Pawn = 0,
    /// 空盤での香の利き（前方の筋全体）
    Lance = 1,
    Knight = 2,
    Silver = 3,
    /// 空盤での角の利き
    Bishop = 4,
    /// 空盤での飛の利き
    Rook = 5,
    Gold = 6,
    King = 7,
    /// 空盤での角|飛
    Queen = 8,
    /// 上下左右の1升
    Cross00 = 9,
    /// 斜め4方向の1升
    Cross45 = 10,
}

impl StepClass {
    pub const NUM: usize = 11;

    pub const ALL: [StepClass; 11] = [
        StepClass::Pawn,
        StepClass::Lance,
        StepClass::Knight,
        StepClass::Silver,
        StepClass::Bishop,
        StepClass::Rook,
        StepClass::Gold,
        StepClass::King,
        StepClass::Queen,
        StepClass::Cross00,
        StepClass::Cross45,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

// 先手から見た (筋差分, 段差分)。段は負が前方
const PAWN_STEPS: &[(i32, i32)] = &[(0, -1)];
const KNIGHT_STEPS: &[(i32, i32)] = &[(-1, -2), (1, -2)];
const SILVER_STEPS: &[(i32, i32)] = &[(-1, -1), (0, -1), (1, -1), (-1, 1), (1, 1)];
const GOLD_STEPS: &[(i32, i32)] = &[(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (0, 1)];
const KING_STEPS: &[(i32, i32)] = &[
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];
pub(crate) const ROOK_RAYS: &[(i32, i32)] = &[(0, -1), (0, 1), (-1, 0), (1, 0)];
pub(crate) const BISHOP_RAYS: &[(i32, i32)] = &[(-1, -1), (1, -1), (-1, 1), (1, 1)];
const LANCE_RAYS: &[(i32, i32)] = &[(0, -1)];

/// 近接利きテーブル [Square][Color][StepClass]
pub struct StepTables {
    table: [[[Bitboard; StepClass::NUM]; Color::NUM]; Square::NUM],
}

impl StepTables {
    pub(crate) fn build() -> Box<StepTables> {
        let mut tables = Box::new(StepTables {
            table: [[[Bitboard::EMPTY; StepClass::NUM]; Color::NUM]; Square::NUM],
        });

        for sq in Square::all() {
            for color in Color::ALL {
                let entry = &mut tables.table[sq.index()][color.index()];
                entry[StepClass::Pawn.index()] = steps(sq, color, PAWN_STEPS);
                entry[StepClass::Lance.index()] = rays(sq, color, LANCE_RAYS);
                entry[StepClass::Knight.index()] = steps(sq, color, KNIGHT_STEPS);
                entry[StepClass::Silver.index()] = steps(sq, color, SILVER_STEPS);
                entry[StepClass::Bishop.index()] = rays(sq, color, BISHOP_RAYS);
                entry[StepClass::Rook.index()] = rays(sq, color, ROOK_RAYS);
                entry[StepClass::Gold.index()] = steps(sq, color, GOLD_STEPS);
                entry[StepClass::King.index()] = steps(sq, color, KING_STEPS);
                entry[StepClass::Queen.index()] =
                    entry[StepClass::Bishop.index()] | entry[StepClass::Rook.index()];
                entry[StepClass::Cross00.index()] = steps(sq, color, ROOK_RAYS);
                entry[StepClass::Cross45.index()] = steps(sq, color, BISHOP_RAYS);
            }
        }

        tables
    }

    /// 近接利き（盤上の駒配置には依存しない）
    #[inline]
    pub fn attack(&self, class: StepClass, color: Color, sq: Square) -> Bitboard {
        self.table[sq.index()][color.index()][class.index()]
    }
}

/// 手番に応じて段方向を反転した差分
#[inline]
fn oriented(color: Color, (df, dr): (i32, i32)) -> (i32, i32) {
    (df * color.sign(), dr * color.sign())
}

fn steps(sq: Square, color: Color, deltas: &[(i32, i32)]) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for &delta in deltas {
        let (df, dr) = oriented(color, delta);
        if let Some(to) = sq.offset(df, dr) {
            bb.set(to);
        }
    }
    bb
}

fn rays(sq: Square, color: Color, deltas: &[(i32, i32)]) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for &delta in deltas {
        let (df, dr) = oriented(color, delta);
        let mut cur = sq.offset(df, dr);
        while let Some(to) = cur {
            bb.set(to);
            cur = to.offset(df, dr);
        }
    }
    bb
}
