//! 利きの数と長い利きの方向
//!
//! 局面側が差分更新で保持しているものを1手詰め判定に渡す。
//! ここでは駒の配置から一括で求める参照実装だけを持つ。

use crate::bitboard::{AttackTables, Bitboard, direct_of};
use crate::types::{Color, PieceType, Square};

/// 盤上の駒1枚
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedPiece {
    pub sq: Square,
    pub color: Color,
    pub piece_type: PieceType,
}

impl PlacedPiece {
    pub const fn new(sq: Square, color: Color, piece_type: PieceType) -> Self {
        Self {
            sq,
            color,
            piece_type,
        }
    }
}

/// 各升の利きの数（手番別）
#[derive(Clone, PartialEq, Eq)]
pub struct EffectBoard {
    counts: [[u8; Square::NUM]; Color::NUM],
}

impl EffectBoard {
    pub fn new() -> Self {
        EffectBoard {
            counts: [[0u8; Square::NUM]; Color::NUM],
        }
    }

    #[inline]
    pub fn count(&self, color: Color, sq: Square) -> u8 {
        self.counts[color.index()][sq.index()]
    }

    fn add_bitboard(&mut self, color: Color, bb: Bitboard) {
        for sq in bb.iter() {
            let c = &mut self.counts[color.index()][sq.index()];
            // 利き数は最大でも片側20枚分でu8に収まる
            *c = c.saturating_add(1);
        }
    }
}

impl Default for EffectBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// 各升を通過する遠方駒の利きの方向
///
/// 下位8bitが先手、上位8bitが後手。bitは利きの進む向き（`Direct`）。
/// 馬・龍の近接部分は含めない。
#[derive(Clone, PartialEq, Eq)]
pub struct LongEffectBoard {
    dirs: [u16; Square::NUM],
}

impl LongEffectBoard {
    pub fn new() -> Self {
        LongEffectBoard {
            dirs: [0u16; Square::NUM],
        }
    }

    /// 手番ごとの方向bit
    #[inline]
    pub fn directions(&self, color: Color, sq: Square) -> u8 {
        (self.dirs[sq.index()] >> (8 * color.index())) as u8
    }

    #[inline]
    fn toggle(&mut self, sq: Square, value: u16) {
        self.dirs[sq.index()] ^= value;
    }
}

impl Default for LongEffectBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// 駒の配置から利きの数と長い利きを一括で求める
pub fn compute_effects(
    tables: &AttackTables,
    pieces: &[PlacedPiece],
) -> (EffectBoard, LongEffectBoard) {
    let mut effects = EffectBoard::new();
    let mut long_effects = LongEffectBoard::new();
    let occupied = occupancy(pieces);

    for pc in pieces {
        let effect_bb = tables.effects_from(pc.piece_type, pc.color, pc.sq, occupied);
        effects.add_bitboard(pc.color, effect_bb);

        if pc.piece_type.is_slider() {
            let long_pt = pc.piece_type.unpromote();
            let long_bb = tables.effects_from(long_pt, pc.color, pc.sq, occupied);
            let shift = 8 * pc.color.index();
            for to in long_bb.iter() {
                let Some(dir) = direct_of(pc.sq, to) else {
                    continue;
                };
                long_effects.toggle(to, (dir.bit() as u16) << shift);
            }
        }
    }

    (effects, long_effects)
}

/// 全駒の占有
pub fn occupancy(pieces: &[PlacedPiece]) -> Bitboard {
    pieces
        .iter()
        .fold(Bitboard::EMPTY, |bb, pc| bb | Bitboard::from_square(pc.sq))
}

/// 指定手番の駒の占有
pub fn occupancy_of(pieces: &[PlacedPiece], color: Color) -> Bitboard {
    pieces
        .iter()
        .filter(|pc| pc.color == color)
        .fold(Bitboard::EMPTY, |bb, pc| bb | Bitboard::from_square(pc.sq))
}
