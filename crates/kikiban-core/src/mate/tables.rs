//! 1手詰め判定用の初期化テーブル
//!
//! 玉の周囲8升の状態（16bitパターン）から、どの駒をどの方向に打てば詰む候補になるかを引く。
//! 盤端の影響を受けない5五玉を基準に、駒ごとの相対的な利きから構築する。

use std::time::Instant;

use crate::bitboard::{AttackTables, Bitboard, Direct, StepClass, direct_of, directs};
use crate::types::{Color, HandKind, PieceType, Square};

/// 打って詰ませる候補になる駒（歩は打ち歩詰め、桂は別処理）
pub const DROP_PIECES: [PieceType; 5] = [
    PieceType::Lance,
    PieceType::Silver,
    PieceType::Gold,
    PieceType::Bishop,
    PieceType::Rook,
];

/// パターン数（下位8bit: 打つ候補の升、上位8bit: 玉の逃げ道）
pub const PATTERN_NUM: usize = 1 << 16;

/// 周囲8升パターンに対する詰み候補
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C, align(8))]
pub struct MateInfo {
    /// 詰ませられる候補の駒種
    kinds: HandKind,
    /// 駒種（HAND_PIECES順）ごとの、玉から見て打てば詰む方向
    directions: [u8; PieceType::HAND_NUM - 1],
}

const _: () = assert!(std::mem::size_of::<MateInfo>() == 8);

impl MateInfo {
    #[inline]
    pub fn kinds(self) -> HandKind {
        self.kinds
    }

    /// 打てば詰む方向（Directのbit集合）
    #[inline]
    pub fn directions(self, pt: PieceType) -> u8 {
        match pt.hand_index() {
            Some(i) if i > 0 => self.directions[i - 1],
            _ => 0,
        }
    }

    fn set_directions(&mut self, pt: PieceType, dirs: u8) {
        if let Some(i) = pt.hand_index().filter(|&i| i > 0) {
            self.directions[i - 1] = dirs;
            self.kinds = self.kinds.with(pt);
        }
    }
}

/// [color][HAND_PIECES順][方向] -> 方向bit
type DirectTable = [[[u8; Direct::NUM]; PieceType::HAND_NUM]; Color::NUM];

/// 1手詰め判定のテーブル一式
pub struct MateTables {
    /// [pattern][color]
    drop: Box<[[MateInfo; Color::NUM]]>,
    /// 玉から見てdの方向に駒を置いたとき、遮断すると詰みに関わる升の利きが消える長い利きの方向
    cutoff: DirectTable,
    /// 玉から見てdの方向に置いた駒が、玉が動いた後も利いている周囲の升（玉越しを含む）
    cover: DirectTable,
    /// 玉から見てdの方向に置いたとき王手になるか
    check: [[u8; PieceType::HAND_NUM]; Color::NUM],
}

#[inline]
fn slot(pt: PieceType) -> usize {
    assert_lv!(pt.hand_index().is_some(), "not a hand piece: {pt:?}");
    pt.hand_index().unwrap_or(0)
}

#[inline]
fn step(sq: Square, d: Direct) -> Option<Square> {
    let (df, dr) = d.delta();
    sq.offset(df, dr)
}

/// 周囲8升のBitboardを方向bitに直す
fn around_bits(center: Square, bb: Bitboard) -> u8 {
    Direct::ALL
        .into_iter()
        .filter(|&d| step(center, d).is_some_and(|sq| bb.contains(sq)))
        .fold(0, |bits, d| bits | d.bit())
}

impl MateTables {
    pub fn build(tables: &AttackTables) -> Box<MateTables> {
        let start = Instant::now();

        let center = Square::SQ_55;
        let around8 = tables.step_attack(StepClass::King, Color::Black, center);
        let around9 = around8 | Bitboard::from_square(center);

        let mut cutoff: DirectTable = [[[0; Direct::NUM]; PieceType::HAND_NUM]; Color::NUM];
        let mut cover: DirectTable = [[[0; Direct::NUM]; PieceType::HAND_NUM]; Color::NUM];
        let mut check = [[0u8; PieceType::HAND_NUM]; Color::NUM];

        for c in Color::ALL {
            for pt in DROP_PIECES {
                let p = slot(pt);
                for d in Direct::ALL {
                    let Some(to) = step(center, d) else {
                        continue;
                    };

                    if tables.effects_from(pt, c, to, around9).contains(center) {
                        check[c.index()][p] |= d.bit();
                    }

                    // 玉のいた升は空くので、玉越しの利きも逃げ道を塞ぐ
                    let covered = tables.effects_from(pt, c, to, around8) & around8;
                    let cover_bits = around_bits(center, covered);
                    cover[c.index()][p][d as usize] = cover_bits;

                    let mut cut = 0u8;
                    for e in Direct::ALL {
                        let mut sq = to;
                        while let Some(next) = step(sq, e) {
                            if next == center || !around8.contains(next) {
                                break;
                            }
                            let uncovered = direct_of(center, next)
                                .is_some_and(|k| (cover_bits & k.bit()) == 0);
                            if uncovered {
                                cut |= e.bit();
                                break;
                            }
                            sq = next;
                        }
                    }
                    cutoff[c.index()][p][d as usize] = cut;
                }
            }
        }

        let mut mate = MateTables {
            drop: Vec::new().into_boxed_slice(),
            cutoff,
            cover,
            check,
        };

        let mut drop = Vec::with_capacity(PATTERN_NUM);
        for pattern in 0..PATTERN_NUM {
            let pattern = pattern as u16;
            drop.push([
                mate.compute_info(Color::Black, pattern),
                mate.compute_info(Color::White, pattern),
            ]);
        }
        mate.drop = drop.into_boxed_slice();

        log::info!(
            "mate tables built: {} patterns ({:.1} ms)",
            mate.drop.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Box::new(mate)
    }

    fn compute_info(&self, c: Color, pattern: u16) -> MateInfo {
        let candidates = pattern as u8;
        let flights = (pattern >> 8) as u8;
        let mut info = MateInfo::default();

        for pt in DROP_PIECES {
            let p = slot(pt);
            let dirs = directs(candidates & self.check[c.index()][p])
                .filter(|&d| (flights & !self.cover[c.index()][p][d as usize]) == 0)
                .fold(0u8, |bits, d| bits | d.bit());
            if dirs != 0 {
                info.set_directions(pt, dirs);
            }
        }

        // 桂は周囲の升に利かないので、逃げ道が1つもないことが条件
        if flights == 0 {
            info.kinds = info.kinds.with(PieceType::Knight);
        }
        info
    }

    /// 周囲8升パターンから詰み候補を引く
    #[inline]
    pub fn drop_info(&self, us: Color, pattern: u16) -> MateInfo {
        self.drop[pattern as usize][us.index()]
    }

    /// 玉から見てdの方向にptを置いたときに遮断が問題になる長い利きの方向
    #[inline]
    pub fn cutoff(&self, us: Color, pt: PieceType, d: Direct) -> u8 {
        self.cutoff[us.index()][slot(pt)][d as usize]
    }

    /// 玉から見てdの方向に置いたptが利く周囲の升（方向bit）
    #[inline]
    pub fn cover(&self, us: Color, pt: PieceType, d: Direct) -> u8 {
        self.cover[us.index()][slot(pt)][d as usize]
    }

    /// 玉から見てdの方向に置いたptが王手になる方向の集合
    #[inline]
    pub fn check_directions(&self, us: Color, pt: PieceType) -> u8 {
        self.check[us.index()][slot(pt)]
    }

    pub fn pattern_count(&self) -> usize {
        self.drop.len()
    }
}

/// テスト用に一度だけ構築した共有テーブル
#[cfg(test)]
pub(crate) fn test_mate_tables() -> &'static MateTables {
    use std::sync::OnceLock;
    static TABLES: OnceLock<Box<MateTables>> = OnceLock::new();
    TABLES.get_or_init(|| MateTables::build(crate::bitboard::test_tables()))
}
