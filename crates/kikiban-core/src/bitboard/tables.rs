//! 利きテーブル一式（AttackTables）
//!
//! 起動時に `AttackTables::build()` で一度だけ構築し、以後は読み取り専用で
//! 全スレッドから参照する。

use std::time::Instant;

use crate::types::{Color, PieceType, Square};

use super::check_candidate::{CheckCandidateTable, CheckClass};
use super::geometry::GeometryTables;
use super::sliders::{Slider, SlidingTable};
use super::step::{StepClass, StepTables};
use super::Bitboard;

/// 近接駒・遠方駒・幾何・王手候補の全テーブル
pub struct AttackTables {
    step: Box<StepTables>,
    lance: [SlidingTable; Color::NUM],
    bishop: SlidingTable,
    rook: SlidingTable,
    geometry: GeometryTables,
    check_candidate: CheckCandidateTable,
}

impl AttackTables {
    /// 全テーブルを構築する
    ///
    /// 盤の幾何だけから決まる決定的な処理で、何度呼んでも同じ結果になる。
    pub fn build() -> Box<AttackTables> {
        let start = Instant::now();

        let step = StepTables::build();
        let lance = [
            SlidingTable::build(Slider::Lance(Color::Black)),
            SlidingTable::build(Slider::Lance(Color::White)),
        ];
        let bishop = SlidingTable::build(Slider::Bishop);
        let rook = SlidingTable::build(Slider::Rook);
        let geometry = GeometryTables::build(&step, &bishop, &rook);
        let check_candidate = CheckCandidateTable::build(&step);

        log::info!(
            "attack tables built: bishop={} rook={} lance={} entries ({:.1} ms)",
            bishop.len(),
            rook.len(),
            lance[0].len() + lance[1].len(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Box::new(AttackTables {
            step,
            lance,
            bishop,
            rook,
            geometry,
            check_candidate,
        })
    }

    /// 近接利き（盤上の駒配置には依存しない）
    #[inline]
    pub fn step_attack(&self, class: StepClass, color: Color, sq: Square) -> Bitboard {
        self.step.attack(class, color, sq)
    }

    /// 遠方駒の利き
    #[inline]
    pub fn sliding_attack(&self, slider: Slider, sq: Square, occupied: Bitboard) -> Bitboard {
        self.sliding_table(slider).attack(sq, occupied)
    }

    /// 遠方駒の占有マスク
    #[inline]
    pub fn occupancy_mask(&self, slider: Slider, sq: Square) -> Bitboard {
        self.sliding_table(slider).mask(sq)
    }

    /// 遠方駒テーブルのエントリ数
    pub fn sliding_table_len(&self, slider: Slider) -> usize {
        self.sliding_table(slider).len()
    }

    #[inline]
    fn sliding_table(&self, slider: Slider) -> &SlidingTable {
        match slider {
            Slider::Lance(c) => &self.lance[c.index()],
            Slider::Bishop => &self.bishop,
            Slider::Rook => &self.rook,
        }
    }

    /// sq1とsq2の間の升（両端を含まない）。同一直線上にない場合は空
    #[inline]
    pub fn between(&self, sq1: Square, sq2: Square) -> Bitboard {
        self.geometry.between(sq1, sq2)
    }

    /// sq1とsq2を通る盤端から盤端までの直線。同一直線上にない場合は空
    #[inline]
    pub fn line(&self, sq1: Square, sq2: Square) -> Bitboard {
        self.geometry.line(sq1, sq2)
    }

    /// s1, s2, s3 が同一直線上にあるか（s1 != s2 であること）
    #[inline]
    pub fn aligned(&self, s1: Square, s2: Square, s3: Square) -> bool {
        self.line(s1, s2).contains(s3)
    }

    /// `us` の駒 `class` を1手動かして ksq の玉に王手できうる移動元
    #[inline]
    pub fn check_candidates(&self, ksq: Square, class: CheckClass, us: Color) -> Bitboard {
        self.check_candidate.get(ksq, class, us)
    }

    #[inline]
    pub fn lance_effect(&self, color: Color, sq: Square, occupied: Bitboard) -> Bitboard {
        self.lance[color.index()].attack(sq, occupied)
    }

    #[inline]
    pub fn bishop_effect(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.bishop.attack(sq, occupied)
    }

    #[inline]
    pub fn rook_effect(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.rook.attack(sq, occupied)
    }

    #[inline]
    pub fn horse_effect(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.bishop_effect(sq, occupied) | self.step_attack(StepClass::Cross00, Color::Black, sq)
    }

    #[inline]
    pub fn dragon_effect(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.rook_effect(sq, occupied) | self.step_attack(StepClass::Cross45, Color::Black, sq)
    }

    /// 駒種ごとの利き
    pub fn effects_from(
        &self,
        pt: PieceType,
        color: Color,
        sq: Square,
        occupied: Bitboard,
    ) -> Bitboard {
        match pt {
            PieceType::Pawn => self.step_attack(StepClass::Pawn, color, sq),
            PieceType::Lance => self.lance_effect(color, sq, occupied),
            PieceType::Knight => self.step_attack(StepClass::Knight, color, sq),
            PieceType::Silver => self.step_attack(StepClass::Silver, color, sq),
            PieceType::Gold
            | PieceType::ProPawn
            | PieceType::ProLance
            | PieceType::ProKnight
            | PieceType::ProSilver => self.step_attack(StepClass::Gold, color, sq),
            PieceType::Bishop => self.bishop_effect(sq, occupied),
            PieceType::Rook => self.rook_effect(sq, occupied),
            PieceType::King => self.step_attack(StepClass::King, color, sq),
            PieceType::Horse => self.horse_effect(sq, occupied),
            PieceType::Dragon => self.dragon_effect(sq, occupied),
        }
    }
}

/// テスト用に一度だけ構築した共有テーブル
#[cfg(test)]
pub(crate) fn test_tables() -> &'static AttackTables {
    use std::sync::OnceLock;
    static TABLES: OnceLock<Box<AttackTables>> = OnceLock::new();
    TABLES.get_or_init(AttackTables::build)
}
