//! 2升間の幾何テーブル（間の升・直線）

use crate::types::{Color, Square};

use super::Bitboard;
use super::direct::direct_of;
use super::sliders::SlidingTable;
use super::step::{StepClass, StepTables};

/// between / line テーブル [sq1][sq2]
///
/// 同じ筋・段・斜め上にない組は空。
pub(crate) struct GeometryTables {
    between: Box<[[Bitboard; Square::NUM]]>,
    line: Box<[[Bitboard; Square::NUM]]>,
}

impl GeometryTables {
    pub(crate) fn build(
        step: &StepTables,
        bishop: &SlidingTable,
        rook: &SlidingTable,
    ) -> GeometryTables {
        let mut between = vec![[Bitboard::EMPTY; Square::NUM]; Square::NUM].into_boxed_slice();
        let mut line = vec![[Bitboard::EMPTY; Square::NUM]; Square::NUM].into_boxed_slice();

        for s1 in Square::all() {
            for s2 in Square::all() {
                let Some(dir) = direct_of(s1, s2) else {
                    continue;
                };
                let (table, class) = if dir.is_diagonal() {
                    (bishop, StepClass::Bishop)
                } else {
                    (rook, StepClass::Rook)
                };

                // 互いを唯一の障害物としたときの利きの共通部分が間の升
                between[s1.index()][s2.index()] = table.attack(s1, Bitboard::from_square(s2))
                    & table.attack(s2, Bitboard::from_square(s1));

                // 空盤の利きの共通部分に両端を足すと盤端から盤端までの直線になる
                line[s1.index()][s2.index()] = (step.attack(class, Color::Black, s1)
                    & step.attack(class, Color::Black, s2))
                    | Bitboard::from_square(s1)
                    | Bitboard::from_square(s2);
            }
        }

        GeometryTables { between, line }
    }

    #[inline]
    pub(crate) fn between(&self, sq1: Square, sq2: Square) -> Bitboard {
        self.between[sq1.index()][sq2.index()]
    }

    #[inline]
    pub(crate) fn line(&self, sq1: Square, sq2: Square) -> Bitboard {
        self.line[sq1.index()][sq2.index()]
    }
}
