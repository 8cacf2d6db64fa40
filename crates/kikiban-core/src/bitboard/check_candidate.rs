//! 王手候補テーブル (CheckCandidate)
//!
//! 敵玉の位置ごとに、その駒を1手動かせば（成りを含めて）直接王手になりうる
//! 移動元の升を保持する。駒の配置は無視した上限の集合。
//! 飛・龍は盤上ほぼ全域が候補になるので表に持たない。

use crate::types::{Color, Square};

use super::masks::RANK_BB;
use super::step::{StepClass, StepTables};
use super::Bitboard;

/// 王手候補テーブルの駒種
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CheckClass {
    Pawn = 0,
    Lance = 1,
    Knight = 2,
    Silver = 3,
    Bishop = 4,
    /// 馬（飛の枠に格納）
    Horse = 5,
    Gold = 6,
    /// 玉・馬・龍の近接利きで王手できる升（玉の周囲24升）
    Hdk = 7,
}

impl CheckClass {
    pub const NUM: usize = 8;

    pub const ALL: [CheckClass; 8] = [
        CheckClass::Pawn,
        CheckClass::Lance,
        CheckClass::Knight,
        CheckClass::Silver,
        CheckClass::Bishop,
        CheckClass::Horse,
        CheckClass::Gold,
        CheckClass::Hdk,
    ];
}

/// 王手候補テーブル [KingSquare][CheckClass][Color]
pub(crate) struct CheckCandidateTable {
    table: Box<[[[Bitboard; Color::NUM]; CheckClass::NUM]]>,
}

/// 敵陣ビットボード（成りの条件判定用）
fn enemy_field(us: Color) -> Bitboard {
    match us {
        Color::Black => RANK_BB[0] | RANK_BB[1] | RANK_BB[2],
        Color::White => RANK_BB[6] | RANK_BB[7] | RANK_BB[8],
    }
}

impl CheckCandidateTable {
    pub(crate) fn build(step: &StepTables) -> CheckCandidateTable {
        let mut table =
            vec![[[Bitboard::EMPTY; Color::NUM]; CheckClass::NUM]; Square::NUM].into_boxed_slice();

        // 逆利きは「相手の駒として置いたときの利き」で求める
        let eff = |class: StepClass, c: Color, sq: Square| step.attack(class, c, sq);
        let union_of = |from: Bitboard, f: &dyn Fn(Square) -> Bitboard| {
            from.iter().fold(Bitboard::EMPTY, |acc, sq| acc | f(sq))
        };

        for us in Color::ALL {
            let them = !us;
            let ef = enemy_field(us);

            for ksq in Square::all() {
                let ksq_bb = Bitboard::from_square(ksq);
                let around = eff(StepClass::King, us, ksq);
                // 敵玉位置に敵の金を置いた利き & 敵陣（成って金の動きで王手できる升）
                let enemy_gold = eff(StepClass::Gold, them, ksq) & ef;
                let out = &mut table[ksq.index()];

                // 歩: 不成は歩の逆利きの逆利き、成りは敵陣の金位置への逆利き
                let pawn_from = |sq| eff(StepClass::Pawn, them, sq);
                out[CheckClass::Pawn as usize][us.index()] = (union_of(
                    eff(StepClass::Pawn, them, ksq),
                    &pawn_from,
                ) | union_of(enemy_gold, &pawn_from))
                .and_not(ksq_bb);

                // 香: 同筋の後方全域、敵陣の玉なら成りで隣接筋からも
                let mut lance = eff(StepClass::Lance, them, ksq);
                if ef.contains(ksq) {
                    for df in [-1, 1] {
                        if let Some(adj) = ksq.offset(df, 0) {
                            lance |= eff(StepClass::Lance, them, adj);
                        }
                    }
                }
                out[CheckClass::Lance as usize][us.index()] = lance.and_not(ksq_bb);

                // 桂
                let knight_from = |sq| eff(StepClass::Knight, them, sq);
                out[CheckClass::Knight as usize][us.index()] =
                    union_of(eff(StepClass::Knight, them, ksq) | enemy_gold, &knight_from)
                        .and_not(ksq_bb);

                // 銀: 不成、移動先が敵陣で成り、移動元が敵陣で成り
                let silver_from = |sq| eff(StepClass::Silver, them, sq);
                let silver = union_of(eff(StepClass::Silver, them, ksq), &silver_from)
                    | union_of(enemy_gold, &silver_from)
                    | union_of(eff(StepClass::Gold, them, ksq), &|sq: Square| ef & silver_from(sq));
                out[CheckClass::Silver as usize][us.index()] = silver.and_not(ksq_bb);

                // 角: 空盤の角の利きの利き、成りは玉の周囲への角の利き
                let bishop_from = |sq| eff(StepClass::Bishop, us, sq);
                let bishop = union_of(eff(StepClass::Bishop, us, ksq), &bishop_from)
                    | union_of(around & ef, &bishop_from)
                    | union_of(around, &|sq: Square| ef & bishop_from(sq));
                out[CheckClass::Bishop as usize][us.index()] = bishop.and_not(ksq_bb);

                // 馬
                let horse_from = |sq| eff(StepClass::Bishop, us, sq) | eff(StepClass::King, us, sq);
                out[CheckClass::Horse as usize][us.index()] =
                    union_of(horse_from(ksq), &horse_from).and_not(ksq_bb);

                // 金（成駒も同じ）
                let gold_from = |sq| eff(StepClass::Gold, them, sq);
                out[CheckClass::Gold as usize][us.index()] =
                    union_of(eff(StepClass::Gold, them, ksq), &gold_from).and_not(ksq_bb);

                // 玉・馬・龍の近接利き: 玉の周囲24升
                let king_from = |sq| eff(StepClass::King, us, sq);
                out[CheckClass::Hdk as usize][us.index()] =
                    union_of(around, &king_from).and_not(ksq_bb);
            }
        }

        CheckCandidateTable { table }
    }

    #[inline]
    pub(crate) fn get(&self, ksq: Square, class: CheckClass, us: Color) -> Bitboard {
        self.table[ksq.index()][class as usize][us.index()]
    }
}
