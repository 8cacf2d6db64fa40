//! 駒打ちと桂跳ねによる1手詰め判定
//!
//! 玉の周囲8升の利きの状態をパターン化して表引きするだけの高速な前段判定。
//! 見つからなくても詰みがないとは限らない（両王手・開き王手・桂以外の移動による詰みは対象外）。

use crate::bitboard::{AttackTables, Bitboard, Direct, StepClass, directs};
use crate::types::{Color, Hand, HandKind, Move, PieceType, Square};

use super::effect::{EffectBoard, LongEffectBoard};
use super::tables::MateTables;

/// 1手詰め判定の入力（局面側が保持している情報）
#[derive(Clone, Copy)]
pub struct MateInput<'a> {
    /// 手番（攻め方）
    pub us: Color,
    /// 攻め方の玉
    pub our_king: Square,
    /// 受け方の玉
    pub their_king: Square,
    /// 全駒の占有
    pub occupied: Bitboard,
    /// 受け方の駒
    pub their_pieces: Bitboard,
    /// 攻め方の桂
    pub our_knights: Bitboard,
    /// 攻め方のピンされている駒
    pub pinned: Bitboard,
    /// 攻め方の手駒
    pub hand: Hand,
    /// 各升の利きの数
    pub effects: &'a EffectBoard,
    /// 各升の長い利きの方向
    pub long_effects: &'a LongEffectBoard,
}

/// 打つ順（詰みやすい駒から）
///
/// 飛で詰まないなら香でも詰まないので、香は飛を調べなかったときだけ見る。
const DROP_ORDER: [PieceType; 4] = [
    PieceType::Gold,
    PieceType::Silver,
    PieceType::Rook,
    PieceType::Bishop,
];

#[inline]
fn step(sq: Square, d: Direct) -> Option<Square> {
    let (df, dr) = d.delta();
    sq.offset(df, dr)
}

/// 玉の周囲8升のパターン
///
/// - 下位8bit: 駒を打つ候補の升（空き升、受け方の利きは玉のみ、攻め方の利きあり）
/// - 上位8bit: 玉の逃げ道（攻め方の利きがなく、受け方の駒もない）
///
/// 盤外はどちらも0。
pub fn around_pattern(input: &MateInput<'_>) -> u16 {
    let us = input.us;
    let them = !us;
    let mut candidates = 0u8;
    let mut flights = 0u8;

    for d in Direct::ALL {
        let Some(sq) = step(input.their_king, d) else {
            continue;
        };
        let ours = input.effects.count(us, sq);
        if ours > 0 && input.effects.count(them, sq) <= 1 && !input.occupied.contains(sq) {
            candidates |= d.bit();
        }
        if ours == 0 && !input.their_pieces.contains(sq) {
            flights |= d.bit();
        }
    }

    candidates as u16 | (flights as u16) << 8
}

/// 玉から見た隣接升の方向
#[inline]
fn neighbor_direct(ksq: Square, sq: Square) -> Option<Direct> {
    Direct::ALL.into_iter().find(|&d| step(ksq, d) == Some(sq))
}

/// `to` に駒を置いて長い利きを遮っても、玉の周囲に逃げ道ができないか
///
/// `dirs` の各方向について `to` の先にある周囲の升を見る。置いた駒自身が利いている升
/// (`cover`) と受け方の駒がある升以外は、遮られる利きのほかにも利きが必要。
fn survives_cutoff(input: &MateInput<'_>, to: Square, dirs: u8, cover: u8) -> bool {
    let ksq = input.their_king;

    for e in directs(dirs) {
        let mut sq = to;
        // 周囲3x3を直線で横切るのは高々3升
        for _ in 0..3 {
            let Some(next) = step(sq, e) else {
                break;
            };
            if next == ksq {
                break;
            }
            if let Some(k) = neighbor_direct(ksq, next)
                && cover & k.bit() == 0
                && !input.their_pieces.contains(next)
                && input.effects.count(input.us, next) <= 1
            {
                return false;
            }
            if input.occupied.contains(next) {
                break;
            }
            sq = next;
        }
    }
    true
}

/// 1手詰めの指し手を返す。見つからなければNone
///
/// 攻め方の玉に王手がかかっている局面では判定しない。
pub fn mate_1ply(
    mate_tables: &MateTables,
    tables: &AttackTables,
    input: &MateInput<'_>,
) -> Option<Move> {
    let us = input.us;
    let them = !us;
    let ksq = input.their_king;

    if input.effects.count(them, input.our_king) > 0 {
        return None;
    }

    let info = mate_tables.drop_info(us, around_pattern(input));
    let our_hand = HandKind::from_hand(input.hand);
    let hk = our_hand.intersect(info.kinds());

    // --- 駒打ちによる詰み
    for pt in DROP_ORDER {
        let pt = match pt {
            PieceType::Rook if !hk.contains(PieceType::Rook) => PieceType::Lance,
            _ => pt,
        };
        if !hk.contains(pt) {
            continue;
        }
        if let Some(mv) = try_drop(mate_tables, input, pt, info.directions(pt)) {
            return Some(mv);
        }
    }

    // --- 桂による詰み
    if !info.kinds().contains(PieceType::Knight) {
        return None;
    }

    let targets = tables.step_attack(StepClass::Knight, them, ksq) & !input.occupied;
    for to in targets.iter() {
        if input.effects.count(them, to) > 0 {
            continue;
        }
        let cut = input.long_effects.directions(us, to);
        if !survives_cutoff(input, to, cut, 0) {
            continue;
        }

        // 桂を持っているならここに打って詰み
        if our_hand.contains(PieceType::Knight) {
            return Some(Move::new_drop(PieceType::Knight, to));
        }

        // toに利く桂があるならそれを跳ねて詰み。ただしpinされていると駄目
        let froms = tables.step_attack(StepClass::Knight, them, to) & input.our_knights;
        if let Some(from) = froms.iter().find(|&from| !input.pinned.contains(from)) {
            return Some(Move::new_move(from, to, false));
        }
    }

    None
}

/// ptを玉の周囲に打って詰むか、候補の方向を順に調べる
fn try_drop(
    mate_tables: &MateTables,
    input: &MateInput<'_>,
    pt: PieceType,
    directions: u8,
) -> Option<Move> {
    let us = input.us;
    for d in directs(directions) {
        let Some(to) = step(input.their_king, d) else {
            continue;
        };
        let cut = mate_tables.cutoff(us, pt, d) & input.long_effects.directions(us, to);
        let cover = mate_tables.cover(us, pt, d);
        if cut == 0 || survives_cutoff(input, to, cut, cover) {
            return Some(Move::new_drop(pt, to));
        }
    }
    None
}
