//! 筋・段・升ごとのBitboardマスク

use crate::types::{File, Rank, Square};

use super::Bitboard;

/// 筋のBitboard
pub static FILE_BB: [Bitboard; File::NUM] = init_file_bb();

/// 段のBitboard
pub static RANK_BB: [Bitboard; Rank::NUM] = init_rank_bb();

/// 各マスのBitboard
pub static SQUARE_BB: [Bitboard; Square::NUM] = init_square_bb();

const fn square_bb_const(idx: usize) -> Bitboard {
    if idx < Bitboard::PART_BORDER {
        Bitboard::new(1u64 << idx, 0)
    } else {
        Bitboard::new(0, 1u64 << (idx - Bitboard::PART_BORDER))
    }
}

const fn init_file_bb() -> [Bitboard; File::NUM] {
    let mut result = [Bitboard::EMPTY; File::NUM];
    let mut file = 0;
    while file < 9 {
        let mut rank = 0;
        while rank < 9 {
            result[file] = result[file].or(square_bb_const(file * 9 + rank));
            rank += 1;
        }
        file += 1;
    }
    result
}

const fn init_rank_bb() -> [Bitboard; Rank::NUM] {
    let mut result = [Bitboard::EMPTY; Rank::NUM];
    let mut rank = 0;
    while rank < 9 {
        let mut file = 0;
        while file < 9 {
            result[rank] = result[rank].or(square_bb_const(file * 9 + rank));
            file += 1;
        }
        rank += 1;
    }
    result
}

const fn init_square_bb() -> [Bitboard; Square::NUM] {
    let mut result = [Bitboard::EMPTY; Square::NUM];
    let mut i = 0;
    while i < Square::NUM {
        result[i] = square_bb_const(i);
        i += 1;
    }
    result
}
