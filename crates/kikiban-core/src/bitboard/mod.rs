//! ビットボードモジュール
//!
//! 81マスの盤面を128bitで表現し、高速なビット演算と利き計算を提供する。
//!
//! - `Bitboard`: 128bit盤面表現（縦型: p[0]=1-7筋, p[1]=8-9筋）
//! - 筋・段・升ごとのマスク（`FILE_BB`, `RANK_BB`, `SQUARE_BB`）
//! - `AttackTables`: 近接駒の利き、pextで引く遠方駒の利き、`between` / `line`、王手候補

mod check_candidate;
mod core;
mod direct;
mod geometry;
mod masks;
mod pext;
mod sliders;
mod step;
mod tables;

pub use check_candidate::CheckClass;
pub use self::core::{Bitboard, BitboardIter};
pub use direct::{Direct, direct_of, directs};
pub use masks::{FILE_BB, RANK_BB, SQUARE_BB};
pub use pext::{deposit, extract, extract_soft};
pub use sliders::Slider;
pub use step::StepClass;
pub use tables::AttackTables;

#[cfg(test)]
pub(crate) use tables::test_tables;
