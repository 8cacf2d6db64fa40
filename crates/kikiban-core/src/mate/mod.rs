//! 1手詰め判定モジュール
//!
//! - `effect`: 各升の利きの数と長い利きの方向
//! - `tables`: 玉の周囲8升パターンから詰み候補を引くテーブル
//! - `drop_mate`: 駒打ち（金銀飛香角）と桂による1手詰め判定

pub mod drop_mate;
pub mod effect;
pub mod tables;

pub use drop_mate::{MateInput, around_pattern, mate_1ply};
pub use effect::{EffectBoard, LongEffectBoard, PlacedPiece, compute_effects, occupancy, occupancy_of};
pub use tables::{DROP_PIECES, MateInfo, MateTables, PATTERN_NUM};
