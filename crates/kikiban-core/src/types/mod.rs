//! 基本型
//!
//! - `coord`: 筋・段・升（縦型の升番号）
//! - `color`, `piece_type`, `hand`: 駒と手駒
//! - `moves`: 16bitの指し手
//! - `score`: 置換表に格納する評価値・深さ・Bound

mod color;
mod coord;
mod hand;
mod moves;
mod piece_type;
mod score;

pub use color::Color;
pub use coord::{File, Rank, Square};
pub use hand::{Hand, HandKind};
pub use moves::Move;
pub use piece_type::PieceType;
pub use score::{Bound, DEPTH_ENTRY_OFFSET, Depth, Value};
