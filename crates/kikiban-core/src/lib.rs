//! 将棋エンジン向けの合法手判定サポートコア
//!
//! - `bitboard`: 81マスのBitboardと利きテーブル（近接駒・遠方駒・直線/間のマス・王手候補）
//! - `tt`: 探索結果をキャッシュする置換表
//! - `mate`: 駒打ちと桂跳ねによる1手詰め判定
//!
//! テーブル類はグローバル変数ではなく、`AttackTables::build()` などで明示的に構築した
//! サービスオブジェクトを参照で渡して使う。

#[macro_use]
mod macros;

pub mod bitboard;
pub mod config;
pub mod error;
pub mod mate;
pub mod services;
pub mod tt;
pub mod types;

pub use bitboard::{AttackTables, Bitboard};
pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use mate::{MateInput, MateTables, mate_1ply};
pub use services::CoreServices;
pub use tt::TranspositionTable;
