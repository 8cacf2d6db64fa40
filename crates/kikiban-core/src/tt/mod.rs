//! 置換表モジュール
//!
//! 探索結果をキャッシュする置換表（Transposition Table）。
//!
//! - `TTEntry`: エントリ（10バイト、16bitキー断片）
//! - `Cluster`: エントリのグループ（32バイト）
//! - `TranspositionTable`: テーブル本体
//! - 世代管理（`GenBound` で世代と Bound を1バイトに詰める）
//! - prefetch
//!
//! クラスターインデックスは64bitキーの下位ビット (`key & (count - 1)`)、
//! クラスター内の照合には上位16bit (`key >> 48`) を使う。
//! 10バイトエントリ × 3 + 2パディング = 32バイト/クラスター。
//!
//! ロックは取らない。エントリの各フィールドはアトミックで、別スレッドの書き込みと
//! 混ざって壊れたエントリはキー断片の不一致としてミス扱いになる。

mod alloc;
mod entry;
mod table;

pub use entry::{GenBound, TTData, TTEntry};
pub use table::{Cluster, ProbeResult, TranspositionTable};

/// クラスターサイズ（エントリ数）
pub const CLUSTER_SIZE: usize = 3;

/// Generation関連の定数
///
/// genBound8 の下位2bitは Bound、上位6bitが世代。
pub const GENERATION_BITS: u32 = 2;
pub const GENERATION_DELTA: u8 = 1 << GENERATION_BITS; // 4
pub const GENERATION_CYCLE: u16 = 255 + GENERATION_DELTA as u16; // 259
pub const GENERATION_MASK: u16 = 0xFC; // (0xFF << GENERATION_BITS) as u8

/// キャッシュラインサイズ（テーブル確保時のアラインメント）
pub const CACHE_LINE_SIZE: usize = 64;
