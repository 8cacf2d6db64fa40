//! 置換表エントリ

use std::sync::atomic::{AtomicI16, AtomicU8, AtomicU16, Ordering};

use super::{GENERATION_CYCLE, GENERATION_MASK};
use crate::types::{Bound, DEPTH_ENTRY_OFFSET, Depth, Move, Value};

/// 世代（上位6bit）とBound（下位2bit）を詰めた1バイト
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct GenBound(u8);

impl GenBound {
    /// 詰める。generation の下位2bitは捨てる
    #[inline]
    pub const fn pack(generation: u8, bound: Bound) -> GenBound {
        GenBound((generation & GENERATION_MASK as u8) | bound as u8)
    }

    /// 世代（下位2bitは常に0）
    #[inline]
    pub const fn generation(self) -> u8 {
        self.0 & GENERATION_MASK as u8
    }

    #[inline]
    pub const fn bound(self) -> Bound {
        Bound::from_bits(self.0)
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn from_raw(raw: u8) -> GenBound {
        GenBound(raw)
    }

    /// 現在の世代 `gen8` から見た古さ（wraparound 安全、4刻み）
    #[inline]
    pub const fn relative_age(self, gen8: u8) -> u8 {
        ((GENERATION_CYCLE + gen8 as u16 - self.0 as u16) & GENERATION_MASK) as u8
    }
}

/// 読み出したエントリの内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTData {
    pub mv: Move,
    pub value: Value,
    pub eval: Value,
    pub depth: Depth,
    pub bound: Bound,
    pub generation: u8,
}

impl TTData {
    pub const EMPTY: TTData = TTData {
        mv: Move::NONE,
        value: Value::NONE,
        eval: Value::NONE,
        depth: DEPTH_ENTRY_OFFSET,
        bound: Bound::None,
        generation: 0,
    };
}

/// 置換表エントリ（10バイト）
///
/// 全フィールドがアトミックなので複数スレッドから `&TTEntry` 経由で読み書きできる。
/// ゼロ埋めされたメモリは空エントリとして有効。
#[repr(C)]
pub struct TTEntry {
    key16: AtomicU16,
    move16: AtomicU16,
    value16: AtomicI16,
    eval16: AtomicI16,
    depth8: AtomicU8,
    gen_bound8: AtomicU8,
}

const _: () = assert!(std::mem::size_of::<TTEntry>() == 10);

impl TTEntry {
    pub const fn new() -> Self {
        Self {
            key16: AtomicU16::new(0),
            move16: AtomicU16::new(0),
            value16: AtomicI16::new(0),
            eval16: AtomicI16::new(0),
            depth8: AtomicU8::new(0),
            gen_bound8: AtomicU8::new(0),
        }
    }

    /// キーの照合に使う上位16bit
    #[inline]
    pub const fn key_fragment(key: u64) -> u16 {
        (key >> 48) as u16
    }

    #[inline]
    pub fn key16(&self) -> u16 {
        self.key16.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn depth8(&self) -> u8 {
        self.depth8.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn gen_bound(&self) -> GenBound {
        GenBound::from_raw(self.gen_bound8.load(Ordering::Relaxed))
    }

    /// probeでの空き判定（キー断片が0）
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.key16() == 0
    }

    /// 一度でも書き込まれたか（格納深さは常に1以上）
    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.depth8() != 0
    }

    /// 置換の優先度（小さいほど追い出されやすい）
    #[inline]
    pub fn replace_score(&self, gen8: u8) -> i32 {
        self.depth8() as i32 - 2 * self.gen_bound().relative_age(gen8) as i32
    }

    /// 世代だけを更新する（Boundは保持）
    #[inline]
    pub fn refresh(&self, gen8: u8) {
        let bound = self.gen_bound().bound();
        self.gen_bound8.store(GenBound::pack(gen8, bound).raw(), Ordering::Relaxed);
    }

    /// 内容を読み出す
    pub fn read(&self) -> TTData {
        let gb = self.gen_bound();
        TTData {
            mv: Move::from_u16(self.move16.load(Ordering::Relaxed)),
            value: Value::new(self.value16.load(Ordering::Relaxed) as i32),
            eval: Value::new(self.eval16.load(Ordering::Relaxed) as i32),
            depth: self.depth8() as Depth + DEPTH_ENTRY_OFFSET,
            bound: gb.bound(),
            generation: gb.generation(),
        }
    }

    /// 書き込む
    ///
    /// 新しい指し手がなくキーが同じなら古い指し手を残す。
    /// キーが違う、十分深い、または Exact のときだけ残りを上書きする。
    #[allow(clippy::too_many_arguments)]
    pub fn save(
        &self,
        key: u64,
        value: Value,
        bound: Bound,
        depth: Depth,
        mv: Move,
        eval: Value,
        generation8: u8,
    ) {
        assert_lv!(depth > DEPTH_ENTRY_OFFSET, "depth out of range: {depth}");
        assert_lv!(
            (depth - DEPTH_ENTRY_OFFSET) <= u8::MAX as Depth,
            "depth out of range: {depth}"
        );
        assert_lv!(value.fits_entry(), "value out of range: {}", value.raw());
        assert_lv!(eval.fits_entry(), "eval out of range: {}", eval.raw());

        let key16 = Self::key_fragment(key);
        let same_key = key16 == self.key16();

        if !mv.is_none() || !same_key {
            self.move16.store(mv.raw(), Ordering::Relaxed);
        }

        let depth8 = (depth - DEPTH_ENTRY_OFFSET) as i32;
        if !same_key || depth8 > self.depth8() as i32 - 4 || bound == Bound::Exact {
            self.key16.store(key16, Ordering::Relaxed);
            self.value16.store(value.raw() as i16, Ordering::Relaxed);
            self.eval16.store(eval.raw() as i16, Ordering::Relaxed);
            self.depth8.store(depth8 as u8, Ordering::Relaxed);
            self.gen_bound8
                .store(GenBound::pack(generation8, bound).raw(), Ordering::Relaxed);
        }
    }

    /// 空エントリに戻す
    #[inline]
    pub(crate) fn reset(&mut self) {
        *self = TTEntry::new();
    }
}

impl Default for TTEntry {
    fn default() -> Self {
        Self::new()
    }
}
