//! TranspositionTable本体
//!
//! - Cluster: エントリのグループ
//! - TranspositionTable: テーブル本体
//! - probe/save操作

use super::alloc::Allocation;
use super::entry::{TTData, TTEntry};
use super::{CACHE_LINE_SIZE, CLUSTER_SIZE, GENERATION_DELTA};
use crate::types::{Bound, Depth, Move, Value};
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU8, Ordering};

/// クラスター構造
/// 同じハッシュインデックスに対して複数のエントリを持つ
/// 10bytes × 3 + 2 = 32bytes（キャッシュライン64バイトに2つ収まる）
#[repr(C, align(32))]
pub struct Cluster {
    entries: [TTEntry; CLUSTER_SIZE],
    _padding: [u8; 2],
}

impl Cluster {
    #[inline]
    pub fn entries(&self) -> &[TTEntry; CLUSTER_SIZE] {
        &self.entries
    }

    fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.reset();
        }
    }
}

// クラスターは32バイトであることを保証
const _: () = assert!(std::mem::size_of::<Cluster>() == 32);

/// クラスター配列。`alloc` が None のときは長さ0
struct ClusterTable {
    alloc: Option<Allocation>,
    len: usize,
}

impl ClusterTable {
    fn new(len: usize) -> Self {
        let bytes = len * std::mem::size_of::<Cluster>();
        let alloc = Allocation::allocate_zeroed(bytes, CACHE_LINE_SIZE);
        Self {
            alloc: Some(alloc),
            len,
        }
    }

    const fn empty() -> Self {
        Self {
            alloc: None,
            len: 0,
        }
    }

    fn allocated_bytes(&self) -> usize {
        self.alloc.as_ref().map_or(0, Allocation::size)
    }
}

impl Deref for ClusterTable {
    type Target = [Cluster];

    fn deref(&self) -> &Self::Target {
        match &self.alloc {
            // SAFETY: len 個のクラスター分をゼロ埋めで確保済み。ゼロはアトミックの有効な値
            Some(alloc) => unsafe {
                std::slice::from_raw_parts(alloc.ptr().as_ptr() as *const Cluster, self.len)
            },
            None => &[],
        }
    }
}

impl DerefMut for ClusterTable {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match &mut self.alloc {
            // SAFETY: 同上。&mut self により排他アクセス
            Some(alloc) => unsafe {
                std::slice::from_raw_parts_mut(alloc.ptr().as_ptr() as *mut Cluster, self.len)
            },
            None => &mut [],
        }
    }
}

/// `mb` メガバイトに収まる最大の2冪のクラスター数（最小1）
pub(super) fn cluster_count_for(mb: usize) -> usize {
    let n = (mb.saturating_mul(1024 * 1024) / std::mem::size_of::<Cluster>()).max(1);
    1usize << (usize::BITS - 1 - n.leading_zeros())
}

/// 置換表
pub struct TranspositionTable {
    /// クラスターの配列
    table: ClusterTable,
    /// クラスター数（2冪）
    cluster_count: usize,
    /// 世代カウンター（下位2bitは使用しない）
    generation8: AtomicU8,
}

impl TranspositionTable {
    /// 新しい置換表を作成（サイズはMB単位）
    pub fn new(mb_size: usize) -> Self {
        let cluster_count = cluster_count_for(mb_size);
        let table = ClusterTable::new(cluster_count);
        log::info!(
            "hash table allocated: {} MiB requested, {} clusters ({} bytes)",
            mb_size,
            cluster_count,
            cluster_count * std::mem::size_of::<Cluster>()
        );

        Self {
            table,
            cluster_count,
            generation8: AtomicU8::new(0),
        }
    }

    /// サイズを変更
    ///
    /// クラスター数が変わらなければ何もしない（内容も保持）。
    pub fn resize(&mut self, mb_size: usize) {
        let new_count = cluster_count_for(mb_size);

        if new_count == self.cluster_count {
            log::debug!("hash resize to {mb_size} MiB skipped: {new_count} clusters unchanged");
            return;
        }

        log::debug!("hash resize: {} -> {} clusters", self.cluster_count, new_count);
        // 新旧のブロックを同時に保持しない
        drop(std::mem::replace(&mut self.table, ClusterTable::empty()));
        self.table = ClusterTable::new(new_count);
        self.cluster_count = new_count;
        log::info!(
            "hash table allocated: {} MiB requested, {} clusters",
            mb_size,
            new_count
        );
    }

    /// クリア
    pub fn clear(&mut self) {
        self.generation8.store(0, Ordering::Relaxed);
        let len = self.table.len();
        let threads = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);

        // サイズが小さい場合やスレッド数が1の場合は逐次クリア
        if threads <= 1 || len < threads * 1024 {
            self.table.iter_mut().for_each(Cluster::reset);
            return;
        }

        let chunk = len.div_ceil(threads);
        std::thread::scope(|scope| {
            for part in self.table.chunks_mut(chunk) {
                scope.spawn(move || part.iter_mut().for_each(Cluster::reset));
            }
        });
    }

    /// 新しい探索を開始（世代を進める）
    pub fn new_search(&self) {
        self.generation8.fetch_add(GENERATION_DELTA, Ordering::Relaxed);
    }

    /// 現在の世代を取得
    #[inline]
    pub fn generation(&self) -> u8 {
        self.generation8.load(Ordering::Relaxed)
    }

    /// クラスター数
    #[inline]
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// 確保済みバイト数
    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.table.allocated_bytes()
    }

    /// 置換表を検索
    ///
    /// クラスター内を先頭から見て、キー断片が一致するエントリがあれば世代を更新してヒット。
    /// 先に空きエントリが見つかればそれを書き込み先として返す。
    /// どちらもなければ置換価値が最小のエントリ（同点なら先頭側）を返す。
    pub fn probe(&self, key: u64) -> ProbeResult<'_> {
        let cluster = self.first_entry(key);
        let key16 = TTEntry::key_fragment(key);
        let gen8 = self.generation();

        for entry in &cluster.entries {
            if entry.is_empty() {
                return ProbeResult {
                    found: false,
                    data: TTData::EMPTY,
                    entry,
                };
            }
            if entry.key16() == key16 {
                entry.refresh(gen8);
                return ProbeResult {
                    found: true,
                    data: entry.read(),
                    entry,
                };
            }
        }

        // 置換するエントリを選択（価値が最小のもの）
        let mut replace = &cluster.entries[0];
        let mut min_value = replace.replace_score(gen8);
        for entry in &cluster.entries[1..] {
            let value = entry.replace_score(gen8);
            if value < min_value {
                min_value = value;
                replace = entry;
            }
        }

        ProbeResult {
            found: false,
            data: TTData::EMPTY,
            entry: replace,
        }
    }

    /// 置換表の使用率を1000分率で返す（推定値）
    ///
    /// 先頭の `1000 / CLUSTER_SIZE` クラスター（クラスター数が少なければ全部）だけを標本にする。
    /// 数えるのは書き込み済み（`depth8 != 0`）かつ現在の世代のエントリで、数そのものではなく
    /// `count * 999 / 標本エントリ数` に換算して返す。標本が全部埋まっていても 999 を超えない。
    pub fn hashfull(&self) -> usize {
        let gen8 = self.generation();
        let sample_count = (1000 / CLUSTER_SIZE).min(self.cluster_count);

        let count = self
            .table
            .iter()
            .take(sample_count)
            .flat_map(|cluster| cluster.entries.iter())
            .filter(|entry| entry.is_occupied() && entry.gen_bound().generation() == gen8)
            .count();

        count * 999 / (sample_count * CLUSTER_SIZE)
    }

    /// クラスターインデックスを計算（下位ビット）
    #[inline]
    fn cluster_index(&self, key: u64) -> usize {
        (key as usize) & (self.cluster_count - 1)
    }

    /// クラスターの参照を取得
    #[inline]
    fn first_entry(&self, key: u64) -> &Cluster {
        &self.table[self.cluster_index(key)]
    }

    /// 指定キーのクラスターをプリフェッチ
    #[inline]
    pub fn prefetch(&self, key: u64) {
        let cluster = self.first_entry(key);

        #[cfg(target_arch = "x86_64")]
        // SAFETY: prefetch はメモリを読み書きしない
        unsafe {
            use std::arch::x86_64::{_MM_HINT_T0, _mm_prefetch};
            _mm_prefetch::<_MM_HINT_T0>(cluster as *const _ as *const i8);
        }

        #[cfg(not(target_arch = "x86_64"))]
        let _ = cluster; // 何もしない
    }
}

/// probe結果
pub struct ProbeResult<'a> {
    /// ヒットしたか
    pub found: bool,
    /// 読み取ったデータ（ミス時は `TTData::EMPTY`）
    pub data: TTData,
    /// 書き込み先エントリ
    entry: &'a TTEntry,
}

impl<'a> ProbeResult<'a> {
    /// 書き込み先エントリ
    #[inline]
    pub fn entry(&self) -> &'a TTEntry {
        self.entry
    }

    /// エントリに書き込む
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
        self.entry.save(key, value, bound, depth, mv, eval, generation8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 同じクラスターに入る、キー断片だけが異なるキー
    fn key_in_cluster(fragment: u16, index: u64) -> u64 {
        ((fragment as u64) << 48) | index
    }

    #[test]
    fn test_cluster_count_for() {
        assert_eq!(cluster_count_for(0), 1);
        assert_eq!(cluster_count_for(1), 1 << 15);
        assert_eq!(cluster_count_for(16), 1 << 19);
        // 2冪に切り下げ
        assert_eq!(cluster_count_for(3), 1 << 16);
    }

    #[test]
    fn test_tt_new() {
        let tt = TranspositionTable::new(1);
        assert_eq!(tt.cluster_count(), 1 << 15);
        assert_eq!(tt.allocated_bytes(), 1 << 20);
        assert_eq!(tt.generation(), 0);
    }

    #[test]
    fn test_tt_new_search() {
        let tt = TranspositionTable::new(1);
        tt.new_search();
        assert_eq!(tt.generation(), GENERATION_DELTA);
        tt.new_search();
        assert_eq!(tt.generation(), GENERATION_DELTA * 2);
    }

    #[test]
    fn test_tt_generation_wraps() {
        let tt = TranspositionTable::new(0);
        for _ in 0..64 {
            tt.new_search();
        }
        assert_eq!(tt.generation(), 0);
    }

    #[test]
    fn test_tt_probe_and_save() {
        let tt = TranspositionTable::new(1);
        let key = 0x1234_5678_9ABC_DEF0;

        let probe1 = tt.probe(key);
        assert!(!probe1.found);
        probe1.save(
            key,
            Value::new(50),
            Bound::Exact,
            10,
            Move::NONE,
            Value::ZERO,
            tt.generation(),
        );

        let probe2 = tt.probe(key);
        assert!(probe2.found);
        assert_eq!(probe2.data.value, Value::new(50));
        assert_eq!(probe2.data.bound, Bound::Exact);
        assert_eq!(probe2.data.depth, 10);
        assert!(std::ptr::eq(probe1.entry(), probe2.entry()));
    }

    #[test]
    fn test_tt_probe_refreshes_generation() {
        let tt = TranspositionTable::new(1);
        let key = key_in_cluster(0x0101, 5);
        tt.probe(key)
            .save(key, Value::ZERO, Bound::Lower, 4, Move::NONE, Value::ZERO, tt.generation());

        tt.new_search();
        tt.new_search();
        let probe = tt.probe(key);
        assert!(probe.found);
        assert_eq!(probe.data.generation, tt.generation());
        assert_eq!(probe.data.bound, Bound::Lower);
    }

    #[test]
    fn test_tt_replace_min_score() {
        let tt = TranspositionTable::new(1);
        let gen8 = tt.generation();
        for (fragment, depth) in [(1u16, 10), (2, 4), (3, 8)] {
            let key = key_in_cluster(fragment, 7);
            tt.probe(key)
                .save(key, Value::ZERO, Bound::Exact, depth, Move::NONE, Value::ZERO, gen8);
        }

        let cluster = tt.first_entry(7);
        let probe = tt.probe(key_in_cluster(4, 7));
        assert!(!probe.found);
        // 最も浅い2番目のエントリが置換対象
        assert!(std::ptr::eq(probe.entry(), &cluster.entries()[1]));
    }

    #[test]
    fn test_tt_replace_tie_takes_first() {
        let tt = TranspositionTable::new(1);
        let gen8 = tt.generation();
        for fragment in 1u16..=3 {
            let key = key_in_cluster(fragment, 9);
            tt.probe(key)
                .save(key, Value::ZERO, Bound::Exact, 6, Move::NONE, Value::ZERO, gen8);
        }

        let cluster = tt.first_entry(9);
        let probe = tt.probe(key_in_cluster(4, 9));
        assert!(std::ptr::eq(probe.entry(), &cluster.entries()[0]));
    }

    #[test]
    fn test_tt_hashfull() {
        let tt = TranspositionTable::new(1);
        assert_eq!(tt.hashfull(), 0);

        tt.new_search();
        let gen8 = tt.generation();
        for index in 0..333u64 {
            for fragment in 1u16..=3 {
                let key = key_in_cluster(fragment, index);
                tt.probe(key)
                    .save(key, Value::ZERO, Bound::Exact, 1, Move::NONE, Value::ZERO, gen8);
            }
        }
        assert_eq!(tt.hashfull(), 999);

        // 世代が進むと数えない
        tt.new_search();
        assert_eq!(tt.hashfull(), 0);
    }

    #[test]
    fn test_tt_hashfull_single_cluster() {
        let tt = TranspositionTable::new(0);
        assert_eq!(tt.cluster_count(), 1);
        let key = key_in_cluster(1, 0);
        tt.probe(key)
            .save(key, Value::ZERO, Bound::Exact, 1, Move::NONE, Value::ZERO, tt.generation());
        assert_eq!(tt.hashfull(), 333);
    }

    #[test]
    fn test_tt_clear() {
        let mut tt = TranspositionTable::new(1);
        let key = 0xDEAD_BEEF_0000_0001;
        tt.new_search();
        tt.probe(key)
            .save(key, Value::new(1), Bound::Exact, 3, Move::NONE, Value::ZERO, tt.generation());
        assert!(tt.probe(key).found);

        tt.clear();
        assert_eq!(tt.generation(), 0);
        assert!(!tt.probe(key).found);
    }

    #[test]
    fn test_tt_resize() {
        let mut tt = TranspositionTable::new(1);
        let key = 0x0F0F_0000_0000_0003;
        tt.probe(key)
            .save(key, Value::new(1), Bound::Exact, 3, Move::NONE, Value::ZERO, tt.generation());

        // クラスター数が変わらなければ内容は残る
        tt.resize(1);
        assert!(tt.probe(key).found);

        tt.resize(2);
        assert_eq!(tt.cluster_count(), 1 << 16);
        assert_eq!(tt.allocated_bytes(), 2 << 20);
        assert!(!tt.probe(key).found);

        tt.resize(0);
        assert_eq!(tt.cluster_count(), 1);
        assert_eq!(tt.allocated_bytes(), std::mem::size_of::<Cluster>());
    }

    #[test]
    fn test_tt_prefetch_does_not_panic() {
        let tt = TranspositionTable::new(1);
        tt.prefetch(u64::MAX);
        tt.prefetch(0);
    }
}
