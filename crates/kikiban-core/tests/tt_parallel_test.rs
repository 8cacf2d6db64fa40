//! Parallel safety tests for the transposition table

use std::sync::Arc;
use std::thread;

use kikiban_core::tt::TranspositionTable;
use kikiban_core::types::{Bound, Move, Value};
use rand::RngCore;
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;

const THREADS: u64 = 4;
const OPS: usize = 20_000;

#[test]
fn concurrent_probe_and_save() {
    let tt = Arc::new(TranspositionTable::new(1));
    tt.new_search();

    let handles: Vec<_> = (0..THREADS)
        .map(|id| {
            let tt = Arc::clone(&tt);
            thread::spawn(move || {
                let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x5EED + id);
                let mut hits = 0usize;
                for i in 0..OPS {
                    // 全スレッドで同じクラスター群を奪い合う
                    let key = rng.next_u64() & 0xFFFF_0000_0000_03FF;
                    let probe = tt.probe(key);
                    if probe.found {
                        hits += 1;
                        // 書き込み途中のエントリは深さだけ古いことがある
                        assert!(probe.data.depth <= 30);
                    }
                    let depth = (i % 30) as i32 + 1;
                    let bound = if i % 3 == 0 { Bound::Exact } else { Bound::Lower };
                    probe.save(
                        key,
                        Value::new(depth),
                        bound,
                        depth,
                        Move::from_u16((i & 0x3FFF) as u16),
                        Value::ZERO,
                        tt.generation(),
                    );
                    if i % 1000 == 0 {
                        tt.prefetch(key);
                    }
                }
                hits
            })
        })
        .collect();

    let total_hits: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert!(total_hits > 0);
    assert!(tt.hashfull() <= 999);
}

#[test]
fn concurrent_new_search_and_hashfull() {
    let tt = TranspositionTable::new(1);

    thread::scope(|scope| {
        for id in 0..THREADS {
            let tt = &tt;
            scope.spawn(move || {
                let mut rng = Xoshiro256PlusPlus::seed_from_u64(id);
                for _ in 0..OPS {
                    let key = rng.next_u64() | (1 << 48);
                    tt.probe(key).save(
                        key,
                        Value::ZERO,
                        Bound::Upper,
                        3,
                        Move::NONE,
                        Value::ZERO,
                        tt.generation(),
                    );
                }
            });
        }
        scope.spawn(|| {
            for _ in 0..100 {
                tt.new_search();
                assert!(tt.hashfull() <= 999);
            }
        });
    });

    assert!(tt.hashfull() <= 999);
}
