// ==============================================
// MUTEX WRAPPER CONCURRENCY TESTS (integration)
// ==============================================
#![cfg(feature = "concurrency")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use sievekit::builder::{CacheBuilder, CachePolicy};
use sievekit::concurrent::ConcurrentCache;
use sievekit::policy::sieve::SieveCache;
use sievekit::policy::sieve_arena::ArenaSieveCache;

#[test]
fn test_reader_writer_mix() {
    let cache = ConcurrentCache::new(SieveCache::<String, usize>::new(100));
    let hits = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|thread_id| {
            let cache = cache.clone();
            let hits = hits.clone();
            thread::spawn(move || {
                for i in 0..250 {
                    let key = format!("k{}", (thread_id * 7 + i) % 150);
                    if i % 2 == 0 {
                        cache.put(key, i);
                    } else if cache.get(&key).is_some() {
                        hits.fetch_add(1, Ordering::Relaxed);
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(cache.count::<String, usize>() <= 100);
    assert!(hits.load(Ordering::Relaxed) > 0);
    cache.check_invariants::<String, usize>().unwrap();
}

#[test]
fn test_hot_set_survives_contention() {
    let cache = ConcurrentCache::new(ArenaSieveCache::<u32, u32>::new(32));
    for k in 0..8 {
        cache.put(k, k);
    }

    let handles: Vec<_> = (0..4u32)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..2_000u32 {
                    // every thread keeps the hot set visited
                    cache.get(&(i % 8));
                    cache.put(1_000 + t * 10_000 + i, i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let survivors = (0..8u32).filter(|k| cache.contains::<u32, u32>(k)).count();
    assert!(survivors >= 6, "only {survivors} hot keys survived");
    cache.check_invariants::<u32, u32>().unwrap();
}

#[test]
fn test_builder_cache_behind_mutex() {
    for policy in [CachePolicy::Sieve, CachePolicy::ArenaSieve, CachePolicy::Lru] {
        let cache = ConcurrentCache::new(CacheBuilder::new(16).build::<u64, u64>(policy));
        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..500u64 {
                        cache.put(t * 1_000 + i % 40, i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.count::<u64, u64>(), 16);
        assert_eq!(cache.capacity::<u64, u64>(), 16);
        cache.check_invariants::<u64, u64>().unwrap();
    }
}
