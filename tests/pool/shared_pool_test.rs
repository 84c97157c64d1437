/*!
 * Shared Pool Tests
 * Concurrent allocation, cross-pool traffic and guards
 */

use pretty_assertions::assert_eq;
use std::sync::{Arc, Barrier};
use std::thread;
use tracked_pool::{call_site, Handle, PoolConfig, SharedPool};

#[test]
fn test_concurrent_allocate_and_free() {
    let pool = SharedPool::new(call_site!("concurrent"));
    let threads = 8;
    let per_thread = 200;

    let workers: Vec<_> = (0..threads)
        .map(|t| {
            let pool = pool.clone();
            thread::spawn(move || {
                let mut kept = Vec::new();
                for i in 0..per_thread {
                    let h = pool.allocate(t + 1, call_site!()).unwrap();
                    if i % 2 == 0 {
                        pool.free(h).unwrap();
                    } else {
                        kept.push(h);
                    }
                }
                kept
            })
        })
        .collect();

    let mut kept: Vec<Handle> = Vec::new();
    for worker in workers {
        kept.extend(worker.join().unwrap());
    }

    let expected_bytes: usize = (0..threads).map(|t| (t + 1) * per_thread / 2).sum();
    assert_eq!(pool.count(), kept.len());
    assert_eq!(pool.bytes(), expected_bytes);
    assert_eq!(pool.free_all().unwrap(), expected_bytes);
    assert!(kept.iter().all(|h| !pool.contains(*h)));
}

#[test]
fn test_readers_see_consistent_totals() {
    let pool = SharedPool::new(call_site!());
    let barrier = Arc::new(Barrier::new(3));

    let writer = {
        let pool = pool.clone();
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for _ in 0..500 {
                let h = pool.allocate(16, call_site!()).unwrap();
                pool.free(h).unwrap();
            }
        })
    };
    let readers: Vec<_> = (0..2)
        .map(|_| {
            let pool = pool.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..500 {
                    let stats = pool.stats();
                    assert_eq!(stats.bytes, stats.count * 16);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert!(pool.is_empty());
}

#[test]
fn test_ring_of_moves_between_pools() {
    let pools: Vec<_> = (0..3)
        .map(|i| SharedPool::with_config(call_site!(), PoolConfig::default().with_alias(format!("ring {i}"))))
        .collect();

    let workers: Vec<_> = (0..3)
        .map(|i| {
            let from = pools[i].clone();
            let to = pools[(i + 1) % 3].clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    let h = from.allocate(4, call_site!()).unwrap();
                    let copy = to.duplicate_from(&from, h, 4, call_site!()).unwrap();
                    let moved = to.reallocate_from(&from, h, 8, call_site!()).unwrap();
                    to.free(copy).unwrap();
                    to.free(moved).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    for pool in &pools {
        assert_eq!(pool.count(), 0);
        assert_eq!(pool.stats().duplications, 100);
    }
}

#[test]
fn test_guards_across_threads() {
    let pool = SharedPool::new(call_site!());
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let pool = pool.clone();
            thread::spawn(move || {
                let guard = pool.allocate_guard(32, call_site!()).unwrap();
                assert!(pool.contains(guard.handle()));
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }
    assert_eq!(pool.count(), 0);
}

#[test]
fn test_dump_under_read_lock() {
    let pool = SharedPool::new(call_site!("dump"));
    pool.allocate(12, call_site!("entry")).unwrap();

    let mut seen = Vec::new();
    pool.for_each_allocation(|info| seen.push(info.size));
    assert_eq!(seen, vec![12]);

    let mut out = Vec::new();
    pool.print_to(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Pool 'dump'"));
    assert!(text.contains("Total bytes allocated: 12"));
    pool.free_all().unwrap();
}
