//! DHAT heap profiler for the S3-FIFO cache.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::sync::Arc;

use s3fifo::policy::s3_fifo::S3FifoCache;
use s3fifo::traits::CoreCache;

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }
}

/// Run a hotset workload: 90% of accesses hit 10% of keys.
fn hotset_workload<C: CoreCache<u64, Arc<u64>>>(
    cache: &mut C,
    operations: usize,
    universe: u64,
    seed: u64,
) {
    let mut rng = XorShift64::new(seed);
    let hot_size = (universe as f64 * 0.1) as u64;

    for _ in 0..operations {
        let key = if rng.next_f64() < 0.9 {
            rng.next_u64() % hot_size
        } else {
            hot_size + (rng.next_u64() % (universe - hot_size))
        };

        if cache.get(&key).is_none() {
            cache.put(key, Arc::new(key));
        }
    }
}

/// Run a scan workload: sequential access pattern.
fn scan_workload<C: CoreCache<u64, Arc<u64>>>(cache: &mut C, operations: usize, universe: u64) {
    for i in 0..operations {
        let key = (i as u64) % universe;
        if cache.get(&key).is_none() {
            cache.put(key, Arc::new(key));
        }
    }
}

/// Run eviction churn: insert more items than capacity.
fn eviction_churn<C: CoreCache<u64, Arc<u64>>>(cache: &mut C, operations: usize) {
    for i in 0..operations {
        cache.put(i as u64, Arc::new(i as u64));
    }
}

/// Keys reappear shortly after leaving Small, so most puts hit a tombstone
/// and go straight to Main.
fn ghost_revisit_workload(cache: &mut S3FifoCache<u64, Arc<u64>>, operations: usize) {
    let window = (cache.small_capacity() * 2) as u64;
    for i in 0..operations {
        let key = 1_000_000 + (i as u64) % window;
        cache.put(key, Arc::new(key));
    }
}

fn profile(label: &str, main: usize, small: usize) {
    println!("=== Profiling S3-FIFO ({label}) ===");
    let operations = 100_000;
    let universe = 16_384;

    let mut cache = S3FifoCache::new(main, small);

    // Warm up
    for i in 0..(main + small) as u64 {
        cache.put(i, Arc::new(i));
    }

    hotset_workload(&mut cache, operations, universe, 42);
    scan_workload(&mut cache, operations / 2, universe);
    eviction_churn(&mut cache, operations / 4);
    ghost_revisit_workload(&mut cache, operations / 4);

    println!(
        "  Final size: {} live, {} tracked",
        cache.len(),
        cache.table_len()
    );
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("S3-FIFO DHAT Heap Profiling");
    println!("===========================\n");

    profile("small = 10%", 3686, 410);
    profile("small = 25%", 3072, 1024);

    println!("\n===========================");
    println!("Profiling complete!");
    println!(
        "View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>"
    );
}
