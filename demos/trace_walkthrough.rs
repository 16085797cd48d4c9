//! Replays a short key trace against a small S3-FIFO cache and prints the
//! queue contents after every put.
//!
//! Run with: `RUST_LOG=s3fifo=trace cargo run --example trace_walkthrough`

use s3fifo::policy::s3_fifo::S3FifoCache;
use tracing_subscriber::{EnvFilter, fmt};

const TRACE: [u32; 14] = [1, 2, 1, 3, 4, 5, 5, 1, 6, 1, 4, 1, 7, 1];

fn main() {
    // RUST_LOG wins when set
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("s3fifo=debug")
    };
    fmt().with_env_filter(filter).with_target(false).init();

    let mut cache = S3FifoCache::new(10, 2);
    for key in TRACE {
        cache.put(key, key * 100);
        println!("put {key}\n{}\n", cache.snapshot());
    }

    println!(
        "live: {}  tracked: {}  capacity: {}",
        cache.len(),
        cache.table_len(),
        cache.capacity()
    );
    for key in [1, 3, 7] {
        match cache.get(&key) {
            Some(value) => println!("get {key} -> {value}"),
            None => println!("get {key} -> miss"),
        }
    }
}
