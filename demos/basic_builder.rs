//! Picking the eviction policy at runtime.
//!
//! Run with: cargo run --example basic_builder

use evictkit::builder::{CacheBuilder, CachePolicy};
use evictkit::traits::{CoreCache, IntCache};

fn main() {
    for policy in [CachePolicy::Lru, CachePolicy::Lfu] {
        let mut cache = CacheBuilder::new(2).build::<i64, i64>(policy);

        cache.put(1, 1);
        cache.get_value(1);
        cache.get_value(1);
        cache.put(2, 2);
        cache.get_value(2);
        cache.put(3, 3);

        println!(
            "{policy:?}: kept 1? {}  kept 2? {}  len {}",
            cache.contains(&1),
            cache.contains(&2),
            cache.len()
        );
    }

    match CacheBuilder::try_from_signed(-3) {
        Ok(_) => println!("negative capacity accepted"),
        Err(err) => println!("rejected: {err}"),
    }
}

// Expected output:
// Lru: kept 1? false  kept 2? true  len 2
// Lfu: kept 1? true  kept 2? false  len 2
// rejected: capacity must be non-negative, got -3
