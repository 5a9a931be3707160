use evictkit::policy::lru::LruCache;
use evictkit::traits::{IntCache, LruCacheTrait, NOT_FOUND};

fn show(label: &str, value: i64) {
    if value == NOT_FOUND {
        println!("{label}: miss");
    } else {
        println!("{label}: {value}");
    }
}

fn main() {
    let mut cache: LruCache<i64, i64> = LruCache::new(2);

    cache.put(1, 1);
    cache.put(2, 2);
    show("get 1", cache.get_value(1));

    // 2 is now the least recently used
    cache.put(3, 3);
    show("get 2", cache.get_value(2));

    cache.put(4, 4);
    show("get 1", cache.get_value(1));
    show("get 3", cache.get_value(3));
    show("get 4", cache.get_value(4));

    if let Some((key, _)) = cache.peek_lru() {
        println!("next victim: {key}");
    }
}

// Expected output:
// get 1: 1
// get 2: miss
// get 1: miss
// get 3: 3
// get 4: 4
// next victim: 3
//
// Explanation: capacity=2. Reading 1 leaves 2 as LRU, so inserting 3 evicts
// 2. Inserting 4 then evicts 1. Reading 3 and then 4 leaves 3 at the tail.
