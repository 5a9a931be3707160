use evictkit::policy::lfu::LfuCache;
use evictkit::traits::{IntCache, LfuCacheTrait, NOT_FOUND};

fn show(label: &str, value: i64) {
    if value == NOT_FOUND {
        println!("{label}: miss");
    } else {
        println!("{label}: {value}");
    }
}

fn main() {
    let mut cache: LfuCache<i64, i64> = LfuCache::new(2);

    cache.put(1, 1);
    cache.put(2, 2);
    show("get 1", cache.get_value(1));

    // 1 has two accesses (put + get), 2 only one
    cache.put(3, 3);
    show("get 2", cache.get_value(2));
    show("get 3", cache.get_value(3));

    // 1 and 3 are tied at frequency 2; 1 was touched longer ago
    cache.put(4, 4);
    show("get 1", cache.get_value(1));
    show("get 3", cache.get_value(3));
    show("get 4", cache.get_value(4));

    println!("freq 3: {:?}", cache.frequency(&3));
    println!("freq 4: {:?}", cache.frequency(&4));
}

// Expected output:
// get 1: 1
// get 2: miss
// get 3: 3
// get 1: miss
// get 3: 3
// get 4: 4
// freq 3: Some(3)
// freq 4: Some(2)
