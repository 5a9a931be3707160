#![no_main]

use evictkit::policy::lru::LruCache;
use evictkit::traits::{CoreCache, LruCacheTrait, MutableCache};
use libfuzzer_sys::fuzz_target;

// First byte picks the capacity (0..=15); each following triple is one
// operation. The victim reported by peek_lru must be the one evicted.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 16);
    let mut cache: LruCache<u8, u8> = LruCache::new(capacity);

    for chunk in ops.chunks_exact(3) {
        let key = chunk[1];
        let value = chunk[2];

        match chunk[0] % 6 {
            0 => {
                let full = capacity > 0 && cache.len() == capacity && !cache.contains(&key);
                let victim = cache.peek_lru().map(|(k, _)| *k);
                cache.insert(key, value);
                if full && let Some(victim) = victim {
                    assert!(!cache.contains(&victim));
                }
                if capacity > 0 {
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            },
            1 => {
                let expected = cache.peek(&key).copied();
                assert_eq!(cache.get(&key).copied(), expected);
            },
            2 => {
                let existed = cache.contains(&key);
                assert_eq!(cache.remove(&key).is_some(), existed);
            },
            3 => {
                let expected = cache.peek_lru().map(|(k, _)| *k);
                assert_eq!(cache.pop_lru().map(|(k, _)| k), expected);
            },
            4 => {
                assert_eq!(cache.touch(&key), cache.contains(&key));
            },
            5 => cache.clear(),
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        assert!(cache.check_invariants().is_ok());
    }
});
