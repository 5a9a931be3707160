#![no_main]

use evictkit::policy::lfu::LfuCache;
use evictkit::traits::{CoreCache, LfuCacheTrait, MutableCache};
use libfuzzer_sys::fuzz_target;

// First byte picks the capacity (0..=15); each following triple is one
// operation. Evictions must always take an entry at the minimum frequency.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 16);
    let mut cache: LfuCache<u8, u8> = LfuCache::new(capacity);

    for chunk in ops.chunks_exact(3) {
        let key = chunk[1];
        let value = chunk[2];

        match chunk[0] % 7 {
            0 => {
                let full = capacity > 0 && cache.len() == capacity && !cache.contains(&key);
                let victim = cache.peek_lfu().map(|(k, _)| *k);
                if full && let Some(victim) = victim {
                    assert_eq!(cache.frequency(&victim), cache.min_frequency());
                }
                cache.insert(key, value);
                if full && let Some(victim) = victim {
                    assert!(!cache.contains(&victim));
                }
            },
            1 => {
                let before = cache.frequency(&key);
                let got = cache.get(&key).copied();
                assert_eq!(got.is_some(), before.is_some());
                assert_eq!(cache.frequency(&key), before.map(|f| f + 1));
            },
            2 => {
                let existed = cache.contains(&key);
                assert_eq!(cache.remove(&key).is_some(), existed);
            },
            3 => {
                let expected = cache.peek_lfu().map(|(k, _)| *k);
                assert_eq!(cache.pop_lfu().map(|(k, _)| k), expected);
            },
            4 => {
                let before = cache.frequency(&key);
                assert_eq!(cache.reset_frequency(&key), before);
            },
            5 => {
                let before = cache.frequency(&key);
                assert_eq!(cache.increment_frequency(&key), before.map(|f| f + 1));
            },
            6 => cache.clear(),
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        assert!(cache.check_invariants().is_ok());
    }
});
