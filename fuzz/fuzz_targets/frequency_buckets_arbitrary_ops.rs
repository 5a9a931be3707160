#![no_main]

use evictkit::ds::FrequencyBuckets;
use libfuzzer_sys::fuzz_target;

// Arbitrary sequences of insert, touch, reset, remove, pop_min and clear.
// Bucket links, min/max frequency and the index are re-checked every step.
fuzz_target!(|data: &[u8]| {
    let mut buckets: FrequencyBuckets<u8, u8> = FrequencyBuckets::new();

    for chunk in data.chunks_exact(3) {
        let op = chunk[0] % 7;
        let key = chunk[1];
        let value = chunk[2];

        match op {
            0 => {
                let existed = buckets.contains(&key);
                let before = buckets.frequency(&key);
                assert_eq!(buckets.insert(key, value).is_some(), existed);
                assert_eq!(buckets.frequency(&key), before.or(Some(1)));
                assert_eq!(buckets.get(&key), Some(&value));
            },
            1 => {
                let before = buckets.frequency(&key);
                assert_eq!(buckets.touch(&key), before.map(|f| f + 1));
            },
            2 => {
                let before = buckets.frequency(&key);
                assert_eq!(buckets.reset(&key), before);
                if before.is_some() {
                    assert_eq!(buckets.min_freq(), Some(1));
                }
            },
            3 => {
                let existed = buckets.contains(&key);
                assert_eq!(buckets.remove(&key).is_some(), existed);
                assert!(!buckets.contains(&key));
            },
            4 => {
                let expected = buckets.peek_min().map(|(k, _)| *k);
                let popped = buckets.pop_min().map(|(k, _)| k);
                assert_eq!(popped, expected);
            },
            5 => {
                let min = buckets.min_freq();
                if let Some((k, _)) = buckets.peek_min() {
                    assert_eq!(buckets.frequency(k), min);
                }
            },
            6 => {
                buckets.clear();
                assert!(buckets.is_empty());
                assert_eq!(buckets.min_freq(), None);
            },
            _ => unreachable!(),
        }

        assert!(buckets.check_invariants().is_ok());
        assert_eq!(buckets.iter().count(), buckets.len());
    }
});
