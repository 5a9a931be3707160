//! # Cache Trait Hierarchy
//!
//! Unified interface for the LRU and LFU eviction policies.
//!
//! ## Architecture
//!
//! ```text
//!                  ┌─────────────────────────────────────────┐
//!                  │            CoreCache<K, V>              │
//!                  │                                         │
//!                  │  insert(&mut, K, V) → Option<V>         │
//!                  │  get(&mut, &K) → Option<&V>             │
//!                  │  contains(&, &K) → bool                 │
//!                  │  len / is_empty / capacity / clear      │
//!                  └──────────────────┬──────────────────────┘
//!                                     │
//!                  ┌──────────────────┴──────────────────────┐
//!                  │          MutableCache<K, V>             │
//!                  │  remove(&K) → Option<V>                 │
//!                  └──────────────────┬──────────────────────┘
//!                                     │
//!               ┌─────────────────────┴─────────────────────┐
//!               ▼                                           ▼
//!   ┌────────────────────────────┐             ┌────────────────────────────┐
//!   │   LruCacheTrait<K, V>      │             │   LfuCacheTrait<K, V>      │
//!   │                            │             │                            │
//!   │  pop_lru() → (K, V)        │             │  pop_lfu() → (K, V)        │
//!   │  peek_lru() → (&K, &V)     │             │  peek_lfu() → (&K, &V)     │
//!   │  touch(&K) → bool          │             │  frequency(&K) → u64       │
//!   │  recency_rank(&K) → usize  │             │  reset_frequency(&K)       │
//!   │                            │             │  increment_frequency(&K)   │
//!   └────────────────────────────┘             └────────────────────────────┘
//!
//!   IntCache: blanket facade over CoreCache<i64, i64> with a NOT_FOUND sentinel
//! ```
//!
//! ## Trait Summary
//!
//! | Trait             | Extends         | Purpose                               |
//! |-------------------|-----------------|---------------------------------------|
//! | `CoreCache`       | -               | Universal cache operations            |
//! | `MutableCache`    | `CoreCache`     | Adds arbitrary key removal            |
//! | `LruCacheTrait`   | `MutableCache`  | Recency-specific inspection/eviction  |
//! | `LfuCacheTrait`   | `MutableCache`  | Frequency-specific inspection/control |
//! | `IntCache`        | `CoreCache`     | Integer `get`/`put` with `NOT_FOUND`  |
//! | `ConcurrentCache` | `Send + Sync`   | Marker for thread-safe caches         |
//!
//! ## Thread Safety
//!
//! - `LruCache` and `LfuCache` are **not** thread-safe.
//! - Wrap them in a lock, or enable the `concurrency` feature for
//!   `ConcurrentLruCache` / `ConcurrentLfuCache`, which implement
//!   [`ConcurrentCache`].

/// Value returned by [`IntCache::get_value`] when the key is absent.
pub const NOT_FOUND: i64 = -1;

/// Operations shared by every policy.
///
/// ```
/// use evictkit::policy::lru::LruCache;
/// use evictkit::traits::CoreCache;
///
/// fn preload<C: CoreCache<u32, u32>>(cache: &mut C, n: u32) {
///     (0..n).for_each(|i| {
///         cache.insert(i, i * i);
///     });
/// }
///
/// let mut squares = LruCache::new(4);
/// preload(&mut squares, 6);
/// assert_eq!(squares.len(), 4);
/// assert!(!squares.contains(&0));
/// ```
pub trait CoreCache<K, V> {
    /// Stores `value` under `key` and hands back the value it replaced.
    ///
    /// If the key is new and the cache is full, the policy's victim is evicted
    /// first. Updating an existing key counts as an access. A zero-capacity
    /// cache ignores every insert.
    ///
    /// ```
    /// use evictkit::policy::lfu::LfuCache;
    /// use evictkit::traits::CoreCache;
    ///
    /// let mut cache = LfuCache::new(1);
    /// assert_eq!(cache.insert("k", 1), None);
    /// assert_eq!(cache.insert("k", 2), Some(1));
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up `key` and counts the lookup as an access.
    ///
    /// Use [`contains`](Self::contains) or a policy's `peek` to look without
    /// affecting eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Membership test; eviction order is unchanged.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Upper bound on `len()`.
    fn capacity(&self) -> usize;

    /// Drops every entry; capacity is unchanged.
    fn clear(&mut self);
}

/// Explicit removal by key.
///
/// ```
/// use evictkit::policy::lfu::LfuCache;
/// use evictkit::traits::{CoreCache, MutableCache};
///
/// let mut cache = LfuCache::new(8);
/// for k in ["a", "b", "c"] {
///     cache.insert(k, k.len());
/// }
/// assert_eq!(cache.remove_batch(&["a", "x", "c"]), vec![Some(1), None, Some(1)]);
/// assert_eq!(cache.len(), 1);
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Takes `key` out of the cache, returning its value if it was present.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// [`remove`](Self::remove) for each key; results line up with `keys`.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|key| self.remove(key)).collect()
    }
}

/// LRU-specific operations.
///
/// # Example
///
/// ```
/// use evictkit::traits::{CoreCache, LruCacheTrait};
/// use evictkit::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(3);
/// cache.insert(1, "a");
/// cache.insert(2, "b");
/// cache.touch(&1);
///
/// assert_eq!(cache.peek_lru(), Some((&2, &"b")));
/// assert_eq!(cache.recency_rank(&1), Some(0));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Evicts the tail of the recency list by hand.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without removing it.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used; returns `false` if absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order, `0` being most recent. O(n).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// LFU-specific operations.
///
/// # Example
///
/// ```
/// use evictkit::traits::{CoreCache, LfuCacheTrait};
/// use evictkit::policy::lfu::LfuCache;
///
/// let mut cache = LfuCache::new(3);
/// cache.insert(1, "a");
/// cache.insert(2, "b");
/// cache.get(&1);
///
/// assert_eq!(cache.frequency(&1), Some(2));
/// assert_eq!(cache.peek_lfu(), Some((&2, &"b")));
/// ```
pub trait LfuCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least frequently used entry
    /// (least recently used among ties).
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// Returns the next eviction victim without removing it.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Returns the access frequency of `key`.
    fn frequency(&self, key: &K) -> Option<u64>;

    /// Resets the frequency of `key` to 1, returning the previous frequency.
    fn reset_frequency(&mut self, key: &K) -> Option<u64>;

    /// Increments the frequency of `key` without reading it, returning the
    /// new frequency.
    fn increment_frequency(&mut self, key: &K) -> Option<u64>;
}

/// Integer `get`/`put` surface with a sentinel for misses.
///
/// Blanket-implemented for every `CoreCache<i64, i64>`.
///
/// # Example
///
/// ```
/// use evictkit::traits::{IntCache, NOT_FOUND};
/// use evictkit::policy::lru::LruCache;
///
/// let mut lru: LruCache<i64, i64> = LruCache::new(2);
/// lru.put(1, 1);
/// lru.put(2, 2);
/// assert_eq!(lru.get_value(1), 1);
/// lru.put(3, 3);
/// assert_eq!(lru.get_value(2), NOT_FOUND);
/// ```
pub trait IntCache: CoreCache<i64, i64> {
    /// Returns the value for `key`, or [`NOT_FOUND`]. Promotes on hit.
    fn get_value(&mut self, key: i64) -> i64 {
        self.get(&key).copied().unwrap_or(NOT_FOUND)
    }

    /// Inserts or updates `key`, evicting if needed.
    fn put(&mut self, key: i64, value: i64) {
        let _ = self.insert(key, value);
    }
}

impl<C: CoreCache<i64, i64> + ?Sized> IntCache for C {}

/// Marker trait for caches that are safe to share across threads.
pub trait ConcurrentCache: Send + Sync {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Unbounded map used to exercise the default methods.
    #[derive(Default)]
    struct MapCache {
        map: HashMap<i64, i64>,
    }

    impl CoreCache<i64, i64> for MapCache {
        fn insert(&mut self, key: i64, value: i64) -> Option<i64> {
            self.map.insert(key, value)
        }

        fn get(&mut self, key: &i64) -> Option<&i64> {
            self.map.get(key)
        }

        fn contains(&self, key: &i64) -> bool {
            self.map.contains_key(key)
        }

        fn len(&self) -> usize {
            self.map.len()
        }

        fn capacity(&self) -> usize {
            usize::MAX
        }

        fn clear(&mut self) {
            self.map.clear();
        }
    }

    impl MutableCache<i64, i64> for MapCache {
        fn remove(&mut self, key: &i64) -> Option<i64> {
            self.map.remove(key)
        }
    }

    #[test]
    fn is_empty_follows_len() {
        let mut cache = MapCache::default();
        assert!(cache.is_empty());
        cache.insert(1, 1);
        assert!(!cache.is_empty());
    }

    #[test]
    fn remove_batch_preserves_input_order() {
        let mut cache = MapCache::default();
        cache.insert(1, 10);
        cache.insert(3, 30);
        assert_eq!(cache.remove_batch(&[3, 2, 1]), vec![Some(30), None, Some(10)]);
        assert!(cache.is_empty());
    }

    #[test]
    fn int_cache_reports_sentinel_on_miss() {
        let mut cache = MapCache::default();
        cache.put(7, 70);
        assert_eq!(cache.get_value(7), 70);
        assert_eq!(cache.get_value(8), NOT_FOUND);
    }
}
