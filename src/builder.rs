//! Runtime policy selection.
//!
//! [`CacheBuilder`] turns a capacity and a [`CachePolicy`] into a [`Cache`],
//! one concrete type that forwards to an [`LruCache`] or an [`LfuCache`].
//! Code that only needs the core operations can hold a `Cache` instead of
//! being generic over the policy.
//!
//! ```rust
//! use evictkit::builder::{CacheBuilder, CachePolicy};
//! use evictkit::traits::CoreCache;
//!
//! let mut sessions = CacheBuilder::new(64).build::<u64, &str>(CachePolicy::Lru);
//! sessions.insert(7, "alice");
//! assert_eq!(sessions.get(&7), Some(&"alice"));
//! assert_eq!(sessions.policy(), CachePolicy::Lru);
//! ```

use std::hash::Hash;

use crate::error::{ConfigError, checked_capacity};
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::traits::{CoreCache, MutableCache};

/// Eviction policy picked when building a [`Cache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Evict the entry untouched for longest.
    Lru,
    /// Evict the entry with the fewest accesses; the older one on a tie.
    Lfu,
}

#[derive(Debug)]
enum Backend<K, V> {
    Lru(LruCache<K, V>),
    Lfu(LfuCache<K, V>),
}

/// Forwards `$call` to whichever policy backs the cache.
macro_rules! dispatch {
    ($backend:expr, $c:ident => $call:expr) => {
        match $backend {
            Backend::Lru($c) => $call,
            Backend::Lfu($c) => $call,
        }
    };
}

/// A cache whose policy was chosen at runtime.
#[derive(Debug)]
pub struct Cache<K, V> {
    backend: Backend<K, V>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn policy(&self) -> CachePolicy {
        match self.backend {
            Backend::Lru(_) => CachePolicy::Lru,
            Backend::Lfu(_) => CachePolicy::Lfu,
        }
    }

    /// Reads `key` without counting it as an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        dispatch!(&self.backend, c => c.peek(key))
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        dispatch!(&mut self.backend, c => c.insert(key, value))
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        dispatch!(&mut self.backend, c => c.get(key))
    }

    fn contains(&self, key: &K) -> bool {
        dispatch!(&self.backend, c => c.contains(key))
    }

    fn len(&self) -> usize {
        dispatch!(&self.backend, c => c.len())
    }

    fn capacity(&self) -> usize {
        dispatch!(&self.backend, c => c.capacity())
    }

    fn clear(&mut self) {
        dispatch!(&mut self.backend, c => c.clear())
    }
}

impl<K, V> MutableCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        dispatch!(&mut self.backend, c => c.remove(key))
    }
}

/// Captures the capacity shared by every policy.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    pub fn new(capacity: usize) -> Self {
        CacheBuilder { capacity }
    }

    /// Accepts a capacity from a signed API; negatives are an error.
    ///
    /// ```rust
    /// use evictkit::builder::CacheBuilder;
    ///
    /// assert!(CacheBuilder::try_from_signed(8).is_ok());
    /// assert!(CacheBuilder::try_from_signed(-1).is_err());
    /// ```
    pub fn try_from_signed(capacity: i64) -> Result<Self, ConfigError> {
        checked_capacity(capacity).map(Self::new)
    }

    /// Constructs the backing cache for `policy`.
    ///
    /// ```rust
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    /// use evictkit::traits::{IntCache, NOT_FOUND};
    ///
    /// let mut cache = CacheBuilder::new(2).build::<i64, i64>(CachePolicy::Lfu);
    /// cache.put(1, 10);
    /// assert_eq!(cache.get_value(1), 10);
    /// assert_eq!(cache.get_value(2), NOT_FOUND);
    /// ```
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        let backend = match policy {
            CachePolicy::Lru => Backend::Lru(LruCache::new(self.capacity)),
            CachePolicy::Lfu => Backend::Lfu(LfuCache::new(self.capacity)),
        };
        Cache { backend }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{IntCache, NOT_FOUND};

    const POLICIES: [CachePolicy; 2] = [CachePolicy::Lru, CachePolicy::Lfu];

    #[test]
    fn every_policy_forwards_core_operations() {
        for policy in POLICIES {
            let mut cache = CacheBuilder::new(4).build::<&str, u32>(policy);
            assert_eq!(cache.policy(), policy);
            assert_eq!(cache.capacity(), 4);

            assert_eq!(cache.insert("a", 1), None);
            assert_eq!(cache.insert("b", 2), None);
            assert_eq!(cache.insert("a", 10), Some(1));
            assert_eq!(cache.len(), 2);

            assert_eq!(cache.get(&"a"), Some(&10));
            assert_eq!(cache.peek(&"b"), Some(&2));
            assert_eq!(cache.get(&"zzz"), None);
            assert!(cache.contains(&"b"));

            assert_eq!(cache.remove(&"b"), Some(2));
            assert_eq!(cache.remove(&"b"), None);

            cache.clear();
            assert!(cache.is_empty());
            assert!(!cache.contains(&"a"));
        }
    }

    #[test]
    fn full_cache_stays_at_capacity() {
        for policy in POLICIES {
            let mut cache = CacheBuilder::new(3).build::<i64, i64>(policy);
            for k in 0..10 {
                cache.put(k, k * 100);
                assert!(cache.len() <= 3);
            }
            assert_eq!(cache.len(), 3);
            assert_eq!(cache.get_value(9), 900);
        }
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        for policy in POLICIES {
            let mut cache = CacheBuilder::new(0).build::<i64, i64>(policy);
            cache.put(1, 1);
            assert_eq!(cache.get_value(1), NOT_FOUND);
            assert!(cache.is_empty());
        }
    }

    #[test]
    fn policies_pick_different_victims() {
        let mut lru = CacheBuilder::new(2).build::<i64, i64>(CachePolicy::Lru);
        let mut lfu = CacheBuilder::new(2).build::<i64, i64>(CachePolicy::Lfu);
        for cache in [&mut lru, &mut lfu] {
            cache.put(1, 1);
            cache.get_value(1);
            cache.get_value(1);
            cache.put(2, 2);
            cache.get_value(2);
            cache.put(3, 3);
        }
        // LRU drops 1 (oldest touch); LFU drops 2 (fewer accesses)
        assert_eq!(lru.get_value(1), NOT_FOUND);
        assert_eq!(lru.get_value(2), 2);
        assert_eq!(lfu.get_value(1), 1);
        assert_eq!(lfu.get_value(2), NOT_FOUND);
    }

    #[test]
    fn signed_capacity_is_checked() {
        let built = CacheBuilder::try_from_signed(0).map(|b| b.build::<i64, i64>(CachePolicy::Lfu));
        assert_eq!(built.map(|c| c.capacity()), Ok(0));
        assert_eq!(
            CacheBuilder::try_from_signed(-7).err(),
            Some(ConfigError::NegativeCapacity { requested: -7 })
        );
    }
}
