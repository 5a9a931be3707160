//! # Least Frequently Used (LFU) Cache Implementation
//!
//! Fixed-capacity cache that evicts the entry with the lowest access count,
//! breaking ties by evicting the least recently touched of those entries.
//! All bookkeeping lives in [`FrequencyBuckets`]: one recency list per
//! frequency level, with the levels linked so that the minimum frequency can
//! be repaired in O(1) after any removal.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────────┐
//!   │                          LfuCache<K, V>                           │
//!   │                                                                   │
//!   │   store: FrequencyBuckets<K, V>            min_freq ──┐           │
//!   │                                                       ▼           │
//!   │     freq=1: head ──► [E] ◄──► [D] ◄── tail     (evict D first)    │
//!   │        │                                                          │
//!   │        ▼ next                                                     │
//!   │     freq=3: head ──► [B] ◄── tail                                 │
//!   │        │                                                          │
//!   │        ▼ next                                                     │
//!   │     freq=7: head ──► [A] ◄──► [C] ◄── tail                        │
//!   └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   get(D):   unlink D from freq=1, push at head of freq=2
//!             (freq=2 bucket is created between 1 and 3)
//!
//!   insert(F) while full:
//!             pop tail of the min_freq bucket, then push F at head of freq=1
//!
//!   insert(B, v') for an existing key:
//!             replace B's value, then promote B exactly like get(B)
//! ```
//!
//! ## Performance Characteristics
//!
//! | Operation             | Time | Notes                               |
//! |-----------------------|------|-------------------------------------|
//! | `get` / `insert`      | O(1) | Hash lookup + bucket splice         |
//! | `remove`              | O(1) | Bucket links repair `min_freq`      |
//! | `pop_lfu`/`peek_lfu`  | O(1) | Tail of the `min_freq` bucket       |
//! | `iter`                | O(n) | Highest frequency first             |
//!
//! Frequencies are `u64` and saturate at `u64::MAX`.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lfu::LfuCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = LfuCache::new(2);
//! cache.insert(1, 1);
//! cache.insert(2, 2);
//! assert_eq!(cache.get(&1), Some(&1));
//! cache.insert(3, 3); // evicts 2
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&3), Some(&3));
//! cache.insert(4, 4); // 1 and 3 tie at freq 2; 1 is older
//! assert_eq!(cache.get(&1), None);
//! assert_eq!(cache.get(&3), Some(&3));
//! assert_eq!(cache.get(&4), Some(&4));
//! ```

use std::hash::Hash;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::ds::frequency_buckets::FrequencyBuckets;
use crate::error::{ConfigError, InvariantError, checked_capacity};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::PolicyMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, InsertOutcome, MetricsSnapshotProvider, PolicyMetricsRecorder,
    ReadMetricsRecorder,
};
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{CoreCache, LfuCacheTrait, MutableCache};

/// Single-threaded LFU cache with LRU tie-breaking.
#[derive(Debug)]
pub struct LfuCache<K, V> {
    store: FrequencyBuckets<K, V>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: PolicyMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A capacity of 0 is valid: the cache never stores anything.
    pub fn new(capacity: usize) -> Self {
        debug!(policy = "lfu", capacity, "created cache");
        Self {
            store: FrequencyBuckets::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: PolicyMetrics::default(),
        }
    }

    /// Creates a cache from a signed capacity, rejecting negative values.
    pub fn try_new(capacity: i64) -> Result<Self, ConfigError> {
        checked_capacity(capacity).map(Self::new)
    }

    /// Returns the value for `key` without changing its frequency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.store.get(key)
    }

    /// Smallest frequency among stored entries, `None` when empty.
    pub fn min_frequency(&self) -> Option<u64> {
        self.store.min_freq()
    }

    /// Iterates `(key, value, frequency)` from most to least favored:
    /// highest frequency first, most recently touched first within a
    /// frequency. The last item yielded is the next eviction victim.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V, u64)> {
        self.store
            .iter()
            .map(|entry| (entry.key, entry.value, entry.freq))
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.store.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.store.len(),
                self.capacity
            )));
        }
        self.store.check_invariants()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("lfu invariant violated: {err}");
        }
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        let value = match self.store.replace_and_touch(&key, value) {
            Ok(old) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert(InsertOutcome::Update);
                return Some(old);
            },
            Err(value) => value,
        };

        if self.capacity == 0 {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert(InsertOutcome::Rejected);
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert(InsertOutcome::New);

        if self.store.len() >= self.capacity && self.store.pop_min().is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_eviction();

            trace!(
                policy = "lfu",
                len = self.store.len(),
                min_freq = ?self.store.min_freq(),
                "evicted least frequently used entry"
            );
        }

        self.store.insert(key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let hit = self.store.touch(key).is_some();

        #[cfg(feature = "metrics")]
        self.metrics.record_get(hit);

        if hit { self.store.get(key) } else { None }
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.store.clear();
    }
}

impl<K, V> MutableCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        self.store.remove(key)
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lfu(&mut self) -> Option<(K, V)> {
        let popped = self.store.pop_min();

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_victim(popped.is_some());

        popped
    }

    fn peek_lfu(&self) -> Option<(&K, &V)> {
        let victim = self.store.peek_min();

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_victim(victim.is_some());

        victim
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        let freq = self.store.frequency(key);

        #[cfg(feature = "metrics")]
        self.metrics.record_inspect(freq.is_some());

        freq
    }

    fn reset_frequency(&mut self, key: &K) -> Option<u64> {
        let previous = self.store.reset(key);

        #[cfg(feature = "metrics")]
        self.metrics.record_reset(previous.is_some());

        previous
    }

    fn increment_frequency(&mut self, key: &K) -> Option<u64> {
        let freq = self.store.touch(key);

        #[cfg(feature = "metrics")]
        self.metrics.record_promote(freq.is_some());

        freq
    }
}

impl<K, V> Default for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(0)
    }
}

impl<K, V> Extend<(K, V)> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics
            .snapshot(self.store.len(), self.capacity, self.store.min_freq())
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

/// Thread-safe LFU cache: an [`LfuCache`] behind `Arc<parking_lot::RwLock<_>>`.
///
/// `get` bumps a frequency and therefore takes the write lock; `peek`,
/// `frequency`, `contains` and `len` share the read lock.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "concurrency")]
/// # {
/// use evictkit::policy::lfu::ConcurrentLfuCache;
///
/// let cache: ConcurrentLfuCache<u32, u32> = ConcurrentLfuCache::new(8);
/// cache.insert(1, 10);
/// assert_eq!(cache.get(&1), Some(10));
/// assert_eq!(cache.frequency(&1), Some(2));
/// # }
/// ```
#[cfg(feature = "concurrency")]
#[derive(Debug)]
pub struct ConcurrentLfuCache<K, V> {
    inner: Arc<RwLock<LfuCache<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentLfuCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(LfuCache::new(capacity))),
        }
    }

    pub fn try_new(capacity: i64) -> Result<Self, ConfigError> {
        checked_capacity(capacity).map(Self::new)
    }

    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.write().insert(key, value)
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.write().get(key).cloned()
    }

    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.read().peek(key).cloned()
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.write().remove(key)
    }

    pub fn pop_lfu(&self) -> Option<(K, V)> {
        self.inner.write().pop_lfu()
    }

    pub fn peek_lfu(&self) -> Option<(K, V)> {
        self.inner
            .read()
            .peek_lfu()
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.inner.read().frequency(key)
    }

    pub fn reset_frequency(&self, key: &K) -> Option<u64> {
        self.inner.write().reset_frequency(key)
    }

    pub fn increment_frequency(&self, key: &K) -> Option<u64> {
        self.inner.write().increment_frequency(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.read().check_invariants()
    }
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
}
