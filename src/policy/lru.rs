//! # Least Recently Used (LRU) Cache Implementation
//!
//! Fixed-capacity cache that evicts the entry whose last `get`/`insert` is
//! oldest. Entries live in an arena-backed [`IntrusiveList`] ordered from most
//! to least recently used, and an index maps each key to the stable
//! [`SlotId`] of its node, so promotion and eviction never scan.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                           LruCache<K, V>                             │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  index: FxHashMap<K, SlotId>                                 │   │
//!   │   │                                                              │   │
//!   │   │  ┌─────────┬─────────────────────────────────────────┐       │   │
//!   │   │  │   Key   │  SlotId                                 │       │   │
//!   │   │  ├─────────┼─────────────────────────────────────────┤       │   │
//!   │   │  │    1    │  ─────────────────────────────────────┐ │       │   │
//!   │   │  │    2    │  ───────────────────────────────┐     │ │       │   │
//!   │   │  │    3    │  ─────────────────────────┐     │     │ │       │   │
//!   │   │  └─────────┴───────────────────────────┼─────┼─────┼─┘       │   │
//!   │   └────────────────────────────────────────┼─────┼─────┼─────────┘   │
//!   │                                            ▼     ▼     ▼             │
//!   │   list: IntrusiveList<Entry<K, V>>                                   │
//!   │     head ──► [3] ◄──► [2] ◄──► [1] ◄── tail                          │
//!   │      (MRU)                          (LRU, evicted first)             │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   insert(D) on a full cache (capacity = 3)
//!
//!     head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!     1. pop [C] from tail, drop its index entry
//!     2. push [D] at head
//!     head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   get(B)
//!     head ──► [B] ◄──► [D] ◄──► [A] ◄── tail
//! ```
//!
//! ## Performance Characteristics
//!
//! | Operation        | Time | Notes                                 |
//! |------------------|------|---------------------------------------|
//! | `get` / `touch`  | O(1) | Index lookup + move to head           |
//! | `insert`         | O(1) | May pop the tail first                |
//! | `remove`         | O(1) | Unlink by handle                      |
//! | `pop_lru`        | O(1) | Tail pop                              |
//! | `recency_rank`   | O(n) | Walks from the head                   |
//!
//! ## Thread Safety
//!
//! `LruCache` is not thread-safe. With the `concurrency` feature,
//! [`ConcurrentLruCache`] wraps it in `Arc<parking_lot::RwLock<_>>`.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lru::LruCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.insert(1, 1);
//! cache.insert(2, 2);
//! assert_eq!(cache.get(&1), Some(&1));
//! cache.insert(3, 3); // evicts 2
//! assert_eq!(cache.get(&2), None);
//! cache.insert(4, 4); // evicts 1
//! assert_eq!(cache.get(&1), None);
//! assert_eq!(cache.get(&3), Some(&3));
//! assert_eq!(cache.get(&4), Some(&4));
//! ```

use std::hash::Hash;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::ds::frequency_buckets::MAX_ENTRY_PREALLOC;
use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;
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
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Single-threaded LRU cache.
///
/// See the [module documentation](self) for the layout.
#[derive(Debug)]
pub struct LruCache<K, V> {
    list: IntrusiveList<Entry<K, V>>,
    index: FxHashMap<K, SlotId>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: PolicyMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A capacity of 0 is valid: the cache never stores anything.
    pub fn new(capacity: usize) -> Self {
        debug!(policy = "lru", capacity, "created cache");
        let reserve = capacity.min(MAX_ENTRY_PREALLOC);
        Self {
            list: IntrusiveList::with_capacity(reserve),
            index: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: PolicyMetrics::default(),
        }
    }

    /// Creates a cache from a signed capacity, rejecting negative values.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::lru::LruCache;
    ///
    /// assert!(LruCache::<i64, i64>::try_new(0).is_ok());
    /// assert!(LruCache::<i64, i64>::try_new(-5).is_err());
    /// ```
    pub fn try_new(capacity: i64) -> Result<Self, ConfigError> {
        checked_capacity(capacity).map(Self::new)
    }

    /// Returns the value for `key` without changing recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Iterates entries from most to least recently used.
    ///
    /// The last item yielded is the next eviction victim.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Verifies that the index and the recency list describe the same entries.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.list.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "list holds {} entries, index holds {}",
                self.list.len(),
                self.index.len()
            )));
        }
        if self.list.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.list.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            match self.list.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => return Err(InvariantError::new("index points at another key's node")),
                None => return Err(InvariantError::new("index points at a freed node")),
            }
        }
        let walked = self.list.iter().take(self.index.len() + 1).count();
        if walked != self.index.len() {
            return Err(InvariantError::new(format!(
                "walking the list yields {walked} nodes, expected {}",
                self.index.len()
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        if let Err(err) = self.check_invariants() {
            panic!("lru invariant violated: {err}");
        }
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_back()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert(InsertOutcome::Update);

            self.list.move_to_front(id);
            let entry = self.list.get_mut(id)?;
            return Some(std::mem::replace(&mut entry.value, value));
        }

        if self.capacity == 0 {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert(InsertOutcome::Rejected);
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert(InsertOutcome::New);

        if self.index.len() >= self.capacity && self.evict_lru().is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_eviction();

            trace!(
                policy = "lru",
                len = self.index.len(),
                capacity = self.capacity,
                "evicted least recently used entry"
            );
        }

        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get(false);
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get(true);

        self.list.move_to_front(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.list.clear();
        self.index.clear();
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.list.remove(id).map(|entry| entry.value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        let popped = self.evict_lru();

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_victim(popped.is_some());

        popped
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        let victim = self.list.back().map(|entry| (&entry.key, &entry.value));

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_victim(victim.is_some());

        victim
    }

    fn touch(&mut self, key: &K) -> bool {
        let found = match self.index.get(key) {
            Some(&id) => self.list.move_to_front(id),
            None => false,
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_promote(found);

        found
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        let target = self.index.get(key);
        let rank = target.and_then(|&target| self.list.iter_ids().position(|id| id == target));

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_inspect(rank.is_some());
            self.metrics.record_scan_steps(rank.map_or(0, |r| r as u64 + 1));
        }

        rank
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// An empty cache with capacity 0.
    fn default() -> Self {
        Self::new(0)
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
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
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.index.len(), self.capacity, None)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

/// Thread-safe LRU cache: an [`LruCache`] behind `Arc<parking_lot::RwLock<_>>`.
///
/// Promoting operations (`get`, `insert`, `touch`) take the write lock;
/// `peek`, `contains` and `len` share the read lock. Values are cloned out
/// because references cannot outlive the guard; store `Arc<T>` to share
/// large values cheaply.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "concurrency")]
/// # {
/// use evictkit::policy::lru::ConcurrentLruCache;
///
/// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(2);
/// cache.insert(1, "one".to_string());
/// let handle = cache.clone();
/// std::thread::spawn(move || {
///     handle.insert(2, "two".to_string());
/// })
/// .join()
/// .unwrap();
/// assert_eq!(cache.len(), 2);
/// # }
/// ```
#[cfg(feature = "concurrency")]
#[derive(Debug)]
pub struct ConcurrentLruCache<K, V> {
    inner: Arc<RwLock<LruCache<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    pub fn try_new(capacity: i64) -> Result<Self, ConfigError> {
        checked_capacity(capacity).map(Self::new)
    }

    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.write().insert(key, value)
    }

    /// Gets a clone of the value and marks it most recently used.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.write().get(key).cloned()
    }

    /// Gets a clone of the value without touching recency order.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.read().peek(key).cloned()
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.write().remove(key)
    }

    pub fn touch(&self, key: &K) -> bool {
        self.inner.write().touch(key)
    }

    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.write().pop_lru()
    }

    pub fn peek_lru(&self) -> Option<(K, V)> {
        self.inner
            .read()
            .peek_lru()
            .map(|(k, v)| (k.clone(), v.clone()))
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
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
}
