//! Frequency buckets for O(1) LFU tracking.
//!
//! Stores `(key, value)` entries grouped by access frequency. Every frequency
//! level owns a doubly linked list of entries (head = most recently touched,
//! tail = least recently touched), and the levels themselves are linked in
//! ascending order so the next-lowest or next-highest frequency is always one
//! hop away.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                      FrequencyBuckets<K, V> Layout                          │
//! │                                                                             │
//! │   ┌─────────────────────────────┐   ┌─────────────────────────────────┐     │
//! │   │  index: FxHashMap<K, SlotId>│   │  entries: SlotArena<Entry<K,V>> │     │
//! │   │                             │   │                                 │     │
//! │   │  ┌───────────┬──────────┐   │   │  ┌──────┬───────────────────┐   │     │
//! │   │  │    Key    │  SlotId  │   │   │  │ Slot │ Entry             │   │     │
//! │   │  ├───────────┼──────────┤   │   │  ├──────┼───────────────────┤   │     │
//! │   │  │     7     │   id_0   │───┼───┼─►│ id_0 │ freq:2, v, links  │   │     │
//! │   │  │     3     │   id_1   │───┼───┼─►│ id_1 │ freq:1, v, links  │   │     │
//! │   │  │     9     │   id_2   │───┼───┼─►│ id_2 │ freq:1, v, links  │   │     │
//! │   │  └───────────┴──────────┘   │   │  └──────┴───────────────────┘   │     │
//! │   └─────────────────────────────┘   └─────────────────────────────────┘     │
//! │                                                                             │
//! │   buckets: FxHashMap<u64, Bucket>   min_freq = 1   max_freq = 2             │
//! │                                                                             │
//! │     freq=1: head ──► [id_2] ◄──► [id_1] ◄── tail   (tail evicts first)      │
//! │     freq=2: head ──► [id_0] ◄── tail                                        │
//! │                                                                             │
//! │     freq=1 ──next──► freq=2,  freq=2 ──prev──► freq=1                       │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation  | Time | Notes                                          |
//! |------------|------|------------------------------------------------|
//! | `insert`   | O(1) | New key starts at freq=1, replaces value else  |
//! | `touch`    | O(1) | Increment frequency, move to bucket head       |
//! | `reset`    | O(1) | Move entry back to freq=1                      |
//! | `remove`   | O(1) | Drop entry, fix min/max through bucket links   |
//! | `pop_min`  | O(1) | Evict tail of the `min_freq` bucket            |
//! | `iter`     | O(n) | Highest frequency first, MRU first per bucket  |
//!
//! A bucket is dropped the moment its last entry leaves it, so `min_freq`
//! always names a non-empty bucket while the structure is non-empty.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::ds::FrequencyBuckets;
//!
//! let mut freq = FrequencyBuckets::new();
//! freq.insert("a", 1);
//! freq.insert("b", 2);
//! freq.touch(&"a");
//!
//! assert_eq!(freq.frequency(&"a"), Some(2));
//! assert_eq!(freq.pop_min(), Some(("b", 2)));
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe; callers serialize access externally.

use rustc_hash::FxHashMap;
use std::hash::Hash;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// Link pointers are touched on every promotion, so they lead the layout.
#[derive(Debug)]
#[repr(C)]
struct Entry<K, V> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    freq: u64,
    key: K,
    value: V,
}

#[derive(Debug, Default)]
struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    prev: Option<u64>,
    next: Option<u64>,
}

/// Read-only view of a tracked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyEntry<'a, K, V> {
    pub key: &'a K,
    pub value: &'a V,
    pub freq: u64,
}

/// Default bucket pre-allocation; most entries cluster at low frequencies.
pub const DEFAULT_BUCKET_PREALLOC: usize = 32;

/// Upper bound on entry slots reserved up front by cache constructors.
///
/// Capacity is only a limit; storage beyond this grows on demand.
pub const MAX_ENTRY_PREALLOC: usize = 4096;

/// O(1) frequency-ordered entry store with LRU tie-breaking within a frequency.
///
/// # Example
///
/// ```
/// use evictkit::ds::FrequencyBuckets;
///
/// let mut freq = FrequencyBuckets::with_capacity(8);
/// freq.insert(1, "one");
/// freq.insert(2, "two");
/// freq.touch(&1);
///
/// assert_eq!(freq.min_freq(), Some(1));
/// assert_eq!(freq.max_freq(), Some(2));
/// assert_eq!(freq.peek_min(), Some((&2, &"two")));
/// ```
#[derive(Debug)]
pub struct FrequencyBuckets<K, V> {
    entries: SlotArena<Entry<K, V>>,
    index: FxHashMap<K, SlotId>,
    buckets: FxHashMap<u64, Bucket>,
    min_freq: u64,
    max_freq: u64,
}

impl<K, V> FrequencyBuckets<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: SlotArena::new(),
            index: FxHashMap::default(),
            buckets: FxHashMap::default(),
            min_freq: 0,
            max_freq: 0,
        }
    }

    /// Creates an empty store with room for `capacity` entries, reserving at
    /// most [`MAX_ENTRY_PREALLOC`] of them.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_ENTRY_PREALLOC);
        Self {
            entries: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FxHashMap::with_capacity_and_hasher(
                DEFAULT_BUCKET_PREALLOC.min(capacity.max(1)),
                Default::default(),
            ),
            min_freq: 0,
            max_freq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the current frequency for `key`, if present.
    #[inline]
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| entry.freq)
    }

    /// Returns the value for `key` without changing its frequency.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| &entry.value)
    }

    /// Returns a mutable value for `key` without changing its frequency.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = *self.index.get(key)?;
        self.entries.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Returns the lowest frequency present, or `None` when empty.
    pub fn min_freq(&self) -> Option<u64> {
        (self.min_freq != 0).then_some(self.min_freq)
    }

    /// Returns the highest frequency present, or `None` when empty.
    pub fn max_freq(&self) -> Option<u64> {
        (self.max_freq != 0).then_some(self.max_freq)
    }

    /// Peeks the eviction candidate (tail of the min-frequency bucket).
    pub fn peek_min(&self) -> Option<(&K, &V)> {
        let id = self.buckets.get(&self.min_freq)?.tail?;
        self.entries.get(id).map(|entry| (&entry.key, &entry.value))
    }

    /// Inserts `key` at frequency 1.
    ///
    /// If `key` is already present its value is replaced and the old value
    /// returned; the frequency and position are left untouched.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            let entry = self.entries.get_mut(id)?;
            return Some(std::mem::replace(&mut entry.value, value));
        }

        let id = self.entries.insert(Entry {
            prev: None,
            next: None,
            freq: 1,
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        if !self.buckets.contains_key(&1) {
            let next = self.min_freq();
            self.insert_bucket(1, None, next);
        }
        self.list_push_front(1, id);
        None
    }

    /// Increments the frequency of `key` and returns the new frequency.
    ///
    /// The entry lands at the head of its new bucket. A frequency already at
    /// `u64::MAX` stays there and the entry only moves to its bucket head.
    #[inline]
    pub fn touch(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.promote(id)
    }

    /// Swaps in `value` for an existing `key` and promotes it as
    /// [`touch`](Self::touch) does, after a single index lookup.
    ///
    /// Returns the old value, or hands `value` back when `key` is absent.
    pub fn replace_and_touch(&mut self, key: &K, value: V) -> Result<V, V> {
        let Some(&id) = self.index.get(key) else {
            return Err(value);
        };
        let Some(entry) = self.entries.get_mut(id) else {
            return Err(value);
        };
        let old = std::mem::replace(&mut entry.value, value);
        self.promote(id);
        Ok(old)
    }

    fn promote(&mut self, id: SlotId) -> Option<u64> {
        let freq = self.entries.get(id)?.freq;
        if freq == u64::MAX {
            self.list_remove(freq, id)?;
            self.list_push_front(freq, id)?;
            return Some(freq);
        }

        let next_freq = freq + 1;
        let (lower, upper) = self.unlink(id)?;
        self.place(id, next_freq, lower, upper)?;
        Some(next_freq)
    }

    /// Moves `key` back to frequency 1 and returns its previous frequency.
    pub fn reset(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        let previous = self.entries.get(id)?.freq;
        self.unlink(id)?;
        let upper = self.min_freq();
        self.place(id, 1, None, upper)?;
        Some(previous)
    }

    /// Removes `key` and returns its value.
    #[inline]
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.unlink(id)?;
        self.entries.remove(id).map(|entry| entry.value)
    }

    /// Removes and returns the least frequently used entry, oldest first on ties.
    #[inline]
    pub fn pop_min(&mut self) -> Option<(K, V)> {
        let id = self.buckets.get(&self.min_freq)?.tail?;
        self.unlink(id)?;
        let entry = self.entries.remove(id)?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.buckets.clear();
        self.min_freq = 0;
        self.max_freq = 0;
    }

    /// Iterates entries from most to least favored: highest frequency first,
    /// most recently touched first within a frequency.
    pub fn iter(&self) -> FrequencyBucketsIter<'_, K, V> {
        let current = self.buckets.get(&self.max_freq).and_then(|b| b.head);
        FrequencyBucketsIter {
            owner: self,
            freq: self.max_freq(),
            current,
        }
    }

    /// Walks every bucket and reports the first broken invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.entries.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "entry count {} does not match index size {}",
                self.entries.len(),
                self.index.len()
            )));
        }

        if self.is_empty() {
            if !self.buckets.is_empty() || self.min_freq != 0 || self.max_freq != 0 {
                return Err(InvariantError::new("empty store still has buckets"));
            }
            return Ok(());
        }

        if !self.buckets.contains_key(&self.min_freq) {
            return Err(InvariantError::new(format!(
                "min_freq {} has no bucket",
                self.min_freq
            )));
        }
        if !self.buckets.contains_key(&self.max_freq) {
            return Err(InvariantError::new(format!(
                "max_freq {} has no bucket",
                self.max_freq
            )));
        }

        let mut total = 0usize;
        for (&freq, bucket) in &self.buckets {
            if freq < self.min_freq || freq > self.max_freq {
                return Err(InvariantError::new(format!(
                    "bucket {freq} outside [{}, {}]",
                    self.min_freq, self.max_freq
                )));
            }
            match bucket.prev {
                Some(prev) if prev >= freq || self.buckets.get(&prev).map(|b| b.next) != Some(Some(freq)) => {
                    return Err(InvariantError::new(format!("bucket {freq} has a broken prev link")));
                },
                None if freq != self.min_freq => {
                    return Err(InvariantError::new(format!("bucket {freq} has no prev but is not min")));
                },
                _ => {},
            }
            match bucket.next {
                Some(next) if next <= freq || self.buckets.get(&next).map(|b| b.prev) != Some(Some(freq)) => {
                    return Err(InvariantError::new(format!("bucket {freq} has a broken next link")));
                },
                None if freq != self.max_freq => {
                    return Err(InvariantError::new(format!("bucket {freq} has no next but is not max")));
                },
                _ => {},
            }

            let mut current = bucket.head;
            let mut last = None;
            let mut count = 0usize;
            while let Some(id) = current {
                let entry = self
                    .entries
                    .get(id)
                    .ok_or_else(|| InvariantError::new(format!("bucket {freq} links a freed slot")))?;
                if entry.freq != freq {
                    return Err(InvariantError::new(format!(
                        "entry with freq {} sits in bucket {freq}",
                        entry.freq
                    )));
                }
                if entry.prev != last {
                    return Err(InvariantError::new(format!("bucket {freq} has a broken entry link")));
                }
                if self.index.get(&entry.key) != Some(&id) {
                    return Err(InvariantError::new(format!("bucket {freq} entry is not indexed")));
                }
                last = Some(id);
                current = entry.next;
                count += 1;
                if count > self.entries.len() {
                    return Err(InvariantError::new(format!("bucket {freq} contains a cycle")));
                }
            }
            if count == 0 {
                return Err(InvariantError::new(format!("bucket {freq} is empty")));
            }
            if bucket.tail != last {
                return Err(InvariantError::new(format!("bucket {freq} tail is stale")));
            }
            total += count;
        }

        if total != self.entries.len() {
            return Err(InvariantError::new(format!(
                "buckets hold {total} entries, store holds {}",
                self.entries.len()
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("frequency buckets invariant violated: {err}");
        }
    }

    /// Unlinks `id` from its bucket, dropping the bucket if it empties.
    ///
    /// Returns the frequencies that now bound the vacated position: the old
    /// bucket itself (or its predecessor once dropped) and its successor.
    fn unlink(&mut self, id: SlotId) -> Option<(Option<u64>, Option<u64>)> {
        let freq = self.entries.get(id)?.freq;
        self.list_remove(freq, id)?;
        let (prev, next, empty) = {
            let bucket = self.buckets.get(&freq)?;
            (bucket.prev, bucket.next, bucket.head.is_none())
        };
        if empty {
            self.remove_bucket(freq, prev, next);
            Some((prev, next))
        } else {
            Some((Some(freq), next))
        }
    }

    /// Pushes `id` to the head of bucket `freq`, creating the bucket between
    /// `lower` and `upper` when it does not exist yet.
    fn place(&mut self, id: SlotId, freq: u64, lower: Option<u64>, upper: Option<u64>) -> Option<()> {
        if !self.buckets.contains_key(&freq) {
            self.insert_bucket(freq, lower, upper);
        }
        self.entries.get_mut(id)?.freq = freq;
        self.list_push_front(freq, id)
    }

    fn insert_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        self.buckets.insert(
            freq,
            Bucket {
                head: None,
                tail: None,
                prev,
                next,
            },
        );

        match prev.and_then(|p| self.buckets.get_mut(&p)) {
            Some(prev_bucket) => prev_bucket.next = Some(freq),
            None => self.min_freq = freq,
        }
        match next.and_then(|n| self.buckets.get_mut(&n)) {
            Some(next_bucket) => next_bucket.prev = Some(freq),
            None => self.max_freq = freq,
        }
    }

    fn remove_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        if let Some(prev_bucket) = prev.and_then(|p| self.buckets.get_mut(&p)) {
            prev_bucket.next = next;
        }
        if let Some(next_bucket) = next.and_then(|n| self.buckets.get_mut(&n)) {
            next_bucket.prev = prev;
        }
        self.buckets.remove(&freq);

        if self.min_freq == freq {
            self.min_freq = next.unwrap_or(0);
        }
        if self.max_freq == freq {
            self.max_freq = prev.unwrap_or(0);
        }
    }

    fn list_push_front(&mut self, freq: u64, id: SlotId) -> Option<()> {
        let bucket = self.buckets.get_mut(&freq)?;

        let old_head = bucket.head;
        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        }
        if let Some(old_head) = old_head {
            if let Some(entry) = self.entries.get_mut(old_head) {
                entry.prev = Some(id);
            }
        } else {
            bucket.tail = Some(id);
        }
        bucket.head = Some(id);
        Some(())
    }

    fn list_remove(&mut self, freq: u64, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let entry = self.entries.get(id)?;
            (entry.prev, entry.next)
        };

        let bucket = self.buckets.get_mut(&freq)?;
        if let Some(prev) = prev {
            if let Some(entry) = self.entries.get_mut(prev) {
                entry.next = next;
            }
        } else {
            bucket.head = next;
        }
        if let Some(next) = next {
            if let Some(entry) = self.entries.get_mut(next) {
                entry.prev = prev;
            }
        } else {
            bucket.tail = prev;
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = None;
        }

        Some(())
    }
}

impl<K, V> Default for FrequencyBuckets<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over entries, most favored first. See [`FrequencyBuckets::iter`].
pub struct FrequencyBucketsIter<'a, K, V> {
    owner: &'a FrequencyBuckets<K, V>,
    freq: Option<u64>,
    current: Option<SlotId>,
}

impl<'a, K, V> Iterator for FrequencyBucketsIter<'a, K, V> {
    type Item = FrequencyEntry<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let owner = self.owner;
        loop {
            if let Some(id) = self.current {
                let entry = owner.entries.get(id)?;
                self.current = entry.next;
                return Some(FrequencyEntry {
                    key: &entry.key,
                    value: &entry.value,
                    freq: entry.freq,
                });
            }
            let freq = self.freq?;
            let lower = owner.buckets.get(&freq)?.prev;
            self.freq = lower;
            self.current = lower
                .and_then(|f| owner.buckets.get(&f))
                .and_then(|bucket| bucket.head);
        }
    }
}
