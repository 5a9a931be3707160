//! evictkit: fixed-capacity LRU and LFU caches with O(1) `get`/`insert`.
//!
//! Both policies sit on the same arena-backed building blocks in [`ds`]:
//! entries are addressed by stable [`SlotId`](ds::SlotId) handles, so
//! promotion and eviction splice linked lists instead of scanning.
//!
//! - [`policy::lru::LruCache`] evicts the least recently used entry.
//! - [`policy::lfu::LfuCache`] evicts the least frequently used entry,
//!   oldest first among equal frequencies.
//!
//! Both implement the traits in [`traits`]; [`traits::IntCache`] layers the
//! integer `get_value`/`put` surface with the `NOT_FOUND` sentinel on top.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
