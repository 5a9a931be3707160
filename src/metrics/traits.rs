//! # Metrics Recorder Traits
//!
//! ```text
//!   CoreMetricsRecorder (&mut self)      get / insert / eviction / clear
//!            │
//!            ▼
//!   PolicyMetricsRecorder (&mut self)    pop victim / promote / reset
//!
//!   ReadMetricsRecorder (&self)          peek victim / inspect / scan steps
//!
//!   MetricsSnapshotProvider<S>           frozen copy for tests and benches
//! ```
//!
//! "Victim" is the entry the policy would evict next: the LRU tail or the
//! oldest entry of the lowest frequency bucket.

/// How an `insert` call was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new key was stored.
    New,
    /// An existing key had its value replaced.
    Update,
    /// Nothing was stored (zero capacity).
    Rejected,
}

/// Counters every cache records from `&mut self` methods.
pub trait CoreMetricsRecorder {
    fn record_get(&mut self, hit: bool);
    fn record_insert(&mut self, outcome: InsertOutcome);
    fn record_eviction(&mut self);
    fn record_clear(&mut self);
}

/// Policy-specific mutating operations.
///
/// `promote` is `touch` for LRU and `increment_frequency` for LFU; `reset`
/// is only produced by LFU's `reset_frequency`.
pub trait PolicyMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_victim(&mut self, found: bool);
    fn record_promote(&mut self, found: bool);
    fn record_reset(&mut self, found: bool);
}

/// Recorders for `&self` operations, backed by interior mutability.
///
/// `inspect` is `recency_rank` for LRU and `frequency` for LFU.
pub trait ReadMetricsRecorder {
    fn record_peek_victim(&self, found: bool);
    fn record_inspect(&self, found: bool);
    fn record_scan_steps(&self, steps: u64);
}

pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
