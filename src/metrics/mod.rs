//! Optional per-cache counters, enabled with the `metrics` feature.
//!
//! Both policies record into one [`PolicyMetrics`](metrics_impl::PolicyMetrics)
//! through the recorder traits in [`traits`]. Operations that only borrow the
//! cache (`peek_lru`, `frequency`, ...) go through [`ReadMetricsRecorder`](traits::ReadMetricsRecorder),
//! which bumps atomic cells. Callers read a frozen
//! [`CacheMetricsSnapshot`](snapshot::CacheMetricsSnapshot) via
//! [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider).

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
