use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::CacheMetricsSnapshot;
use crate::metrics::traits::{
    CoreMetricsRecorder, InsertOutcome, PolicyMetricsRecorder, ReadMetricsRecorder,
};

/// Counter block shared by both cache policies.
#[derive(Debug, Default)]
pub struct PolicyMetrics {
    pub get_hits: u64,
    pub get_misses: u64,
    pub inserts_new: u64,
    pub inserts_updated: u64,
    pub inserts_rejected: u64,
    pub evictions: u64,
    pub clears: u64,
    pub pop_calls: u64,
    pub pop_found: u64,
    pub promote_calls: u64,
    pub promote_found: u64,
    pub reset_calls: u64,
    pub reset_found: u64,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
    pub inspect_calls: MetricsCell,
    pub inspect_found: MetricsCell,
    pub scan_steps: MetricsCell,
}

impl PolicyMetrics {
    /// Freezes the counters together with the cache gauges.
    pub fn snapshot(
        &self,
        cache_len: usize,
        capacity: usize,
        min_freq: Option<u64>,
    ) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            inserts_new: self.inserts_new,
            inserts_updated: self.inserts_updated,
            inserts_rejected: self.inserts_rejected,
            evictions: self.evictions,
            clears: self.clears,
            pop_calls: self.pop_calls,
            pop_found: self.pop_found,
            promote_calls: self.promote_calls,
            promote_found: self.promote_found,
            reset_calls: self.reset_calls,
            reset_found: self.reset_found,
            peek_calls: self.peek_calls.get(),
            peek_found: self.peek_found.get(),
            inspect_calls: self.inspect_calls.get(),
            inspect_found: self.inspect_found.get(),
            scan_steps: self.scan_steps.get(),
            cache_len,
            capacity,
            min_freq,
        }
    }
}

#[inline]
fn bump(calls: &mut u64, found_counter: &mut u64, found: bool) {
    *calls += 1;
    *found_counter += u64::from(found);
}

impl CoreMetricsRecorder for PolicyMetrics {
    fn record_get(&mut self, hit: bool) {
        if hit {
            self.get_hits += 1;
        } else {
            self.get_misses += 1;
        }
    }

    fn record_insert(&mut self, outcome: InsertOutcome) {
        match outcome {
            InsertOutcome::New => self.inserts_new += 1,
            InsertOutcome::Update => self.inserts_updated += 1,
            InsertOutcome::Rejected => self.inserts_rejected += 1,
        }
    }

    fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl PolicyMetricsRecorder for PolicyMetrics {
    fn record_pop_victim(&mut self, found: bool) {
        bump(&mut self.pop_calls, &mut self.pop_found, found);
    }

    fn record_promote(&mut self, found: bool) {
        bump(&mut self.promote_calls, &mut self.promote_found, found);
    }

    fn record_reset(&mut self, found: bool) {
        bump(&mut self.reset_calls, &mut self.reset_found, found);
    }
}

impl ReadMetricsRecorder for PolicyMetrics {
    fn record_peek_victim(&self, found: bool) {
        self.peek_calls.incr();
        if found {
            self.peek_found.incr();
        }
    }

    fn record_inspect(&self, found: bool) {
        self.inspect_calls.incr();
        if found {
            self.inspect_found.incr();
        }
    }

    fn record_scan_steps(&self, steps: u64) {
        self.scan_steps.add(steps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_outcomes_land_in_separate_counters() {
        let mut m = PolicyMetrics::default();
        m.record_insert(InsertOutcome::New);
        m.record_insert(InsertOutcome::New);
        m.record_insert(InsertOutcome::Update);
        m.record_insert(InsertOutcome::Rejected);
        let snap = m.snapshot(2, 4, None);
        assert_eq!(snap.inserts_new, 2);
        assert_eq!(snap.inserts_updated, 1);
        assert_eq!(snap.inserts_rejected, 1);
        assert_eq!(snap.insert_calls(), 4);
    }

    #[test]
    fn found_flags_only_bump_found_counters_when_set() {
        let mut m = PolicyMetrics::default();
        m.record_pop_victim(true);
        m.record_pop_victim(false);
        m.record_promote(false);
        assert_eq!((m.pop_calls, m.pop_found), (2, 1));
        assert_eq!((m.promote_calls, m.promote_found), (1, 0));
    }

    #[test]
    fn read_recorders_work_through_shared_ref() {
        let m = PolicyMetrics::default();
        let shared = &m;
        shared.record_peek_victim(true);
        shared.record_inspect(false);
        shared.record_scan_steps(5);
        assert_eq!(m.peek_calls.get(), 1);
        assert_eq!(m.peek_found.get(), 1);
        assert_eq!(m.inspect_calls.get(), 1);
        assert_eq!(m.inspect_found.get(), 0);
        assert_eq!(m.scan_steps.get(), 5);
    }
}
