/// Point-in-time copy of a cache's counters and gauges.
///
/// Field meanings are shared by both policies; see
/// [`traits`](crate::metrics::traits) for how `pop`, `promote`, `reset`,
/// `peek` and `inspect` map onto each policy's operations.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheMetricsSnapshot {
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
    pub peek_calls: u64,
    pub peek_found: u64,
    pub inspect_calls: u64,
    pub inspect_found: u64,
    pub scan_steps: u64,

    pub cache_len: usize,
    pub capacity: usize,
    /// Lowest stored frequency; always `None` for LRU.
    pub min_freq: Option<u64>,
}

impl CacheMetricsSnapshot {
    pub fn get_calls(&self) -> u64 {
        self.get_hits + self.get_misses
    }

    pub fn insert_calls(&self) -> u64 {
        self.inserts_new + self.inserts_updated + self.inserts_rejected
    }

    /// Fraction of `get` calls that hit, or `0.0` before any call.
    pub fn hit_rate(&self) -> f64 {
        match self.get_calls() {
            0 => 0.0,
            calls => self.get_hits as f64 / calls as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_handles_zero_calls() {
        assert_eq!(CacheMetricsSnapshot::default().hit_rate(), 0.0);
    }

    #[test]
    fn hit_rate_is_hits_over_calls() {
        let snap = CacheMetricsSnapshot {
            get_hits: 3,
            get_misses: 1,
            ..Default::default()
        };
        assert_eq!(snap.get_calls(), 4);
        assert!((snap.hit_rate() - 0.75).abs() < f64::EPSILON);
    }
}
