//! Workload generators for hit-rate benchmarks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use evictkit::traits::CoreCache;

#[derive(Debug, Clone, Copy)]
pub enum Workload {
    /// Uniform random keys in `[0, universe)`.
    Uniform,
    /// Hot/cold split with a configurable hot fraction and hot access probability.
    Hotset { hot_fraction: f64, hot_prob: f64 },
    /// Sequential scan in `[0, universe)`.
    Scan,
    /// Zipfian ranks; `theta` 0.0 = uniform, larger = more skewed.
    Zipfian { theta: f64 },
}

#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    universe: u64,
    workload: Workload,
    rng: StdRng,
    scan_pos: u64,
    zipfian: Option<ZipfianState>,
}

impl WorkloadGenerator {
    pub fn new(universe: u64, workload: Workload, seed: u64) -> Self {
        let universe = universe.max(1);
        let zipfian = match workload {
            Workload::Zipfian { theta } => Some(ZipfianState::new(universe, theta)),
            _ => None,
        };
        Self {
            universe,
            workload,
            rng: StdRng::seed_from_u64(seed),
            scan_pos: 0,
            zipfian,
        }
    }

    pub fn next_key(&mut self) -> u64 {
        match self.workload {
            Workload::Uniform => self.rng.gen_range(0..self.universe),
            Workload::Hotset {
                hot_fraction,
                hot_prob,
            } => {
                let hot_size = ((self.universe as f64) * hot_fraction.clamp(0.0, 1.0)).round() as u64;
                let hot_size = hot_size.clamp(1, self.universe);
                if hot_size == self.universe || self.rng.gen_bool(hot_prob.clamp(0.0, 1.0)) {
                    self.rng.gen_range(0..hot_size)
                } else {
                    self.rng.gen_range(hot_size..self.universe)
                }
            },
            Workload::Scan => {
                let key = self.scan_pos;
                self.scan_pos = (self.scan_pos + 1) % self.universe;
                key
            },
            Workload::Zipfian { .. } => {
                let u: f64 = self.rng.r#gen();
                match &self.zipfian {
                    Some(zipf) => zipf.sample(u),
                    None => 0,
                }
            },
        }
    }
}

/// Runs `operations` lookups, inserting on every miss; returns the hit rate.
pub fn run_hit_rate<C>(cache: &mut C, generator: &mut WorkloadGenerator, operations: usize) -> f64
where
    C: CoreCache<u64, u64>,
{
    let mut hits = 0usize;
    for _ in 0..operations {
        let key = generator.next_key();
        if cache.get(&key).is_some() {
            hits += 1;
        } else {
            cache.insert(key, key);
        }
    }
    if operations == 0 {
        0.0
    } else {
        hits as f64 / operations as f64
    }
}

/// Zipfian sampler over `[0, n)`: cumulative weights `1 / (rank + 1)^theta`,
/// sampled by binary search.
#[derive(Debug, Clone)]
struct ZipfianState {
    cumulative: Vec<f64>,
}

impl ZipfianState {
    fn new(n: u64, theta: f64) -> Self {
        let theta = theta.max(0.0);
        let mut total = 0.0;
        let cumulative = (1..=n)
            .map(|rank| {
                total += 1.0 / (rank as f64).powf(theta);
                total
            })
            .collect();
        Self { cumulative }
    }

    fn sample(&self, u: f64) -> u64 {
        let Some(&total) = self.cumulative.last() else {
            return 0;
        };
        let target = u * total;
        let idx = self.cumulative.partition_point(|&c| c <= target);
        idx.min(self.cumulative.len() - 1) as u64
    }
}
