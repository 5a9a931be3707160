mod common;

use common::workload::{Workload, WorkloadGenerator, run_hit_rate};
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use evictkit::policy::lfu::LfuCache;
use evictkit::traits::{CoreCache, LfuCacheTrait};

fn filled(capacity: u64) -> LfuCache<u64, u64> {
    let mut cache = LfuCache::new(capacity as usize);
    for i in 0..capacity {
        cache.insert(i, i);
    }
    cache
}

fn bench_lfu_insert_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu");
    group.throughput(Throughput::Elements(2048));
    group.bench_function("insert_get", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for i in 0..1024u64 {
                    cache.insert(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_lfu_hot_promotions(c: &mut Criterion) {
    c.bench_function("lfu_hot_promotions", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                // climbs a handful of keys through many distinct buckets
                for round in 0..256u64 {
                    for key in 0..8u64 {
                        let _ = std::hint::black_box(cache.get(&(key * 7 + round % 3)));
                    }
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lfu_pop_lfu(c: &mut Criterion) {
    c.bench_function("lfu_pop_lfu", |b| {
        b.iter_batched(
            || {
                let mut cache = filled(1024);
                for i in (0..1024u64).step_by(3) {
                    cache.get(&i);
                }
                cache
            },
            |mut cache| {
                for _ in 0..1024u64 {
                    let _ = std::hint::black_box(cache.pop_lfu());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lfu_eviction_churn(c: &mut Criterion) {
    c.bench_function("lfu_eviction_churn", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for i in 0..4096u64 {
                    cache.insert(std::hint::black_box(10_000 + i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lfu_hit_rate(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_hit_rate");
    let workloads = [
        ("uniform", Workload::Uniform),
        (
            "hotset",
            Workload::Hotset {
                hot_fraction: 0.1,
                hot_prob: 0.9,
            },
        ),
        ("scan", Workload::Scan),
        ("zipfian", Workload::Zipfian { theta: 0.99 }),
    ];
    for (name, workload) in workloads {
        group.bench_function(name, |b| {
            b.iter_batched(
                || (LfuCache::<u64, u64>::new(1024), WorkloadGenerator::new(16_384, workload, 42)),
                |(mut cache, mut generator)| {
                    std::hint::black_box(run_hit_rate(&mut cache, &mut generator, 20_000))
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_lfu_insert_get,
    bench_lfu_hot_promotions,
    bench_lfu_pop_lfu,
    bench_lfu_eviction_churn,
    bench_lfu_hit_rate
);
criterion_main!(benches);
