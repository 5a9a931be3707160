mod common;

use common::workload::{Workload, WorkloadGenerator, run_hit_rate};
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use evictkit::policy::lru::LruCache;
use evictkit::traits::{CoreCache, IntCache, LruCacheTrait};

fn filled(capacity: u64) -> LruCache<u64, u64> {
    let mut cache = LruCache::new(capacity as usize);
    for i in 0..capacity {
        cache.insert(i, i);
    }
    cache
}

fn bench_lru_insert_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru");
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

fn bench_lru_pop_lru(c: &mut Criterion) {
    c.bench_function("lru_pop_lru", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for _ in 0..1024u64 {
                    let _ = std::hint::black_box(cache.pop_lru());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_eviction_churn(c: &mut Criterion) {
    c.bench_function("lru_eviction_churn", |b| {
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

fn bench_lru_int_facade(c: &mut Criterion) {
    c.bench_function("lru_int_get_put", |b| {
        b.iter_batched(
            || LruCache::<i64, i64>::new(1024),
            |mut cache| {
                for i in 0..2048i64 {
                    cache.put(std::hint::black_box(i), i);
                    let _ = std::hint::black_box(cache.get_value(i / 2));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_hit_rate(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_hit_rate");
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
                || (LruCache::<u64, u64>::new(1024), WorkloadGenerator::new(16_384, workload, 42)),
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
    bench_lru_insert_get,
    bench_lru_pop_lru,
    bench_lru_eviction_churn,
    bench_lru_int_facade,
    bench_lru_hit_rate
);
criterion_main!(benches);
