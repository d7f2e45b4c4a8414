//! Criterion micro-benchmarks for slot pool allocation and access.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ember_pool::{PoolConfig, SlotPool};

/// Benchmark: fill a 4-chunk pool slot by slot.
fn bench_pool_alloc_1k(c: &mut Criterion) {
    c.bench_function("pool_alloc_1k", |b| {
        b.iter(|| {
            let mut pool: SlotPool<u64> = SlotPool::new(PoolConfig {
                chunk_capacity: 256,
                max_chunks: 4,
            })
            .unwrap();
            for i in 0..1024u64 {
                black_box(pool.alloc(i).unwrap());
            }
            black_box(pool.live_len());
        });
    });
}

/// Benchmark: steady-state churn — free and reallocate half the pool.
fn bench_pool_churn(c: &mut Criterion) {
    let mut pool: SlotPool<u64> = SlotPool::new(PoolConfig {
        chunk_capacity: 256,
        max_chunks: 4,
    })
    .unwrap();
    let mut handles: Vec<_> = (0..1024u64).map(|i| pool.alloc(i).unwrap()).collect();

    c.bench_function("pool_churn_512", |b| {
        b.iter(|| {
            for handle in handles.drain(..512) {
                pool.free(handle).unwrap();
            }
            for i in 0..512u64 {
                handles.push(pool.alloc(i).unwrap());
            }
            black_box(pool.live_len());
        });
    });
}

/// Benchmark: handle resolution with generation validation.
fn bench_pool_get(c: &mut Criterion) {
    let mut pool: SlotPool<u64> = SlotPool::new(PoolConfig::default()).unwrap();
    let handles: Vec<_> = (0..1024u64).map(|i| pool.alloc(i).unwrap()).collect();

    c.bench_function("pool_get_1k", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for &handle in &handles {
                sum += pool.get(handle).copied().unwrap_or(0);
            }
            black_box(sum);
        });
    });
}

criterion_group!(benches, bench_pool_alloc_1k, bench_pool_churn, bench_pool_get);
criterion_main!(benches);
