//! Search Benchmarks
//!
//! Birthday-table throughput and the cost of a bounded expandable-message
//! search on small tables.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use preimage48::attack::{build_expandable_message, ExpandableConfig};
use preimage48::engine::table::{CollisionTable, Lookup};
use preimage48::{Budget, ChainingValue, SearchConfig};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

const KEYS: usize = 1 << 16;

fn random_keys() -> Vec<ChainingValue> {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    (0..KEYS).map(|_| ChainingValue::new(rng.next_u64())).collect()
}

// =============================================================================
// BENCHMARK 1: TABLE
// =============================================================================

/// Insert and verified lookup, table sizes around the attack's defaults.
fn bench_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Table");
    let keys = random_keys();
    group.throughput(Throughput::Elements(KEYS as u64));

    for bits in [16u32, 21, 24] {
        let mut table = CollisionTable::with_bits(bits).unwrap();
        group.bench_with_input(BenchmarkId::new("insert", bits), &keys, |b, keys| {
            b.iter(|| {
                for &key in keys {
                    table.insert(key, key);
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("lookup", bits), &keys, |b, keys| {
            b.iter(|| {
                let mut hits = 0u32;
                for &key in keys {
                    if let Lookup::Hit(_) = table.lookup(key, |&stored| stored == key) {
                        hits += 1;
                    }
                }
                black_box(hits)
            })
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 2: BOUNDED SEARCH
// =============================================================================

/// Phase A on a small table plus a fixed number of phase-B trials.
fn bench_bounded_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Bounded-Search");
    group.sample_size(10);
    let trials = 1u64 << 16;
    group.throughput(Throughput::Elements(trials));

    for workers in [1, preimage48::engine::available_workers()] {
        let config = ExpandableConfig {
            table_bits: 12,
            search: SearchConfig::sequential()
                .with_workers(workers)
                .with_budget(Budget::trials(trials)),
        };
        group.bench_function(BenchmarkId::new("expandable", workers), |b| {
            b.iter(|| {
                let mut rng = ChaCha8Rng::seed_from_u64(1);
                black_box(build_expandable_message(&mut rng, &config).is_err())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_table, bench_bounded_search);
criterion_main!(benches);
