//! CS48 Primitive Benchmarks
//!
//! Cost of one Speck48/96 encryption, one compression, one fixed-point solve
//! and of hashing the target message.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use preimage48::kernels::constants::TARGET_BLOCKS;
use preimage48::{
    compress, decrypt, encrypt, fixed_point, hash_message, target_message, Block, ChainingValue,
    Key, MessageBlock, RoundKeys,
};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

fn random_blocks(n: usize) -> Vec<MessageBlock> {
    let mut rng = ChaCha8Rng::seed_from_u64(0xC548);
    (0..n)
        .map(|_| MessageBlock::from_sample(rng.next_u64()))
        .collect()
}

// =============================================================================
// BENCHMARK 1: CIPHER
// =============================================================================

/// Key schedule plus 23 rounds, both directions.
fn bench_cipher(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Cipher");
    let key = Key::new([0x02_0100, 0x0A_0908, 0x12_1110, 0x1A_1918]);
    let pt = Block::new([0x6D_2073, 0x69_6874]);

    group.bench_function("key_schedule", |b| b.iter(|| RoundKeys::expand(black_box(&key))));
    group.bench_function("encrypt", |b| b.iter(|| encrypt(black_box(&key), black_box(pt))));
    group.bench_function("decrypt", |b| b.iter(|| decrypt(black_box(&key), black_box(pt))));
    group.finish();
}

// =============================================================================
// BENCHMARK 2: COMPRESSION
// =============================================================================

/// The two per-trial operations of the searches.
fn bench_compression(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Compression");
    let blocks = random_blocks(1024);
    group.throughput(Throughput::Elements(blocks.len() as u64));

    group.bench_function("compress_from_iv", |b| {
        b.iter(|| {
            for block in &blocks {
                black_box(compress(block, ChainingValue::IV));
            }
        })
    });
    group.bench_function("fixed_point", |b| {
        b.iter(|| {
            for block in &blocks {
                black_box(fixed_point(block));
            }
        })
    });
    group.finish();
}

// =============================================================================
// BENCHMARK 3: TARGET HASH
// =============================================================================

/// Hashing target messages up to the attacked length.
fn bench_target_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("3-Target-Hash");
    group.sample_size(20);

    for blocks in [1 << 10, 1 << 14, TARGET_BLOCKS] {
        let target = target_message(blocks);
        group.throughput(Throughput::Elements(blocks as u64));
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &target, |b, data| {
            b.iter(|| hash_message(black_box(data)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cipher, bench_compression, bench_target_hash);
criterion_main!(benches);
