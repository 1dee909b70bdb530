#![no_main]

use libfuzzer_sys::fuzz_target;
use preimage48::{compress, decrypt, encrypt, fixed_point, Block, MessageBlock};

/// Read 24-bit big-endian words, zero-padding a short tail.
fn words<const N: usize>(data: &[u8]) -> [u32; N] {
    let mut out = [0u32; N];
    for (word, chunk) in out.iter_mut().zip(data.chunks(3)) {
        *word = chunk.iter().fold(0, |acc, &b| (acc << 8) | u32::from(b));
    }
    out
}

fuzz_target!(|data: &[u8]| {
    // =============================================================================
    // PREPARATION
    // =============================================================================

    // First 12 bytes are the key, the next 6 the plaintext
    let key = MessageBlock::new(words::<4>(data));
    let pt = Block::new(words::<2>(data.get(12..).unwrap_or_default()));

    // =============================================================================
    // 1. CIPHER ROUNDTRIP
    // =============================================================================

    let ct = encrypt(&key, pt);
    assert_eq!(decrypt(&key, ct), pt, "Decrypt does not invert encrypt");

    // =============================================================================
    // 2. FIXED POINT
    // =============================================================================

    let fp = fixed_point(&key);
    assert_eq!(compress(&key, fp), fp, "Fixed point is not fixed");
});
