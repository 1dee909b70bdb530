#![no_main]

use libfuzzer_sys::fuzz_target;
use preimage48::{hash_message, Hasher, MessageBlock, Padding};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    // Chunk size (in blocks) is derived from the first byte (1 to 16)
    let chunk_size = (data[0] as usize % 16) + 1;

    // Every 6 bytes become one block payload
    let blocks: Vec<MessageBlock> = data[1..]
        .chunks(6)
        .map(|chunk| {
            let sample = chunk.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
            MessageBlock::from_sample(sample)
        })
        .collect();

    let reference = hash_message(&blocks);

    let mut hasher = Hasher::new();
    for chunk in blocks.chunks(chunk_size) {
        hasher.update_all(chunk);
    }

    // They must be identical
    assert_eq!(
        hasher.finalize(Padding::None),
        reference,
        "Streaming and One-Shot approaches differ!"
    );
});
