use bolero::check;
use preimage48::{hash, hash_message, trace, Hasher, MessageBlock, Padding};

#[test]
fn fuzz_streaming_consistency() {
    check!().with_type::<Vec<[u32; 4]>>().for_each(|words| {
        let blocks: Vec<MessageBlock> = words.iter().copied().map(MessageBlock::new).collect();

        // =============================================================================
        // BASELINE (ONE-SHOT)
        // =============================================================================
        let expected = hash_message(&blocks);
        let padded = hash(&blocks, blocks.len() as u64, Padding::Length);

        // =============================================================================
        // STREAMING VARIATIONS
        // =============================================================================

        // 1. Whole message
        let mut hasher = Hasher::new();
        hasher.update_all(&blocks);
        assert_eq!(hasher.block_count(), blocks.len() as u64);
        assert_eq!(hasher.chaining_value(), expected, "Streaming update_all mismatch");
        assert_eq!(hasher.finalize(Padding::Length), padded, "Streaming padding mismatch");

        // 2. Uneven chunks
        let mut hasher = Hasher::new();
        for chunk in blocks.chunks(3) {
            hasher.update_all(chunk);
        }
        assert_eq!(hasher.finalize(Padding::None), expected, "Chunked update mismatch");

        // 3. Reset reuses the hasher
        let mut hasher = Hasher::new();
        hasher.update_all(&blocks);
        hasher.reset();
        hasher.update_all(&blocks);
        assert_eq!(hasher.finalize(Padding::None), expected, "Reset mismatch");

        // =============================================================================
        // TRACE
        // =============================================================================
        let steps: Vec<_> = trace(&blocks).collect();
        assert_eq!(steps.len(), blocks.len());
        let mut hasher = Hasher::new();
        for (i, step) in steps.iter().enumerate() {
            hasher.update(&blocks[i]);
            assert_eq!(step.index, i);
            assert_eq!(step.block, blocks[i]);
            assert_eq!(step.value, hasher.chaining_value(), "Trace step {i} mismatch");
        }
        if let Some(last) = steps.last() {
            assert_eq!(last.value, expected);
        }
    });
}
