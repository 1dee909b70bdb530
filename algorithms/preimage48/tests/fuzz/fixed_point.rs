use bolero::check;
use preimage48::{compress, fixed_point, ChainingValue, MessageBlock};

#[test]
fn fuzz_fixed_point_is_fixed() {
    check!().with_type::<[u32; 4]>().for_each(|words| {
        let block = MessageBlock::new(*words);
        let fp = fixed_point(&block);

        // =============================================================================
        // FIXED POINT
        // =============================================================================
        assert_eq!(compress(&block, fp), fp, "compress(m, fixed_point(m)) != fixed_point(m)");

        // =============================================================================
        // RANGE
        // =============================================================================
        assert_eq!(ChainingValue::new(fp.get()), fp, "Fixed point exceeds 48 bits");
    });
}

#[test]
fn fuzz_compress_stays_in_range() {
    check!().with_type::<([u32; 4], u64)>().for_each(|(words, state)| {
        let out = compress(&MessageBlock::new(*words), ChainingValue::new(*state));
        assert_eq!(out.get() >> 48, 0, "Chaining value exceeds 48 bits");
    });
}
