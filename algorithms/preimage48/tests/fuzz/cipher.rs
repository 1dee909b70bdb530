use bolero::check;
use preimage48::{decrypt, encrypt, Block, Key, RoundKeys};

#[test]
fn fuzz_cipher_roundtrip() {
    check!()
        .with_type::<([u32; 4], [u32; 2])>()
        .for_each(|(key, plaintext)| {
            let key = Key::new(*key);
            let plaintext = Block::new(*plaintext);

            let ciphertext = encrypt(&key, plaintext);
            assert_eq!(decrypt(&key, ciphertext), plaintext, "Decrypt does not invert encrypt");

            // Words never carry bits above 24.
            for word in ciphertext.words() {
                assert_eq!(word.get() >> 24, 0, "Ciphertext word overflow");
            }
        });
}

#[test]
fn fuzz_key_schedule_masks_words() {
    check!().with_type::<[u32; 4]>().for_each(|key| {
        let schedule = RoundKeys::expand(&Key::new(*key));
        assert_eq!(schedule.as_words()[0].get(), key[0] & 0x00FF_FFFF);
        assert!(schedule.as_words().iter().all(|w| w.get() >> 24 == 0));
    });
}
