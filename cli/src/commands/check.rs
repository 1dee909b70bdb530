//! Check Command
//!
//! Known-answer self tests of the primitives and a stored expandable message.

use anyhow::{bail, Result};
use preimage48::attack::ExpandableMessage;
use preimage48::{
    compress, decrypt, encrypt, fixed_point, hash, target_message, Block, ChainingValue, Key,
    MessageBlock, Padding,
};

// =============================================================================
// CHECK
// =============================================================================

/// Run every self test, print one line each, fail if any failed.
pub fn check_mode() -> Result<()> {
    let key = Key::new([0x02_0100, 0x0A_0908, 0x12_1110, 0x1A_1918]);
    let pt = Block::new([0x6D_2073, 0x69_6874]);
    let ct = Block::new([0x73_5E10, 0xB6_445D]);

    let zero_fp = fixed_point(&MessageBlock::ZERO);
    let em = ExpandableMessage::new(
        MessageBlock::new([0x6C_39B2, 0x6B_1E24, 0, 0]),
        MessageBlock::new([0xEF_65D0, 0xB0_0CFD, 0, 0]),
    );
    let target = target_message(4);

    let checks = [
        ("speck48/96 encrypt", encrypt(&key, pt) == ct),
        ("speck48/96 decrypt", decrypt(&key, ct) == pt),
        (
            "compress",
            compress(&MessageBlock::ZERO, ChainingValue::new(0))
                == ChainingValue::new(0x7FDD_5A6E_B248),
        ),
        (
            "fixed point",
            zero_fp == ChainingValue::new(0xA883_9D75_008D)
                && compress(&MessageBlock::ZERO, zero_fp) == zero_fp,
        ),
        (
            "target hash",
            hash(&target, 4, Padding::None) == ChainingValue::new(0xC48B_8194_00B7),
        ),
        ("expandable message", em.verify()),
    ];

    let mut failed = 0;
    for (name, ok) in checks {
        if ok {
            println!("{name}: OK");
        } else {
            println!("{name}: FAILED");
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{failed} of {} self tests failed", checks.len());
    }
    Ok(())
}
