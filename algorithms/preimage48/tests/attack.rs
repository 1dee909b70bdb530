//! Second-Preimage Tests
//!
//! Replays a witness found by a seeded run of the full attack against the
//! 2^18-block target and checks that the forged message collides with it.
//! The searches themselves take minutes and are `#[ignore]`d.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use preimage48::attack::{forge, second_preimage, AttackConfig, Bridge, ExpandableMessage, SecondPreimage};
use preimage48::kernels::constants::TARGET_BLOCKS;
use preimage48::{
    compress, hash, hash_message, target_message, trace, ChainingValue, MessageBlock, Padding,
    SearchError, SearchStats,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// =============================================================================
// KNOWN WITNESS
// =============================================================================

const M1: [u32; 4] = [0x6C_39B2, 0x6B_1E24, 0, 0];
const M2: [u32; 4] = [0xEF_65D0, 0xB0_0CFD, 0, 0];
const CM: [u32; 4] = [0xB3_E84E, 0x62_8681, 0, 0];
const COLLISION_INDEX: usize = 67_771;

fn expandable() -> ExpandableMessage {
    ExpandableMessage::new(MessageBlock::new(M1), MessageBlock::new(M2))
}

fn bridge() -> Bridge {
    Bridge {
        block: MessageBlock::new(CM),
        collision_index: COLLISION_INDEX,
    }
}

// =============================================================================
// FORGERY
// =============================================================================

#[test]
fn test_bridge_lands_on_target_trace() {
    let target = target_message(TARGET_BLOCKS);
    let em = expandable();
    assert!(em.verify());

    let joined = compress(&MessageBlock::new(CM), em.fixed_point());
    assert_eq!(joined, ChainingValue::new(0xA6A2_5EBE_A5CB));
    assert_eq!(joined, hash(&target, COLLISION_INDEX as u64, Padding::None));
}

#[test]
fn test_known_witness_forges_second_preimage() {
    let target = target_message(TARGET_BLOCKS);
    let forged = forge(&target, &expandable(), &bridge()).unwrap();

    assert_eq!(forged.len(), target.len());
    assert_ne!(forged, target);

    let digest = hash_message(&target);
    assert_eq!(digest, ChainingValue::new(0x8B8F_7E17_152C));
    assert_eq!(hash_message(&forged), digest);

    let len = target.len() as u64;
    assert_eq!(
        hash(&forged, len, Padding::Length),
        ChainingValue::new(0x96EC_469B_E1B5)
    );
    assert_eq!(
        hash(&forged, len, Padding::Length),
        hash(&target, len, Padding::Length)
    );

    let result = SecondPreimage {
        expandable: expandable(),
        bridge: bridge(),
        message: forged,
        stats: SearchStats::default(),
    };
    assert!(result.verify(&target));
    assert_eq!(result.digest(), digest);
}

#[test]
fn test_forged_trace_parks_then_joins() {
    let target = target_message(TARGET_BLOCKS);
    let em = expandable();
    let forged = forge(&target, &em, &bridge()).unwrap();

    let target_steps: Vec<_> = trace(&target).collect();
    for step in trace(&forged) {
        if step.index + 1 < COLLISION_INDEX {
            assert_eq!(step.value, em.fixed_point(), "left the fixed point at {}", step.index);
        } else {
            assert_eq!(step.value, target_steps[step.index].value, "diverged at {}", step.index);
        }
    }
}

#[test]
fn test_tampered_witness_fails_verification() {
    let target = target_message(TARGET_BLOCKS);
    let mut wrong = bridge();
    wrong.collision_index += 1;

    let result = SecondPreimage {
        expandable: expandable(),
        bridge: wrong,
        message: forge(&target, &expandable(), &wrong).unwrap(),
        stats: SearchStats::default(),
    };
    assert!(!result.verify(&target));

    let identical = SecondPreimage {
        message: target.clone(),
        ..result
    };
    assert!(!identical.verify(&target), "the target itself is not a second preimage");
}

#[test]
fn test_short_targets_are_rejected() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let config = AttackConfig::default();
    for len in [0, 1] {
        let err = second_preimage(&target_message(len), &mut rng, &config).unwrap_err();
        assert_eq!(err, SearchError::MessageTooShort { len });
    }
}

// =============================================================================
// FULL ATTACK
// =============================================================================

#[test]
#[ignore = "runs both birthday searches (minutes)"]
fn test_full_attack() {
    let target = target_message(TARGET_BLOCKS);
    let mut rng = ChaCha8Rng::seed_from_u64(0x2019_A1FF);
    let result = second_preimage(&target, &mut rng, &AttackConfig::default()).unwrap();

    assert!(result.expandable.verify());
    assert!((2..=target.len()).contains(&result.bridge.collision_index));
    assert!(result.verify(&target));
    println!(
        "m1 = {}, m2 = {}, cm = {}, index = {}, trials = {}",
        result.expandable.m1(),
        result.expandable.m2(),
        result.bridge.block,
        result.bridge.collision_index,
        result.stats.trials
    );
}
