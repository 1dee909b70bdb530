//! Speck48/96 Block Cipher
//!
//! 24-bit words, 96-bit key, 23 rounds. Not constant-time.
//!
//! ```text
//! round:    x = ((x >>> 8) + y) ^ k        y = (y <<< 3) ^ x
//! inverse:  y = (y ^ x) >>> 3              x = ((x ^ k) - y) <<< 8
//! ```
//!
//! Within a 24-bit word `>>> 8` is `<<< 16` and `>>> 3` is `<<< 21`.

use crate::kernels::constants::{ALPHA, BETA, ROUNDS, WORD_BITS};
use crate::types::{Block, Key, Word};

// =============================================================================
// KEY SCHEDULE
// =============================================================================

/// The 23 round keys derived from a 96-bit key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundKeys([Word; ROUNDS]);

impl RoundKeys {
    /// Run the Speck key schedule over `key = [k0, k1, k2, k3]`.
    ///
    /// `k0` seeds the round-key chain and `[k1, k2, k3]` the `ell` register;
    /// each step runs the round function on `(ell, rk)` with the step index
    /// as round key.
    #[must_use]
    pub fn expand(key: &Key) -> Self {
        let [k0, k1, k2, k3] = key.words();
        let mut rk = [Word::ZERO; ROUNDS];
        let mut ell = [k1, k2, k3];
        rk[0] = k0;

        for (i, step) in (0..ROUNDS - 1).zip(0u32..) {
            let new_ell = ell[0].rotl(ALPHA).wrapping_add(rk[i]) ^ Word::new(step);
            rk[i + 1] = rk[i].rotl(BETA) ^ new_ell;
            ell = [ell[1], ell[2], new_ell];
        }

        Self(rk)
    }

    /// The round keys in application order.
    #[must_use]
    pub const fn as_words(&self) -> &[Word; ROUNDS] {
        &self.0
    }
}

// =============================================================================
// ROUNDS
// =============================================================================

#[inline]
fn round(x: Word, y: Word, k: Word) -> (Word, Word) {
    let x = x.rotl(ALPHA).wrapping_add(y) ^ k;
    let y = y.rotl(BETA) ^ x;
    (x, y)
}

#[inline]
fn inverse_round(x: Word, y: Word, k: Word) -> (Word, Word) {
    let y = (y ^ x).rotl(WORD_BITS - BETA);
    let x = (x ^ k).wrapping_sub(y).rotl(WORD_BITS - ALPHA);
    (x, y)
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Encrypt one 48-bit block.
#[must_use]
pub fn encrypt(key: &Key, plaintext: Block) -> Block {
    let schedule = RoundKeys::expand(key);
    let [mut x, mut y] = plaintext.words();
    for &k in schedule.as_words() {
        (x, y) = round(x, y, k);
    }
    Block::from_words([x, y])
}

/// Decrypt one 48-bit block. Exact inverse of [`encrypt`] under the same key.
#[must_use]
pub fn decrypt(key: &Key, ciphertext: Block) -> Block {
    let schedule = RoundKeys::expand(key);
    let [mut x, mut y] = ciphertext.words();
    for &k in schedule.as_words().iter().rev() {
        (x, y) = inverse_round(x, y, k);
    }
    Block::from_words([x, y])
}

// =============================================================================
// TESTS
// =============================================================================
