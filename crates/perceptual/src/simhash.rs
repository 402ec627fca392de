//! SimHash: 64-bit locality-sensitive fingerprints.
//!
//! Each token votes on every bit of the output: +1 where its 64-bit digest
//! has the bit set, -1 where it does not. The sign of each tally becomes the
//! output bit. Documents with overlapping token multisets land a small
//! Hamming distance apart.

use serde::{Deserialize, Serialize};

use canonical::{digest64, simhash_tokens};

/// Number of bits in a SimHash.
pub const SIMHASH_BITS: u32 = 64;

/// A 64-bit SimHash value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct SimHash(pub u64);

impl SimHash {
    /// Hamming distance between two hashes (XOR + popcount).
    pub fn hamming_distance(&self, other: &Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    /// `1 - hamming / 64`, in `[0, 1]`.
    pub fn similarity(&self, other: &Self) -> f64 {
        1.0 - f64::from(self.hamming_distance(other)) / f64::from(SIMHASH_BITS)
    }
}

/// SimHash of `text` tokenized with [`canonical::simhash_tokens`].
///
/// Text without tokens hashes to `SimHash(0)`.
pub fn simhash(text: &str) -> SimHash {
    let tokens = simhash_tokens(text);
    simhash_tokens_iter(tokens.iter().map(String::as_str))
}

/// SimHash of `text`, or `None` when it has no tokens.
///
/// Comparisons use this so that empty text scores 0.0 against anything
/// instead of matching every other empty text at distance zero.
pub fn simhash_nonempty(text: &str) -> Option<SimHash> {
    let tokens = simhash_tokens(text);
    if tokens.is_empty() {
        return None;
    }
    Some(simhash_tokens_iter(tokens.iter().map(String::as_str)))
}

/// SimHash of an already tokenized stream.
pub fn simhash_tokens_iter<'a, I>(tokens: I) -> SimHash
where
    I: IntoIterator<Item = &'a str>,
{
    let mut tally = [0i64; SIMHASH_BITS as usize];
    for token in tokens {
        let digest = digest64(token);
        for (bit, slot) in tally.iter_mut().enumerate() {
            if (digest >> bit) & 1 == 1 {
                *slot += 1;
            } else {
                *slot -= 1;
            }
        }
    }

    let mut out = 0u64;
    for (bit, &count) in tally.iter().enumerate() {
        if count > 0 {
            out |= 1u64 << bit;
        }
    }
    SimHash(out)
}
