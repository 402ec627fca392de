//! Polynomial rolling hash over a sliding character window.
//!
//! ```text
//! H(c_0 .. c_{k-1}) = (c_0 * B^(k-1) + c_1 * B^(k-2) + ... + c_{k-1}) mod M
//! ```
//!
//! Sliding by one character removes `c_0 * B^(k-1)` and folds in the new
//! character in O(1).

use std::collections::VecDeque;

use crate::config::PerceptualError;

/// Polynomial base.
pub const ROLLING_BASE: u64 = 257;

/// Prime modulus. Every hash value is below it and therefore fits in a `u32`.
pub const ROLLING_MODULUS: u64 = 1_000_000_007;

/// Incremental hash of the last `k` characters pushed.
#[derive(Debug, Clone)]
pub struct RollingHasher {
    k: usize,
    window: VecDeque<u64>,
    // B^(k-1) mod M, weight of the character about to leave the window.
    leading_power: u64,
    value: u64,
}

impl RollingHasher {
    /// Create a hasher over a window of `k` characters.
    pub fn new(k: usize) -> Result<Self, PerceptualError> {
        if k == 0 {
            return Err(PerceptualError::InvalidConfigK { k });
        }
        let mut leading_power = 1u64;
        for _ in 1..k {
            leading_power = leading_power * ROLLING_BASE % ROLLING_MODULUS;
        }
        Ok(Self {
            k,
            window: VecDeque::with_capacity(k),
            leading_power,
            value: 0,
        })
    }

    /// Push a character, evicting the oldest one when the window is full.
    ///
    /// Returns the hash of the current window once `k` characters have been
    /// seen, `None` while the window is still filling.
    pub fn push(&mut self, ch: char) -> Option<u32> {
        let incoming = u64::from(ch as u32);
        if self.window.len() == self.k {
            if let Some(outgoing) = self.window.pop_front() {
                let contribution = outgoing % ROLLING_MODULUS * self.leading_power % ROLLING_MODULUS;
                // Add M before reducing so the subtraction never underflows.
                self.value = (self.value + ROLLING_MODULUS - contribution) % ROLLING_MODULUS;
            }
        }
        self.window.push_back(incoming);
        self.value = (self.value * ROLLING_BASE + incoming) % ROLLING_MODULUS;

        if self.is_full() {
            Some(self.value())
        } else {
            None
        }
    }

    /// Current hash value.
    pub fn value(&self) -> u32 {
        self.value as u32
    }

    /// Whether `k` characters have been seen.
    pub fn is_full(&self) -> bool {
        self.window.len() == self.k
    }

    /// Window width.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Clear the window so the hasher can be reused on another stream.
    pub fn reset(&mut self) {
        self.window.clear();
        self.value = 0;
    }
}

/// Hash a window from scratch; the O(k) reference the rolling update must match.
pub fn hash_window(chars: &[char]) -> u32 {
    let mut value = 0u64;
    for &ch in chars {
        value = (value * ROLLING_BASE + u64::from(ch as u32)) % ROLLING_MODULUS;
    }
    value as u32
}
