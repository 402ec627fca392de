//! Hashing helpers.
//!
//! # Algorithms
//!
//! ```text
//! content_digest(text) = hex(SHA-256(text_bytes))
//! digest64(text)       = u64::from_le_bytes(SHA-256(text_bytes)[0..8])
//! ```
//!
//! SHA-256 is used for its bit dispersion, not for collision resistance;
//! nothing in codedup relies on these values being secure.

use sha2::{Digest, Sha256};

/// Hex SHA-256 of `text`, used as a stable identifier for fragment content.
///
/// ```rust
/// use canonical::content_digest;
///
/// let digest = content_digest("hello world");
/// assert_eq!(digest.len(), 64);
/// ```
pub fn content_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// First eight bytes of SHA-256 over `text`, read little endian.
///
/// Feeds the per-token bit votes of SimHash.
pub fn digest64(text: &str) -> u64 {
    let digest = Sha256::digest(text.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_digest_matches_known_vector() {
        assert_eq!(
            content_digest(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn digest64_reads_digest_prefix_little_endian() {
        // SHA-256("") starts with e3 b0 c4 42 98 fc 1c 14.
        assert_eq!(digest64(""), 0x141c_fc98_42c4_b0e3);
    }

    #[test]
    fn digest64_disperses_similar_inputs() {
        let a = digest64("token");
        let b = digest64("tokens");
        assert!((a ^ b).count_ones() > 8);
    }
}
