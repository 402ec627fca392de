//! Winnowing fingerprint types.
//!
//! A fingerprint is the ordered list of anchors selected by winnowing. The
//! order is the order of selection (increasing position), which keeps the
//! representation stable for a given input and configuration.

use serde::{Deserialize, Serialize};

use crate::config::WinnowingConfig;

/// A selected shingle hash and the position of the shingle's first
/// character in the normalized alphanumeric stream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub hash: u32,
    pub position: usize,
}

/// Winnowing fingerprint of one document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fingerprint {
    /// Anchors in selection order. No two consecutive anchors share a position.
    pub anchors: Vec<Anchor>,
    /// Configuration the fingerprint was produced with.
    pub config: WinnowingConfig,
}

impl Fingerprint {
    /// Fingerprint with no anchors, the result for text too short to fill one window.
    pub fn empty(config: WinnowingConfig) -> Self {
        Self {
            anchors: Vec::new(),
            config,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Distinct anchor hashes, sorted ascending.
    pub fn hash_set(&self) -> Vec<u32> {
        let mut hashes: Vec<u32> = self.anchors.iter().map(|a| a.hash).collect();
        hashes.sort_unstable();
        hashes.dedup();
        hashes
    }

    /// Jaccard overlap of the two anchor-hash sets.
    pub fn jaccard(&self, other: &Fingerprint) -> f64 {
        jaccard_sorted(&self.hash_set(), &other.hash_set())
    }
}

/// Jaccard overlap `|A ∩ B| / |A ∪ B|` of two sorted, de-duplicated slices.
///
/// Returns 0.0 when both sets are empty.
pub fn jaccard_sorted(a: &[u32], b: &[u32]) -> f64 {
    let (mut i, mut j) = (0usize, 0usize);
    let mut shared = 0usize;
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                shared += 1;
                i += 1;
                j += 1;
            }
        }
    }
    let union = a.len() + b.len() - shared;
    if union == 0 {
        0.0
    } else {
        shared as f64 / union as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(hashes: &[u32]) -> Fingerprint {
        Fingerprint {
            anchors: hashes
                .iter()
                .enumerate()
                .map(|(position, &hash)| Anchor { hash, position })
                .collect(),
            config: WinnowingConfig::default(),
        }
    }

    #[test]
    fn hash_set_sorts_and_dedups() {
        assert_eq!(fp(&[9, 3, 9, 1]).hash_set(), vec![1, 3, 9]);
    }

    #[test]
    fn jaccard_of_partial_overlap() {
        let a = fp(&[1, 2, 3, 4]);
        let b = fp(&[3, 4, 5, 6]);
        assert!((a.jaccard(&b) - 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn jaccard_ignores_repeated_hashes() {
        let a = fp(&[1, 1, 1, 2]);
        let b = fp(&[1, 2]);
        assert_eq!(a.jaccard(&b), 1.0);
    }

    #[test]
    fn jaccard_of_empty_sets_is_zero() {
        let empty = Fingerprint::empty(WinnowingConfig::default());
        assert_eq!(empty.jaccard(&empty), 0.0);
        assert_eq!(empty.jaccard(&fp(&[1])), 0.0);
    }

    #[test]
    fn fingerprint_serde_roundtrip() {
        let original = fp(&[10, 20]);
        let json = serde_json::to_string(&original).unwrap();
        let back: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(original, back);
    }
}
