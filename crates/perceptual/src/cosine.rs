//! Character-shingle frequency vectors and cosine similarity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use canonical::shingle_text;

use crate::config::{PerceptualError, ShingleConfig};

/// Sparse shingle → count vector. Only non-zero entries are stored.
///
/// Keys are kept ordered so iteration, serialization and the floating point
/// result never depend on hash-map layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShingleVector {
    counts: BTreeMap<String, u32>,
}

impl ShingleVector {
    /// Build the vector for `text` with shingles of `cfg.k` characters.
    pub fn build(text: &str, cfg: &ShingleConfig) -> Result<Self, PerceptualError> {
        cfg.validate()?;

        let normalized: Vec<char> = shingle_text(text).chars().collect();
        let mut counts = BTreeMap::new();
        if normalized.len() >= cfg.k {
            for window in normalized.windows(cfg.k) {
                *counts.entry(window.iter().collect::<String>()).or_insert(0u32) += 1;
            }
        }
        Ok(Self { counts })
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct shingles.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Occurrences of `shingle`, zero when absent.
    pub fn count(&self, shingle: &str) -> u32 {
        self.counts.get(shingle).copied().unwrap_or(0)
    }

    fn squared_norm(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c) * u64::from(c)).sum()
    }

    /// Cosine similarity with `other`, in `[0, 1]`.
    ///
    /// Zero when either vector is empty. The dot product and norms are
    /// accumulated as integers so the result is exactly symmetric, and
    /// proportional vectors score exactly 1.0.
    pub fn cosine(&self, other: &ShingleVector) -> f64 {
        if self.is_empty() || other.is_empty() {
            return 0.0;
        }
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        let dot: u64 = small
            .counts
            .iter()
            .filter_map(|(key, &a)| large.counts.get(key).map(|&b| u64::from(a) * u64::from(b)))
            .sum();
        if dot == 0 {
            return 0.0;
        }

        let na = self.squared_norm();
        let nb = other.squared_norm();
        if na == 0 || nb == 0 {
            return 0.0;
        }
        // Cauchy-Schwarz equality: parallel vectors.
        if u128::from(dot) * u128::from(dot) == u128::from(na) * u128::from(nb) {
            return 1.0;
        }
        let value = dot as f64 / ((na as f64).sqrt() * (nb as f64).sqrt());
        value.clamp(0.0, 1.0)
    }
}

/// Cosine similarity of the character-shingle vectors of two texts.
pub fn shingle_cosine(a: &str, b: &str, cfg: &ShingleConfig) -> Result<f64, PerceptualError> {
    let va = ShingleVector::build(a, cfg)?;
    let vb = ShingleVector::build(b, cfg)?;
    Ok(va.cosine(&vb))
}
