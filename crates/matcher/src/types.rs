use ingest::IngestError;
use perceptual::{PerceptualError, DEFAULT_K, DEFAULT_W};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default similarity threshold for reporting a pair.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Similarity algorithm used for a comparison run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Jaccard overlap of winnowing anchor hashes.
    #[default]
    Winnowing,
    /// `1 - hamming / 64` over 64-bit SimHash values.
    #[serde(rename = "simhash")]
    SimHash,
    /// Cosine similarity of character-shingle count vectors.
    ShingleCosine,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Winnowing => "winnowing",
            Algorithm::SimHash => "simhash",
            Algorithm::ShingleCosine => "shingle_cosine",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for one comparison run.
///
/// `k` is the shingle width for both Winnowing and ShingleCosine; `w` is the
/// winnowing window. Both are validated regardless of the chosen algorithm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompareConfig {
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Minimum similarity for a pair to be reported, in `[0, 1]`.
    #[serde(default = "CompareConfig::default_threshold")]
    pub threshold: f64,
    #[serde(default = "CompareConfig::default_k")]
    pub k: usize,
    #[serde(default = "CompareConfig::default_w")]
    pub w: usize,
    /// Spread the pair sweep over the rayon pool.
    #[serde(default = "CompareConfig::default_true")]
    pub use_parallel: bool,
    /// Only compare documents whose language tags are equal.
    #[serde(default = "CompareConfig::default_true")]
    pub same_language_only: bool,
}

impl CompareConfig {
    pub(crate) fn default_threshold() -> f64 {
        DEFAULT_THRESHOLD
    }

    pub(crate) fn default_k() -> usize {
        DEFAULT_K
    }

    pub(crate) fn default_w() -> usize {
        DEFAULT_W
    }

    pub(crate) fn default_true() -> bool {
        true
    }

    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_w(mut self, w: usize) -> Self {
        self.w = w;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn with_same_language_only(mut self, same_language_only: bool) -> Self {
        self.same_language_only = same_language_only;
        self
    }

    pub fn winnowing(&self) -> perceptual::WinnowingConfig {
        perceptual::WinnowingConfig { k: self.k, w: self.w }
    }

    pub fn shingle(&self) -> perceptual::ShingleConfig {
        perceptual::ShingleConfig { k: self.k }
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(MatchError::InvalidThreshold {
                threshold: self.threshold,
            });
        }
        self.winnowing().validate()?;
        self.shingle().validate()?;
        Ok(())
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            threshold: DEFAULT_THRESHOLD,
            k: DEFAULT_K,
            w: DEFAULT_W,
            use_parallel: true,
            same_language_only: true,
        }
    }
}

/// Similarity of one document pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PairSimilarity {
    /// The pair member that comes first in input order.
    pub id_a: String,
    pub id_b: String,
    pub similarity: f64,
    pub algorithm: Algorithm,
}

impl PairSimilarity {
    /// True when `id` is either endpoint.
    pub fn involves(&self, id: &str) -> bool {
        self.id_a == id || self.id_b == id
    }
}

/// Outcome of a pairwise sweep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonReport {
    pub algorithm: Algorithm,
    pub threshold: f64,
    /// Pairs at or above the threshold, sorted by similarity descending,
    /// then by `(id_a, id_b)`.
    pub pairs: Vec<PairSimilarity>,
    /// Eligible pairs whose similarity was actually computed.
    pub pairs_evaluated: usize,
    /// Pairs skipped because their language tags differ.
    pub skipped_cross_language: usize,
    /// The sweep stopped early; `pairs` holds what finished before that.
    pub cancelled: bool,
}

/// Errors produced by the matching layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("invalid config: threshold must be within [0, 1] (got {threshold})")]
    InvalidThreshold { threshold: f64 },
    /// Shingle width or window out of range.
    #[error(transparent)]
    Perceptual(#[from] PerceptualError),
    /// The document set is structurally invalid.
    #[error("invalid document set: {0}")]
    Ingest(#[from] IngestError),
}
