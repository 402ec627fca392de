//! Configuration and error types for codedup similarity fingerprints.
//!
//! This module is free of any I/O or environment-dependent behavior so that
//! every fingerprint is a pure function of `(text, config)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default shingle length in characters.
pub const DEFAULT_K: usize = 5;

/// Default winnowing window in hashes.
pub const DEFAULT_W: usize = 4;

/// Parameters for winnowing fingerprints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnowingConfig {
    /// Characters per shingle.
    ///
    /// Two documents are guaranteed to share an anchor when they share a
    /// normalized substring of at least `k + w - 1` characters.
    pub k: usize,
    /// Number of consecutive shingle hashes per selection window.
    ///
    /// Larger windows keep fewer anchors.
    pub w: usize,
}

impl WinnowingConfig {
    /// Create a configuration with the defaults (`k = 5`, `w = 4`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shingle length.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the window size.
    pub fn with_w(mut self, w: usize) -> Self {
        self.w = w;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), PerceptualError> {
        if self.k < 1 {
            return Err(PerceptualError::InvalidConfigK { k: self.k });
        }
        if self.w < 1 {
            return Err(PerceptualError::InvalidConfigW { w: self.w });
        }
        Ok(())
    }

    /// Shortest shared normalized substring guaranteed to produce a common anchor.
    pub fn guarantee_threshold(&self) -> usize {
        self.k + self.w - 1
    }
}

impl Default for WinnowingConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            w: DEFAULT_W,
        }
    }
}

/// Parameters for character-shingle cosine similarity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShingleConfig {
    /// Characters per shingle.
    pub k: usize,
}

impl ShingleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), PerceptualError> {
        if self.k < 1 {
            return Err(PerceptualError::InvalidConfigK { k: self.k });
        }
        Ok(())
    }
}

impl Default for ShingleConfig {
    fn default() -> Self {
        Self { k: DEFAULT_K }
    }
}

/// Errors returned by the fingerprinting layer.
///
/// Only configuration problems are errors. Short or empty text always
/// produces a well-defined empty fingerprint instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PerceptualError {
    #[error("invalid config: k must be >= 1 (got {k})")]
    InvalidConfigK { k: usize },

    #[error("invalid config: w must be >= 1 (got {w})")]
    InvalidConfigW { w: usize },
}
