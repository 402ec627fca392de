use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of consecutive lines per fragment.
pub const DEFAULT_MIN_LINES: usize = 3;
/// Default number of distinct documents a fragment must appear in.
pub const DEFAULT_MIN_OCCURRENCES: usize = 2;
/// Fragments whose trimmed text is shorter than this are ignored.
pub const DEFAULT_MIN_CHARS: usize = 20;

/// Configuration for duplicate fragment extraction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FragmentConfig {
    /// Window size `L` in non-trivial lines.
    pub min_lines: usize,
    /// Minimum number of distinct documents `M`.
    pub min_occurrences: usize,
    /// Minimum trimmed length, in characters.
    pub min_chars: usize,
}

impl FragmentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_lines(mut self, min_lines: usize) -> Self {
        self.min_lines = min_lines;
        self
    }

    pub fn with_min_occurrences(mut self, min_occurrences: usize) -> Self {
        self.min_occurrences = min_occurrences;
        self
    }

    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    pub fn validate(&self) -> Result<(), FragmentError> {
        if self.min_lines < 1 {
            return Err(FragmentError::InvalidMinLines {
                min_lines: self.min_lines,
            });
        }
        if self.min_occurrences < 2 {
            return Err(FragmentError::InvalidMinOccurrences {
                min_occurrences: self.min_occurrences,
            });
        }
        Ok(())
    }
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            min_lines: DEFAULT_MIN_LINES,
            min_occurrences: DEFAULT_MIN_OCCURRENCES,
            min_chars: DEFAULT_MIN_CHARS,
        }
    }
}

/// Errors produced by fragment extraction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FragmentError {
    #[error("invalid config: min_lines must be >= 1 (got {min_lines})")]
    InvalidMinLines { min_lines: usize },
    #[error("invalid config: min_occurrences must be >= 2 (got {min_occurrences})")]
    InvalidMinOccurrences { min_occurrences: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = FragmentConfig::default();
        assert_eq!((cfg.min_lines, cfg.min_occurrences, cfg.min_chars), (3, 2, 20));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_lines_rejected() {
        assert_eq!(
            FragmentConfig::new().with_min_lines(0).validate(),
            Err(FragmentError::InvalidMinLines { min_lines: 0 })
        );
    }

    #[test]
    fn single_occurrence_rejected() {
        assert_eq!(
            FragmentConfig::new().with_min_occurrences(1).validate(),
            Err(FragmentError::InvalidMinOccurrences { min_occurrences: 1 })
        );
    }
}
