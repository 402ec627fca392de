//! YAML configuration file support for codedup.
//!
//! A single file configures both analyses. Every field is optional and falls
//! back to the library defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # codedup analysis configuration
//! version: "1.0"
//! name: "course submissions"
//!
//! comparison:
//!   algorithm: "shingle_cosine"   # winnowing | simhash | shingle_cosine
//!   threshold: 0.8
//!   k: 5
//!   w: 4
//!   use_parallel: true
//!   same_language_only: true
//!
//! fragments:
//!   min_lines: 3
//!   min_occurrences: 2
//!   min_chars: 20
//! ```

use std::fs;
use std::path::Path;

use fragments::{FragmentConfig, DEFAULT_MIN_CHARS, DEFAULT_MIN_LINES, DEFAULT_MIN_OCCURRENCES};
use matcher::{Algorithm, CompareConfig, DEFAULT_THRESHOLD};
use perceptual::{DEFAULT_K, DEFAULT_W};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct CodedupConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Pairwise comparison settings
    #[serde(default)]
    pub comparison: ComparisonYamlConfig,

    /// Duplicate fragment extraction settings
    #[serde(default)]
    pub fragments: FragmentsYamlConfig,
}

impl CodedupConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: CodedupConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.comparison.validate()?;
        self.fragments.validate()?;
        Ok(())
    }

    /// Runtime configuration for the pairwise comparison.
    pub fn compare_config(&self) -> CompareConfig {
        let c = &self.comparison;
        CompareConfig {
            algorithm: c.algorithm,
            threshold: c.threshold,
            k: c.k,
            w: c.w,
            use_parallel: c.use_parallel,
            same_language_only: c.same_language_only,
        }
    }

    /// Runtime configuration for fragment extraction.
    pub fn fragment_config(&self) -> FragmentConfig {
        FragmentConfig {
            min_lines: self.fragments.min_lines,
            min_occurrences: self.fragments.min_occurrences,
            min_chars: self.fragments.min_chars,
        }
    }
}

impl Default for CodedupConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            comparison: ComparisonYamlConfig::default(),
            fragments: FragmentsYamlConfig::default(),
        }
    }
}

/// Comparison YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonYamlConfig {
    #[serde(default)]
    pub algorithm: Algorithm,

    #[serde(default = "default_threshold")]
    pub threshold: f64,

    #[serde(default = "default_k")]
    pub k: usize,

    #[serde(default = "default_w")]
    pub w: usize,

    #[serde(default = "true_value")]
    pub use_parallel: bool,

    #[serde(default = "true_value")]
    pub same_language_only: bool,
}

impl ComparisonYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigLoadError::Validation(format!(
                "comparison.threshold must be within [0, 1] (got {})",
                self.threshold
            )));
        }
        if self.k == 0 {
            return Err(ConfigLoadError::Validation(
                "comparison.k must be >= 1".to_string(),
            ));
        }
        if self.w == 0 {
            return Err(ConfigLoadError::Validation(
                "comparison.w must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ComparisonYamlConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            threshold: default_threshold(),
            k: default_k(),
            w: default_w(),
            use_parallel: true,
            same_language_only: true,
        }
    }
}

/// Fragment extraction YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FragmentsYamlConfig {
    #[serde(default = "default_min_lines")]
    pub min_lines: usize,

    #[serde(default = "default_min_occurrences")]
    pub min_occurrences: usize,

    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

impl FragmentsYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.min_lines == 0 {
            return Err(ConfigLoadError::Validation(
                "fragments.min_lines must be >= 1".to_string(),
            ));
        }
        if self.min_occurrences < 2 {
            return Err(ConfigLoadError::Validation(
                "fragments.min_occurrences must be >= 2".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for FragmentsYamlConfig {
    fn default() -> Self {
        Self {
            min_lines: default_min_lines(),
            min_occurrences: default_min_occurrences(),
            min_chars: default_min_chars(),
        }
    }
}

fn true_value() -> bool {
    true
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_k() -> usize {
    DEFAULT_K
}

fn default_w() -> usize {
    DEFAULT_W
}

fn default_min_lines() -> usize {
    DEFAULT_MIN_LINES
}

fn default_min_occurrences() -> usize {
    DEFAULT_MIN_OCCURRENCES
}

fn default_min_chars() -> usize {
    DEFAULT_MIN_CHARS
}
