//! # codedup fragments
//!
//! Exact duplicate code detection at the level of line blocks.
//!
//! Each document is split into lines, trivial lines are dropped by a
//! [`LineFilter`], and every run of `min_lines` consecutive remaining lines
//! becomes a candidate. Candidates are grouped by their literal trimmed text.
//! A fragment is reported when it occurs in at least `min_occurrences`
//! distinct documents; repeats inside one document count once and only the
//! first is kept as its location.
//!
//! ```
//! use fragments::{extract_fragments, FragmentConfig};
//! use ingest::{Document, Language};
//!
//! let shared = "let total = 0;\nfor v in values {\n    total += v;\n}";
//! let docs = vec![
//!     Document::new("a", "a.rs", Language::new("rs"), shared),
//!     Document::new("b", "b.rs", Language::new("rs"), format!("fn f() {{}}\n{shared}")),
//! ];
//!
//! let result = extract_fragments(&docs, &FragmentConfig::default()).unwrap();
//! assert!(result.total_fragments > 0);
//! assert_eq!(result.fragments[0].occurrence_count, 2);
//! ```

mod config;
mod extract;
mod filter;
mod types;

pub use crate::config::{
    FragmentConfig, FragmentError, DEFAULT_MIN_CHARS, DEFAULT_MIN_LINES, DEFAULT_MIN_OCCURRENCES,
};
pub use crate::extract::{extract_fragments, extract_fragments_with_filter};
pub use crate::filter::{BlankLineFilter, LineFilter, PunctuationLineFilter};
pub use crate::types::{CodeLocation, DuplicateAnalysisResult, DuplicateCodeFragment, PREVIEW_CHARS};
