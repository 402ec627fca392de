use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of content characters kept by [`DuplicateCodeFragment::preview`].
pub const PREVIEW_CHARS: usize = 100;

/// Where a fragment occurs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeLocation {
    pub document_id: String,
    pub document_name: String,
    /// 1-based line number of the first fragment line in the original text.
    pub start_line: usize,
    /// 1-based line number of the last fragment line, inclusive.
    pub end_line: usize,
}

impl fmt::Display for CodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (lines {}-{})",
            self.document_name, self.start_line, self.end_line
        )
    }
}

/// A block of lines found verbatim in several documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DuplicateCodeFragment {
    /// The fragment text, trimmed. Also its identity.
    pub content: String,
    /// SHA-256 hex digest of `content`.
    pub digest: String,
    pub line_count: usize,
    /// Distinct documents containing the fragment; equals `locations.len()`.
    pub occurrence_count: usize,
    /// First occurrence per document, in document input order.
    pub locations: Vec<CodeLocation>,
}

impl DuplicateCodeFragment {
    /// Short display form: the first [`PREVIEW_CHARS`] characters with
    /// `...` appended when cut, leading spaces and tabs removed from every
    /// line.
    pub fn preview(&self) -> String {
        let mut preview: String = self.content.chars().take(PREVIEW_CHARS).collect();
        if self.content.chars().nth(PREVIEW_CHARS).is_some() {
            preview.push_str("...");
        }
        preview
            .split('\n')
            .map(|line| line.trim_start_matches([' ', '\t', '\r']))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

/// Output of a duplicate fragment analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DuplicateAnalysisResult {
    /// Sorted by occurrence count descending, then line count descending,
    /// then content.
    pub fragments: Vec<DuplicateCodeFragment>,
    pub total_fragments: usize,
    /// Sum of `occurrence_count` over all fragments.
    pub total_occurrences: usize,
}

impl DuplicateAnalysisResult {
    pub fn new(fragments: Vec<DuplicateCodeFragment>) -> Self {
        let total_fragments = fragments.len();
        let total_occurrences = fragments.iter().map(|f| f.occurrence_count).sum();
        Self {
            fragments,
            total_fragments,
            total_occurrences,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
