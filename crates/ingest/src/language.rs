//! Language tags.
//!
//! Only documents with equal tags are compared against each other. A tag is
//! an opaque display string; the helpers here derive one from a file
//! extension the way the desktop tool labels its file list.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Language tag attached to a [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Tag for a file extension, with or without the leading dot.
    ///
    /// Known extensions map to display names; anything else becomes the
    /// lowercased extension itself. An empty extension yields an empty tag.
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        let tag = match ext.as_str() {
            "cs" => "C#",
            "py" => "Python",
            "html" | "htm" => "HTML",
            "txt" => "Text",
            "docx" => "DOCX",
            "pdf" => "PDF",
            other => other,
        };
        Self(tag.to_string())
    }

    /// Tag derived from the extension of `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
