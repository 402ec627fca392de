//! Document model.
//!
//! A [`Document`] is what every similarity stage reads: an id, a display
//! name, a [`Language`] tag and the already-cleaned text. The core never
//! mutates documents.

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Identity and labelling of a document, without its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub id: String,
    pub name: String,
    pub language: Language,
}

impl DocumentMeta {
    pub fn new(id: impl Into<String>, name: impl Into<String>, language: Language) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            language,
        }
    }
}

/// A document with cleaned text, ready for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    /// Display name, usually the file name.
    pub name: String,
    pub language: Language,
    pub text: String,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        language: Language,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            language,
            text: text.into(),
        }
    }

    /// Attach `text` to existing metadata.
    pub fn from_meta(meta: DocumentMeta, text: impl Into<String>) -> Self {
        Self {
            id: meta.id,
            name: meta.name,
            language: meta.language,
            text: text.into(),
        }
    }

    pub fn meta(&self) -> DocumentMeta {
        DocumentMeta::new(self.id.clone(), self.name.clone(), self.language.clone())
    }

    /// True when the text holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
