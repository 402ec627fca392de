//! # codedup ingest
//!
//! Turns a caller's document listing into the [`Document`] set that the
//! comparison and fragment stages read.
//!
//! ## What we do
//!
//! - Pair each [`DocumentMeta`] with its text from a [`ContentSource`]
//! - Substitute empty text for documents whose content is missing, so one
//!   unreadable file never aborts a batch
//! - Reject structurally broken sets (empty or duplicate ids)
//! - Derive [`Language`] tags from file extensions
//!
//! Text cleaning (comment stripping, rich-format extraction) happens before
//! this crate sees anything.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use ingest::{assemble, DocumentMeta, Language};
//!
//! let metas = vec![
//!     DocumentMeta::new("1", "a.py", Language::from_extension("py")),
//!     DocumentMeta::new("2", "b.py", Language::from_extension("py")),
//! ];
//! let mut texts = BTreeMap::new();
//! texts.insert("1".to_string(), "print('hi')".to_string());
//!
//! let docs = assemble(metas, &texts).unwrap();
//! assert_eq!(docs[1].text, "");
//! ```

mod error;
mod language;
mod types;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Instant;

use tracing::{debug, info, warn, Level};

pub use crate::error::IngestError;
pub use crate::language::Language;
pub use crate::types::{Document, DocumentMeta};

/// Lookup of cleaned text by document id.
///
/// Returning `None` means the content could not be produced; assembly then
/// treats the document as empty.
pub trait ContentSource {
    fn load(&self, id: &str) -> Option<String>;
}

impl ContentSource for HashMap<String, String> {
    fn load(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

impl ContentSource for BTreeMap<String, String> {
    fn load(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

impl<F> ContentSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn load(&self, id: &str) -> Option<String> {
        self(id)
    }
}

/// Build the document set from metadata and a content source.
///
/// Input order is preserved. The set is validated with
/// [`validate_documents`] before any content is loaded.
pub fn assemble<S>(metas: Vec<DocumentMeta>, source: &S) -> Result<Vec<Document>, IngestError>
where
    S: ContentSource + ?Sized,
{
    let start = Instant::now();
    let span = tracing::span!(Level::INFO, "ingest.assemble", documents = metas.len());
    let _guard = span.enter();

    if let Err(err) = validate_ids(metas.iter().map(|m| m.id.as_str())) {
        let elapsed_micros = start.elapsed().as_micros();
        warn!(error = %err, elapsed_micros, "ingest_failure");
        return Err(err);
    }

    let mut missing = 0usize;
    let docs: Vec<Document> = metas
        .into_iter()
        .map(|meta| match source.load(&meta.id) {
            Some(text) => {
                debug!(doc_id = %meta.id, len = text.len(), "document_loaded");
                Document::from_meta(meta, text)
            }
            None => {
                missing += 1;
                warn!(doc_id = %meta.id, name = %meta.name, "missing_content_treated_as_empty");
                Document::from_meta(meta, String::new())
            }
        })
        .collect();

    let elapsed_micros = start.elapsed().as_micros();
    info!(
        documents = docs.len(),
        missing,
        elapsed_micros,
        "ingest_success"
    );
    Ok(docs)
}

/// Check that every id is non-empty and unique.
pub fn validate_documents(docs: &[Document]) -> Result<(), IngestError> {
    validate_ids(docs.iter().map(|d| d.id.as_str()))
}

fn validate_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Result<(), IngestError> {
    let mut seen = HashSet::new();
    for (index, id) in ids.enumerate() {
        if id.trim().is_empty() {
            return Err(IngestError::MissingDocId { index });
        }
        if !seen.insert(id) {
            return Err(IngestError::DuplicateDocId(id.to_string()));
        }
    }
    Ok(())
}
