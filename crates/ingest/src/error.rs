//! Error types produced by the ingest crate.
//!
//! Assembly only fails on structural problems with the document set itself.
//! Missing or empty content is never an error: such documents are carried
//! forward with empty text and simply never match anything.
//!
//! | Error | Description |
//! |-------|-------------|
//! | [`MissingDocId`](IngestError::MissingDocId) | A document id is empty or whitespace-only |
//! | [`DuplicateDocId`](IngestError::DuplicateDocId) | Two documents share the same id |
//!
//! ```rust
//! use ingest::{validate_documents, Document, IngestError, Language};
//!
//! let docs = vec![
//!     Document::new("a", "a.cs", Language::new("C#"), "x"),
//!     Document::new("a", "b.cs", Language::new("C#"), "y"),
//! ];
//! assert_eq!(
//!     validate_documents(&docs),
//!     Err(IngestError::DuplicateDocId("a".into()))
//! );
//! ```

use thiserror::Error;

/// Structural errors in a document set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// The document at `index` has an empty id.
    #[error("document at index {index} has an empty id")]
    MissingDocId { index: usize },

    /// The id appears more than once in the set. Pair and cluster output is
    /// keyed by id, so ids must be unique.
    #[error("duplicate document id '{0}'")]
    DuplicateDocId(String),
}
