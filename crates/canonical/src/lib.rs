//! codedup canonical text layer.
//!
//! Every similarity algorithm in codedup looks at a document through a
//! normalized view of its text. This crate owns those views so that the
//! algorithms never disagree about what "the same text" means.
//!
//! ## What we do
//!
//! - Alphanumeric streams (lowercased, everything else dropped) for winnowing
//! - Shingle text (lowercased letters/digits, whitespace runs collapsed to a
//!   single space, punctuation dropped) for shingle cosine
//! - Delimiter tokenization (case-folded) for SimHash
//! - Line splitting that keeps original 1-based line numbers for fragment
//!   extraction
//! - SHA-256 content digests for stable fragment identifiers
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Same text in, same output
//! out, on any machine.
//!
//! Comment stripping and rich-format extraction are deliberately not here;
//! callers hand us text that is already clean.

mod hash;
mod lines;
mod normalize;
mod token;

pub use crate::hash::{content_digest, digest64};
pub use crate::lines::{split_lines, SourceLine};
pub use crate::normalize::{alphanumeric_stream, shingle_text};
pub use crate::token::{simhash_tokens, SIMHASH_DELIMITERS};
