//! # codedup perceptual fingerprints
//!
//! Similarity-preserving document fingerprints for near-duplicate detection.
//! Three independent algorithms live here; the matcher crate picks one per
//! comparison run.
//!
//! ## Contract
//!
//! - Every function is a pure function of `(text, config)`: no I/O, no
//!   clocks, no global state.
//! - Empty or very short text is never an error. It produces an empty
//!   fingerprint, a zero SimHash or an empty shingle vector, all of which
//!   compare as 0.0 against anything.
//! - Only invalid configuration (`k < 1`, `w < 1`) is rejected.
//!
//! ## Algorithms
//!
//! 1.  **Winnowing** ([`winnow`]): the text is collapsed to a lowercased
//!     alphanumeric stream, every `k`-character shingle is hashed with a
//!     polynomial [`RollingHasher`], and the minimum of each window of `w`
//!     hashes becomes an [`Anchor`]. Any shared normalized substring of at
//!     least `k + w - 1` characters yields a common anchor. Documents are
//!     compared by Jaccard overlap of their anchor hashes.
//!
//! 2.  **SimHash** ([`simhash`]): tokens vote on each of 64 bits using a
//!     SHA-256 derived digest. Similarity is `1 - hamming / 64`.
//!
//! 3.  **Shingle cosine** ([`ShingleVector`]): sparse `k`-character shingle
//!     counts compared by cosine similarity.
//!
//! None of these hashes are meant to resist deliberate collisions.
//!
//! ## Example Usage
//!
//! ```
//! use perceptual::{simhash, shingle_cosine, winnow, ShingleConfig, WinnowingConfig};
//!
//! let a = "int add(int a, int b) { return a + b; }";
//! let b = "int add(int x, int y) { return x + y; }";
//!
//! let fa = winnow(a, &WinnowingConfig::default()).unwrap();
//! let fb = winnow(b, &WinnowingConfig::default()).unwrap();
//! assert!(fa.jaccard(&fb) > 0.0);
//!
//! assert_eq!(simhash(a).hamming_distance(&simhash(a)), 0);
//! assert_eq!(shingle_cosine(a, a, &ShingleConfig::default()).unwrap(), 1.0);
//! ```

pub mod config;
mod cosine;
pub mod fingerprint;
mod rolling;
mod simhash;
mod winnow;

pub use crate::config::{PerceptualError, ShingleConfig, WinnowingConfig, DEFAULT_K, DEFAULT_W};
pub use crate::cosine::{shingle_cosine, ShingleVector};
pub use crate::fingerprint::{jaccard_sorted, Anchor, Fingerprint};
pub use crate::rolling::{hash_window, RollingHasher, ROLLING_BASE, ROLLING_MODULUS};
pub use crate::simhash::{simhash, simhash_nonempty, simhash_tokens_iter, SimHash, SIMHASH_BITS};
pub use crate::winnow::{select_anchors, shingle_hashes, winnow};
