//! # codedup matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` runs the pairwise similarity sweep over a document set and
//! turns the surviving pairs into views a reviewer can work through.
//!
//! ## Core Types
//!
//! - [`Algorithm`]: the closed set of similarity measures:
//!   - `Winnowing`: Jaccard overlap of winnowing anchors.
//!   - `SimHash`: Hamming similarity of 64-bit SimHashes.
//!   - `ShingleCosine`: cosine of character-shingle count vectors.
//! - [`CompareConfig`]: algorithm, threshold, shingle width `k`, window `w`
//!   and the parallelism/language knobs.
//! - [`Comparator`]: validated comparator; [`Comparator::compare_documents`]
//!   produces a [`ComparisonReport`].
//! - [`CancelToken`]: cooperative cancellation for long sweeps.
//! - [`center_clusters`], [`partition`], [`rank_pairs`] and [`build_views`]:
//!   the grouped views.
//!
//! ## Example Usage
//!
//! ```
//! use ingest::{Document, Language};
//! use matcher::{build_views, Algorithm, CancelToken, Comparator, CompareConfig};
//!
//! let lang = Language::new("Text");
//! let docs = vec![
//!     Document::new("A", "a.txt", lang.clone(), "the quick brown fox"),
//!     Document::new("B", "b.txt", lang.clone(), "the quick brown fox jumps"),
//!     Document::new("C", "c.txt", lang, "completely unrelated text"),
//! ];
//!
//! let cfg = CompareConfig::new(Algorithm::ShingleCosine).with_threshold(0.5);
//! let report = Comparator::new(cfg)?.compare_documents(&docs, &CancelToken::new())?;
//! let views = build_views(&docs, &report.pairs);
//!
//! assert_eq!(views.clusters.len(), 1);
//! assert_eq!(views.partition.clean, vec!["C"]);
//! # Ok::<(), matcher::MatchError>(())
//! ```
//!
//! ## Determinism
//!
//! Signatures are computed once per document per run. The pair sweep may run
//! on the rayon pool, but results are always re-sorted (similarity
//! descending, then ids) before they leave the crate, so parallel and serial
//! runs return identical reports.
//!
//! ## Observability
//!
//! Install a [`MatchMetrics`] implementation via [`set_match_metrics`] to
//! record per-sweep latency and counts.

mod cancel;
pub mod cluster;
pub mod engine;
pub mod metrics;
pub mod types;

pub use crate::cancel::CancelToken;
pub use crate::cluster::{
    build_views, center_clusters, partition, rank_pairs, ClusterGroup, ClusterViews, Partition,
};
pub use crate::engine::{compare_documents, Comparator};
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::types::{
    Algorithm, CompareConfig, ComparisonReport, MatchError, PairSimilarity, DEFAULT_THRESHOLD,
};
