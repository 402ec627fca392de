//! Workspace umbrella crate for codedup.
//!
//! This crate stitches document assembly, pairwise comparison, clustering
//! and duplicate fragment extraction together so callers can run a whole
//! analysis through a single entry point.

pub mod config;

pub use canonical::{content_digest, split_lines, SourceLine};
pub use fragments::{
    extract_fragments, extract_fragments_with_filter, BlankLineFilter, CodeLocation,
    DuplicateAnalysisResult, DuplicateCodeFragment, FragmentConfig, FragmentError, LineFilter,
    PunctuationLineFilter,
};
pub use ingest::{
    assemble, validate_documents, ContentSource, Document, DocumentMeta, IngestError, Language,
};
pub use matcher::{
    build_views, center_clusters, partition, rank_pairs, set_match_metrics, Algorithm,
    CancelToken, ClusterGroup, ClusterViews, Comparator, CompareConfig, ComparisonReport,
    MatchError, MatchMetrics, PairSimilarity, Partition,
};
pub use perceptual::{
    shingle_cosine, simhash, winnow, Fingerprint, PerceptualError, ShingleConfig, ShingleVector,
    SimHash, WinnowingConfig,
};

pub use crate::config::{CodedupConfig, ConfigLoadError};

use std::error::Error;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Errors that can occur while running an analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Ingest(IngestError),
    Match(MatchError),
    Fragment(FragmentError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Ingest(err) => write!(f, "document assembly failed: {err}"),
            PipelineError::Match(err) => write!(f, "pairwise comparison failed: {err}"),
            PipelineError::Fragment(err) => write!(f, "fragment extraction failed: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Ingest(err) => Some(err),
            PipelineError::Match(err) => Some(err),
            PipelineError::Fragment(err) => Some(err),
        }
    }
}

impl From<IngestError> for PipelineError {
    fn from(value: IngestError) -> Self {
        PipelineError::Ingest(value)
    }
}

impl From<MatchError> for PipelineError {
    fn from(value: MatchError) -> Self {
        PipelineError::Match(value)
    }
}

impl From<FragmentError> for PipelineError {
    fn from(value: FragmentError) -> Self {
        PipelineError::Fragment(value)
    }
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_assemble(&self, latency: Duration, result: Result<(), IngestError>);
    fn record_comparison(&self, latency: Duration, result: Result<(), MatchError>);
    fn record_fragments(&self, latency: Duration, result: Result<(), FragmentError>);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_assemble(self, result: Result<(), IngestError>) {
        self.recorder.record_assemble(self.start.elapsed(), result);
    }

    fn record_comparison(self, result: Result<(), MatchError>) {
        self.recorder.record_comparison(self.start.elapsed(), result);
    }

    fn record_fragments(self, result: Result<(), FragmentError>) {
        self.recorder.record_fragments(self.start.elapsed(), result);
    }
}

/// Pairwise comparison together with its grouped views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonOutcome {
    pub report: ComparisonReport,
    pub clusters: Vec<ClusterGroup>,
    pub partition: Partition,
}

/// Everything one analysis run produces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub documents: Vec<DocumentMeta>,
    pub comparison: ComparisonOutcome,
    pub fragments: DuplicateAnalysisResult,
}

/// Assemble documents, recording the stage with the metrics hook.
pub fn assemble_documents<S>(
    metas: Vec<DocumentMeta>,
    source: &S,
) -> Result<Vec<Document>, PipelineError>
where
    S: ContentSource + ?Sized,
{
    let metrics = MetricsSpan::start();
    match assemble(metas, source) {
        Ok(docs) => {
            if let Some(span) = metrics {
                span.record_assemble(Ok(()));
            }
            Ok(docs)
        }
        Err(err) => {
            if let Some(span) = metrics {
                span.record_assemble(Err(err.clone()));
            }
            Err(PipelineError::Ingest(err))
        }
    }
}

/// Compare every eligible pair of `docs` and derive clusters and the
/// clean/flagged partition from the reported pairs.
pub fn run_comparison(
    docs: &[Document],
    cfg: &CompareConfig,
    cancel: &CancelToken,
) -> Result<ComparisonOutcome, PipelineError> {
    let metrics = MetricsSpan::start();
    let report = match Comparator::new(cfg.clone()).and_then(|c| c.compare_documents(docs, cancel))
    {
        Ok(report) => {
            if let Some(span) = metrics {
                span.record_comparison(Ok(()));
            }
            report
        }
        Err(err) => {
            if let Some(span) = metrics {
                span.record_comparison(Err(err.clone()));
            }
            return Err(PipelineError::Match(err));
        }
    };

    let views = build_views(docs, &report.pairs);
    Ok(ComparisonOutcome {
        report,
        clusters: views.clusters,
        partition: views.partition,
    })
}

/// Extract duplicate fragments shared by at least `min_occurrences`
/// documents.
pub fn run_fragment_analysis(
    docs: &[Document],
    cfg: &FragmentConfig,
) -> Result<DuplicateAnalysisResult, PipelineError> {
    let metrics = MetricsSpan::start();
    match extract_fragments(docs, cfg) {
        Ok(result) => {
            if let Some(span) = metrics {
                span.record_fragments(Ok(()));
            }
            Ok(result)
        }
        Err(err) => {
            if let Some(span) = metrics {
                span.record_fragments(Err(err.clone()));
            }
            Err(PipelineError::Fragment(err))
        }
    }
}

/// Run a complete analysis: assembly, comparison with clustering, and
/// fragment extraction.
///
/// Both configurations are validated before any document is loaded.
/// Cancellation only shortens the pairwise sweep; fragment extraction still
/// runs on the full set.
pub fn analyze<S>(
    metas: Vec<DocumentMeta>,
    source: &S,
    config: &CodedupConfig,
    cancel: &CancelToken,
) -> Result<AnalysisReport, PipelineError>
where
    S: ContentSource + ?Sized,
{
    let compare_cfg = config.compare_config();
    let fragment_cfg = config.fragment_config();
    compare_cfg.validate()?;
    fragment_cfg.validate()?;

    let docs = assemble_documents(metas, source)?;
    let comparison = run_comparison(&docs, &compare_cfg, cancel)?;
    let fragments = run_fragment_analysis(&docs, &fragment_cfg)?;

    Ok(AnalysisReport {
        documents: docs.iter().map(Document::meta).collect(),
        comparison,
        fragments,
    })
}
