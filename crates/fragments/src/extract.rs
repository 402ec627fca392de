use std::collections::BTreeMap;
use std::time::Instant;

use canonical::{content_digest, split_lines, SourceLine};
use ingest::Document;
use rayon::prelude::*;
use tracing::{debug, info, warn, Level};

use crate::config::{FragmentConfig, FragmentError};
use crate::filter::{BlankLineFilter, LineFilter};
use crate::types::{CodeLocation, DuplicateAnalysisResult, DuplicateCodeFragment};

/// One window of `min_lines` kept lines from a single document.
struct Candidate {
    key: String,
    start_line: usize,
    end_line: usize,
}

/// Find line blocks shared verbatim by at least `min_occurrences` documents,
/// skipping blank lines.
pub fn extract_fragments(
    docs: &[Document],
    cfg: &FragmentConfig,
) -> Result<DuplicateAnalysisResult, FragmentError> {
    extract_fragments_with_filter(docs, cfg, &BlankLineFilter)
}

/// [`extract_fragments`] with a caller-supplied [`LineFilter`].
///
/// Every document is windowed independently on the rayon pool; grouping
/// happens afterwards on one thread, in document input order, so the output
/// never depends on scheduling.
pub fn extract_fragments_with_filter<F>(
    docs: &[Document],
    cfg: &FragmentConfig,
    filter: &F,
) -> Result<DuplicateAnalysisResult, FragmentError>
where
    F: LineFilter + ?Sized,
{
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "fragments.extract",
        documents = docs.len(),
        min_lines = cfg.min_lines,
        min_occurrences = cfg.min_occurrences
    );
    let _guard = span.enter();

    if let Err(err) = cfg.validate() {
        warn!(error = %err, "fragments_rejected");
        return Err(err);
    }

    let per_doc: Vec<Vec<Candidate>> = docs
        .par_iter()
        .map(|doc| document_candidates(doc, cfg, filter))
        .collect();

    // content -> (last document merged, first location per document).
    // Documents merge one at a time in input order, so a repeat within the
    // current document is always the most recent entry.
    let mut groups: BTreeMap<String, (Option<usize>, Vec<CodeLocation>)> = BTreeMap::new();
    for (doc_idx, (doc, candidates)) in docs.iter().zip(per_doc).enumerate() {
        debug!(doc_id = %doc.id, windows = candidates.len(), "fragment_windows");
        for cand in candidates {
            let (last_doc, locations) = groups.entry(cand.key).or_default();
            if *last_doc != Some(doc_idx) {
                *last_doc = Some(doc_idx);
                locations.push(CodeLocation {
                    document_id: doc.id.clone(),
                    document_name: doc.name.clone(),
                    start_line: cand.start_line,
                    end_line: cand.end_line,
                });
            }
        }
    }

    let mut fragments: Vec<DuplicateCodeFragment> = groups
        .into_iter()
        .filter(|(_, (_, locations))| locations.len() >= cfg.min_occurrences)
        .map(|(content, (_, locations))| DuplicateCodeFragment {
            digest: content_digest(&content),
            line_count: cfg.min_lines,
            occurrence_count: locations.len(),
            locations,
            content,
        })
        .collect();
    // Map iteration already yields content ascending; the stable sort keeps it.
    fragments.sort_by(|a, b| {
        b.occurrence_count
            .cmp(&a.occurrence_count)
            .then_with(|| b.line_count.cmp(&a.line_count))
    });

    let result = DuplicateAnalysisResult::new(fragments);
    let elapsed_micros = start.elapsed().as_micros();
    info!(
        total_fragments = result.total_fragments,
        total_occurrences = result.total_occurrences,
        elapsed_micros,
        "fragments_success"
    );
    Ok(result)
}

fn document_candidates<F>(doc: &Document, cfg: &FragmentConfig, filter: &F) -> Vec<Candidate>
where
    F: LineFilter + ?Sized,
{
    let lines: Vec<SourceLine> = split_lines(&doc.text)
        .into_iter()
        .filter(|line| !filter.is_trivial(&line.text, &doc.language))
        .collect();
    if lines.len() < cfg.min_lines {
        return Vec::new();
    }

    lines
        .windows(cfg.min_lines)
        .filter_map(|window| {
            let joined = window
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            let key = joined.trim();
            if key.chars().count() < cfg.min_chars {
                return None;
            }
            Some(Candidate {
                key: key.to_string(),
                start_line: window[0].number,
                end_line: window[window.len() - 1].number,
            })
        })
        .collect()
}
