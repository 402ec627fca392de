use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use ingest::{validate_documents, Document};
use perceptual::{simhash_nonempty, winnow, ShingleVector, SimHash};
use rayon::prelude::*;
use tracing::{info, warn, Level};

use crate::cancel::CancelToken;
use crate::metrics::metrics_recorder;
use crate::types::{Algorithm, CompareConfig, ComparisonReport, MatchError, PairSimilarity};

#[cfg(test)]
mod tests;

/// Per-document signatures for one run, computed once and indexed like the
/// input slice.
enum Signatures {
    Winnowing(Vec<Vec<u32>>),
    SimHash(Vec<Option<SimHash>>),
    ShingleCosine(Vec<ShingleVector>),
}

impl Signatures {
    fn score(&self, i: usize, j: usize) -> f64 {
        match self {
            Signatures::Winnowing(sets) => perceptual::jaccard_sorted(&sets[i], &sets[j]),
            Signatures::SimHash(hashes) => simhash_score(hashes[i], hashes[j]),
            Signatures::ShingleCosine(vectors) => vectors[i].cosine(&vectors[j]),
        }
    }
}

/// Token-less text scores 0.0 against anything, itself included.
fn simhash_score(a: Option<SimHash>, b: Option<SimHash>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => a.similarity(&b),
        _ => 0.0,
    }
}

/// Pairwise comparator over a document set.
///
/// Holds a validated [`CompareConfig`]; construction is the only place a
/// configuration error can surface.
#[derive(Debug, Clone)]
pub struct Comparator {
    cfg: CompareConfig,
}

impl Comparator {
    pub fn new(cfg: CompareConfig) -> Result<Self, MatchError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &CompareConfig {
        &self.cfg
    }

    /// Similarity of two texts under the configured algorithm.
    pub fn similarity(&self, a: &str, b: &str) -> Result<f64, MatchError> {
        let score = match self.cfg.algorithm {
            Algorithm::Winnowing => {
                let wc = self.cfg.winnowing();
                winnow(a, &wc)?.jaccard(&winnow(b, &wc)?)
            }
            Algorithm::SimHash => simhash_score(simhash_nonempty(a), simhash_nonempty(b)),
            Algorithm::ShingleCosine => {
                let sc = self.cfg.shingle();
                ShingleVector::build(a, &sc)?.cosine(&ShingleVector::build(b, &sc)?)
            }
        };
        Ok(score)
    }

    /// Compare every eligible pair `i < j` of `docs`.
    ///
    /// Pairs with different language tags are skipped when
    /// `same_language_only` is set. The token is checked before each pair;
    /// once it fires, the pairs already scored are returned with
    /// `cancelled = true`.
    pub fn compare_documents(
        &self,
        docs: &[Document],
        cancel: &CancelToken,
    ) -> Result<ComparisonReport, MatchError> {
        let start = Instant::now();
        let algorithm = self.cfg.algorithm;
        let span = tracing::span!(
            Level::INFO,
            "matcher.compare",
            algorithm = %algorithm,
            documents = docs.len()
        );
        let _guard = span.enter();

        if let Err(err) = validate_documents(docs) {
            warn!(error = %err, "compare_rejected");
            return Err(err.into());
        }

        let signatures = self.signatures(docs)?;

        let mut eligible = Vec::new();
        let mut skipped_cross_language = 0usize;
        for i in 0..docs.len() {
            for j in (i + 1)..docs.len() {
                if self.cfg.same_language_only && docs[i].language != docs[j].language {
                    skipped_cross_language += 1;
                } else {
                    eligible.push((i, j));
                }
            }
        }

        let evaluated = AtomicUsize::new(0);
        let threshold = self.cfg.threshold;
        let score_pair = |&(i, j): &(usize, usize)| -> Option<PairSimilarity> {
            if cancel.is_cancelled() {
                return None;
            }
            let similarity = signatures.score(i, j);
            evaluated.fetch_add(1, Ordering::Relaxed);
            (similarity >= threshold).then(|| PairSimilarity {
                id_a: docs[i].id.clone(),
                id_b: docs[j].id.clone(),
                similarity,
                algorithm,
            })
        };

        let mut pairs: Vec<PairSimilarity> = if self.cfg.use_parallel {
            eligible.par_iter().filter_map(score_pair).collect()
        } else {
            eligible.iter().filter_map(score_pair).collect()
        };
        sort_pairs(&mut pairs);

        let pairs_evaluated = evaluated.into_inner();
        let cancelled = pairs_evaluated < eligible.len();
        let latency = start.elapsed();
        let elapsed_micros = latency.as_micros();
        if cancelled {
            warn!(
                pairs_evaluated,
                eligible = eligible.len(),
                elapsed_micros,
                "compare_cancelled"
            );
        } else {
            info!(
                pairs_evaluated,
                matches = pairs.len(),
                skipped_cross_language,
                elapsed_micros,
                "compare_success"
            );
        }

        if let Some(recorder) = metrics_recorder() {
            recorder.record_comparison(algorithm, latency, pairs_evaluated, pairs.len(), cancelled);
        }

        Ok(ComparisonReport {
            algorithm,
            threshold,
            pairs,
            pairs_evaluated,
            skipped_cross_language,
            cancelled,
        })
    }

    fn signatures(&self, docs: &[Document]) -> Result<Signatures, MatchError> {
        let signatures = match self.cfg.algorithm {
            Algorithm::Winnowing => {
                let wc = self.cfg.winnowing();
                let sets = self.map_docs(docs, |d| winnow(&d.text, &wc).map(|fp| fp.hash_set()))?;
                Signatures::Winnowing(sets)
            }
            Algorithm::SimHash => {
                let hashes = self.map_docs(docs, |d| Ok(simhash_nonempty(&d.text)))?;
                Signatures::SimHash(hashes)
            }
            Algorithm::ShingleCosine => {
                let sc = self.cfg.shingle();
                let vectors = self.map_docs(docs, |d| ShingleVector::build(&d.text, &sc))?;
                Signatures::ShingleCosine(vectors)
            }
        };
        Ok(signatures)
    }

    fn map_docs<T, F>(&self, docs: &[Document], f: F) -> Result<Vec<T>, MatchError>
    where
        T: Send,
        F: Fn(&Document) -> Result<T, perceptual::PerceptualError> + Sync + Send,
    {
        let out = if self.cfg.use_parallel {
            docs.par_iter().map(&f).collect::<Result<Vec<_>, _>>()
        } else {
            docs.iter().map(&f).collect::<Result<Vec<_>, _>>()
        };
        Ok(out?)
    }
}

/// Similarity descending, then `(id_a, id_b)` ascending.
pub(crate) fn sort_pairs(pairs: &mut [PairSimilarity]) {
    pairs.sort_by(|x, y| {
        y.similarity
            .total_cmp(&x.similarity)
            .then_with(|| x.id_a.cmp(&y.id_a))
            .then_with(|| x.id_b.cmp(&y.id_b))
    });
}

/// Compare `docs` with a one-off comparator built from `cfg`.
pub fn compare_documents(
    docs: &[Document],
    cfg: &CompareConfig,
    cancel: &CancelToken,
) -> Result<ComparisonReport, MatchError> {
    Comparator::new(cfg.clone())?.compare_documents(docs, cancel)
}
