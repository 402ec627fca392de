use super::*;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use ingest::Language;

use crate::cluster::build_views;
use crate::metrics::{set_match_metrics, MatchMetrics};

fn doc(id: &str, lang: &str, text: &str) -> Document {
    Document::new(id, format!("{id}.src"), Language::new(lang), text)
}

fn fox_docs() -> Vec<Document> {
    vec![
        doc("A", "Text", "the quick brown fox"),
        doc("B", "Text", "the quick brown fox jumps"),
        doc("C", "Text", "completely unrelated text"),
    ]
}

fn comparator(algorithm: Algorithm, threshold: f64) -> Comparator {
    let cfg = CompareConfig::new(algorithm).with_threshold(threshold);
    match Comparator::new(cfg) {
        Ok(c) => c,
        Err(err) => panic!("config should be valid: {err}"),
    }
}

#[test]
fn fox_scenario_under_shingle_cosine() -> Result<(), MatchError> {
    let docs = fox_docs();
    let report =
        comparator(Algorithm::ShingleCosine, 0.5).compare_documents(&docs, &CancelToken::new())?;

    assert_eq!(report.pairs_evaluated, 3);
    assert!(!report.cancelled);
    assert_eq!(report.pairs.len(), 1);
    let edge = &report.pairs[0];
    assert_eq!((edge.id_a.as_str(), edge.id_b.as_str()), ("A", "B"));
    assert_eq!(edge.algorithm, Algorithm::ShingleCosine);
    assert!(edge.similarity > 0.5 && edge.similarity < 1.0);

    let views = build_views(&docs, &report.pairs);
    assert_eq!(views.clusters.len(), 1);
    let mut ids: Vec<&str> = views.clusters[0].all_ids().collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["A", "B"]);
    assert_eq!(views.partition.clean, vec!["C"]);
    assert_eq!(views.partition.flagged, vec!["A", "B"]);
    Ok(())
}

#[test]
fn similarity_is_symmetric_for_every_algorithm() -> Result<(), MatchError> {
    let a = "public int Add(int a, int b) { return a + b; }";
    let b = "public int Sum(int x, int y) { return x + y; }";
    for algorithm in [Algorithm::Winnowing, Algorithm::SimHash, Algorithm::ShingleCosine] {
        let c = comparator(algorithm, 0.8);
        let ab = c.similarity(a, b)?;
        assert_eq!(ab, c.similarity(b, a)?, "{algorithm}");
        assert!((0.0..=1.0).contains(&ab));
        assert_eq!(c.similarity(a, a)?, 1.0, "{algorithm}");
    }
    Ok(())
}

#[test]
fn empty_text_scores_zero_for_every_algorithm() -> Result<(), MatchError> {
    for algorithm in [Algorithm::Winnowing, Algorithm::SimHash, Algorithm::ShingleCosine] {
        let c = comparator(algorithm, 0.8);
        assert_eq!(c.similarity("", "some text here")?, 0.0, "{algorithm}");
        assert_eq!(c.similarity("", "")?, 0.0, "{algorithm}");
    }
    Ok(())
}

#[test]
fn empty_documents_never_pair_up() -> Result<(), MatchError> {
    let docs = vec![doc("a", "C#", ""), doc("b", "C#", ""), doc("c", "C#", "   ")];
    for algorithm in [Algorithm::Winnowing, Algorithm::SimHash, Algorithm::ShingleCosine] {
        let report = comparator(algorithm, f64::EPSILON)
            .compare_documents(&docs, &CancelToken::new())?;
        assert!(report.pairs.is_empty(), "{algorithm}");
        assert_eq!(report.pairs_evaluated, 3);
    }
    Ok(())
}

#[test]
fn empty_document_set_is_fine() -> Result<(), MatchError> {
    let report = comparator(Algorithm::Winnowing, 0.8).compare_documents(&[], &CancelToken::new())?;
    assert!(report.pairs.is_empty());
    assert_eq!(report.pairs_evaluated, 0);
    assert!(!report.cancelled);
    Ok(())
}

#[test]
fn only_same_language_pairs_are_compared() -> Result<(), MatchError> {
    let text = "static void Main(string[] args) { Console.WriteLine(args.Length); }";
    let docs = vec![doc("a", "C#", text), doc("b", "C#", text), doc("p", "Python", text)];
    let report = comparator(Algorithm::Winnowing, 0.8).compare_documents(&docs, &CancelToken::new())?;
    assert_eq!(report.pairs_evaluated, 1);
    assert_eq!(report.skipped_cross_language, 2);
    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.pairs[0].similarity, 1.0);
    Ok(())
}

#[test]
fn cross_language_pairs_compared_when_allowed() -> Result<(), MatchError> {
    let text = "identical body of reasonably long text";
    let docs = vec![doc("a", "C#", text), doc("p", "Python", text)];
    let cfg = CompareConfig::default().with_same_language_only(false);
    let report = Comparator::new(cfg)?.compare_documents(&docs, &CancelToken::new())?;
    assert_eq!(report.skipped_cross_language, 0);
    assert_eq!(report.pairs.len(), 1);
    Ok(())
}

#[test]
fn threshold_is_inclusive() -> Result<(), MatchError> {
    let docs = fox_docs();
    let c = comparator(Algorithm::ShingleCosine, 0.0);
    let exact = c.similarity(&docs[0].text, &docs[1].text)?;

    let at = comparator(Algorithm::ShingleCosine, exact).compare_documents(&docs, &CancelToken::new())?;
    assert_eq!(at.pairs.len(), 1);
    Ok(())
}

#[test]
fn pre_cancelled_token_returns_partial_report() -> Result<(), MatchError> {
    let token = CancelToken::new();
    token.cancel();
    let report = comparator(Algorithm::SimHash, 0.0).compare_documents(&fox_docs(), &token)?;
    assert!(report.cancelled);
    assert_eq!(report.pairs_evaluated, 0);
    assert!(report.pairs.is_empty());
    Ok(())
}

#[test]
fn parallel_and_serial_sweeps_agree() -> Result<(), MatchError> {
    let docs: Vec<Document> = (0..24)
        .map(|i| {
            let body = format!("fn handler_{}() {{ let total = {} + value; emit(total); }}", i % 5, i % 3);
            doc(&format!("d{i:02}"), "Rust", &body)
        })
        .collect();
    for algorithm in [Algorithm::Winnowing, Algorithm::SimHash, Algorithm::ShingleCosine] {
        let base = CompareConfig::new(algorithm).with_threshold(0.3);
        let parallel = Comparator::new(base.clone().with_parallel(true))?
            .compare_documents(&docs, &CancelToken::new())?;
        let serial = Comparator::new(base.with_parallel(false))?
            .compare_documents(&docs, &CancelToken::new())?;
        assert_eq!(parallel, serial, "{algorithm}");
    }
    Ok(())
}

#[test]
fn pairs_are_sorted_descending() -> Result<(), MatchError> {
    let docs = vec![
        doc("a", "Text", "alpha beta gamma delta epsilon"),
        doc("b", "Text", "alpha beta gamma delta epsilon zeta"),
        doc("c", "Text", "alpha beta gamma delta"),
    ];
    let report = comparator(Algorithm::ShingleCosine, 0.0).compare_documents(&docs, &CancelToken::new())?;
    assert!(report
        .pairs
        .windows(2)
        .all(|w| w[0].similarity >= w[1].similarity));
    Ok(())
}

#[test]
fn duplicate_ids_rejected() {
    let docs = vec![doc("x", "C#", "a"), doc("x", "C#", "b")];
    let err = comparator(Algorithm::Winnowing, 0.8)
        .compare_documents(&docs, &CancelToken::new())
        .unwrap_err();
    assert!(matches!(err, MatchError::Ingest(_)));
}

#[test]
fn invalid_config_rejected_before_compare() {
    let cfg = CompareConfig::default().with_k(0);
    assert!(Comparator::new(cfg.clone()).is_err());
    assert!(compare_documents(&fox_docs(), &cfg, &CancelToken::new()).is_err());
}

struct RecordingMetrics {
    events: Arc<RwLock<Vec<(Algorithm, usize, usize, bool)>>>,
}

impl RecordingMetrics {
    fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    fn snapshot(&self) -> Vec<(Algorithm, usize, usize, bool)> {
        self.events.read().unwrap().clone()
    }
}

impl MatchMetrics for RecordingMetrics {
    fn record_comparison(
        &self,
        algorithm: Algorithm,
        _latency: Duration,
        pairs_evaluated: usize,
        matches: usize,
        cancelled: bool,
    ) {
        self.events
            .write()
            .unwrap()
            .push((algorithm, pairs_evaluated, matches, cancelled));
    }
}

#[test]
fn metrics_recorder_observes_comparisons() -> Result<(), MatchError> {
    let metrics = Arc::new(RecordingMetrics::new());
    set_match_metrics(Some(metrics.clone()));

    let docs = fox_docs();
    comparator(Algorithm::ShingleCosine, 0.5).compare_documents(&docs, &CancelToken::new())?;
    set_match_metrics(None);

    let events = metrics.snapshot();
    assert!(events.contains(&(Algorithm::ShingleCosine, 3, 1, false)));
    Ok(())
}
