//! Concurrency and thread safety tests for codedup

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use codedup::{
    extract_fragments, run_comparison, Algorithm, CancelToken, CompareConfig, Document,
    FragmentConfig, Language,
};

fn corpus(n: usize) -> Vec<Document> {
    (0..n)
        .map(|i| {
            let body = format!(
                "def handler_{a}(event):\n    payload = event.get('body')\n    result = process(payload, {b})\n    return respond(result)\n",
                a = i % 6,
                b = i % 4
            );
            Document::new(format!("doc-{i:03}"), format!("h{i}.py"), Language::new("Python"), body)
        })
        .collect()
}

#[test]
fn concurrent_comparisons_share_documents() {
    let docs = Arc::new(corpus(30));
    let cfg = CompareConfig::new(Algorithm::ShingleCosine).with_threshold(0.6);
    let expected = run_comparison(&docs, &cfg, &CancelToken::new()).expect("baseline");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let docs = Arc::clone(&docs);
            let cfg = cfg.clone();
            thread::spawn(move || run_comparison(&docs, &cfg, &CancelToken::new()).expect("compare"))
        })
        .collect();

    for handle in handles {
        let outcome = handle.join().expect("thread panicked");
        assert_eq!(outcome, expected);
    }
}

#[test]
fn parallel_and_serial_sweeps_agree() {
    let docs = corpus(40);
    for algorithm in [Algorithm::Winnowing, Algorithm::SimHash, Algorithm::ShingleCosine] {
        let base = CompareConfig::new(algorithm).with_threshold(0.5);
        let parallel =
            run_comparison(&docs, &base.clone().with_parallel(true), &CancelToken::new()).expect("parallel");
        let serial =
            run_comparison(&docs, &base.with_parallel(false), &CancelToken::new()).expect("serial");
        assert_eq!(parallel, serial, "{algorithm}");
    }
}

#[test]
fn fragment_extraction_is_thread_independent() {
    let docs = corpus(25);
    let cfg = FragmentConfig::default();
    let expected = extract_fragments(&docs, &cfg).expect("baseline");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .expect("pool");
    let single = pool.install(|| extract_fragments(&docs, &cfg).expect("single thread"));
    assert_eq!(single, expected);
}

#[test]
fn cancellation_from_another_thread_returns_partial_report() {
    let docs = corpus(60);
    let token = CancelToken::new();
    let remote = token.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(1));
        remote.cancel();
    });

    let cfg = CompareConfig::new(Algorithm::Winnowing).with_threshold(0.0);
    let outcome = run_comparison(&docs, &cfg, &token).expect("compare");
    canceller.join().expect("canceller");

    let eligible = docs.len() * (docs.len() - 1) / 2;
    assert!(outcome.report.pairs_evaluated <= eligible);
    if outcome.report.cancelled {
        assert!(outcome.report.pairs_evaluated < eligible);
    } else {
        assert_eq!(outcome.report.pairs_evaluated, eligible);
    }
    // Whatever finished is still a consistent, sorted result.
    assert!(outcome
        .report
        .pairs
        .windows(2)
        .all(|w| w[0].similarity >= w[1].similarity));
    assert_eq!(outcome.report.pairs.len(), outcome.report.pairs_evaluated);
}

#[test]
fn deadline_token_stops_the_sweep() {
    let docs = corpus(20);
    let token = CancelToken::with_timeout(Duration::ZERO);
    let cfg = CompareConfig::new(Algorithm::SimHash);
    let outcome = run_comparison(&docs, &cfg, &token).expect("compare");
    assert!(outcome.report.cancelled);
    assert_eq!(outcome.report.pairs_evaluated, 0);
    assert!(outcome.clusters.is_empty());
    assert_eq!(outcome.partition.clean.len(), docs.len());
}
