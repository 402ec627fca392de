// Metrics hooks for the matcher crate.
//
// Callers install a global `MatchMetrics` implementation via [`set_match_metrics`];
// every comparison sweep then reports its latency and counts. Instrumentation
// stays decoupled from any specific metrics backend.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::types::Algorithm;

/// Metrics observer for comparison sweeps.
pub trait MatchMetrics: Send + Sync {
    /// Record the outcome of one sweep.
    ///
    /// `pairs_evaluated` counts computed pairs, `matches` the pairs at or
    /// above the threshold, and `cancelled` whether the sweep stopped early.
    fn record_comparison(
        &self,
        algorithm: Algorithm,
        latency: Duration,
        pairs_evaluated: usize,
        matches: usize,
        cancelled: bool,
    );
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn MatchMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn MatchMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn MatchMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global match metrics recorder.
pub fn set_match_metrics(recorder: Option<Arc<dyn MatchMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
