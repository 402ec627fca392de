//! Winnowing over rolling character-shingle hashes.
//!
//! The text is collapsed to a lowercased alphanumeric stream, every
//! `k`-character shingle is hashed with [`RollingHasher`], and a window of
//! `w` consecutive hashes selects its minimum. Both steps run in O(n).

use std::collections::VecDeque;

use canonical::alphanumeric_stream;

use crate::config::{PerceptualError, WinnowingConfig};
use crate::fingerprint::{Anchor, Fingerprint};
use crate::rolling::RollingHasher;

/// Compute the winnowing fingerprint of `text`.
///
/// Text with fewer than `k + w - 1` alphanumeric characters fills no
/// window and produces an empty fingerprint. Only an invalid configuration is an error.
pub fn winnow(text: &str, cfg: &WinnowingConfig) -> Result<Fingerprint, PerceptualError> {
    cfg.validate()?;

    let normalized = alphanumeric_stream(text);
    let hashes = shingle_hashes(&normalized, cfg.k)?;
    let anchors = select_anchors(&hashes, cfg.w);

    Ok(Fingerprint {
        anchors,
        config: *cfg,
    })
}

/// Rolling hash of every `k`-character shingle, indexed by shingle start.
pub fn shingle_hashes(normalized: &str, k: usize) -> Result<Vec<u32>, PerceptualError> {
    let mut hasher = RollingHasher::new(k)?;
    let mut out = Vec::with_capacity(normalized.len().saturating_sub(k) + 1);
    for ch in normalized.chars() {
        if let Some(hash) = hasher.push(ch) {
            out.push(hash);
        }
    }
    Ok(out)
}

/// Winnowing via monotonic deque, O(n).
///
/// Each window of `w` hashes selects its minimum, ties going to the
/// earliest position. A selection is emitted only when its position differs
/// from the previous emission. Fewer than `w` hashes fill no window, so
/// nothing is selected.
pub fn select_anchors(hashes: &[u32], w: usize) -> Vec<Anchor> {
    let n = hashes.len();
    let window = w.max(1);
    if n < window {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(n / window + 1);
    // Indices in increasing position order with non-decreasing hash values,
    // so the front is always the earliest minimum of the current window.
    let mut dq: VecDeque<usize> = VecDeque::with_capacity(window);
    let mut last_emitted: Option<usize> = None;

    for i in 0..n {
        while let Some(&back) = dq.back() {
            // Strictly greater only: an equal earlier hash must survive.
            if hashes[back] > hashes[i] {
                dq.pop_back();
            } else {
                break;
            }
        }
        dq.push_back(i);

        if i + 1 < window {
            continue;
        }
        let left = i + 1 - window;
        while let Some(&front) = dq.front() {
            if front < left {
                dq.pop_front();
            } else {
                break;
            }
        }

        if let Some(&idx) = dq.front() {
            if last_emitted != Some(idx) {
                out.push(Anchor {
                    hash: hashes[idx],
                    position: idx,
                });
                last_emitted = Some(idx);
            }
        }
    }

    out
}
