//! Turning a filtered pair list into reviewable groupings.
//!
//! Three views are derived from the same edges: the ranked pair list,
//! center-based clusters and the clean/flagged partition.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use ingest::Document;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::sort_pairs;
use crate::types::PairSimilarity;

/// A center document and the neighbours grouped around it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterGroup {
    pub center_id: String,
    /// Direct neighbours of the center, ascending by id. Never contains the
    /// center itself.
    pub member_ids: Vec<String>,
    /// Highest similarity between the center and any member.
    pub max_similarity: f64,
}

impl ClusterGroup {
    /// Center followed by members.
    pub fn all_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.center_id.as_str()).chain(self.member_ids.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.member_ids.len() + 1
    }

    /// Always false: a group holds at least its center.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Documents split by whether they touch any reported pair.
///
/// Both lists keep the input order of the documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Partition {
    pub clean: Vec<String>,
    pub flagged: Vec<String>,
}

/// All grouped views of one comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterViews {
    pub pairs: Vec<PairSimilarity>,
    pub clusters: Vec<ClusterGroup>,
    pub partition: Partition,
}

/// Pairs sorted by similarity descending, ties by `(id_a, id_b)`.
pub fn rank_pairs(pairs: &[PairSimilarity]) -> Vec<PairSimilarity> {
    let mut ranked = pairs.to_vec();
    sort_pairs(&mut ranked);
    ranked
}

type Adjacency<'a> = BTreeMap<&'a str, BTreeMap<&'a str, f64>>;

fn adjacency(pairs: &[PairSimilarity]) -> Adjacency<'_> {
    let mut adj: Adjacency<'_> = BTreeMap::new();
    for pair in pairs {
        if pair.id_a == pair.id_b {
            continue;
        }
        for (from, to) in [(&pair.id_a, &pair.id_b), (&pair.id_b, &pair.id_a)] {
            let slot = adj
                .entry(from.as_str())
                .or_default()
                .entry(to.as_str())
                .or_insert(pair.similarity);
            if pair.similarity > *slot {
                *slot = pair.similarity;
            }
        }
    }
    adj
}

/// Degree-sorted greedy center clustering.
///
/// Documents are visited by degree descending, then average neighbour
/// similarity descending, then id ascending. A visited document that is not
/// yet in a group, and still has ungrouped neighbours, becomes a center
/// together with all of those neighbours. Groups come out sorted by
/// `max_similarity` descending; equal groups keep visiting order.
///
/// A document without edges never appears. Repeated edges between the same
/// two documents count once, at their highest similarity.
pub fn center_clusters(pairs: &[PairSimilarity]) -> Vec<ClusterGroup> {
    let adj = adjacency(pairs);

    let mut order: Vec<(&str, usize, f64)> = adj
        .iter()
        .map(|(id, neighbours)| {
            let degree = neighbours.len();
            let avg = neighbours.values().sum::<f64>() / degree as f64;
            (*id, degree, avg)
        })
        .collect();
    order.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| b.2.total_cmp(&a.2))
            .then_with(|| a.0.cmp(b.0))
    });

    let mut processed: HashSet<&str> = HashSet::new();
    let mut groups = Vec::new();
    for (center, _, _) in order {
        if processed.contains(center) {
            continue;
        }
        let Some(neighbours) = adj.get(center) else {
            continue;
        };
        let members: Vec<(&str, f64)> = neighbours
            .iter()
            .filter(|(id, _)| !processed.contains(**id))
            .map(|(id, sim)| (*id, *sim))
            .collect();
        if members.is_empty() {
            continue;
        }

        let max_similarity = members.iter().map(|(_, s)| *s).fold(0.0, f64::max);
        processed.insert(center);
        processed.extend(members.iter().map(|(id, _)| *id));
        groups.push(ClusterGroup {
            center_id: center.to_string(),
            member_ids: members.into_iter().map(|(id, _)| id.to_string()).collect(),
            max_similarity,
        });
    }

    groups.sort_by(|a, b| b.max_similarity.total_cmp(&a.max_similarity));
    groups
}

/// Split `ids` into documents touching at least one pair and the rest.
pub fn partition<'a, I>(ids: I, pairs: &[PairSimilarity]) -> Partition
where
    I: IntoIterator<Item = &'a str>,
{
    let endpoints: BTreeSet<&str> = pairs
        .iter()
        .flat_map(|p| [p.id_a.as_str(), p.id_b.as_str()])
        .collect();

    let mut out = Partition::default();
    for id in ids {
        if endpoints.contains(id) {
            out.flagged.push(id.to_string());
        } else {
            out.clean.push(id.to_string());
        }
    }
    out
}

/// Build every view for `docs` from the reported `pairs`.
///
/// Pairs naming a document outside `docs` are dropped with a warning.
pub fn build_views(docs: &[Document], pairs: &[PairSimilarity]) -> ClusterViews {
    let known: HashSet<&str> = docs.iter().map(|d| d.id.as_str()).collect();
    let kept: Vec<PairSimilarity> = pairs
        .iter()
        .filter(|p| {
            let ok = known.contains(p.id_a.as_str()) && known.contains(p.id_b.as_str());
            if !ok {
                warn!(id_a = %p.id_a, id_b = %p.id_b, "pair_references_unknown_document");
            }
            ok
        })
        .cloned()
        .collect();

    ClusterViews {
        clusters: center_clusters(&kept),
        partition: partition(docs.iter().map(|d| d.id.as_str()), &kept),
        pairs: rank_pairs(&kept),
    }
}
