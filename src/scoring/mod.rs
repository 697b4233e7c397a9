// Sequence scoring engine
//
// Pairwise metrics between two token sequences, and the cluster/model
// evaluators that aggregate them:
// - homogeneity: multiset difference, order ignored
// - disparity: order-sensitive cost, a relocated run counts once
// - shift dissimilarity: the index-shift variant of disparity
// - predecessors: do both sequences reach their final tokens the same way
//
// Cluster and model scores are averages of per-comparison minima and maxima
// (not global extremes over all pairs). A caller-owned `MemoRegistry` caches
// pair scores across calls.

mod disparity;
mod evaluate;
mod homogeneity;
mod memo;
mod predecessors;

pub use disparity::{collapse_repeats, disparity, find_best_alignment, shift_dissimilarity, Alignment};
pub use evaluate::{
    evaluate_cluster, evaluate_many, evaluate_model, evaluate_model_weak_disparity, ClusterScores,
    EvalOptions, ManyScores, MetricScores, ModelScores, ScoreRange, ScoreSummary,
};
pub use homogeneity::homogeneity;
pub use memo::{MemoRegistry, PairScore};
pub use predecessors::{predecessors, PredecessorScore};

use serde::Serialize;

/// Score of a pairwise comparison with the tokens found on one side only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison<T> {
    pub score: usize,
    pub missing: Vec<T>,
}

impl<T> Comparison<T> {
    pub(crate) fn identical() -> Self {
        Self {
            score: 0,
            missing: Vec::new(),
        }
    }
}

pub(crate) fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

#[cfg(test)]
mod tests;
