use super::{disparity, homogeneity, MemoRegistry};
use crate::error::{Error, Result};
use crate::pattern::{normalize_pattern, PatternConfig};
use serde::{Deserialize, Serialize};

/// Which metrics to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalOptions {
    pub homogeneity: bool,
    pub disparity: bool,

    /// Stop scoring disparity once a comparison (or, across a model, a
    /// cluster's homogeneity) is non-zero
    pub disparity_only_if_homogeneity_zero: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            homogeneity: true,
            disparity: true,
            disparity_only_if_homogeneity_zero: true,
        }
    }
}

impl EvalOptions {
    /// Both metrics, disparity always computed
    pub fn unconditional() -> Self {
        Self {
            disparity_only_if_homogeneity_zero: false,
            ..Self::default()
        }
    }

    fn with_disparity(&self, disparity: bool) -> Self {
        Self { disparity, ..*self }
    }
}

/// Smallest and largest score of one sequence against many
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreRange {
    pub min: usize,
    pub max: usize,
}

impl ScoreRange {
    fn from_scores(scores: &[usize]) -> Option<Self> {
        let min = scores.iter().copied().min()?;
        let max = scores.iter().copied().max()?;
        Some(Self { min, max })
    }
}

/// Averaged minimum, maximum and their mean
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl ScoreSummary {
    fn from_bounds(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            avg: (min + max) / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ManyScores {
    pub homogeneity: Option<ScoreRange>,
    pub disparity: Option<ScoreRange>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ClusterScores {
    pub homogeneity: Option<ScoreSummary>,
    pub disparity: Option<ScoreSummary>,
}

/// One metric across a model
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricScores {
    pub summary: ScoreSummary,
    /// Indexes of the clusters whose average for this metric is above zero
    pub nonzero_clusters: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelScores {
    pub homogeneity: Option<MetricScores>,
    pub disparity: Option<MetricScores>,
    /// Clusters with a single member, which are never compared
    pub singleton_clusters: usize,
}

/// Compare one sequence to many, reusing cached pair scores
///
/// Returns `None` for a metric that is disabled or when `many` is empty.
pub fn evaluate_many<T: PartialEq + Clone>(
    one: &[T],
    many: &[Vec<T>],
    options: &EvalOptions,
    memo: &mut MemoRegistry<T>,
) -> ManyScores {
    let key_one = memo.register(one);
    let mut h_scores = Vec::with_capacity(many.len());
    let mut d_scores = Vec::with_capacity(many.len());

    for other in many {
        let key_other = memo.register(other);
        let cached = memo.pair(key_one, key_other).copied().unwrap_or_default();
        let mut score = cached;

        if options.homogeneity && score.homogeneity.is_none() {
            score.homogeneity = Some(homogeneity(one, other).score);
        }
        if options.disparity && score.disparity.is_none() {
            score.disparity = Some(disparity(one, other).score);
        }
        if score != cached {
            memo.store(key_one, key_other, score);
        }

        if let (true, Some(h)) = (options.homogeneity, score.homogeneity) {
            h_scores.push(h);
        }
        if let (true, Some(d)) = (options.disparity, score.disparity) {
            d_scores.push(d);
        }
    }

    ManyScores {
        homogeneity: ScoreRange::from_scores(&h_scores),
        disparity: ScoreRange::from_scores(&d_scores),
    }
}

/// Score every pair of members of one cluster
///
/// Each member is compared to the members after it; the per-call minima and
/// maxima are summed and divided by `n * (n - 1)`. Clusters with fewer than
/// two members score `None`.
pub fn evaluate_cluster<T: PartialEq + Clone>(
    members: &[Vec<T>],
    options: &EvalOptions,
    memo: &mut MemoRegistry<T>,
) -> ClusterScores {
    let n = members.len();
    if n <= 1 {
        return ClusterScores::default();
    }

    let mut eval_disparity = options.disparity;
    let mut h_sums = options.homogeneity.then_some((0.0_f64, 0.0_f64));
    let mut d_sums = options.disparity.then_some((0.0_f64, 0.0_f64));

    for outer in 0..n - 1 {
        let scores = evaluate_many(
            &members[outer],
            &members[outer + 1..],
            &options.with_disparity(eval_disparity),
            memo,
        );

        if let (Some(sums), Some(range)) = (h_sums.as_mut(), scores.homogeneity) {
            sums.0 += range.min as f64;
            sums.1 += range.max as f64;
        }

        if let Some(range) = scores.disparity {
            if eval_disparity && options.disparity_only_if_homogeneity_zero && range.max > 0 {
                tracing::debug!(outer, "disparity disabled for the rest of the cluster");
                eval_disparity = false;
                d_sums = None;
                continue;
            }
            if let Some(sums) = d_sums.as_mut() {
                sums.0 += range.min as f64;
                sums.1 += range.max as f64;
            }
        }
    }

    let pairs = (n * (n - 1)) as f64;
    let finish = |(min, max): (f64, f64)| ScoreSummary::from_bounds(min / pairs, max / pairs);

    ClusterScores {
        homogeneity: h_sums.map(finish),
        disparity: d_sums.map(finish),
    }
}

#[derive(Default)]
struct MetricTotals {
    min: f64,
    max: f64,
    avg: f64,
    nonzero_clusters: Vec<usize>,
}

impl MetricTotals {
    fn add(&mut self, cluster: usize, summary: ScoreSummary) {
        if summary.avg > 0.0 {
            self.nonzero_clusters.push(cluster);
        }
        self.min += summary.min;
        self.max += summary.max;
        self.avg += summary.avg;
    }

    fn finish(self, clusters: f64) -> MetricScores {
        MetricScores {
            summary: ScoreSummary {
                min: self.min / clusters,
                max: self.max / clusters,
                avg: self.avg / clusters,
            },
            nonzero_clusters: self.nonzero_clusters,
        }
    }
}

/// Score every cluster of a model and average over the cluster count
///
/// Singleton clusters are counted but contribute zeros. With
/// `disparity_only_if_homogeneity_zero`, the first cluster whose homogeneity
/// is missing or above zero switches disparity off for the whole model.
///
/// # Errors
/// Returns `InvalidInput` if a cluster has no members. A model with fewer
/// than two clusters returns `None` metrics.
pub fn evaluate_model<T: PartialEq + Clone>(
    clusters: &[Vec<Vec<T>>],
    options: &EvalOptions,
    memo: &mut MemoRegistry<T>,
) -> Result<ModelScores> {
    if let Some(index) = clusters.iter().position(Vec::is_empty) {
        return Err(Error::invalid(format!("cluster {index} has no members")));
    }

    let singleton_clusters = clusters.iter().filter(|c| c.len() == 1).count();
    if clusters.len() <= 1 {
        return Ok(ModelScores {
            singleton_clusters,
            ..ModelScores::default()
        });
    }

    let mut eval_disparity = options.disparity;
    let mut h_totals = options.homogeneity.then(MetricTotals::default);
    let mut d_totals = options.disparity.then(MetricTotals::default);

    for (index, cluster) in clusters.iter().enumerate() {
        if cluster.len() == 1 {
            continue;
        }

        let scores = evaluate_cluster(cluster, &options.with_disparity(eval_disparity), memo);
        if scores.homogeneity.is_none() && scores.disparity.is_none() {
            continue;
        }

        let heterogeneous = match scores.homogeneity {
            Some(h) => h.avg > 0.0,
            None => true,
        };
        if eval_disparity && options.disparity_only_if_homogeneity_zero && heterogeneous {
            tracing::debug!(cluster = index, "disparity disabled for the rest of the model");
            eval_disparity = false;
            d_totals = None;
        }

        if let (Some(totals), Some(summary)) = (h_totals.as_mut(), scores.homogeneity) {
            totals.add(index, summary);
        }
        if let (Some(totals), Some(summary)) = (d_totals.as_mut(), scores.disparity) {
            totals.add(index, summary);
        }
    }

    if singleton_clusters == clusters.len() {
        tracing::warn!(
            clusters = clusters.len(),
            "every cluster has a single member, no pair was compared"
        );
    }

    let count = clusters.len() as f64;
    Ok(ModelScores {
        homogeneity: h_totals.map(|t| t.finish(count)),
        disparity: d_totals.map(|t| t.finish(count)),
        singleton_clusters,
    })
}

/// Re-normalize every member with [`PatternConfig::weak_disparity`] and
/// score the model with both metrics, disparity always computed
///
/// # Errors
/// Returns `InvalidInput` for an empty cluster or an empty sequence.
pub fn evaluate_model_weak_disparity<T: Ord + Clone>(
    clusters: &[Vec<Vec<T>>],
    memo: &mut MemoRegistry<T>,
) -> Result<ModelScores> {
    let config = PatternConfig::weak_disparity();
    let mut model = Vec::with_capacity(clusters.len());

    for (index, cluster) in clusters.iter().enumerate() {
        if cluster.is_empty() {
            return Err(Error::invalid(format!("cluster {index} has no members")));
        }
        let members = cluster
            .iter()
            .map(|sequence| normalize_pattern(sequence, &config))
            .collect::<Result<Vec<_>>>()?;
        model.push(members);
    }

    evaluate_model(&model, &EvalOptions::unconditional(), memo)
}
