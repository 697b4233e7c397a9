use crate::cluster::{similar, Cluster, ClusterAssignment, ClusterRow};
use crate::error::Result;
use crate::pattern::{normalize, PatternConfig};
use crate::step::{Sequence, Token};
use std::collections::HashMap;

/// Ordered set of clusters built greedily from a stream of sequences
///
/// Each sequence joins the first existing cluster whose representative is
/// similar to its own subsequences, or opens a new cluster. The partition
/// depends on input order.
///
/// # Example Usage
/// ```
/// use tracefold::cluster::ClusterModel;
/// use tracefold::pattern::PatternConfig;
/// use tracefold::step::Sequence;
///
/// let sequences = vec![
///     Sequence::from_labels(["a", "b"]),
///     Sequence::from_labels(["c"]),
///     Sequence::from_labels(["a", "a", "b"]),
/// ];
/// let config = PatternConfig::new(true, false, true, 2);
/// let outcome = ClusterModel::build(&sequences, &config)?;
///
/// assert_eq!(outcome.model.len(), 2);
/// assert_eq!(outcome.assignments[2].cluster_id, 0);
/// # Ok::<(), tracefold::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ClusterModel {
    config: PatternConfig,
    clusters: Vec<Cluster>,
}

/// Clusters plus the per-input assignment table
#[derive(Debug, Clone)]
pub struct ClusterOutcome {
    pub model: ClusterModel,
    pub assignments: Vec<ClusterAssignment>,
}

impl ClusterModel {
    /// Create an empty model that normalizes with `config`
    pub fn new(config: PatternConfig) -> Self {
        Self {
            config,
            clusters: Vec::new(),
        }
    }

    /// Cluster every sequence in input order
    ///
    /// # Errors
    /// Returns `InvalidInput` if any sequence is empty. An empty input list
    /// yields an empty model.
    pub fn build(sequences: &[Sequence], config: &PatternConfig) -> Result<ClusterOutcome> {
        let mut model = Self::new(config.clone());
        let mut assignments = Vec::with_capacity(sequences.len());

        for (index, sequence) in sequences.iter().enumerate() {
            let (cluster_id, pattern) = model.assign(sequence)?;
            assignments.push(ClusterAssignment {
                index,
                cluster_id,
                pattern,
            });
        }

        tracing::info!(
            sequences = sequences.len(),
            clusters = model.len(),
            "clustering complete"
        );

        Ok(ClusterOutcome { model, assignments })
    }

    /// Assign one sequence, returning its cluster id and its own pattern
    pub fn assign(&mut self, sequence: &Sequence) -> Result<(usize, Vec<Token>)> {
        let normalized = normalize(&sequence.tokens(), &self.config)?;

        let existing = self.clusters.iter().position(|cluster| {
            similar(
                &normalized.subsequences,
                &cluster.representative,
                self.config.consider_order,
            )
        });

        let cluster_id = match existing {
            Some(id) => {
                self.clusters[id].members.push(sequence.clone());
                id
            }
            None => {
                let id = self.clusters.len();
                tracing::debug!(cluster = id, pattern = ?normalized.pattern, "new cluster");
                self.clusters.push(Cluster {
                    id,
                    representative: normalized.subsequences,
                    members: vec![sequence.clone()],
                });
                id
            }
        };

        Ok((cluster_id, normalized.pattern))
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn get(&self, id: usize) -> Option<&Cluster> {
        self.clusters.get(id)
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// The model as canonical token sequences, ready for scoring
    pub fn member_tokens(&self) -> Vec<Vec<Vec<Token>>> {
        self.clusters.iter().map(Cluster::member_tokens).collect()
    }

    /// Export table: one row per distinct raw sequence per cluster
    pub fn rows(&self) -> Vec<ClusterRow> {
        let mut rows = Vec::new();

        for cluster in &self.clusters {
            let pattern = cluster.pattern_text();
            let mut order: Vec<String> = Vec::new();
            let mut counts: HashMap<String, usize> = HashMap::new();

            for member in &cluster.members {
                let key = member.to_string();
                let count = counts.entry(key.clone()).or_insert(0);
                if *count == 0 {
                    order.push(key);
                }
                *count += 1;
            }

            for sequence in order {
                let count = counts.get(&sequence).copied().unwrap_or_default();
                rows.push(ClusterRow {
                    cluster_id: cluster.id,
                    cluster_size: cluster.size(),
                    pattern: pattern.clone(),
                    count,
                    sequence,
                });
            }
        }

        rows
    }
}
