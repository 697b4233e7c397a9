//! JSON output format for clustering, graph and scoring reports

use crate::automaton::{Automaton, State};
use crate::cluster::{ClusterAssignment, ClusterOutcome};
use crate::scoring::{Comparison, MetricScores, ModelScores, PredecessorScore, ScoreSummary};
use crate::step::Token;
use serde::Serialize;
use serde_json::Value;

/// One cluster with its raw members
#[derive(Debug, Clone, Serialize)]
pub struct JsonCluster {
    pub id: usize,
    pub size: usize,
    /// Subsequences of the representative
    pub pattern: Value,
    pub members: Vec<Value>,
}

/// Output of `tracefold cluster --format json`
#[derive(Debug, Clone, Serialize)]
pub struct ClusterReport {
    pub sequences: usize,
    pub clusters: Vec<JsonCluster>,
    pub assignments: Vec<ClusterAssignment>,
}

impl ClusterReport {
    pub fn from_outcome(outcome: &ClusterOutcome) -> Self {
        let clusters = outcome
            .model
            .clusters()
            .iter()
            .map(|cluster| JsonCluster {
                id: cluster.id,
                size: cluster.size(),
                pattern: serde_json::to_value(&cluster.representative).unwrap_or(Value::Null),
                members: cluster.members.iter().map(|m| m.to_value()).collect(),
            })
            .collect();

        Self {
            sequences: outcome.assignments.len(),
            clusters,
            assignments: outcome.assignments.clone(),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One automaton state
#[derive(Debug, Clone, Serialize)]
pub struct JsonState {
    pub id: usize,
    pub label: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub start: bool,
    #[serde(rename = "final")]
    pub is_final: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loop_count: Option<usize>,
    pub successors: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_description: Option<String>,
}

impl From<&State> for JsonState {
    fn from(state: &State) -> Self {
        Self {
            id: state.id().index(),
            label: state.label().to_string(),
            aliases: state.aliases().iter().map(Token::to_string).collect(),
            start: state.is_start(),
            is_final: state.is_final(),
            loop_count: state.is_self_loop().then(|| state.loop_count()),
            successors: state.successors().iter().map(|id| id.index()).collect(),
            edge_description: state.edge_description().map(str::to_string),
        }
    }
}

/// Output of `tracefold graph --format json`
#[derive(Debug, Clone, Serialize)]
pub struct GraphReport {
    pub build_with_loop: bool,
    pub distinct_sequences: usize,
    pub states: Vec<JsonState>,
    pub dot: String,
}

impl GraphReport {
    pub fn from_automaton(automaton: &Automaton, include_root: bool) -> Self {
        Self {
            build_with_loop: automaton.build_with_loop(),
            distinct_sequences: automaton.distinct_sequences().len(),
            states: automaton.states().iter().map(JsonState::from).collect(),
            dot: automaton.render(include_root),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Output of `tracefold score --format json`
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub clusters: usize,
    pub sequences: usize,
    pub weak_disparity: bool,
    pub singleton_clusters: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homogeneity: Option<MetricScores>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disparity: Option<MetricScores>,
}

impl ScoreReport {
    pub fn new(clusters: usize, sequences: usize, weak_disparity: bool, scores: ModelScores) -> Self {
        Self {
            clusters,
            sequences,
            weak_disparity,
            singleton_clusters: scores.singleton_clusters,
            homogeneity: scores.homogeneity,
            disparity: scores.disparity,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable summary, one metric per line
    pub fn to_text(&self) -> String {
        let mut output = format!(
            "clusters: {} ({} singleton), sequences: {}\n",
            self.clusters, self.singleton_clusters, self.sequences
        );
        if self.weak_disparity {
            output.push_str("mode: weak disparity\n");
        }
        output.push_str(&metric_line("homogeneity", self.homogeneity.as_ref()));
        output.push_str(&metric_line("disparity", self.disparity.as_ref()));
        output
    }
}

fn metric_line(name: &str, metric: Option<&MetricScores>) -> String {
    match metric {
        Some(MetricScores {
            summary: ScoreSummary { min, max, avg },
            nonzero_clusters,
        }) => format!(
            "{name}: min={min:.4} max={max:.4} avg={avg:.4} nonzero_clusters={nonzero_clusters:?}\n"
        ),
        None => format!("{name}: n/a\n"),
    }
}

/// Output of `tracefold pairwise --format json`
#[derive(Debug, Clone, Serialize)]
pub struct PairwiseReport {
    pub homogeneity: Comparison<Token>,
    pub disparity: Comparison<Token>,
    pub shift_dissimilarity: Comparison<Token>,
    pub predecessors: PredecessorScore,
}

impl PairwiseReport {
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let missing = |c: &Comparison<Token>| {
            c.missing.iter().map(Token::as_str).collect::<Vec<_>>().join(" ")
        };
        format!(
            "homogeneity: {} [{}]\ndisparity: {} [{}]\nshift_dissimilarity: {} [{}]\npredecessors: {}\n",
            self.homogeneity.score,
            missing(&self.homogeneity),
            self.disparity.score,
            missing(&self.disparity),
            self.shift_dissimilarity.score,
            missing(&self.shift_dissimilarity),
            self.predecessors.score,
        )
    }
}
