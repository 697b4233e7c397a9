// Greedy pattern clustering
//
// Groups raw sequences whose normalized patterns are judged similar. The
// first cluster whose representative matches wins, so ids follow the order
// in which patterns first appear in the input.
//
// Similarity is literal equality of the subsequence lists, either element by
// element (order considered) or after sorting (order ignored).

mod definition;
mod registry;

pub use definition::{similar, Cluster, ClusterAssignment, ClusterRow};
pub use registry::{ClusterModel, ClusterOutcome};

use crate::error::Result;
use crate::pattern::PatternConfig;
use crate::step::Sequence;

/// Cluster sequences with the given pattern configuration
pub fn cluster_sequences(sequences: &[Sequence], config: &PatternConfig) -> Result<ClusterOutcome> {
    ClusterModel::build(sequences, config)
}
