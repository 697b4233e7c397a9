use crate::pattern::Subsequences;
use crate::step::{Sequence, Token};
use serde::Serialize;

/// A group of sequences sharing one normalized pattern
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Position of first creation, never renumbered
    pub id: usize,

    /// Subsequences of the first member; later members are compared to it
    pub representative: Subsequences<Token>,

    /// Raw sequences assigned to this cluster, in input order
    pub members: Vec<Sequence>,
}

impl Cluster {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Representative rendered as JSON text (`["a","b"]`)
    pub fn pattern_text(&self) -> String {
        serde_json::to_string(&self.representative).unwrap_or_default()
    }

    /// Members as canonical token sequences
    pub fn member_tokens(&self) -> Vec<Vec<Token>> {
        self.members.iter().map(Sequence::tokens).collect()
    }
}

/// Where one input sequence landed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterAssignment {
    /// Position of the sequence in the input
    pub index: usize,
    pub cluster_id: usize,
    /// The sequence's own normalized pattern
    pub pattern: Vec<Token>,
}

/// One row of the 5-column export table
///
/// One row per distinct raw sequence within a cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterRow {
    pub cluster_id: usize,
    pub cluster_size: usize,
    pub pattern: String,
    pub count: usize,
    pub sequence: String,
}

/// Decide whether two subsequence lists describe the same pattern
///
/// Empty lists are never similar. With `consider_order` the lists must match
/// element by element, otherwise they must match once sorted.
pub fn similar<T: Ord + Clone>(a: &Subsequences<T>, b: &Subsequences<T>, consider_order: bool) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }
    if a.len() != b.len() || consider_order {
        return false;
    }

    match (a, b) {
        (Subsequences::Flat(x), Subsequences::Flat(y)) => sorted(x) == sorted(y),
        (Subsequences::Windows(x), Subsequences::Windows(y)) => sorted(x) == sorted(y),
        _ => false,
    }
}

fn sorted<T: Ord + Clone>(items: &[T]) -> Vec<T> {
    let mut items = items.to_vec();
    items.sort();
    items
}
