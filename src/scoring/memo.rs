use serde::Serialize;
use std::collections::HashMap;

/// Cached scores for one ordered pair of known sequences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PairScore {
    pub homogeneity: Option<usize>,
    pub disparity: Option<usize>,
}

/// Caller-owned cache shared across evaluation calls
///
/// Sequences are registered once and referred to by their position; pair
/// scores are keyed by the ordered pair of positions. Only duplicated
/// sequences benefit, so a fresh registry per pipeline is fine.
#[derive(Debug, Clone)]
pub struct MemoRegistry<T> {
    known_sequences: Vec<Vec<T>>,
    pair_scores: HashMap<(usize, usize), PairScore>,
}

impl<T> Default for MemoRegistry<T> {
    fn default() -> Self {
        Self {
            known_sequences: Vec::new(),
            pair_scores: HashMap::new(),
        }
    }
}

impl<T: PartialEq + Clone> MemoRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of `sequence`, registering it when first seen
    pub fn register(&mut self, sequence: &[T]) -> usize {
        match self.position(sequence) {
            Some(index) => index,
            None => {
                self.known_sequences.push(sequence.to_vec());
                self.known_sequences.len() - 1
            }
        }
    }

    pub fn position(&self, sequence: &[T]) -> Option<usize> {
        self.known_sequences
            .iter()
            .position(|known| known.as_slice() == sequence)
    }

    pub fn known_sequences(&self) -> &[Vec<T>] {
        &self.known_sequences
    }

    pub fn pair(&self, first: usize, second: usize) -> Option<&PairScore> {
        self.pair_scores.get(&(first, second))
    }

    pub fn pair_count(&self) -> usize {
        self.pair_scores.len()
    }

    pub(crate) fn store(&mut self, first: usize, second: usize, score: PairScore) {
        self.pair_scores.insert((first, second), score);
    }
}
