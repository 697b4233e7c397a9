//! Property-based tests for the core algorithms
//!
//! Core features tested:
//! 1. Pattern normalization
//! 2. Pairwise scoring
//! 3. Greedy clustering
//! 4. Automaton construction

use proptest::prelude::*;
use tracefold::automaton::Automaton;
use tracefold::cluster::cluster_sequences;
use tracefold::pattern::{normalize_pattern, PatternConfig};
use tracefold::scoring::{disparity, homogeneity, shift_dissimilarity};
use tracefold::step::{Sequence, Token};

fn token_sequence(max_len: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-d]", 1..max_len)
}

fn pattern_config() -> impl Strategy<Value = PatternConfig> {
    (any::<bool>(), any::<bool>(), any::<bool>(), 0usize..5).prop_map(
        |(order, immediate, duplicates, cap)| PatternConfig::new(order, immediate, duplicates, cap),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_normalize_is_idempotent(
        sequence in token_sequence(16),
        config in pattern_config(),
    ) {
        let once = normalize_pattern(&sequence, &config).unwrap();
        let twice = normalize_pattern(&once, &config).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_normalize_never_grows(
        sequence in token_sequence(16),
        config in pattern_config(),
    ) {
        let pattern = normalize_pattern(&sequence, &config).unwrap();
        prop_assert!(!pattern.is_empty());
        prop_assert!(pattern.len() <= sequence.len());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_self_comparison_is_zero(sequence in token_sequence(12)) {
        let h = homogeneity(&sequence, &sequence);
        prop_assert_eq!(h.score, 0);
        prop_assert!(h.missing.is_empty());

        let d = disparity(&sequence, &sequence);
        prop_assert_eq!(d.score, 0);
        prop_assert!(d.missing.is_empty());

        prop_assert_eq!(shift_dissimilarity(&sequence, &sequence).score, 0);
    }

    #[test]
    fn prop_homogeneity_is_symmetric(
        first in token_sequence(12),
        second in token_sequence(12),
    ) {
        prop_assert_eq!(
            homogeneity(&first, &second).score,
            homogeneity(&second, &first).score
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_cluster_partition_ignores_input_order(
        sequences in prop::collection::vec(token_sequence(6), 1..12),
        config in pattern_config(),
        rotation in 0usize..12,
    ) {
        let original: Vec<Sequence> = sequences.iter().map(|s| Sequence::from_labels(s.clone())).collect();
        let shift = rotation % original.len();
        let mut rotated = original.clone();
        rotated.rotate_left(shift);

        let first = cluster_sequences(&original, &config).unwrap();
        let second = cluster_sequences(&rotated, &config).unwrap();
        prop_assert_eq!(first.model.len(), second.model.len());

        // position i of `rotated` holds original[(i + shift) % n]
        let n = original.len();
        let rotated_cluster = |i: usize| second.assignments[(i + n - shift) % n].cluster_id;
        for i in 0..n {
            for j in 0..n {
                let together = first.assignments[i].cluster_id == first.assignments[j].cluster_id;
                prop_assert_eq!(together, rotated_cluster(i) == rotated_cluster(j));
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_automaton_accepts_every_final_token(
        sequences in prop::collection::vec(token_sequence(8), 1..8),
        build_with_loop in any::<bool>(),
    ) {
        let tokens: Vec<Vec<Token>> = sequences
            .iter()
            .map(|s| s.iter().map(|label| Token::from(label.as_str())).collect())
            .collect();
        let mut automaton = Automaton::new(build_with_loop);
        automaton.insert_tokens(&tokens).unwrap();

        let total: usize = tokens.iter().map(Vec::len).sum();
        prop_assert!(automaton.state_count() <= total + 1);
        prop_assert!(automaton.distinct_sequences().len() <= tokens.len());
        if !build_with_loop {
            prop_assert!(automaton.states().iter().all(|state| !state.is_self_loop()));
        }

        for sequence in &tokens {
            let last = sequence.last().unwrap();
            prop_assert!(automaton
                .states()
                .iter()
                .any(|state| state.is_final() && state.label() == last));
        }
        let digraph_header = "digraph {";
        prop_assert!(automaton.render(true).starts_with(digraph_header));
    }
}
