// Tests for the scoring engine
//
// The checkout traces below are 20-step scan/transmit/pay sessions; their
// expected scores are fixed reference values.

use super::*;
use crate::step::Token;

fn trace(runs: &[(&str, usize)]) -> Vec<Token> {
    runs.iter()
        .flat_map(|(label, count)| std::iter::repeat(Token::from(*label)).take(*count))
        .collect()
}

fn session(tail: &str) -> Vec<Token> {
    trace(&[
        ("unlock", 1),
        ("scan", 8),
        ("scan_-2", 1),
        ("scan", 4),
        ("transmit", 1),
        ("abandon", 1),
        ("openSession", 1),
        ("add", 1),
        ("closeSession", 1),
        (tail, 1),
    ])
}

fn checkout() -> Vec<Token> {
    session("pay_5")
}

fn checkout_reversed() -> Vec<Token> {
    let mut reversed = checkout();
    reversed.reverse();
    reversed
}

fn checkout_payer() -> Vec<Token> {
    session("payer_5")
}

fn checkout_early_discount() -> Vec<Token> {
    trace(&[
        ("unlock", 1),
        ("scan", 4),
        ("scan_-2", 1),
        ("scan", 8),
        ("transmit", 1),
        ("abandon", 1),
        ("openSession", 1),
        ("add", 1),
        ("closeSession", 1),
        ("pay_5", 1),
    ])
}

fn checkout_early_transmit() -> Vec<Token> {
    trace(&[
        ("unlock", 1),
        ("scan", 8),
        ("scan_-2", 1),
        ("scan", 2),
        ("transmit", 1),
        ("scan", 2),
        ("abandon", 1),
        ("openSession", 1),
        ("add", 1),
        ("closeSession", 1),
        ("pay_5", 1),
    ])
}

fn checkout_reopened() -> Vec<Token> {
    trace(&[
        ("unlock", 1),
        ("scan", 8),
        ("scan_-2", 1),
        ("scan", 2),
        ("abandon", 1),
        ("openSession", 1),
        ("scan", 2),
        ("transmit", 1),
        ("abandon", 1),
        ("openSession", 1),
        ("add", 1),
        ("closeSession", 1),
        ("pay_5", 1),
    ])
}

fn checkout_cluster() -> Vec<Vec<Token>> {
    vec![
        checkout(),
        checkout_reversed(),
        checkout_payer(),
        checkout_early_discount(),
        checkout(),
        checkout_early_transmit(),
        checkout_reopened(),
        checkout(),
    ]
}

fn chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

// ---------------------------------------------------------------------------
// pairwise metrics
// ---------------------------------------------------------------------------

#[test]
fn test_homogeneity_ignores_order() {
    assert_eq!(homogeneity(&checkout(), &checkout_reversed()).score, 0);
    assert_eq!(homogeneity(&checkout_reopened(), &checkout()).score, 0);
}

#[test]
fn test_homogeneity_reports_missing_tokens() {
    let result = homogeneity(&checkout(), &checkout_payer());
    assert_eq!(result.score, 2);
    assert_eq!(result.missing, vec![Token::from("pay_5"), Token::from("payer_5")]);

    let result = homogeneity(&chars("ab"), &chars("bc"));
    assert_eq!(result.missing, chars("ac"));
}

#[test]
fn test_homogeneity_self_comparison() {
    for sequence in checkout_cluster() {
        assert_eq!(homogeneity(&sequence, &sequence), Comparison::identical());
    }
}

#[test]
fn test_disparity_of_reversed_trace() {
    assert_eq!(disparity(&checkout(), &checkout_reversed()).score, 9);
}

#[test]
fn test_disparity_of_relocated_transmit() {
    assert_eq!(disparity(&checkout(), &checkout_early_transmit()).score, 1);
}

#[test]
fn test_disparity_of_renamed_payment_and_moved_discount() {
    assert_eq!(disparity(&checkout_payer(), &checkout_early_discount()).score, 4);
}

#[test]
fn test_disparity_of_reopened_session() {
    // one shift plus the extra abandon and openSession
    assert_eq!(disparity(&checkout_reopened(), &checkout()).score, 3);
}

#[test]
fn test_disparity_missing_is_deduplicated() {
    let result = disparity(&chars("ab"), &chars("cd"));
    assert_eq!(result.score, 4);
    assert_eq!(result.missing, chars("abcd"));

    let result = disparity(&chars("aab"), &chars("aaab"));
    assert_eq!(result.score, 2);
    assert_eq!(result.missing, chars("a"));
}

#[test]
fn test_disparity_self_comparison() {
    for sequence in checkout_cluster() {
        assert_eq!(disparity(&sequence, &sequence), Comparison::identical());
    }
}

#[test]
fn test_find_best_alignment() {
    assert_eq!(find_best_alignment(&chars("a"), &chars("abc")), None);
    assert_eq!(find_best_alignment(&chars("xa"), &chars("abc")), None);
    assert_eq!(
        find_best_alignment(&chars("abc"), &chars("abc")),
        Some(Alignment { start: 0, length: 3 })
    );
    assert_eq!(
        find_best_alignment(&chars("abc"), &chars("acabc")),
        Some(Alignment { start: 2, length: 3 })
    );
    // ties keep the first occurrence
    assert_eq!(
        find_best_alignment(&chars("abx"), &chars("abcabd")),
        Some(Alignment { start: 0, length: 2 })
    );
}

#[test]
fn test_shift_dissimilarity() {
    assert_eq!(shift_dissimilarity(&chars("abc"), &chars("cab")).score, 1);

    let result = shift_dissimilarity(&chars("abcd"), &chars("xbcd"));
    assert_eq!(result.score, 3);
    assert_eq!(result.missing, chars("a"));

    // the run "ab" and the leftover "b" both count as shifted
    assert_eq!(shift_dissimilarity(&chars("ab"), &chars("bab")).score, 2);
    assert_eq!(shift_dissimilarity(&chars("ab"), &chars("ab")).score, 0);
}

#[test]
fn test_collapse_repeats() {
    assert_eq!(collapse_repeats(&chars("aaba")), chars("aba"));
    assert!(collapse_repeats::<char>(&[]).is_empty());
}

#[test]
fn test_predecessors_identical_after_collapsing() {
    let shorter = trace(&[
        ("unlock", 1),
        ("scan", 4),
        ("scan_-2", 1),
        ("scan", 2),
        ("transmit", 1),
        ("abandon", 1),
        ("openSession", 1),
        ("add", 1),
        ("closeSession", 1),
        ("pay_5", 1),
    ]);
    let expected = PredecessorScore {
        homogeneity: 0,
        score: 0,
    };
    assert_eq!(predecessors(&checkout(), &shorter, true, None), expected);
}

#[test]
fn test_predecessors_detect_reordering() {
    let result = predecessors(&chars("abca"), &chars("acba"), true, None);
    assert_eq!(result.homogeneity, 0);
    assert_eq!(result.score, 1);

    assert_eq!(predecessors(&chars("aabc"), &chars("abbc"), true, None).score, 0);
    assert_eq!(predecessors(&chars("aabc"), &chars("abbc"), false, None).score, 1);
    assert_eq!(predecessors(&chars("abcb"), &chars("acbb"), true, None).score, 1);
}

#[test]
fn test_predecessors_short_circuit_on_homogeneity() {
    let result = predecessors(&chars("abc"), &chars("abd"), true, None);
    assert_eq!(result.homogeneity, 2);
    assert_eq!(result.score, 1);
}

#[test]
fn test_predecessors_with_explicit_final_tokens() {
    let first = chars("xayb");
    let second = chars("xaby");
    assert_eq!(predecessors(&first, &second, true, None).score, 1);
    assert_eq!(predecessors(&first, &second, true, Some(&['a'][..])).score, 0);
}

// ---------------------------------------------------------------------------
// memoized evaluators
// ---------------------------------------------------------------------------

#[test]
fn test_evaluate_many_ranges_and_memo() {
    let mut memo = MemoRegistry::new();
    let many = vec![chars("ab"), chars("ba"), chars("c")];
    let scores = evaluate_many(&chars("ab"), &many, &EvalOptions::default(), &mut memo);

    assert_eq!(scores.homogeneity, Some(ScoreRange { min: 0, max: 3 }));
    assert_eq!(scores.disparity, Some(ScoreRange { min: 0, max: 3 }));
    assert_eq!(memo.known_sequences().len(), 3);
    assert_eq!(memo.pair_count(), 3);

    let again = evaluate_many(&chars("ab"), &many, &EvalOptions::default(), &mut memo);
    assert_eq!(again, scores);
    assert_eq!(memo.pair_count(), 3);
}

#[test]
fn test_evaluate_many_fills_missing_metric() {
    let mut memo = MemoRegistry::new();
    let homogeneity_only = EvalOptions {
        disparity: false,
        ..EvalOptions::default()
    };
    let many = vec![chars("ba")];

    let scores = evaluate_many(&chars("ab"), &many, &homogeneity_only, &mut memo);
    assert_eq!(scores.disparity, None);
    assert_eq!(memo.pair(0, 1).and_then(|p| p.disparity), None);

    evaluate_many(&chars("ab"), &many, &EvalOptions::default(), &mut memo);
    assert_eq!(
        memo.pair(0, 1).copied(),
        Some(PairScore {
            homogeneity: Some(0),
            disparity: Some(1),
        })
    );
}

#[test]
fn test_evaluate_many_with_nothing_to_compare() {
    let mut memo = MemoRegistry::new();
    let scores = evaluate_many(&chars("ab"), &[], &EvalOptions::default(), &mut memo);
    assert_eq!(scores, ManyScores::default());
}

#[test]
fn test_evaluate_cluster_short_circuits_disparity() {
    let mut memo = MemoRegistry::new();
    let scores = evaluate_cluster(&checkout_cluster(), &EvalOptions::default(), &mut memo);

    let h = scores.homogeneity.unwrap();
    assert!(close(h.min, 1.0 / 28.0));
    assert!(close(h.max, 3.0 / 28.0));
    assert!(close(h.avg, 2.0 / 28.0));
    assert_eq!(scores.disparity, None);
}

#[test]
fn test_evaluate_cluster_unconditional_disparity() {
    let mut memo = MemoRegistry::new();
    let scores = evaluate_cluster(&checkout_cluster(), &EvalOptions::unconditional(), &mut memo);

    let d = scores.disparity.unwrap();
    assert!(close(d.min, 0.25));
    assert!(close(d.max, 19.0 / 28.0));
    assert!(close(d.avg, 13.0 / 28.0));
}

#[test]
fn test_evaluate_cluster_of_one_is_none() {
    let mut memo = MemoRegistry::new();
    let scores = evaluate_cluster(&[chars("ab")], &EvalOptions::default(), &mut memo);
    assert_eq!(scores, ClusterScores::default());
}

#[test]
fn test_evaluate_cluster_averages_per_call_bounds() {
    let mut memo = MemoRegistry::new();
    let cluster = vec![chars("abc"), chars("acb"), chars("ab")];
    let scores = evaluate_cluster(&cluster, &EvalOptions::unconditional(), &mut memo);

    let h = scores.homogeneity.unwrap();
    assert!(close(h.min, 1.0 / 6.0));
    assert!(close(h.max, 1.0 / 3.0));
    let d = scores.disparity.unwrap();
    assert!(close(d.min, 0.5));
    assert!(close(d.max, 0.5));
}

#[test]
fn test_evaluate_model_of_duplicated_cluster() {
    let mut memo = MemoRegistry::new();
    let model = vec![checkout_cluster(), checkout_cluster()];
    let scores = evaluate_model(&model, &EvalOptions::default(), &mut memo).unwrap();

    let h = scores.homogeneity.unwrap();
    assert!(close(h.summary.avg, 2.0 / 28.0));
    assert_eq!(h.nonzero_clusters, vec![0, 1]);
    assert_eq!(scores.disparity, None);
    assert_eq!(scores.singleton_clusters, 0);

    let unconditional = evaluate_model(&model, &EvalOptions::unconditional(), &mut memo).unwrap();
    assert!(close(unconditional.disparity.unwrap().summary.max, 19.0 / 28.0));
}

#[test]
fn test_evaluate_model_divides_by_cluster_count() {
    let mut memo = MemoRegistry::new();
    let model = vec![
        vec![chars("abc"), chars("acb"), chars("ab")],
        vec![chars("x")],
        vec![chars("ab"), chars("ab")],
    ];
    let scores = evaluate_model(&model, &EvalOptions::unconditional(), &mut memo).unwrap();

    let h = scores.homogeneity.unwrap();
    assert!(close(h.summary.min, 1.0 / 18.0));
    assert!(close(h.summary.max, 1.0 / 9.0));
    assert!(close(h.summary.avg, 1.0 / 12.0));
    assert_eq!(h.nonzero_clusters, vec![0]);

    let d = scores.disparity.unwrap();
    assert!(close(d.summary.avg, 1.0 / 6.0));
    assert_eq!(d.nonzero_clusters, vec![0]);
    assert_eq!(scores.singleton_clusters, 1);

    let short_circuit = evaluate_model(&model, &EvalOptions::default(), &mut memo).unwrap();
    assert!(short_circuit.homogeneity.is_some());
    assert_eq!(short_circuit.disparity, None);
}

#[test]
fn test_evaluate_model_needs_two_clusters() {
    let mut memo = MemoRegistry::new();
    let model = vec![vec![chars("ab"), chars("ba")]];
    let scores = evaluate_model(&model, &EvalOptions::default(), &mut memo).unwrap();
    assert_eq!(scores.homogeneity, None);
    assert_eq!(scores.disparity, None);
}

#[test]
fn test_evaluate_model_rejects_empty_cluster() {
    let mut memo = MemoRegistry::new();
    let model = vec![vec![chars("ab")], vec![]];
    let result = evaluate_model(&model, &EvalOptions::default(), &mut memo);
    assert!(matches!(result, Err(crate::Error::InvalidInput(_))));
}

#[test]
fn test_evaluate_model_all_singletons() {
    let mut memo = MemoRegistry::new();
    let model = vec![vec![chars("a")], vec![chars("b")]];
    let scores = evaluate_model(&model, &EvalOptions::default(), &mut memo).unwrap();

    assert_eq!(scores.singleton_clusters, 2);
    assert_eq!(scores.homogeneity.unwrap().summary, ScoreSummary::default());
}

#[test]
fn test_weak_disparity_normalizes_repeats() {
    let model = vec![
        vec![chars("aaab"), chars("aab")],
        vec![chars("c"), chars("c")],
    ];

    let mut memo = MemoRegistry::new();
    let raw = evaluate_model(&model, &EvalOptions::unconditional(), &mut memo).unwrap();
    assert!(raw.disparity.unwrap().summary.avg > 0.0);

    let mut memo = MemoRegistry::new();
    let weak = evaluate_model_weak_disparity(&model, &mut memo).unwrap();
    assert_eq!(weak.disparity.unwrap().summary, ScoreSummary::default());
    assert_eq!(weak.homogeneity.unwrap().summary, ScoreSummary::default());
}

#[test]
fn test_weak_disparity_keeps_disparity_when_heterogeneous() {
    let model = vec![
        vec![chars("ab"), chars("abc")],
        vec![chars("d"), chars("d")],
    ];
    let mut memo = MemoRegistry::new();
    let scores = evaluate_model_weak_disparity(&model, &mut memo).unwrap();

    assert!(close(scores.homogeneity.unwrap().summary.avg, 0.25));
    let d = scores.disparity.unwrap();
    assert!(close(d.summary.avg, 0.25));
    assert_eq!(d.nonzero_clusters, vec![0]);
}

#[test]
fn test_weak_disparity_rejects_empty_cluster() {
    let mut memo: MemoRegistry<char> = MemoRegistry::new();
    let model: Vec<Vec<Vec<char>>> = vec![vec![], vec![chars("a")]];
    assert!(evaluate_model_weak_disparity(&model, &mut memo).is_err());
}
