use super::{push_unique, Comparison};

/// Order-insensitive difference between two sequences
///
/// Takes the head of the first sequence and removes every occurrence of it
/// from both sides; a head absent from the second side is missing. Leftovers
/// on either side are missing too. The score is the number of distinct
/// missing tokens.
///
/// # Example
/// ```
/// use tracefold::scoring::homogeneity;
///
/// let result = homogeneity(&["a", "b", "b"], &["b", "a"]);
/// assert_eq!(result.score, 0);
///
/// let result = homogeneity(&["a", "b"], &["b", "c"]);
/// assert_eq!(result.score, 2);
/// assert_eq!(result.missing, vec!["a", "c"]);
/// ```
pub fn homogeneity<T: PartialEq + Clone>(first: &[T], second: &[T]) -> Comparison<T> {
    if first == second {
        return Comparison::identical();
    }

    let mut left = first.to_vec();
    let mut right = second.to_vec();
    let mut missing = Vec::new();

    while !left.is_empty() && !right.is_empty() {
        if left == right {
            left.clear();
            right.clear();
            break;
        }

        let current = left[0].clone();
        let before = right.len();
        right.retain(|token| *token != current);
        left.retain(|token| *token != current);

        if right.len() == before {
            push_unique(&mut missing, current);
        }
    }

    for token in left.into_iter().chain(right) {
        push_unique(&mut missing, token);
    }

    Comparison {
        score: missing.len(),
        missing,
    }
}
