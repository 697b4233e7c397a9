use super::{collapse_repeats, homogeneity, push_unique};
use serde::Serialize;

/// Homogeneity of the pair and whether their predecessor structure differs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredecessorScore {
    pub homogeneity: usize,
    /// 0 when every final token is preceded by the same segments, else 1
    pub score: usize,
}

impl PredecessorScore {
    fn new(homogeneity: usize, differs: bool) -> Self {
        Self {
            homogeneity,
            score: usize::from(differs),
        }
    }
}

/// Compare how two sequences reach their final tokens
///
/// Only meaningful when the sequences hold the same tokens: a non-zero
/// homogeneity returns a difference right away. With `strip_repeats`
/// back-to-back repetitions are dropped first. `final_tokens` defaults to
/// the last token of each sequence.
///
/// For each final token both sequences are cut into the segments that
/// precede each of its occurrences; any mismatch is a difference.
pub fn predecessors<T: PartialEq + Clone>(
    first: &[T],
    second: &[T],
    strip_repeats: bool,
    final_tokens: Option<&[T]>,
) -> PredecessorScore {
    if first == second {
        return PredecessorScore::new(0, false);
    }

    let h = homogeneity(first, second).score;
    if h > 0 {
        return PredecessorScore::new(h, true);
    }

    let (left, right) = if strip_repeats {
        (collapse_repeats(first), collapse_repeats(second))
    } else {
        (first.to_vec(), second.to_vec())
    };
    if left.len() != right.len() {
        return PredecessorScore::new(h, true);
    }
    if left == right {
        return PredecessorScore::new(h, false);
    }

    let finals: Vec<T> = match final_tokens {
        Some(tokens) if !tokens.is_empty() => tokens.to_vec(),
        _ => {
            let mut finals = Vec::new();
            for last in [left.last(), right.last()].into_iter().flatten() {
                push_unique(&mut finals, last.clone());
            }
            finals
        }
    };

    let differs = finals
        .iter()
        .any(|token| segments_before(&left, token) != segments_before(&right, token));

    PredecessorScore::new(h, differs)
}

/// Segments preceding each occurrence of `token`, in order
fn segments_before<'a, T: PartialEq>(sequence: &'a [T], token: &T) -> Vec<&'a [T]> {
    let mut segments: Vec<&[T]> = sequence.split(|t| t == token).collect();
    // the piece after the last occurrence precedes nothing
    segments.pop();
    segments
}
