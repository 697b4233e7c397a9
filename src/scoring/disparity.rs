// Order-sensitive comparison
//
// Both metrics walk the shorter sequence against the longer one. Matching
// heads are consumed, tokens absent from the longer side are missing, and a
// token present elsewhere triggers a best-alignment search: the longest run
// of the shorter side's prefix found inside the longer side is removed from
// both and counted as one shifted unit.

use super::{push_unique, Comparison};
use serde::Serialize;

/// Where the shorter sequence's prefix best matches inside the longer one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Alignment {
    pub start: usize,
    pub length: usize,
}

/// Find the longest run of `short`'s prefix inside `long`
///
/// Every occurrence of `short[0]` is tried left to right; the first longest
/// run wins, and the scan stops once a run covers the rest of `long`.
/// Returns `None` when `short` has fewer than two tokens or its head does
/// not occur in `long`.
pub fn find_best_alignment<T: PartialEq>(short: &[T], long: &[T]) -> Option<Alignment> {
    let head = short.first()?;
    if short.len() <= 1 || !long.contains(head) {
        return None;
    }
    if short == long {
        return Some(Alignment {
            start: 0,
            length: short.len(),
        });
    }

    let mut best: Option<Alignment> = None;
    let mut from = 0;

    while let Some(offset) = long[from..].iter().position(|token| token == head) {
        let start = from + offset;
        let remaining = long.len() - start;
        let length = if short == &long[start..] {
            short.len()
        } else {
            1 + short[1..]
                .iter()
                .zip(&long[start + 1..])
                .take_while(|(a, b)| a == b)
                .count()
        };

        let found = match best {
            Some(current) if current.length >= length => current,
            _ => Alignment { start, length },
        };
        best = Some(found);

        if found.length >= remaining {
            break;
        }
        from = start + 1;
    }

    best
}

/// Order-sensitive difference between two sequences
///
/// The score is the number of distinct missing tokens plus the number of
/// runs that had to be shifted to line the sequences up.
///
/// # Example
/// ```
/// use tracefold::scoring::disparity;
///
/// // "b" moved behind "c": one shifted run, nothing missing
/// let result = disparity(&["a", "b", "c", "d"], &["a", "c", "b", "d"]);
/// assert_eq!(result.score, 1);
/// assert!(result.missing.is_empty());
/// ```
pub fn disparity<T: PartialEq + Clone>(first: &[T], second: &[T]) -> Comparison<T> {
    if first == second {
        return Comparison::identical();
    }

    let (mut short, mut long) = if second.len() < first.len() {
        (second.to_vec(), first.to_vec())
    } else {
        (first.to_vec(), second.to_vec())
    };
    let mut missing: Vec<T> = Vec::new();
    let mut shifted: Vec<Vec<T>> = Vec::new();

    while !short.is_empty() {
        if short == long {
            short.clear();
            long.clear();
            break;
        }

        let head = short[0].clone();
        let mut search = false;

        if long.first() == Some(&head) {
            if short.len() > 1 && long[1..].contains(&head) {
                search = true;
            } else {
                long.remove(0);
            }
        } else if long.contains(&head) {
            if short.len() == 1 {
                remove_first(&mut long, &head);
                shifted.push(vec![head]);
                short.clear();
                continue;
            }
            search = true;
        } else {
            missing.push(head.clone());
        }

        if !search {
            short.remove(0);
            continue;
        }

        match find_best_alignment(&short, &long) {
            Some(Alignment { start, length }) => {
                if start > 0 {
                    shifted.push(short[..length].to_vec());
                }
                short.drain(..length);
                long.drain(start..start + length);
            }
            None => {
                remove_first(&mut long, &head);
                shifted.push(vec![head]);
                short.remove(0);
            }
        }
    }

    for token in short.into_iter().chain(long) {
        push_unique(&mut missing, token);
    }

    Comparison {
        score: missing.len() + shifted.len(),
        missing,
    }
}

/// Index-shift variant of disparity
///
/// Every aligned run counts as shifted, even one found at offset 0, and once
/// the shorter side is used up the rest of the longer side counts as one
/// more shifted run. Missing tokens are not deduplicated.
pub fn shift_dissimilarity<T: PartialEq + Clone>(first: &[T], second: &[T]) -> Comparison<T> {
    if first == second {
        return Comparison::identical();
    }

    let (mut short, mut long) = if first.len() > second.len() {
        (second.to_vec(), first.to_vec())
    } else {
        (first.to_vec(), second.to_vec())
    };
    let mut missing: Vec<T> = Vec::new();
    let mut shifted: Vec<Vec<T>> = Vec::new();

    while !short.is_empty() {
        if short == long {
            short.clear();
            long.clear();
            break;
        }

        let head = short[0].clone();
        if long.first() == Some(&head) {
            long.remove(0);
        } else if !long.contains(&head) {
            missing.push(head);
        } else if let Some(Alignment { start, length }) = find_best_alignment(&short, &long) {
            shifted.push(short.drain(..length).collect());
            long.drain(start..start + length);
            if short.is_empty() && !long.is_empty() {
                shifted.push(std::mem::take(&mut long));
            }
            continue;
        } else {
            remove_first(&mut long, &head);
            shifted.push(vec![head]);
        }

        short.remove(0);
    }

    missing.extend(short.into_iter().chain(long));

    Comparison {
        score: missing.len() + shifted.len(),
        missing,
    }
}

/// Drop back-to-back repetitions (`a a b a` becomes `a b a`)
pub fn collapse_repeats<T: PartialEq + Clone>(sequence: &[T]) -> Vec<T> {
    let mut collapsed = sequence.to_vec();
    collapsed.dedup();
    collapsed
}

fn remove_first<T: PartialEq>(items: &mut Vec<T>, item: &T) {
    if let Some(position) = items.iter().position(|t| t == item) {
        items.remove(position);
    }
}
