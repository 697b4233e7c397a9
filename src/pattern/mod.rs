// Pattern normalization
//
// Turns one raw sequence into the normalized pattern that the clustering
// engine compares. Two sequences belong together when their patterns (or
// their sliding windows over the pattern) are judged similar.
//
// A single left-to-right pass over a working copy, sorted first when order
// is ignored:
// - a back-to-back repeat is skipped unless immediate occurrence counts
// - a value already in the pattern is skipped unless duplicates count, or it
//   extends its own trailing run that is still shorter than the cap
// - anything else is appended

mod config;
mod window;

pub use config::{PatternConfig, MIN_OCCURRENCE_CAP};
pub use window::extract_windows;

use crate::error::{Error, Result};
use serde::Serialize;

/// Either the pattern itself (no windowing) or its distinct windows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Subsequences<T> {
    Flat(Vec<T>),
    Windows(Vec<Vec<T>>),
}

impl<T> Subsequences<T> {
    pub fn len(&self) -> usize {
        match self {
            Subsequences::Flat(items) => items.len(),
            Subsequences::Windows(windows) => windows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of normalizing one sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized<T> {
    pub pattern: Vec<T>,
    pub subsequences: Subsequences<T>,
}

/// Normalize a sequence under the given configuration
///
/// # Errors
/// Returns `InvalidInput` for an empty sequence.
///
/// # Example
/// ```
/// use tracefold::pattern::{normalize, PatternConfig};
///
/// let seq = ["a", "a", "a", "b", "a"];
/// let collapsed = normalize(&seq, &PatternConfig::new(true, false, false, 2))?;
/// assert_eq!(collapsed.pattern, vec!["a", "b"]);
///
/// let capped = normalize(&seq, &PatternConfig::new(true, true, false, 2))?;
/// assert_eq!(capped.pattern, vec!["a", "a", "b"]);
/// # Ok::<(), tracefold::Error>(())
/// ```
pub fn normalize<T: Ord + Clone>(sequence: &[T], config: &PatternConfig) -> Result<Normalized<T>> {
    if sequence.is_empty() {
        return Err(Error::invalid("cannot build a pattern from an empty sequence"));
    }

    let cap = config.effective_cap();
    let mut working = sequence.to_vec();
    if !config.consider_order {
        working.sort();
    }

    let mut pattern: Vec<T> = Vec::with_capacity(working.len());
    for token in working {
        if accepts(&pattern, &token, config, cap) {
            pattern.push(token);
        }
    }

    let width = config.effective_window();
    let subsequences = if width <= 1 {
        Subsequences::Flat(pattern.clone())
    } else {
        Subsequences::Windows(extract_windows(&pattern, width))
    };

    Ok(Normalized {
        pattern,
        subsequences,
    })
}

/// Convenience wrapper returning only the pattern
pub fn normalize_pattern<T: Ord + Clone>(sequence: &[T], config: &PatternConfig) -> Result<Vec<T>> {
    normalize(sequence, config).map(|n| n.pattern)
}

fn accepts<T: PartialEq>(pattern: &[T], token: &T, config: &PatternConfig, cap: usize) -> bool {
    if !config.consider_immediate_occurrence && pattern.last() == Some(token) {
        return false;
    }

    if !config.consider_duplicates && pattern.contains(token) {
        if !config.consider_immediate_occurrence {
            return false;
        }
        let run = trailing_run(pattern, token);
        return run > 0 && run < cap;
    }

    true
}

/// Length of the run of `token` at the end of `pattern`
fn trailing_run<T: PartialEq>(pattern: &[T], token: &T) -> usize {
    pattern.iter().rev().take_while(|t| *t == token).count()
}
