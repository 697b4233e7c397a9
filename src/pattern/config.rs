// Knobs that decide when two sequences follow the "same" pattern
//
// Four rules: keep or ignore step order, keep or collapse back-to-back
// repeats, keep or drop values already seen, and how many back-to-back
// repeats survive when duplicates are dropped.

use serde::{Deserialize, Serialize};

/// Smallest number of back-to-back repeats kept when the cap applies
pub const MIN_OCCURRENCE_CAP: usize = 2;

/// Configuration for pattern normalization
///
/// # Example
/// ```
/// use tracefold::pattern::PatternConfig;
///
/// let config = PatternConfig::default();
/// assert!(config.consider_order);
/// assert_eq!(config.effective_cap(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// When false, the steps are sorted before the pattern is built
    pub consider_order: bool,

    /// When false, back-to-back repeats collapse to a single step
    ///
    /// Given `["a", "a", "a", "b"]`, the pattern becomes `["a", "b"]`.
    pub consider_immediate_occurrence: bool,

    /// When false, a value already present in the pattern is dropped, except
    /// for back-to-back repeats up to `occurrence_cap` when
    /// `consider_immediate_occurrence` is true
    pub consider_duplicates: bool,

    /// Number of back-to-back repeats kept when duplicates are dropped
    ///
    /// Values below 2 are raised to 2.
    pub occurrence_cap: usize,

    /// Width of the sliding windows taken over the pattern
    ///
    /// 0 and 1 both mean "no windowing": the subsequences equal the pattern.
    pub window: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            consider_order: true,
            consider_immediate_occurrence: true,
            consider_duplicates: true,
            occurrence_cap: MIN_OCCURRENCE_CAP,
            window: 1,
        }
    }
}

impl PatternConfig {
    pub fn new(
        consider_order: bool,
        consider_immediate_occurrence: bool,
        consider_duplicates: bool,
        occurrence_cap: usize,
    ) -> Self {
        Self {
            consider_order,
            consider_immediate_occurrence,
            consider_duplicates,
            occurrence_cap,
            window: 1,
        }
    }

    /// Order-sensitive, back-to-back repeats capped at 2, duplicates dropped
    ///
    /// This is the normalization applied before weak disparity scoring.
    pub fn weak_disparity() -> Self {
        Self::new(true, true, false, MIN_OCCURRENCE_CAP)
    }

    /// Order, repeats and duplicates all ignored: only the set of values counts
    pub fn loose() -> Self {
        Self::new(false, false, false, MIN_OCCURRENCE_CAP)
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Occurrence cap after clamping to the minimum of 2
    pub fn effective_cap(&self) -> usize {
        if self.occurrence_cap < MIN_OCCURRENCE_CAP {
            tracing::debug!(
                requested = self.occurrence_cap,
                "occurrence cap raised to {}",
                MIN_OCCURRENCE_CAP
            );
            MIN_OCCURRENCE_CAP
        } else {
            self.occurrence_cap
        }
    }

    /// Window width, with 0 treated as 1
    pub fn effective_window(&self) -> usize {
        self.window.max(1)
    }
}
