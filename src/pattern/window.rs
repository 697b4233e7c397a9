/// Extracts the distinct fixed-width windows of a pattern, in first-seen order
///
/// For example, with width 2:
/// - Input pattern: ["a", "b", "a", "b", "c"]
/// - Output windows: [["a", "b"], ["b", "a"], ["b", "c"]]
///
/// A pattern shorter than the width yields no window.
///
/// # Example
/// ```
/// use tracefold::pattern::extract_windows;
///
/// let windows = extract_windows(&["a", "b", "a", "b"], 2);
/// assert_eq!(windows, vec![vec!["a", "b"], vec!["b", "a"]]);
/// ```
pub fn extract_windows<T: PartialEq + Clone>(pattern: &[T], width: usize) -> Vec<Vec<T>> {
    let mut windows: Vec<Vec<T>> = Vec::new();

    if width == 0 || pattern.len() < width {
        return windows;
    }

    for window in pattern.windows(width) {
        if !windows.iter().any(|w| w.as_slice() == window) {
            windows.push(window.to_vec());
        }
    }

    windows
}
