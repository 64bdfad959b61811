//! Breakpoints: viewport-width thresholds that choose a layout variant.

/// Ascending width thresholds, one per layout variant.
///
/// Variant `i` applies when `thresholds[i] <= width < thresholds[i + 1]`; the
/// last variant has no upper bound. Widths below the first threshold, and any
/// width when the list is empty, fall back to variant 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Breakpoints(Vec<u32>);

impl Breakpoints {
    /// Wrap a list of thresholds. Returns `None` if the list is not ascending.
    pub fn new(thresholds: Vec<u32>) -> Option<Self> {
        thresholds
            .windows(2)
            .all(|pair| pair[0] <= pair[1])
            .then_some(Self(thresholds))
    }

    /// Number of thresholds.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no thresholds.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw thresholds.
    pub fn thresholds(&self) -> &[u32] {
        &self.0
    }

    /// Index of the variant that applies at `width`.
    pub fn select(&self, width: f64) -> usize {
        self.0
            .iter()
            .rposition(|&threshold| f64::from(threshold) <= width)
            .unwrap_or(0)
    }
}
