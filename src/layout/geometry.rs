//! Geometry value types: proportional track sizes, padding and grid positions.

use serde::{Deserialize, Serialize};

/// Denominator that proportional sizes and paddings are authored against.
pub const DENOMINATOR: u32 = 1000;

/// A row or column size expressed as thousandths of the available extent.
///
/// Track lists are normalized: each list is scaled against its own total,
/// not against [`DENOMINATOR`]. `[500, 500]` and `[333, 333, 333]` both tile
/// the full extent, and a lone `[500]` fills all of it rather than half.
/// Lists whose total is far from 1000 are still laid out, with a warning
/// logged when the layout is built.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Proportion(u32);

impl Proportion {
    /// Create a proportion from a numerator over [`DENOMINATOR`].
    #[inline]
    pub const fn new(numerator: u32) -> Self {
        Self(numerator)
    }

    /// Split the full extent into `count` equal tracks.
    pub fn even(count: usize) -> Vec<Self> {
        let Ok(divisor) = u32::try_from(count) else {
            return Vec::new();
        };
        if divisor == 0 {
            return Vec::new();
        }
        vec![Self(DENOMINATOR / divisor); count]
    }

    /// Get the raw numerator.
    #[inline]
    pub const fn numerator(self) -> u32 {
        self.0
    }

    /// Get the size as a fraction of [`DENOMINATOR`].
    #[inline]
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / f64::from(DENOMINATOR)
    }
}

impl From<u32> for Proportion {
    #[inline]
    fn from(numerator: u32) -> Self {
        Self(numerator)
    }
}

/// Per-cell padding as fractions of the container extent.
///
/// `top`/`bottom` scale with the container height, `left`/`right` with its width.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Padding {
    /// Offset from the top edge of the cell.
    pub top: f64,
    /// Offset from the left edge of the cell.
    pub left: f64,
    /// Offset from the right edge of the cell.
    pub right: f64,
    /// Offset from the bottom edge of the cell.
    pub bottom: f64,
}

impl Padding {
    /// No padding.
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// Create padding from fractions. Negative values are clamped to zero.
    #[inline]
    pub fn new(top: f64, left: f64, right: f64, bottom: f64) -> Self {
        Self {
            top: top.max(0.0),
            left: left.max(0.0),
            right: right.max(0.0),
            bottom: bottom.max(0.0),
        }
    }

    /// Same fraction on all four sides.
    #[inline]
    pub fn uniform(fraction: f64) -> Self {
        Self::new(fraction, fraction, fraction, fraction)
    }

    /// Create padding from thousandths, in declaration order `[top, left, right, bottom]`.
    pub fn from_thousandths([top, left, right, bottom]: [u32; 4]) -> Self {
        let scale = |v: u32| f64::from(v) / f64::from(DENOMINATOR);
        Self::new(scale(top), scale(left), scale(right), scale(bottom))
    }
}

/// A zero-based (row, column) slot in a layout's grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct GridPosition {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub column: usize,
}

impl GridPosition {
    /// Create a new grid position.
    #[inline]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        assert_eq!(Proportion::even(4), vec![Proportion::new(250); 4]);
        assert_eq!(Proportion::even(3), vec![Proportion::new(333); 3]);
        assert!(Proportion::even(0).is_empty());
    }

    #[test]
    fn test_padding_from_thousandths_order() {
        let padding = Padding::from_thousandths([10, 25, 5, 15]);
        assert_eq!(padding.top, 0.01);
        assert_eq!(padding.left, 0.025);
        assert_eq!(padding.right, 0.005);
        assert_eq!(padding.bottom, 0.015);
    }

    #[test]
    fn test_padding_clamps_negative() {
        let padding = Padding::new(-0.5, 0.1, 0.0, 0.2);
        assert_eq!(padding.top, 0.0);
        assert_eq!(padding.left, 0.1);
    }
}
