//! Layout module: proportional grids resolved into absolute rectangles.
//!
//! Layouts are validated once when a page is built and resolved again on
//! every resize or page activation. There is no tree traversal at dispatch
//! time - just a flat `Vec<Placement>`.

mod breakpoint;
mod geometry;
mod grid;
mod rect;

pub use breakpoint::Breakpoints;
pub use geometry::{GridPosition, Padding, Proportion, DENOMINATOR};
pub use grid::{
    compute_positions, track_edges, GridCell, GridLayout, GridLayoutBuilder, Placement, WidgetId,
};
pub use rect::{Point, Rect};
