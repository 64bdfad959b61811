//! Drawing surface: the minimal vector capability set widgets draw with.
//!
//! Widgets never talk to a concrete backend. They receive a [`Frame`], which
//! wraps any [`Surface`] together with the per-frame application state they
//! need (the cursor blink phase).
//!
//! Two backends ship with the crate:
//! - [`CellBuffer`]: rasterizes onto a terminal cell grid (one unit = one cell)
//! - [`RecordingSurface`]: records every call, for headless hosts and tests
//!
//! [`diff`] turns two cell buffers into minimal ANSI output.

mod buffer;
mod cell;
pub mod diff;
mod recording;

pub use buffer::{CellBuffer, Palette};
pub use cell::{Cell, Modifiers, Rgb};
pub use recording::{DrawOp, RecordingSurface};

use crate::layout::{Point, Rect};
use std::ops::{Deref, DerefMut};

/// Font selection for text drawing and measurement.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Font {
    /// Glyph height in surface units.
    pub size: f64,
    /// Bold weight.
    pub bold: bool,
}

impl Font {
    /// A regular-weight font of the given size.
    pub const fn sized(size: f64) -> Self {
        Self { size, bold: false }
    }

    /// The same font in bold.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// A 2D drawing target.
///
/// All operations are infallible; drawing outside the surface is clipped.
/// A shared `&dyn Surface` only grants measurement, which is what key
/// handlers receive.
pub trait Surface {
    /// Horizontal advance of `text` when set in `font`.
    fn measure_text(&self, text: &str, font: Font) -> f64;

    /// Outline a rectangle.
    fn stroke_rect(&mut self, rect: Rect);

    /// Fill a rectangle with the current fill style.
    fn fill_rect(&mut self, rect: Rect);

    /// Stroke the two segments joining three points (check marks).
    fn polyline(&mut self, points: [Point; 3]);

    /// Draw `text` starting at `origin.x` on the baseline `origin.y`,
    /// clipped to `clip`.
    fn draw_text_clipped(&mut self, text: &str, clip: Rect, origin: Point);

    /// Erase a rectangle back to the background.
    fn clear_rect(&mut self, rect: Rect);

    /// Select the font for subsequent text.
    fn set_font(&mut self, font: Font);

    /// Restore the default font.
    fn reset_font(&mut self);

    /// Select the color used by [`Surface::fill_rect`].
    fn set_fill_style(&mut self, color: Rgb);

    /// Restore the default fill color.
    fn reset_fill_style(&mut self);
}

/// One render pass: a surface plus the application state visible to widgets.
pub struct Frame<'a> {
    surface: &'a mut dyn Surface,
    cursor_visible: bool,
}

impl<'a> Frame<'a> {
    /// Wrap a surface for one pass.
    pub fn new(surface: &'a mut dyn Surface, cursor_visible: bool) -> Self {
        Self {
            surface,
            cursor_visible,
        }
    }

    /// Whether the blinking text cursor is in its visible phase.
    pub const fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Read-only view of the underlying surface, for measuring text.
    pub fn metrics(&self) -> &(dyn Surface + 'a) {
        &*self.surface
    }
}

impl<'a> Deref for Frame<'a> {
    type Target = dyn Surface + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl DerefMut for Frame<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}
