//! `RecordingSurface`: A [`Surface`] that logs draw calls instead of drawing.

use super::{Font, Rgb, Surface};
use crate::layout::{Point, Rect};

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// [`Surface::stroke_rect`]
    StrokeRect(Rect),
    /// [`Surface::fill_rect`], with the fill color in effect.
    FillRect(Rect, Option<Rgb>),
    /// [`Surface::polyline`]
    Polyline([Point; 3]),
    /// [`Surface::draw_text_clipped`]
    Text {
        /// Text drawn.
        text: String,
        /// Clip rectangle.
        clip: Rect,
        /// Start of the baseline.
        origin: Point,
    },
    /// [`Surface::clear_rect`]
    ClearRect(Rect),
    /// [`Surface::set_font`]
    SetFont(Font),
    /// [`Surface::reset_font`]
    ResetFont,
    /// [`Surface::set_fill_style`]
    SetFillStyle(Rgb),
    /// [`Surface::reset_fill_style`]
    ResetFillStyle,
}

/// Records every call; text advances by a fixed width per character.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    char_width: f64,
    fill: Option<Rgb>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl RecordingSurface {
    /// Create a recorder whose text measures `char_width` per character.
    pub const fn new(char_width: f64) -> Self {
        Self {
            ops: Vec::new(),
            char_width,
            fill: None,
        }
    }

    /// Everything recorded so far.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Take the recorded calls, leaving the log empty.
    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Texts drawn so far, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn measure_text(&self, text: &str, _font: Font) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let count = text.chars().count() as f64;
        count * self.char_width
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::StrokeRect(rect));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::FillRect(rect, self.fill));
    }

    fn polyline(&mut self, points: [Point; 3]) {
        self.ops.push(DrawOp::Polyline(points));
    }

    fn draw_text_clipped(&mut self, text: &str, clip: Rect, origin: Point) {
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            clip,
            origin,
        });
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::ClearRect(rect));
    }

    fn set_font(&mut self, font: Font) {
        self.ops.push(DrawOp::SetFont(font));
    }

    fn reset_font(&mut self) {
        self.ops.push(DrawOp::ResetFont);
    }

    fn set_fill_style(&mut self, color: Rgb) {
        self.fill = Some(color);
        self.ops.push(DrawOp::SetFillStyle(color));
    }

    fn reset_fill_style(&mut self) {
        self.fill = None;
        self.ops.push(DrawOp::ResetFillStyle);
    }
}
