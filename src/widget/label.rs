//! Label Widget: static text.

use super::traits::{Action, Widget};
use crate::layout::{Point, Rect};
use crate::surface::{Font, Frame};

/// Static, non-interactive text.
#[derive(Debug, Clone, Default)]
pub struct Label {
    text: String,
}

impl Label {
    /// Create a label.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the displayed text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for Label {
    fn render(&self, frame: &mut Frame<'_>, rect: Rect) {
        self.clear(frame, rect);
        if self.text.is_empty() || rect.is_empty() {
            return;
        }
        frame.set_font(Font::sized(rect.height * 0.75));
        frame.draw_text_clipped(
            &self.text,
            rect,
            Point::new(rect.x + rect.width * 0.025, rect.y + rect.height * 0.75),
        );
        frame.reset_font();
    }

    fn handle_click(&mut self, _rect: Rect, _point: Point, _actions: &mut Vec<Action>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};

    #[test]
    fn test_label_renders_text_at_baseline() {
        let rect = Rect::new(0.0, 0.0, 40.0, 4.0);
        let mut surface = RecordingSurface::default();
        Label::new("Name").render(&mut Frame::new(&mut surface, true), rect);

        assert!(surface.ops().contains(&DrawOp::Text {
            text: "Name".into(),
            clip: rect,
            origin: Point::new(1.0, 3.0),
        }));
    }

    #[test]
    fn test_empty_label_only_clears() {
        let rect = Rect::new(0.0, 0.0, 40.0, 4.0);
        let mut surface = RecordingSurface::default();
        Label::default().render(&mut Frame::new(&mut surface, true), rect);
        assert_eq!(surface.take(), vec![DrawOp::ClearRect(rect)]);
    }
}
