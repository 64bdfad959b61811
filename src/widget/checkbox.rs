//! Check Box Widget: a box that toggles on click.

use super::traits::{Action, Widget};
use crate::layout::{Point, Rect};
use crate::surface::Frame;

/// A two-state check box filling its cell.
#[derive(Debug, Clone, Default)]
pub struct CheckBox {
    checked: bool,
}

impl CheckBox {
    /// Create a check box in the given state.
    pub const fn new(checked: bool) -> Self {
        Self { checked }
    }

    /// Check if the box is ticked.
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    /// Set the state.
    pub const fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// The three points of the tick mark inside `rect`.
    fn tick(rect: Rect) -> [Point; 3] {
        let (half_w, half_h) = (rect.width / 2.0, rect.height / 2.0);
        [
            Point::new(rect.x + half_w * 0.05, rect.y + half_h - half_h * 0.05),
            Point::new(rect.x + half_w, rect.y + half_h + half_h * 0.9),
            Point::new(rect.x + rect.width - half_w * 0.05, rect.y + half_h * 0.05),
        ]
    }
}

impl Widget for CheckBox {
    fn render(&self, frame: &mut Frame<'_>, rect: Rect) {
        self.clear(frame, rect);
        if rect.is_empty() {
            return;
        }
        frame.stroke_rect(rect);
        if self.checked {
            frame.polyline(Self::tick(rect));
        }
    }

    fn handle_click(&mut self, rect: Rect, point: Point, _actions: &mut Vec<Action>) {
        if rect.contains(point) {
            self.checked = !self.checked;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};

    const RECT: Rect = Rect::new(10.0, 10.0, 20.0, 20.0);

    #[test]
    fn test_click_inside_toggles() {
        let mut checkbox = CheckBox::new(false);
        let mut actions = Vec::new();

        checkbox.handle_click(RECT, Point::new(15.0, 15.0), &mut actions);
        assert!(checkbox.is_checked());

        checkbox.handle_click(RECT, Point::new(30.0, 30.0), &mut actions);
        assert!(!checkbox.is_checked());
        assert!(actions.is_empty());
    }

    #[test]
    fn test_click_outside_is_ignored() {
        let mut checkbox = CheckBox::new(true);
        let mut actions = Vec::new();

        checkbox.handle_click(RECT, Point::new(31.0, 15.0), &mut actions);
        checkbox.handle_click(RECT, Point::new(5.0, 5.0), &mut actions);
        assert!(checkbox.is_checked());
    }

    #[test]
    fn test_render_draws_tick_only_when_checked() {
        let mut surface = RecordingSurface::default();

        CheckBox::new(false).render(&mut Frame::new(&mut surface, true), RECT);
        assert_eq!(surface.take(), vec![DrawOp::ClearRect(RECT), DrawOp::StrokeRect(RECT)]);

        CheckBox::new(true).render(&mut Frame::new(&mut surface, true), RECT);
        let ops = surface.take();
        assert_eq!(ops.len(), 3);
        assert!(matches!(ops[2], DrawOp::Polyline(_)));
    }
}
