//! Button Widget: a filled face with a label that fires an action.

use super::traits::{Action, Widget};
use crate::layout::{Point, Rect};
use crate::surface::{Font, Frame, Rgb};

/// A push button.
///
/// Clicking inside the face pushes the button's [`Action`] (if any) to the
/// caller's outbox. The button itself keeps no pressed state.
#[derive(Debug, Clone)]
pub struct Button {
    label: String,
    action: Option<Action>,
    face: Rgb,
}

impl Button {
    /// Create a button that fires `action` when clicked.
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action: Some(action),
            face: Rgb::BUTTON_FACE,
        }
    }

    /// Create a button without an action.
    pub fn inert(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: None,
            face: Rgb::BUTTON_FACE,
        }
    }

    /// Override the face color.
    #[must_use]
    pub const fn with_face(mut self, face: Rgb) -> Self {
        self.face = face;
        self
    }

    /// The label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The action fired on click.
    pub const fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }
}

impl Widget for Button {
    fn render(&self, frame: &mut Frame<'_>, rect: Rect) {
        self.clear(frame, rect);
        if rect.is_empty() {
            return;
        }

        frame.set_fill_style(self.face);
        frame.fill_rect(rect);
        frame.reset_fill_style();

        if !self.label.is_empty() {
            frame.set_font(Font::sized(rect.height * 0.75).bold());
            frame.draw_text_clipped(
                &self.label,
                rect,
                Point::new(rect.x + rect.width * 0.025, rect.y + rect.height * 0.75),
            );
            frame.reset_font();
        }
    }

    fn handle_click(&mut self, rect: Rect, point: Point, actions: &mut Vec<Action>) {
        if !rect.contains(point) {
            return;
        }
        if let Some(action) = &self.action {
            tracing::trace!(label = %self.label, ?action, "button pressed");
            actions.push(action.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};

    const RECT: Rect = Rect::new(0.0, 0.0, 10.0, 3.0);

    #[test]
    fn test_click_inside_pushes_action() {
        let mut button = Button::new("Next", Action::ShowPage("second".into()));
        let mut actions = Vec::new();

        button.handle_click(RECT, Point::new(10.0, 3.0), &mut actions);
        assert_eq!(actions, vec![Action::ShowPage("second".into())]);

        button.handle_click(RECT, Point::new(10.5, 1.0), &mut actions);
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn test_inert_button() {
        let mut button = Button::inert("Nothing");
        let mut actions = Vec::new();
        button.handle_click(RECT, Point::new(1.0, 1.0), &mut actions);
        assert!(actions.is_empty());
        assert_eq!(button.action(), None);
    }

    #[test]
    fn test_render_fills_face() {
        let mut surface = RecordingSurface::default();
        Button::new("Quit", Action::Quit).render(&mut Frame::new(&mut surface, true), RECT);

        let ops = surface.ops();
        assert!(ops.contains(&DrawOp::FillRect(RECT, Some(Rgb::BUTTON_FACE))));
        assert_eq!(surface.texts().collect::<Vec<_>>(), vec!["Quit"]);
        assert_eq!(ops.last(), Some(&DrawOp::ResetFont));
    }
}
