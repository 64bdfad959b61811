//! Widget trait and the actions widgets can request.

use crate::actor::{KeyCode, KeyModifiers};
use crate::layout::{Point, Rect};
use crate::surface::{Frame, Surface};

/// Something a widget asks the engine to do on its behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Activate the page with this name.
    ShowPage(String),
    /// Stop the application.
    Quit,
    /// Hand a tag to the application.
    Emit(String),
}

/// A key press as seen by widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key code.
    pub code: KeyCode,
    /// Modifiers held.
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    /// A key press without modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

/// A UI component that draws into a rectangle and reacts to input.
///
/// Widgets own their content state (text, checked flag, cursor) but never
/// their geometry: the rectangle is supplied by the layout on every call.
pub trait Widget {
    /// Clear `rect`, then draw. Never mutates widget state.
    fn render(&self, frame: &mut Frame<'_>, rect: Rect);

    /// Erase `rect`. Idempotent.
    fn clear(&self, frame: &mut Frame<'_>, rect: Rect) {
        frame.clear_rect(rect);
    }

    /// React to a click at `point`.
    ///
    /// The hit test is inclusive on all four edges of `rect`. Requests for the
    /// engine go into `actions`. The caller re-renders afterwards.
    fn handle_click(&mut self, rect: Rect, point: Point, actions: &mut Vec<Action>);

    /// React to a key press. Ignored unless the widget accepts input.
    fn handle_key_press(&mut self, _rect: Rect, _key: KeyPress, _metrics: &dyn Surface) {}

    /// Whether the widget currently consumes key presses.
    fn accepts_input(&self) -> bool {
        false
    }
}
