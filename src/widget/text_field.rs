//! Text Field Widget: Single-line text input with cursor.
//!
//! The field starts out not accepting input. A click inside its rectangle
//! switches it to accepting, a click anywhere else switches it back. Only an
//! accepting field edits its text on key presses.
//!
//! The cursor is an insertion point counted in grapheme clusters and always
//! stays within `0..=len`.

use super::traits::{Action, KeyPress, Widget};
use crate::actor::KeyCode;
use crate::layout::{Point, Rect};
use crate::surface::{Font, Frame, Rgb, Surface};
use unicode_segmentation::UnicodeSegmentation;

/// Inner margin as a fraction of the field width.
const MARGIN: f64 = 0.025;
/// Font size as a fraction of the field height.
const FONT_SCALE: f64 = 0.75;

/// Configuration for the text field widget.
#[derive(Debug, Clone)]
pub struct TextFieldConfig {
    /// Cursor color.
    pub cursor: Rgb,
    /// Cursor width in surface units.
    pub cursor_width: f64,
}

impl Default for TextFieldConfig {
    fn default() -> Self {
        Self {
            cursor: Rgb::new(0, 255, 255),
            cursor_width: 1.0,
        }
    }
}

/// A single-line text field with cursor and editing support.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    /// Current text content.
    text: String,
    /// Cursor position in graphemes.
    cursor: usize,
    /// Whether key presses edit the text.
    accepting: bool,
    /// Horizontal scroll offset keeping the cursor in view.
    adjustment: f64,
    /// Configuration.
    config: TextFieldConfig,
}

impl TextField {
    /// Create a text field with initial content and the cursor at the start.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Create a text field with custom configuration.
    pub fn with_config(text: impl Into<String>, config: TextFieldConfig) -> Self {
        Self {
            text: text.into(),
            config,
            ..Self::default()
        }
    }

    /// Get the current text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the content, moving the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_owned();
        self.cursor = self.len();
        self.adjustment = 0.0;
    }

    /// Cursor position in graphemes.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current horizontal scroll offset.
    pub const fn adjustment(&self) -> f64 {
        self.adjustment
    }

    /// Check if the field is accepting key presses.
    pub const fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Switch input acceptance on or off.
    pub const fn set_accepting(&mut self, accepting: bool) {
        self.accepting = accepting;
    }

    /// Length in graphemes.
    fn len(&self) -> usize {
        self.text.graphemes(true).count()
    }

    /// Byte offset of grapheme `index` (or the end of the text).
    fn byte_offset(&self, index: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(index)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    fn before_cursor(&self) -> &str {
        &self.text[..self.byte_offset(self.cursor)]
    }

    fn font(rect: Rect) -> Font {
        Font::sized(rect.height * FONT_SCALE)
    }

    /// Insert a character at the cursor position.
    fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, c);
        // A combining mark extends the grapheme before it instead of adding one.
        self.cursor = self.text[..at + c.len_utf8()].graphemes(true).count();
    }

    /// Delete the last character before the cursor. Removing a combining
    /// mark leaves its base in place.
    fn backspace(&mut self) {
        let end = self.byte_offset(self.cursor);
        let Some((start, _)) = self.text[..end].char_indices().next_back() else {
            return;
        };
        self.text.replace_range(start..end, "");
        self.cursor = self.text[..start].graphemes(true).count().min(self.len());
    }

    /// Delete the grapheme at the cursor.
    fn delete(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        let start = self.byte_offset(self.cursor);
        let end = self.byte_offset(self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    /// Nudge the scroll offset so the cursor stays inside the field.
    fn scroll_to_cursor(&mut self, rect: Rect, metrics: &dyn Surface) {
        if self.text.is_empty() {
            self.adjustment = 0.0;
            return;
        }
        let font = Self::font(rect);
        let margin = rect.width * MARGIN;
        let caret = metrics.measure_text(self.before_cursor(), font) - self.adjustment;
        let step = self
            .text
            .graphemes(true)
            .next_back()
            .map_or(0.0, |g| metrics.measure_text(g, font));

        if caret >= rect.width - margin {
            self.adjustment += step;
        } else if caret <= margin {
            self.adjustment = (self.adjustment - step).max(0.0);
        }
    }
}

impl Widget for TextField {
    fn render(&self, frame: &mut Frame<'_>, rect: Rect) {
        self.clear(frame, rect);
        if rect.is_empty() {
            return;
        }
        frame.stroke_rect(rect);

        let font = Self::font(rect);
        let text_x = rect.x + rect.width * MARGIN - self.adjustment;
        frame.set_font(font);

        if self.accepting && frame.cursor_visible() {
            let caret_x = text_x + frame.measure_text(self.before_cursor(), font);
            frame.set_fill_style(self.config.cursor);
            frame.fill_rect(Rect::new(
                caret_x,
                rect.y + rect.height * 0.05,
                self.config.cursor_width,
                rect.height * 0.9,
            ));
            frame.reset_fill_style();
        }

        if !self.text.is_empty() {
            let baseline = rect.y + rect.height * FONT_SCALE;
            frame.draw_text_clipped(&self.text, rect, Point::new(text_x, baseline));
        }
        frame.reset_font();
    }

    fn handle_click(&mut self, rect: Rect, point: Point, _actions: &mut Vec<Action>) {
        let inside = rect.contains(point);
        if inside != self.accepting {
            tracing::trace!(accepting = inside, "text field focus changed");
        }
        self.accepting = inside;
    }

    fn handle_key_press(&mut self, rect: Rect, key: KeyPress, metrics: &dyn Surface) {
        if !self.accepting || key.modifiers.is_command() {
            return;
        }

        match key.code {
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor_left(),
            KeyCode::Right => self.cursor_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            KeyCode::Char(c) if !c.is_control() => self.insert_char(c),
            _ => return,
        }

        self.scroll_to_cursor(rect, metrics);
    }

    fn accepts_input(&self) -> bool {
        self.accepting
    }
}
