//! `CellBuffer`: A [`Surface`] rasterized onto a grid of terminal cells.
//!
//! The buffer uses contiguous memory allocation for cache efficiency.
//! Cells are stored in row-major order. One surface unit maps to one cell;
//! fractional coordinates are rounded to the nearest cell edge, so adjacent
//! rectangles that share an edge never overlap.

use super::cell::{Cell, Modifiers, Rgb};
use super::{Font, Surface};
use crate::layout::{Point, Rect};
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Colors a [`CellBuffer`] draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Strokes, check marks and text.
    pub fg: Rgb,
    /// Cleared background.
    pub bg: Rgb,
    /// Fill color when no fill style is set.
    pub fill: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(20, 20, 30),
            fill: Rgb::new(60, 60, 70),
        }
    }
}

/// A grid of cells representing the terminal screen.
///
/// Access is in row-major order: `index = y * width + x`.
#[derive(Clone, PartialEq)]
pub struct CellBuffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
    palette: Palette,
    fill: Option<Rgb>,
    font: Option<Font>,
}

impl CellBuffer {
    /// Create a new buffer with the given dimensions, cleared to the palette
    /// background.
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_palette(width, height, Palette::default())
    }

    /// Create a new buffer with a custom palette.
    pub fn with_palette(width: u16, height: u16, palette: Palette) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            cells: vec![Self::blank(palette); size],
            width,
            height,
            palette,
            fill: None,
            font: None,
        }
    }

    const fn blank(palette: Palette) -> Cell {
        Cell::EMPTY.with_fg(palette.fg).with_bg(palette.bg)
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the palette.
    #[inline]
    pub const fn palette(&self) -> Palette {
        self.palette
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Replace the symbol at (x, y), keeping the cell's background.
    fn stamp(&mut self, x: u16, y: u16, symbol: char, fg: Rgb, modifiers: Modifiers) {
        if let Some(idx) = self.index_of(x, y) {
            let bg = self.cells[idx].bg();
            self.cells[idx] = Cell::new(symbol)
                .with_fg(fg)
                .with_bg(bg)
                .with_modifiers(modifiers);
        }
    }

    /// Clear the entire buffer to the palette background.
    pub fn clear(&mut self) {
        self.cells.fill(Self::blank(self.palette));
    }

    /// Resize the buffer. Content is discarded; the caller redraws.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells = vec![Self::blank(self.palette); usize::from(width) * usize::from(height)];
    }

    /// Copy content from another buffer of the same size.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);
        self.cells.copy_from_slice(&other.cells);
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.width.max(1)))
    }

    /// Row `y` as a string, for tests and debugging. Continuation cells are skipped.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.is_continuation())
            .map(Cell::symbol)
            .collect()
    }

    /// Cell columns covered by `[start, start + len)`, clamped to `limit`.
    fn span(start: f64, len: f64, limit: u16) -> Range<u16> {
        if len <= 0.0 || !start.is_finite() || !len.is_finite() {
            return 0..0;
        }
        let clamp = |v: f64| v.round().clamp(0.0, f64::from(limit));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let range = (clamp(start) as u16)..(clamp(start + len) as u16);
        range
    }

    fn cells_of(&self, rect: Rect) -> (Range<u16>, Range<u16>) {
        (
            Self::span(rect.x, rect.width, self.width),
            Self::span(rect.y, rect.height, self.height),
        )
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        #[allow(clippy::cast_possible_truncation)]
        let (mut x0, mut y0, x1, y1) = (
            from.x.round() as i64,
            from.y.round() as i64,
            to.x.round() as i64,
            to.y.round() as i64,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if let (Ok(x), Ok(y)) = (u16::try_from(x0), u16::try_from(y0)) {
                self.stamp(x, y, '•', self.palette.fg, Modifiers::BOLD);
            }
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

impl Surface for CellBuffer {
    fn measure_text(&self, text: &str, _font: Font) -> f64 {
        // Terminal glyphs have a fixed advance regardless of font size.
        #[allow(clippy::cast_precision_loss)]
        let width = text.width() as f64;
        width
    }

    fn stroke_rect(&mut self, rect: Rect) {
        let (cols, rows) = self.cells_of(rect);
        if cols.is_empty() || rows.is_empty() {
            return;
        }
        let fg = self.palette.fg;
        let (left, right) = (cols.start, cols.end - 1);
        let (top, bottom) = (rows.start, rows.end - 1);

        if top == bottom {
            for x in cols {
                self.stamp(x, top, '─', fg, Modifiers::empty());
            }
            return;
        }
        if left == right {
            for y in rows {
                self.stamp(left, y, '│', fg, Modifiers::empty());
            }
            return;
        }

        for x in left + 1..right {
            self.stamp(x, top, '─', fg, Modifiers::empty());
            self.stamp(x, bottom, '─', fg, Modifiers::empty());
        }
        for y in top + 1..bottom {
            self.stamp(left, y, '│', fg, Modifiers::empty());
            self.stamp(right, y, '│', fg, Modifiers::empty());
        }
        self.stamp(left, top, '┌', fg, Modifiers::empty());
        self.stamp(right, top, '┐', fg, Modifiers::empty());
        self.stamp(left, bottom, '└', fg, Modifiers::empty());
        self.stamp(right, bottom, '┘', fg, Modifiers::empty());
    }

    fn fill_rect(&mut self, rect: Rect) {
        let color = self.fill.unwrap_or(self.palette.fill);
        let cell = Cell::EMPTY.with_fg(self.palette.fg).with_bg(color);
        let (cols, rows) = self.cells_of(rect);
        for y in rows {
            for x in cols.clone() {
                self.set(x, y, cell);
            }
        }
    }

    fn polyline(&mut self, points: [Point; 3]) {
        self.draw_line(points[0], points[1]);
        self.draw_line(points[1], points[2]);
    }

    fn draw_text_clipped(&mut self, text: &str, clip: Rect, origin: Point) {
        let (cols, rows) = self.cells_of(clip);
        if cols.is_empty() || rows.is_empty() {
            return;
        }

        // Glyphs span `size` above the baseline; use the row their middle falls in.
        let size = self.font.map_or(1.0, |f| f.size);
        #[allow(clippy::cast_possible_truncation)]
        let glyph_row = (origin.y - size / 2.0).floor() as i64;
        let row = glyph_row.clamp(i64::from(rows.start), i64::from(rows.end) - 1);
        let Ok(row) = u16::try_from(row) else {
            return;
        };

        let fg = self.palette.fg;
        let modifiers = if self.font.is_some_and(|f| f.bold) {
            Modifiers::BOLD
        } else {
            Modifiers::empty()
        };

        #[allow(clippy::cast_possible_truncation)]
        let mut col = origin.x.round() as i64;
        for grapheme in text.graphemes(true) {
            let width = i64::try_from(grapheme.width()).unwrap_or(0);
            if width == 0 {
                continue;
            }
            if col >= i64::from(cols.end) {
                break;
            }
            if col >= i64::from(cols.start) && col + width <= i64::from(cols.end) {
                if let (Ok(x), Some(symbol)) = (u16::try_from(col), grapheme.chars().next()) {
                    self.stamp(x, row, symbol, fg, modifiers);
                    if width == 2 {
                        if let Some(idx) = self.index_of(x + 1, row) {
                            let bg = self.cells[idx].bg();
                            self.cells[idx] = Cell::continuation().with_bg(bg);
                        }
                    }
                }
            }
            col += width;
        }
    }

    fn clear_rect(&mut self, rect: Rect) {
        let blank = Self::blank(self.palette);
        let (cols, rows) = self.cells_of(rect);
        for y in rows {
            for x in cols.clone() {
                self.set(x, y, blank);
            }
        }
    }

    fn set_font(&mut self, font: Font) {
        self.font = Some(font);
    }

    fn reset_font(&mut self) {
        self.font = None;
    }

    fn set_fill_style(&mut self, color: Rgb) {
        self.fill = Some(color);
    }

    fn reset_fill_style(&mut self) {
        self.fill = None;
    }
}

impl std::fmt::Debug for CellBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("palette", &self.palette)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_new_is_blank() {
        let buffer = CellBuffer::new(4, 2);
        assert_eq!(buffer.cells().len(), 8);
        assert_eq!(buffer.row_text(0), "    ");
        assert_eq!(buffer.get(0, 0).unwrap().bg(), Palette::default().bg);
    }

    #[test]
    fn test_buffer_bounds() {
        let mut buffer = CellBuffer::new(3, 3);
        assert!(buffer.set(2, 2, Cell::new('x')));
        assert!(!buffer.set(3, 0, Cell::new('x')));
        assert!(buffer.get(0, 3).is_none());
    }

    #[test]
    fn test_stroke_rect_draws_box() {
        let mut buffer = CellBuffer::new(6, 4);
        buffer.stroke_rect(Rect::new(1.0, 0.0, 4.0, 3.0));
        assert_eq!(buffer.row_text(0), " ┌──┐ ");
        assert_eq!(buffer.row_text(1), " │  │ ");
        assert_eq!(buffer.row_text(2), " └──┘ ");
        assert_eq!(buffer.row_text(3), "      ");
    }

    #[test]
    fn test_stroke_degenerate_rect_is_noop() {
        let mut buffer = CellBuffer::new(4, 4);
        let before = buffer.clone();
        buffer.stroke_rect(Rect::new(1.0, 1.0, -3.0, 2.0));
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_adjacent_fractional_rects_do_not_overlap() {
        let mut buffer = CellBuffer::new(10, 1);
        buffer.set_fill_style(Rgb::new(255, 0, 0));
        buffer.fill_rect(Rect::new(0.0, 0.0, 10.0 / 3.0, 1.0));
        buffer.set_fill_style(Rgb::new(0, 255, 0));
        buffer.fill_rect(Rect::new(10.0 / 3.0, 0.0, 10.0 / 3.0, 1.0));

        assert_eq!(buffer.get(2, 0).unwrap().bg(), Rgb::new(255, 0, 0));
        assert_eq!(buffer.get(3, 0).unwrap().bg(), Rgb::new(0, 255, 0));
        assert_eq!(buffer.get(7, 0).unwrap().bg(), Palette::default().bg);
    }

    #[test]
    fn test_fill_style_reset() {
        let mut buffer = CellBuffer::new(2, 1);
        buffer.set_fill_style(Rgb::BUTTON_FACE);
        buffer.reset_fill_style();
        buffer.fill_rect(Rect::from_size(2.0, 1.0));
        assert_eq!(buffer.get(0, 0).unwrap().bg(), Palette::default().fill);
    }

    #[test]
    fn test_text_is_clipped() {
        let mut buffer = CellBuffer::new(10, 1);
        buffer.draw_text_clipped("hello world", Rect::new(2.0, 0.0, 4.0, 1.0), Point::new(1.0, 0.75));
        assert_eq!(buffer.row_text(0), "  ello    ");
    }

    #[test]
    fn test_text_keeps_background() {
        let mut buffer = CellBuffer::new(4, 1);
        buffer.set_fill_style(Rgb::BUTTON_FACE);
        buffer.fill_rect(Rect::from_size(4.0, 1.0));
        buffer.set_font(Font::sized(1.0).bold());
        buffer.draw_text_clipped("ok", Rect::from_size(4.0, 1.0), Point::new(0.0, 0.75));

        let cell = buffer.get(1, 0).unwrap();
        assert_eq!(cell.symbol(), 'k');
        assert_eq!(cell.bg(), Rgb::BUTTON_FACE);
        assert!(cell.modifiers().contains(Modifiers::BOLD));
    }

    #[test]
    fn test_text_lands_inside_box() {
        let mut buffer = CellBuffer::new(8, 3);
        let rect = Rect::from_size(8.0, 3.0);
        buffer.stroke_rect(rect);
        buffer.set_font(Font::sized(rect.height * 0.75));
        buffer.draw_text_clipped("hi", rect, Point::new(1.0, rect.height * 0.75));
        assert_eq!(buffer.row_text(1), "│hi    │");
    }

    #[test]
    fn test_wide_text_uses_continuation() {
        let mut buffer = CellBuffer::new(4, 1);
        buffer.draw_text_clipped("日x", Rect::from_size(4.0, 1.0), Point::new(0.0, 1.0));
        assert_eq!(buffer.get(0, 0).unwrap().symbol(), '日');
        assert!(buffer.get(1, 0).unwrap().is_continuation());
        assert_eq!(buffer.get(2, 0).unwrap().symbol(), 'x');
    }

    #[test]
    fn test_measure_text_counts_columns() {
        let buffer = CellBuffer::new(1, 1);
        assert_eq!(buffer.measure_text("abc", Font::sized(12.0)), 3.0);
        assert_eq!(buffer.measure_text("日本", Font::sized(12.0)), 4.0);
        assert_eq!(buffer.measure_text("", Font::sized(12.0)), 0.0);
    }

    #[test]
    fn test_polyline_marks_endpoints() {
        let mut buffer = CellBuffer::new(5, 5);
        buffer.polyline([Point::new(0.0, 2.0), Point::new(2.0, 4.0), Point::new(4.0, 0.0)]);
        assert_eq!(buffer.get(0, 2).unwrap().symbol(), '•');
        assert_eq!(buffer.get(2, 4).unwrap().symbol(), '•');
        assert_eq!(buffer.get(4, 0).unwrap().symbol(), '•');
    }

    #[test]
    fn test_clear_rect_restores_background() {
        let mut buffer = CellBuffer::new(3, 1);
        buffer.fill_rect(Rect::from_size(3.0, 1.0));
        buffer.clear_rect(Rect::new(1.0, 0.0, 1.0, 1.0));
        assert_eq!(buffer.get(1, 0).unwrap().bg(), Palette::default().bg);
        assert_eq!(buffer.get(0, 0).unwrap().bg(), Palette::default().fill);
    }
}
