//! Diffing Engine: Generate minimal ANSI sequences from buffer changes.
//!
//! 1. Compare the displayed and the next [`CellBuffer`]
//! 2. Emit escape sequences only for changed cells
//! 3. Skip cursor moves between adjacent writes
//! 4. Track color state to avoid redundant SGR sequences
//!
//! All output is accumulated in a single buffer and flushed with one syscall.

use super::{Cell, CellBuffer, Modifiers, Rgb};
use std::io::Write;

/// State tracker for the diffing algorithm.
///
/// Mirrors what the terminal currently has selected (cursor position, colors,
/// modifiers) so unchanged state is never re-emitted.
#[derive(Debug, Clone)]
pub struct DiffState {
    cursor_x: u16,
    cursor_y: u16,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    modifiers: Option<Modifiers>,
}

impl Default for DiffState {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffState {
    /// Create a new diff state with unknown terminal state.
    pub const fn new() -> Self {
        Self {
            cursor_x: 0,
            cursor_y: 0,
            fg: None,
            bg: None,
            modifiers: None,
        }
    }

    /// Forget everything (e.g., after a full screen clear).
    pub const fn reset(&mut self) {
        self.fg = None;
        self.bg = None;
        self.modifiers = None;
        self.cursor_x = u16::MAX;
        self.cursor_y = u16::MAX;
    }
}

/// Result of a diff operation.
#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    /// Number of cells that were different.
    pub cells_changed: usize,
    /// Number of cursor move sequences emitted.
    pub cursor_moves: usize,
    /// Number of color change sequences emitted.
    pub color_changes: usize,
}

/// Render the difference between two equally sized buffers.
pub fn render_diff(
    current: &CellBuffer,
    next: &CellBuffer,
    output: &mut Vec<u8>,
    state: &mut DiffState,
) -> DiffResult {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.height(), next.height());

    let mut result = DiffResult::default();
    let width = usize::from(next.width().max(1));

    for (idx, (old, new)) in current.cells().iter().zip(next.cells()).enumerate() {
        if old == new || new.is_continuation() {
            continue;
        }
        #[allow(clippy::cast_possible_truncation)]
        let (x, y) = ((idx % width) as u16, (idx / width) as u16);

        result.cells_changed += 1;

        if state.cursor_y != y || state.cursor_x != x {
            emit_cursor_move(output, x, y);
            state.cursor_x = x;
            state.cursor_y = y;
            result.cursor_moves += 1;
        }

        emit_style(output, new, state, &mut result);
        emit_symbol(output, new);
        state.cursor_x = state.cursor_x.saturating_add(new.display_width().max(1));
    }

    result
}

/// Generate a full redraw sequence (no diffing).
///
/// Used for the first frame and after a resize, when the terminal state is unknown.
pub fn render_full(buffer: &CellBuffer, output: &mut Vec<u8>) {
    output.extend_from_slice(b"\x1b[?25l\x1b[H");

    let mut state = DiffState::new();
    let mut result = DiffResult::default();

    for (y, row) in buffer.rows().enumerate() {
        if y > 0 {
            output.extend_from_slice(b"\r\n");
        }
        for cell in row {
            if cell.is_continuation() {
                continue;
            }
            emit_style(output, cell, &mut state, &mut result);
            emit_symbol(output, cell);
        }
    }

    output.extend_from_slice(b"\x1b[0m");
}

fn emit_style(output: &mut Vec<u8>, cell: &Cell, state: &mut DiffState, result: &mut DiffResult) {
    let mods = cell.modifiers();

    // Dropping a modifier needs a full SGR reset, which also drops colors.
    let previous = state.modifiers.unwrap_or(Modifiers::empty());
    if !previous.difference(mods).is_empty() {
        output.extend_from_slice(b"\x1b[0m");
        state.fg = None;
        state.bg = None;
        state.modifiers = None;
    }

    if state.fg != Some(cell.fg()) {
        emit_fg_color(output, cell.fg());
        state.fg = Some(cell.fg());
        result.color_changes += 1;
    }
    if state.bg != Some(cell.bg()) {
        emit_bg_color(output, cell.bg());
        state.bg = Some(cell.bg());
        result.color_changes += 1;
    }
    if state.modifiers != Some(mods) {
        let added = mods.difference(state.modifiers.unwrap_or(Modifiers::empty()));
        emit_modifier_set(output, added);
        state.modifiers = Some(mods);
    }
}

/// Emit a cursor move sequence (ANSI positions are 1-indexed).
#[inline]
fn emit_cursor_move(output: &mut Vec<u8>, x: u16, y: u16) {
    let row = u32::from(y) + 1;
    let col = u32::from(x) + 1;

    if row == 1 && col == 1 {
        output.extend_from_slice(b"\x1b[H");
    } else if col == 1 {
        let _ = write!(output, "\x1b[{row}H");
    } else {
        let _ = write!(output, "\x1b[{row};{col}H");
    }
}

#[inline]
fn emit_fg_color(output: &mut Vec<u8>, color: Rgb) {
    let _ = write!(output, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
}

#[inline]
fn emit_bg_color(output: &mut Vec<u8>, color: Rgb) {
    let _ = write!(output, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b);
}

fn emit_modifier_set(output: &mut Vec<u8>, modifiers: Modifiers) {
    const CODES: [(Modifiers, &[u8]); 5] = [
        (Modifiers::BOLD, b"\x1b[1m"),
        (Modifiers::DIM, b"\x1b[2m"),
        (Modifiers::ITALIC, b"\x1b[3m"),
        (Modifiers::UNDERLINE, b"\x1b[4m"),
        (Modifiers::REVERSED, b"\x1b[7m"),
    ];
    for (flag, code) in CODES {
        if modifiers.contains(flag) {
            output.extend_from_slice(code);
        }
    }
}

#[inline]
fn emit_symbol(output: &mut Vec<u8>, cell: &Cell) {
    let mut bytes = [0u8; 4];
    output.extend_from_slice(cell.symbol().encode_utf8(&mut bytes).as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_identical_buffers() {
        let a = CellBuffer::new(10, 5);
        let b = CellBuffer::new(10, 5);
        let mut output = Vec::new();
        let mut state = DiffState::new();

        let result = render_diff(&a, &b, &mut output, &mut state);

        assert_eq!(result.cells_changed, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_diff_single_cell_change() {
        let a = CellBuffer::new(10, 5);
        let mut b = CellBuffer::new(10, 5);
        b.set(5, 2, Cell::new('X'));

        let mut output = Vec::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, &mut output, &mut state);

        assert_eq!(result.cells_changed, 1);
        let output_str = String::from_utf8_lossy(&output);
        assert!(output_str.starts_with("\x1b[3;6H"));
        assert!(output_str.contains('X'));
    }

    #[test]
    fn test_diff_adjacent_cells_no_cursor_move() {
        let a = CellBuffer::new(10, 5);
        let mut b = CellBuffer::new(10, 5);
        b.set(0, 0, Cell::new('A'));
        b.set(1, 0, Cell::new('B'));
        b.set(2, 0, Cell::new('C'));

        let mut output = Vec::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, &mut output, &mut state);

        assert_eq!(result.cells_changed, 3);
        assert_eq!(result.cursor_moves, 0);
    }

    #[test]
    fn test_diff_color_tracking() {
        let a = CellBuffer::new(10, 5);
        let mut b = CellBuffer::new(10, 5);
        let red = Rgb::new(255, 0, 0);
        b.set(0, 0, Cell::new('A').with_fg(red));
        b.set(1, 0, Cell::new('B').with_fg(red));

        let mut output = Vec::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, &mut output, &mut state);

        assert_eq!(result.color_changes, 2);
    }

    #[test]
    fn test_cursor_move_optimization() {
        let mut output = Vec::new();
        emit_cursor_move(&mut output, 0, 0);
        assert_eq!(&output, b"\x1b[H");

        output.clear();
        emit_cursor_move(&mut output, 0, 5);
        assert_eq!(&output, b"\x1b[6H");

        output.clear();
        emit_cursor_move(&mut output, 10, 5);
        assert_eq!(&output, b"\x1b[6;11H");
    }

    #[test]
    fn test_render_full() {
        let mut buffer = CellBuffer::new(3, 2);
        buffer.set(0, 0, Cell::new('A'));
        buffer.set(1, 0, Cell::new('B'));
        buffer.set(2, 0, Cell::new('C'));

        let mut output = Vec::new();
        render_full(&buffer, &mut output);

        let output_str = String::from_utf8_lossy(&output);
        assert!(output_str.starts_with("\x1b[?25l\x1b[H"));
        assert!(output_str.contains("ABC"));
        assert!(output_str.ends_with("\x1b[0m"));
    }
}
