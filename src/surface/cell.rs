//! Cell: The atomic unit of a rasterized terminal frame.
//!
//! A cell holds one display symbol plus its colors and modifiers. Wide
//! symbols (CJK) occupy two cells; the second is a continuation cell that
//! the diffing engine skips.

use bitflags::bitflags;

/// True-color RGB representation.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Light grey used for button faces (#cccccc).
    pub const BUTTON_FACE: Self = Self::from_u32(0x00cc_cccc);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<u32> for Rgb {
    /// Convert from a 24-bit hex color (e.g., 0xFF5500)
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use trellis::surface::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::UNDERLINE;
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0010_0000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Placeholder symbol marking the second half of a wide character.
const CONTINUATION: char = '\0';

/// A single terminal cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    symbol: char,
    fg: Rgb,
    bg: Rgb,
    modifiers: Modifiers,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// An empty cell (space, white on black).
    pub const EMPTY: Self = Self {
        symbol: ' ',
        fg: Rgb::WHITE,
        bg: Rgb::BLACK,
        modifiers: Modifiers::empty(),
    };

    /// Create a cell showing `symbol` with default colors.
    #[inline]
    pub const fn new(symbol: char) -> Self {
        Self {
            symbol,
            ..Self::EMPTY
        }
    }

    /// Create the trailing half of a wide character.
    #[inline]
    pub const fn continuation() -> Self {
        Self::new(CONTINUATION)
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    /// Set modifiers (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The displayed symbol.
    #[inline]
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    /// Foreground color.
    #[inline]
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Background color.
    #[inline]
    pub const fn bg(&self) -> Rgb {
        self.bg
    }

    /// Text modifiers.
    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Check if this cell continues the wide character to its left.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.symbol == CONTINUATION
    }

    /// Number of columns the symbol occupies (0 for continuation cells).
    #[inline]
    pub fn display_width(&self) -> u16 {
        if self.is_continuation() {
            return 0;
        }
        let width = unicode_width::UnicodeWidthChar::width(self.symbol).unwrap_or(1);
        u16::try_from(width).unwrap_or(1)
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({:?} {:?}/{:?}", self.symbol, self.fg, self.bg)?;
        if !self.modifiers.is_empty() {
            write!(f, " {:?}", self.modifiers)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_hex() {
        assert_eq!(Rgb::from_u32(0xFF5500), Rgb::new(255, 85, 0));
        assert_eq!(Rgb::BUTTON_FACE, Rgb::new(204, 204, 204));
    }

    #[test]
    fn test_cell_builder() {
        let cell = Cell::new('x')
            .with_fg(Rgb::new(1, 2, 3))
            .with_bg(Rgb::new(4, 5, 6))
            .with_modifiers(Modifiers::BOLD);
        assert_eq!(cell.symbol(), 'x');
        assert_eq!(cell.fg(), Rgb::new(1, 2, 3));
        assert_eq!(cell.bg(), Rgb::new(4, 5, 6));
        assert!(cell.modifiers().contains(Modifiers::BOLD));
    }

    #[test]
    fn test_display_width() {
        assert_eq!(Cell::new('a').display_width(), 1);
        assert_eq!(Cell::new('日').display_width(), 2);
        assert_eq!(Cell::continuation().display_width(), 0);
        assert!(Cell::continuation().is_continuation());
    }
}
