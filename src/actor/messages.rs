//! Message types for actor communication.
//!
//! These enums define the protocol between the input source, the dispatch
//! loop and the renderer.

use crate::surface::CellBuffer;

/// Key codes for keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Function key (F1-F12).
    F(u8),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Tab key.
    Tab,
    /// Delete key.
    Delete,
    /// Escape key.
    Esc,
    /// Shift pressed on its own.
    Shift,
}

impl KeyCode {
    /// Parse a symbolic key name as delivered by browser-style input
    /// sources (`"Backspace"`, `"ArrowLeft"`, ...) or a single character.
    pub fn from_name(name: &str) -> Option<Self> {
        let code = match name {
            "Backspace" => Self::Backspace,
            "Enter" => Self::Enter,
            "ArrowLeft" => Self::Left,
            "ArrowRight" => Self::Right,
            "ArrowUp" => Self::Up,
            "ArrowDown" => Self::Down,
            "Home" => Self::Home,
            "End" => Self::End,
            "Tab" => Self::Tab,
            "Delete" => Self::Delete,
            "Escape" => Self::Esc,
            "Shift" => Self::Shift,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    (Some('F'), Some(_)) => Self::F(name[1..].parse().ok()?),
                    _ => return None,
                }
            }
        };
        Some(code)
    }
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Control held.
    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };

    /// Check if a command modifier (Control or Alt) is held.
    pub const fn is_command(&self) -> bool {
        self.control || self.alt
    }
}

/// Events delivered to the dispatch loop.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key was pressed.
    Key {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during keypress.
        modifiers: KeyModifiers,
    },

    /// Primary pointer click in surface coordinates.
    Click {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },

    /// The viewport was resized.
    Resize {
        /// New width in surface units.
        width: f64,
        /// New height in surface units.
        height: f64,
    },

    /// Input thread encountered an error.
    Error(String),

    /// Input thread is shutting down.
    Shutdown,
}

impl InputEvent {
    /// A key press without modifiers.
    pub const fn key(code: KeyCode) -> Self {
        Self::Key {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

/// Commands sent to the render thread.
#[derive(Debug)]
pub enum RenderCommand {
    /// Repaint the whole screen from this frame.
    FullRedraw(Box<CellBuffer>),

    /// Diff this frame against the screen and write the changes.
    Update(Box<CellBuffer>),

    /// Shutdown the render thread.
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(KeyCode::from_name("Backspace"), Some(KeyCode::Backspace));
        assert_eq!(KeyCode::from_name("ArrowLeft"), Some(KeyCode::Left));
        assert_eq!(KeyCode::from_name("ArrowRight"), Some(KeyCode::Right));
        assert_eq!(KeyCode::from_name("Shift"), Some(KeyCode::Shift));
        assert_eq!(KeyCode::from_name("a"), Some(KeyCode::Char('a')));
        assert_eq!(KeyCode::from_name("é"), Some(KeyCode::Char('é')));
        assert_eq!(KeyCode::from_name("F5"), Some(KeyCode::F(5)));
        assert_eq!(KeyCode::from_name("CapsLock"), None);
        assert_eq!(KeyCode::from_name(""), None);
    }

    #[test]
    fn test_modifiers() {
        assert!(!KeyModifiers::NONE.is_command());
        assert!(KeyModifiers::CONTROL.is_command());
    }
}
