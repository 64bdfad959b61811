//! Input Actor: Dedicated thread for polling terminal events.
//!
//! This actor runs in its own thread and uses crossterm's event polling
//! to capture keyboard, mouse, and resize events without blocking the
//! dispatch loop.
//!
//! Terminal coordinates are whole cells. A left click on cell `(col, row)`
//! is reported at the cell centre `(col + 0.5, row + 0.5)` so that a click
//! on the shared edge of two widgets lands in exactly one of them.

use super::messages::{InputEvent, KeyCode, KeyModifiers};
use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEventKind};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Input actor that polls terminal events.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// `poll_timeout` bounds how long the thread waits for an event before
    /// checking the shutdown flag again.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("trellis-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, poll_timeout);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main input polling loop.
    fn run_loop(sender: &Sender<InputEvent>, shutdown: &Arc<AtomicBool>, poll_timeout: Duration) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                let _ = sender.try_send(InputEvent::Shutdown);
                break;
            }

            match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if let Some(input_event) = convert_event(event) {
                            if sender.send(input_event).is_err() {
                                // Receiver dropped, exit
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        let _ = sender.send(InputEvent::Error(e.to_string()));
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    let _ = sender.send(InputEvent::Error(e.to_string()));
                }
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Convert a crossterm event to an [`InputEvent`].
pub fn convert_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key_event) => {
            // Only process key press events (not release or repeat)
            if key_event.kind != KeyEventKind::Press {
                return None;
            }

            let code = convert_key_code(key_event.code)?;
            let modifiers = convert_modifiers(key_event.modifiers);

            Some(InputEvent::Key { code, modifiers })
        }

        Event::Mouse(mouse_event) => match mouse_event.kind {
            event::MouseEventKind::Down(event::MouseButton::Left) => Some(InputEvent::Click {
                x: f64::from(mouse_event.column) + 0.5,
                y: f64::from(mouse_event.row) + 0.5,
            }),
            _ => None,
        },

        Event::Resize(width, height) => Some(InputEvent::Resize {
            width: f64::from(width),
            height: f64::from(height),
        }),

        Event::FocusGained | Event::FocusLost | Event::Paste(_) => None,
    }
}

/// Convert crossterm `KeyCode` to ours.
fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::F(n) => KeyCode::F(n),
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Home => KeyCode::Home,
        event::KeyCode::End => KeyCode::End,
        event::KeyCode::Tab | event::KeyCode::BackTab => KeyCode::Tab,
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Esc => KeyCode::Esc,
        event::KeyCode::Modifier(
            event::ModifierKeyCode::LeftShift | event::ModifierKeyCode::RightShift,
        ) => KeyCode::Shift,
        _ => return None, // Ignore other key codes
    })
}

/// Convert crossterm `KeyModifiers` to ours.
fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: mods.contains(event::KeyModifiers::SHIFT),
        control: mods.contains(event::KeyModifiers::CONTROL),
        alt: mods.contains(event::KeyModifiers::ALT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState, MouseEvent, MouseEventKind};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: event::KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_left_click_maps_to_cell_centre() {
        let event = convert_event(mouse(MouseEventKind::Down(event::MouseButton::Left), 3, 7));
        assert_eq!(event, Some(InputEvent::Click { x: 3.5, y: 7.5 }));
    }

    #[test]
    fn test_other_mouse_events_ignored() {
        assert_eq!(convert_event(mouse(MouseEventKind::Down(event::MouseButton::Right), 0, 0)), None);
        assert_eq!(convert_event(mouse(MouseEventKind::Moved, 0, 0)), None);
        assert_eq!(convert_event(mouse(MouseEventKind::ScrollUp, 0, 0)), None);
    }

    #[test]
    fn test_key_press_conversion() {
        let event = convert_event(Event::Key(KeyEvent::new(
            event::KeyCode::Char('c'),
            event::KeyModifiers::CONTROL,
        )));
        assert_eq!(
            event,
            Some(InputEvent::Key {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
            })
        );
    }

    #[test]
    fn test_key_release_ignored() {
        let release = KeyEvent {
            code: event::KeyCode::Left,
            modifiers: event::KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(convert_event(Event::Key(release)), None);
    }

    #[test]
    fn test_resize_conversion() {
        assert_eq!(
            convert_event(Event::Resize(80, 24)),
            Some(InputEvent::Resize {
                width: 80.0,
                height: 24.0
            })
        );
    }
}
