//! Engine: the root that owns pages and routes input to the active one.
//!
//! The engine is host-agnostic. Every operation takes the surface to draw on,
//! so the same engine runs inside the terminal [`Runtime`](crate::actor::Runtime),
//! a test with a [`RecordingSurface`](crate::surface::RecordingSurface), or any
//! other backend.
//!
//! Application-wide state visible to widgets lives in [`AppContext`] and is
//! handed to them through each [`Frame`].

use crate::actor::{InputEvent, KeyCode, KeyModifiers};
use crate::error::ConfigError;
use crate::layout::{Point, Rect};
use crate::page::Page;
use crate::surface::{Frame, Surface};
use crate::widget::{Action, KeyPress};

/// State shared by every widget of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppContext {
    /// Phase of the blinking text cursor.
    pub cursor_visible: bool,
}

/// Whether the host loop should keep going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep dispatching.
    Continue,
    /// Stop the application.
    Quit,
}

/// The root of a widget tree: a set of pages, one of them active.
#[derive(Debug)]
pub struct Engine {
    pages: Vec<Page>,
    active: usize,
    context: AppContext,
    viewport: Rect,
    emitted: Vec<String>,
    running: bool,
}

impl Engine {
    /// Create an engine showing the first page.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPages`] for an empty list and
    /// [`ConfigError::DuplicatePage`] when two pages share a name.
    pub fn new(pages: Vec<Page>) -> Result<Self, ConfigError> {
        if pages.is_empty() {
            return Err(ConfigError::NoPages);
        }
        for (i, page) in pages.iter().enumerate() {
            if pages[..i].iter().any(|p| p.name() == page.name()) {
                return Err(ConfigError::DuplicatePage(page.name().to_owned()));
            }
        }

        Ok(Self {
            pages,
            active: 0,
            context: AppContext::default(),
            viewport: Rect::ZERO,
            emitted: Vec::new(),
            running: true,
        })
    }

    /// The application context.
    pub const fn context(&self) -> AppContext {
        self.context
    }

    /// The page receiving input.
    pub fn active_page(&self) -> &Page {
        &self.pages[self.active]
    }

    /// Look up a page by name.
    pub fn page(&self, name: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.name() == name)
    }

    /// All pages, in declaration order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Current viewport.
    pub const fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Check if no widget has asked to quit.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Take the tags emitted by buttons since the last call.
    pub fn take_emitted(&mut self) -> Vec<String> {
        std::mem::take(&mut self.emitted)
    }

    fn frame<'a>(&self, surface: &'a mut dyn Surface) -> Frame<'a> {
        Frame::new(surface, self.context.cursor_visible)
    }

    /// Lay out and draw the first frame.
    pub fn init(&mut self, surface: &mut dyn Surface, width: f64, height: f64) {
        self.context = AppContext {
            cursor_visible: true,
        };
        tracing::debug!(width, height, page = self.active_page().name(), "engine started");
        self.resize(surface, width, height);
    }

    /// React to a new viewport size.
    pub fn resize(&mut self, surface: &mut dyn Surface, width: f64, height: f64) {
        self.viewport = Rect::from_size(width, height);
        let mut frame = self.frame(surface);
        self.pages[self.active].resize(&mut frame, self.viewport);
    }

    /// Route a click to the active page and carry out the resulting actions.
    pub fn click(&mut self, surface: &mut dyn Surface, x: f64, y: f64) {
        let mut frame = self.frame(surface);
        let actions = self.pages[self.active].dispatch_click(&mut frame, Point::new(x, y));
        for action in actions {
            self.perform(&mut frame, action);
        }
    }

    /// Route a key press to the active page.
    pub fn key_press(&mut self, surface: &mut dyn Surface, code: KeyCode, modifiers: KeyModifiers) {
        let mut frame = self.frame(surface);
        self.pages[self.active].dispatch_key(&mut frame, KeyPress { code, modifiers });
    }

    /// Flip the cursor blink phase and redraw.
    pub fn toggle_cursor_blink(&mut self, surface: &mut dyn Surface) {
        self.context.cursor_visible = !self.context.cursor_visible;
        let mut frame = self.frame(surface);
        self.pages[self.active].render_all(&mut frame);
    }

    /// Make `name` the active page and draw it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownPage`] if no page has that name.
    pub fn show_page(&mut self, surface: &mut dyn Surface, name: &str) -> Result<(), ConfigError> {
        let mut frame = self.frame(surface);
        self.switch_to(&mut frame, name)
    }

    fn switch_to(&mut self, frame: &mut Frame<'_>, name: &str) -> Result<(), ConfigError> {
        let index = self
            .pages
            .iter()
            .position(|p| p.name() == name)
            .ok_or_else(|| ConfigError::UnknownPage(name.to_owned()))?;

        tracing::debug!(from = self.active_page().name(), to = name, "showing page");
        self.pages[self.active].clear_all(frame);
        self.active = index;
        frame.clear_rect(self.viewport);
        self.pages[index].resize(frame, self.viewport);
        Ok(())
    }

    fn perform(&mut self, frame: &mut Frame<'_>, action: Action) {
        match action {
            Action::ShowPage(name) => {
                if let Err(e) = self.switch_to(frame, &name) {
                    tracing::warn!(error = %e, "button target missing");
                }
            }
            Action::Quit => {
                tracing::debug!("quit requested");
                self.running = false;
            }
            Action::Emit(tag) => self.emitted.push(tag),
        }
    }

    /// Apply one input event.
    pub fn handle_event(&mut self, surface: &mut dyn Surface, event: &InputEvent) -> Flow {
        match *event {
            InputEvent::Key { code, modifiers } => self.key_press(surface, code, modifiers),
            InputEvent::Click { x, y } => self.click(surface, x, y),
            InputEvent::Resize { width, height } => self.resize(surface, width, height),
            InputEvent::Error(ref message) => {
                tracing::error!(%message, "input error");
            }
            InputEvent::Shutdown => self.running = false,
        }

        if self.running {
            Flow::Continue
        } else {
            Flow::Quit
        }
    }
}
