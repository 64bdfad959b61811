//! # Trellis
//!
//! A small retained-mode widget toolkit with a responsive grid layout engine.
//!
//! Pages place widgets (check boxes, text fields, buttons, labels) into a
//! grid of proportional rows and columns. Each page can carry several layout
//! variants and switches between them at viewport-width breakpoints. The
//! [`Engine`] routes clicks and key presses to the widgets of the active
//! page and redraws after every event.
//!
//! ## Core Concepts
//!
//! - **Proportional grid**: track sizes are thousandths of the viewport,
//!   resolved into absolute rectangles on every resize
//! - **Breakpoints**: viewport-width thresholds choosing a layout variant
//! - **Surface**: the minimal drawing capability widgets need; a terminal
//!   cell buffer and a recording surface ship with the crate
//! - **Actor runtime**: isolated threads for input, blink ticks and rendering
//!
//! ## Example
//!
//! ```rust
//! use trellis::{
//!     CheckBox, Engine, GridLayout, GridPosition, Padding, Page, Proportion,
//!     RecordingSurface,
//! };
//!
//! let mut builder = Page::builder("main");
//! let tick = builder.add_widget(CheckBox::new(false));
//! builder.variant(
//!     GridLayout::builder(Proportion::even(2), Proportion::even(2))
//!         .place(GridPosition::new(0, 0), Padding::uniform(0.1), tick)
//!         .build()?,
//! );
//!
//! let mut engine = Engine::new(vec![builder.build()?])?;
//! let mut surface = RecordingSurface::default();
//! engine.init(&mut surface, 80.0, 24.0);
//! engine.click(&mut surface, 20.0, 6.0);
//! # Ok::<(), trellis::ConfigError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod logging;
pub mod page;
pub mod surface;
pub mod widget;

// Re-exports for convenience
pub use actor::{InputEvent, KeyCode, KeyModifiers, Runtime, RuntimeConfig};
pub use config::AppConfig;
pub use engine::{AppContext, Engine, Flow};
pub use error::{ConfigError, LoadError};
pub use layout::{
    Breakpoints, GridCell, GridLayout, GridPosition, Padding, Placement, Point, Proportion, Rect,
    WidgetId,
};
pub use page::{Page, PageBuilder};
pub use surface::{CellBuffer, Font, Frame, RecordingSurface, Rgb, Surface};
pub use widget::{Action, Button, CheckBox, KeyPress, Label, TextField, Widget};
