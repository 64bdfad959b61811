//! Actor Model: the threads behind the terminal runtime.
//!
//! - **Input Actor**: polls terminal events, forwards them to the dispatch loop
//! - **Ticker Actor**: fires the cursor blink
//! - **Render Actor**: receives finished frames, diffs and flushes
//! - **Dispatch Loop** ([`Runtime::run`]): the only thread touching widgets
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │              │
//! └──────────────┘                     │   Dispatch   │
//! ┌──────────────┐        Blink        │     Loop     │
//! │Ticker Thread │ ─────────────────▶  │   (Engine)   │
//! └──────────────┘                     │              │
//! ┌──────────────┐    RenderCommand    │              │
//! │Render Thread │ ◀───────────────── │              │
//! └──────────────┘                     └──────────────┘
//! ```

mod input;
mod messages;
mod renderer;
mod runtime;
mod ticker;

pub use input::{convert_event, InputActor};
pub use messages::{InputEvent, KeyCode, KeyModifiers, RenderCommand};
pub use renderer::RendererActor;
pub use runtime::{is_quit_key, Runtime, RuntimeConfig};
pub use ticker::{Blink, TickerActor};
