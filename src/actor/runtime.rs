//! Runtime: terminal host that drives an [`Engine`] with the actors.
//!
//! The runtime owns the terminal. It spawns the input, ticker and renderer
//! actors, rasterizes the engine into a [`CellBuffer`] on the dispatch
//! thread and hands finished frames to the renderer.

use super::messages::{InputEvent, KeyCode, RenderCommand};
use super::{Blink, InputActor, RendererActor, TickerActor};
use crate::engine::{Engine, Flow};
use crate::surface::CellBuffer;
use crossbeam_channel::{bounded, never, select, Receiver, Sender};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use std::time::{Duration, Instant};

/// Configuration for the terminal runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Frame rate cap.
    pub target_fps: u32,
    /// Time between cursor blink phases. Zero disables blinking.
    pub blink_interval: Duration,
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
    /// Whether to enable mouse capture.
    pub enable_mouse: bool,
    /// Whether to use alternate screen buffer.
    pub alternate_screen: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            blink_interval: Duration::from_millis(500),
            input_poll_timeout: Duration::from_millis(10),
            enable_mouse: true,
            alternate_screen: true,
        }
    }
}

/// Keys that end the session whatever page is shown.
pub fn is_quit_key(event: &InputEvent) -> bool {
    matches!(
        event,
        InputEvent::Key { code: KeyCode::Char('c'), modifiers } if modifiers.control
    ) || matches!(event, InputEvent::Key { code: KeyCode::Esc, .. })
}

/// The terminal host.
pub struct Runtime {
    /// Configuration.
    config: RuntimeConfig,
    /// Input event receiver.
    input_rx: Receiver<InputEvent>,
    /// Render command sender.
    render_tx: Sender<RenderCommand>,
    /// Input actor handle.
    input_actor: Option<InputActor>,
    /// Renderer actor handle.
    renderer_actor: Option<RendererActor>,
    /// Cursor blink ticker.
    ticker: Option<TickerActor>,
    /// Frame being drawn.
    frame: CellBuffer,
    /// Minimum time between presented frames.
    frame_duration: Duration,
    /// When the last frame was presented.
    last_present: Instant,
}

impl Runtime {
    /// Take over the terminal with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails (raw mode, alternate screen, etc.).
    pub fn new() -> io::Result<Self> {
        Self::with_config(RuntimeConfig::default())
    }

    /// Take over the terminal with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup or spawning an actor fails.
    pub fn with_config(config: RuntimeConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        if config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        if config.enable_mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        execute!(stdout, cursor::Hide)?;

        let (input_tx, input_rx) = bounded::<InputEvent>(64);
        let (render_tx, render_rx) = bounded::<RenderCommand>(16);

        let input_actor = InputActor::spawn(input_tx, config.input_poll_timeout)?;
        let renderer_actor = RendererActor::spawn(render_rx, width, height)?;
        let ticker = if config.blink_interval.is_zero() {
            None
        } else {
            Some(TickerActor::spawn(config.blink_interval)?)
        };

        let frame_duration = Duration::from_secs(1) / config.target_fps.max(1);
        tracing::info!(width, height, ?config, "terminal runtime started");

        Ok(Self {
            config,
            input_rx,
            render_tx,
            input_actor: Some(input_actor),
            renderer_actor: Some(renderer_actor),
            ticker,
            frame: CellBuffer::new(width, height),
            frame_duration,
            last_present: Instant::now(),
        })
    }

    /// The frame buffer size in cells.
    pub const fn size(&self) -> (u16, u16) {
        (self.frame.width(), self.frame.height())
    }

    fn present(&mut self, full: bool) {
        let snapshot = Box::new(self.frame.clone());
        let command = if full {
            RenderCommand::FullRedraw(snapshot)
        } else {
            RenderCommand::Update(snapshot)
        };
        if self.render_tx.send(command).is_err() {
            tracing::warn!("render thread gone; frame dropped");
        }
        self.last_present = Instant::now();
    }

    /// Run `engine` until it quits, the user presses Esc or Ctrl+C, or the
    /// input thread goes away.
    ///
    /// # Errors
    ///
    /// Currently infallible once the runtime is set up; the signature leaves
    /// room for host-side failures.
    pub fn run(&mut self, engine: &mut Engine) -> io::Result<()> {
        let (width, height) = self.size();
        engine.init(&mut self.frame, f64::from(width), f64::from(height));
        self.present(true);

        let no_ticks = never::<Blink>();
        let tick_rx = self.ticker.as_ref().map_or(&no_ticks, TickerActor::receiver).clone();
        let mut pending = false;

        while engine.is_running() {
            let wait = self.frame_duration.saturating_sub(self.last_present.elapsed());
            let mut full = false;

            select! {
                recv(self.input_rx) -> event => {
                    let Ok(event) = event else { break };
                    if is_quit_key(&event) {
                        tracing::debug!("quit key");
                        break;
                    }
                    if let InputEvent::Resize { width, height } = event {
                        self.frame.resize(to_cells(width), to_cells(height));
                        full = true;
                    }
                    if engine.handle_event(&mut self.frame, &event) == Flow::Quit {
                        break;
                    }
                    pending = true;
                }
                recv(tick_rx) -> _ => {
                    engine.toggle_cursor_blink(&mut self.frame);
                    pending = true;
                }
                default(wait) => {}
            }

            if full {
                self.present(true);
                pending = false;
            } else if pending && self.last_present.elapsed() >= self.frame_duration {
                self.present(false);
                pending = false;
            }
        }

        if pending {
            self.present(false);
        }
        tracing::info!("terminal runtime stopping");
        Ok(())
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_cells(extent: f64) -> u16 {
    extent.clamp(0.0, f64::from(u16::MAX)) as u16
}

impl Drop for Runtime {
    fn drop(&mut self) {
        if let Some(actor) = self.input_actor.take() {
            actor.join();
        }
        if let Some(ticker) = self.ticker.take() {
            ticker.join();
        }

        let _ = self.render_tx.send(RenderCommand::Shutdown);
        if let Some(actor) = self.renderer_actor.take() {
            actor.join();
        }

        // Restore terminal state
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if self.config.enable_mouse {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        if self.config.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::KeyModifiers;

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::default();
        assert_eq!(config.blink_interval, Duration::from_millis(500));
        assert_eq!(config.target_fps, 60);
        assert!(config.enable_mouse);
    }

    #[test]
    fn test_quit_keys() {
        let ctrl_c = InputEvent::Key {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        };
        assert!(is_quit_key(&ctrl_c));
        assert!(is_quit_key(&InputEvent::key(KeyCode::Esc)));
        assert!(!is_quit_key(&InputEvent::key(KeyCode::Char('c'))));
        assert!(!is_quit_key(&InputEvent::Click { x: 0.0, y: 0.0 }));
    }

    #[test]
    fn test_to_cells_saturates() {
        assert_eq!(to_cells(80.0), 80);
        assert_eq!(to_cells(-3.0), 0);
        assert_eq!(to_cells(1e9), u16::MAX);
    }
}
