//! Renderer Actor: Dedicated thread for writing frames to the terminal.
//!
//! The dispatch loop rasterizes each frame into a [`CellBuffer`] and sends an
//! owned snapshot here. This actor keeps the buffer that is on screen,
//! diffs the new frame against it and flushes the result in one write.

use super::messages::RenderCommand;
use crate::surface::diff::{render_diff, render_full, DiffState};
use crate::surface::CellBuffer;
use crossbeam_channel::Receiver;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Renderer actor that handles terminal output.
pub struct RendererActor {
    /// Handle to the render thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

/// Double-buffered frame writer.
struct Renderer<W: Write> {
    /// What is on screen.
    current: CellBuffer,
    /// Diff state for cursor/color tracking.
    diff_state: DiffState,
    /// Pre-allocated output buffer.
    output: Vec<u8>,
    /// Terminal handle.
    sink: W,
    /// Frames written, logged on exit.
    frames: u64,
    /// Bytes written, logged on exit.
    bytes_written: u64,
    /// Whether the screen content is unknown.
    needs_full_redraw: bool,
}

impl<W: Write> Renderer<W> {
    fn new(width: u16, height: u16, sink: W) -> Self {
        Self {
            current: CellBuffer::new(width, height),
            diff_state: DiffState::new(),
            output: Vec::with_capacity(65536),
            sink,
            frames: 0,
            bytes_written: 0,
            needs_full_redraw: true,
        }
    }

    /// Write `next` to the terminal, diffing unless `full` is set or the
    /// size changed.
    fn render(&mut self, next: &CellBuffer, full: bool) -> io::Result<()> {
        self.output.clear();

        let resized =
            next.width() != self.current.width() || next.height() != self.current.height();
        if full || resized || self.needs_full_redraw {
            render_full(next, &mut self.output);
            self.diff_state.reset();
            self.current.resize(next.width(), next.height());
            self.needs_full_redraw = false;
        } else {
            render_diff(&self.current, next, &mut self.output, &mut self.diff_state);
        }

        if !self.output.is_empty() {
            self.sink.write_all(&self.output)?;
            self.sink.flush()?;
        }

        self.current.copy_from(next);

        self.frames += 1;
        self.bytes_written += self.output.len() as u64;
        Ok(())
    }
}

impl RendererActor {
    /// Spawn the renderer actor thread writing to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(receiver: Receiver<RenderCommand>, width: u16, height: u16) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("trellis-render".to_string())
            .spawn(move || {
                let mut renderer = Renderer::new(width, height, io::stdout());
                match Self::run_loop(&receiver, &shutdown_clone, &mut renderer) {
                    Ok(()) => tracing::debug!(
                        frames = renderer.frames,
                        bytes = renderer.bytes_written,
                        "render thread done"
                    ),
                    Err(e) => tracing::error!(error = %e, "render thread failed"),
                }
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the render thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the render thread to finish.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main render loop.
    fn run_loop<W: Write>(
        receiver: &Receiver<RenderCommand>,
        shutdown: &Arc<AtomicBool>,
        renderer: &mut Renderer<W>,
    ) -> io::Result<()> {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            // Timeout only so the shutdown flag is seen.
            if let Ok(command) = receiver.recv_timeout(Duration::from_millis(16)) {
                match command {
                    RenderCommand::FullRedraw(buffer) => renderer.render(&buffer, true)?,
                    RenderCommand::Update(buffer) => renderer.render(&buffer, false)?,
                    RenderCommand::Shutdown => break,
                }
            }
        }

        Ok(())
    }
}

impl Drop for RendererActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Cell;
    use crossbeam_channel::bounded;

    #[test]
    fn test_first_frame_is_full() {
        let mut renderer = Renderer::new(4, 2, Vec::new());
        let mut frame = CellBuffer::new(4, 2);
        frame.set(0, 0, Cell::new('A'));

        renderer.render(&frame, false).unwrap();
        assert!(renderer.sink.starts_with(b"\x1b[?25l\x1b[H"));
        assert_eq!(renderer.frames, 1);
        assert_eq!(renderer.bytes_written, renderer.sink.len() as u64);
    }

    #[test]
    fn test_unchanged_frame_writes_nothing() {
        let mut renderer = Renderer::new(4, 2, Vec::new());
        let frame = CellBuffer::new(4, 2);
        renderer.render(&frame, true).unwrap();
        let written = renderer.sink.len();

        renderer.render(&frame, false).unwrap();
        assert_eq!(renderer.sink.len(), written);
    }

    #[test]
    fn test_resized_frame_redraws_fully() {
        let mut renderer = Renderer::new(4, 2, Vec::new());
        renderer.render(&CellBuffer::new(4, 2), true).unwrap();
        renderer.sink.clear();

        renderer.render(&CellBuffer::new(6, 3), false).unwrap();
        assert!(renderer.sink.starts_with(b"\x1b[?25l\x1b[H"));
        assert_eq!(renderer.current.width(), 6);
    }

    #[test]
    fn test_run_loop_stops_on_shutdown_command() {
        let (tx, rx) = bounded(4);
        let mut renderer = Renderer::new(2, 1, Vec::new());
        tx.send(RenderCommand::Update(Box::new(CellBuffer::new(2, 1)))).unwrap();
        tx.send(RenderCommand::Shutdown).unwrap();

        let shutdown = Arc::new(AtomicBool::new(false));
        RendererActor::run_loop(&rx, &shutdown, &mut renderer).unwrap();
        assert_eq!(renderer.frames, 1);
    }
}
