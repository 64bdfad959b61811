//! Ticker Actor: the cursor blink clock.
//!
//! The thread parks on a stop channel with a timeout of one blink interval,
//! so it wakes once per blink and exits as soon as it is told to. A blink the
//! dispatch loop has not picked up yet is not doubled: at most one is queued.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// The caret should flip between shown and hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blink;

/// Ticker actor that emits a [`Blink`] every interval.
pub struct TickerActor {
    handle: Option<JoinHandle<()>>,
    /// Dropping this wakes and stops the thread.
    stop_tx: Option<Sender<()>>,
    blink_rx: Receiver<Blink>,
}

impl TickerActor {
    /// Spawn a ticker firing every `interval` (500 ms for the cursor blink).
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the ticker thread.
    pub fn spawn(interval: Duration) -> io::Result<Self> {
        let (stop_tx, stop_rx) = bounded(0);
        let (blink_tx, blink_rx) = bounded(1);

        let handle = thread::Builder::new()
            .name("trellis-ticker".to_string())
            .spawn(move || Self::run_loop(&blink_tx, &stop_rx, interval))?;

        Ok(Self {
            handle: Some(handle),
            stop_tx: Some(stop_tx),
            blink_rx,
        })
    }

    /// The blink receiver, for use with `select!`.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Blink> {
        &self.blink_rx
    }

    /// Stop the ticker and wait for its thread.
    pub fn join(mut self) {
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(blink_tx: &Sender<Blink>, stop_rx: &Receiver<()>, interval: Duration) {
        loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    // Full means the last blink is still pending.
                    let _ = blink_tx.try_send(Blink);
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::trace!("ticker stopped");
    }
}

impl Drop for TickerActor {
    fn drop(&mut self) {
        self.stop_tx.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_ticker_blinks() {
        let ticker = TickerActor::spawn(Duration::from_millis(10)).unwrap();

        let blink = ticker.receiver().recv_timeout(Duration::from_millis(200));
        assert_eq!(blink, Ok(Blink));
        assert!(ticker.receiver().recv_timeout(Duration::from_millis(200)).is_ok());

        ticker.join();
    }

    #[test]
    fn test_join_does_not_wait_for_interval() {
        let ticker = TickerActor::spawn(Duration::from_secs(30)).unwrap();
        let start = Instant::now();
        ticker.join();
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_unread_blinks_do_not_queue() {
        let (blink_tx, blink_rx) = bounded(1);
        let (stop_tx, stop_rx) = bounded::<()>(0);
        let handle =
            thread::spawn(move || TickerActor::run_loop(&blink_tx, &stop_rx, Duration::from_millis(1)));

        thread::sleep(Duration::from_millis(30));
        drop(stop_tx);
        handle.join().unwrap();

        assert_eq!(blink_rx.try_recv(), Ok(Blink));
        assert!(blink_rx.try_recv().is_err());
    }
}
