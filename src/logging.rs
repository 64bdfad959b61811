//! Logging setup for terminal hosts.
//!
//! The terminal is in raw mode while a [`Runtime`](crate::actor::Runtime) is
//! up, so log lines go to a daily rolling file instead of stdout. The filter
//! comes from `RUST_LOG`, defaulting to `trellis=info`.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Keeps the background log writer alive. Dropping it flushes pending lines.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    /// Directory the log files are written to.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Default log directory: `$TMPDIR/trellis/logs`.
pub fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join("trellis").join("logs")
}

/// Install the global subscriber writing to `log_dir`.
///
/// Returns `None` if the directory cannot be created or a subscriber is
/// already installed.
pub fn init(log_dir: &Path) -> Option<LoggingGuard> {
    std::fs::create_dir_all(log_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(log_dir, "trellis.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trellis=info"));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!(panic = %panic_info, "panic");
    }));

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir: log_dir.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");

        // Another test may already own the global subscriber.
        if let Some(guard) = init(&log_dir) {
            assert_eq!(guard.log_dir(), log_dir.as_path());
        }
        assert!(log_dir.is_dir());
    }

    #[test]
    fn test_default_log_dir_is_namespaced() {
        assert!(default_log_dir().ends_with("trellis/logs"));
    }
}
