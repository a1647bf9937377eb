//! Structured console logging over [`tracing`].
//!
//! A thin wrapper that installs a `tracing-subscriber` console formatter and
//! exposes the small set of message kinds the engine emits. `-v` raises the
//! console level to debug; `RUST_LOG` overrides the filter entirely.

use tracing_subscriber::EnvFilter;

/// Console logger for a single run.
#[derive(Debug)]
pub struct Logger;

impl Logger {
    /// Create the logger and install the global subscriber.
    ///
    /// Safe to call more than once (later installs are no-ops), which keeps
    /// tests that build multiple loggers from panicking.
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        let default = if verbose { "debug" } else { "info" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .without_time()
            .with_target(false)
            .try_init();
        Self
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!("==> {msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log the command a dry run would have executed.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!("[dry run] {msg}");
    }
}
