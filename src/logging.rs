// src/logging.rs

//! Logging setup for `globreload` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `GLOBRELOAD_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Logs are sent to STDERR.
//!
//! User-facing server messages (e.g. "force invalidated src/main.js") go
//! through the [`InfoLogger`] trait so they can be gated by the server's
//! `log_level` and captured in tests.

use anyhow::Result;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let level = match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => std::env::var("GLOBRELOAD_LOG")
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(tracing::Level::INFO),
    };

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}

/// Options accompanying a user-facing log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Prefix the line with the current time.
    pub timestamp: bool,
}

/// Sink for user-facing informational messages.
///
/// Failures are reported to the caller, which treats them as non-fatal.
pub trait InfoLogger: Send + Sync {
    fn info(&self, message: &str, options: LogOptions) -> Result<()>;
}

/// Production logger: forwards messages to `tracing` at `INFO`.
///
/// The `fmt` subscriber already stamps every event with the time, so
/// `timestamp` is recorded as a field rather than formatted again.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl InfoLogger for TracingLogger {
    fn info(&self, message: &str, options: LogOptions) -> Result<()> {
        tracing::info!(
            target: "globreload::glob",
            timestamp = options.timestamp,
            "{message}"
        );
        Ok(())
    }
}
