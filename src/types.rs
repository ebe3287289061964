// src/types.rs

use std::str::FromStr;
use serde::Deserialize;

/// Verbosity of the dev server's own user-facing messages.
///
/// Ordered from least to most verbose, so `level >= ServerLogLevel::Info`
/// answers "should info lines be printed".
///
/// This is independent from the `tracing` subscriber level, which controls
/// diagnostic output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerLogLevel {
    Silent,
    Error,
    Warn,
    Info,
}

impl Default for ServerLogLevel {
    fn default() -> Self {
        ServerLogLevel::Info
    }
}

impl ServerLogLevel {
    /// Whether info-level messages pass this threshold.
    pub fn allows_info(self) -> bool {
        self >= ServerLogLevel::Info
    }
}

impl FromStr for ServerLogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "silent" => Ok(ServerLogLevel::Silent),
            "error" => Ok(ServerLogLevel::Error),
            "warn" | "warning" => Ok(ServerLogLevel::Warn),
            "info" => Ok(ServerLogLevel::Info),
            other => Err(format!(
                "invalid log_level: {other} (expected \"silent\", \"error\", \"warn\" or \"info\")"
            )),
        }
    }
}

/// Whether the plugin list is assembled for the dev server or a production
/// build. Server-only plugins are dropped in `Build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Serve,
    Build,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Serve
    }
}
