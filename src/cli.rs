// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `globreload`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "globreload",
    version,
    about = "Dev-server module graph that force-invalidates glob-importing modules on file add/remove.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `GlobReload.toml` in the current working directory. A missing
    /// default config is not an error; built-in defaults are used instead.
    #[arg(long, value_name = "PATH", default_value = "GlobReload.toml")]
    pub config: String,

    /// Project root to serve and watch. Overrides `[server].root`.
    #[arg(long, value_name = "PATH")]
    pub root: Option<String>,

    /// Process the configured entries once, report glob-tracked modules and
    /// exit without watching.
    #[arg(long)]
    pub once: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `GLOBRELOAD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the resolved config and plugin order, but
    /// don't serve anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
