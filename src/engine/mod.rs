// src/engine/mod.rs

//! Dev server engine.
//!
//! The server reacts to:
//! - module requests (startup entries, or any other client of the channel)
//! - in-place file content changes (hot updates)
//! - structural filesystem events (glob invalidation)
//! - shutdown signals
//!
//! The synchronous core lives in [`core`]; the async shell that reads events
//! from a channel is [`runtime`].

use std::path::PathBuf;

use crate::watch::{StructuralEvent, WatchEvent};

/// Canonical module id type used throughout the engine.
pub type ModuleId = String;

/// Runtime options used by both the core and the async shell.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// Stop once no events are pending (used for `--once`).
    pub exit_when_idle: bool,
    /// Re-process invalidated modules right after a structural change.
    pub rewarm: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            exit_when_idle: false,
            rewarm: true,
        }
    }
}

/// Events flowing into the dev server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// A module is requested. `id` is absolute or relative to the root.
    Request { id: ModuleId },
    /// A file's contents changed in place.
    FileChanged { path: PathBuf },
    /// A file or directory was added or removed.
    Structural(StructuralEvent),
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

impl From<WatchEvent> for ServerEvent {
    fn from(event: WatchEvent) -> Self {
        match event {
            WatchEvent::Structural(ev) => ServerEvent::Structural(ev),
            WatchEvent::Changed(path) => ServerEvent::FileChanged { path },
        }
    }
}

pub mod core;
pub mod runtime;

pub use core::{CoreStep, DevServerCore};
pub use runtime::Runtime;
