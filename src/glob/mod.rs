// src/glob/mod.rs

//! Glob-import invalidation core.
//!
//! Modules containing dynamic glob imports (`import.meta.glob`) resolve to a
//! set of files that the module graph cannot see statically. Whenever a file
//! or directory is added or removed, those modules may resolve differently
//! even though their own source did not change.
//!
//! - [`watch_set`] holds the shared set of glob-sensitive module ids.
//! - [`tracker`] updates that set every time a module's source is processed.
//! - [`listener`] sweeps the set on every structural filesystem event and
//!   invalidates each tracked module in the graph.
//! - [`plugin`] packages the two as the `glob-reload` server plugin.

pub mod listener;
pub mod plugin;
pub mod tracker;
pub mod watch_set;

pub use listener::{InvalidationListener, SweepReport};
pub use plugin::{GlobReload, GLOB_RELOAD_PLUGIN_NAME};
pub use tracker::GlobTracker;
pub use watch_set::WatchSet;
