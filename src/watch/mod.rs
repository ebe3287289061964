// src/watch/mod.rs

//! File watching and structural change detection.
//!
//! This module is responsible for:
//! - Modelling structural filesystem events (`events.rs`).
//! - Letting server plugins subscribe to them (`hub.rs`).
//! - Turning raw `notify` events into structural / content events
//!   (`classify.rs`), filtered by `exclude` globs (`patterns.rs`).
//! - Wiring up a cross-platform filesystem watcher (`watcher.rs`).
//!
//! It does **not** know which modules are affected; that is decided by the
//! subscribers and the engine.

pub mod classify;
pub mod events;
pub mod hub;
pub mod path_utils;
pub mod patterns;
pub mod watcher;

pub use classify::classify;
pub use events::{StructuralEvent, StructuralEventKind, WatchEvent};
pub use hub::{EventHandler, WatcherHub};
pub use patterns::ExcludeFilter;
pub use watcher::{spawn_watcher, WatcherHandle};
