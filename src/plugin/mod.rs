// src/plugin/mod.rs

//! Plugin interface and plugin ordering.
//!
//! Every module's source flows through the ordered plugin list's `transform`
//! hooks. `configure_server` runs once at server start and is where
//! server-only plugins hook into the graph and watcher.

pub mod resolve;

use anyhow::Result;

use crate::server::ServerContext;

pub use resolve::resolve_plugins;

pub trait Plugin: Send + Sync {
    /// Unique, namespaced plugin name (e.g. `globreload:glob-reload`).
    fn name(&self) -> &str;

    /// Transform a module's code.
    ///
    /// `Ok(None)` passes the code through unchanged to the next plugin.
    fn transform(&self, _code: &str, _id: &str) -> Result<Option<String>> {
        Ok(None)
    }

    /// Called once at dev server start.
    fn configure_server(&self, _server: &ServerContext) -> Result<()> {
        Ok(())
    }
}
