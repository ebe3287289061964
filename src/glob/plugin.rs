// src/glob/plugin.rs

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::glob::listener::InvalidationListener;
use crate::glob::tracker::GlobTracker;
use crate::plugin::Plugin;
use crate::server::ServerContext;
use crate::watch::StructuralEventKind;

pub const GLOB_RELOAD_PLUGIN_NAME: &str = "globreload:glob-reload";

/// Server-only plugin that invalidates modules containing
/// `import.meta.glob` / `import.meta.globEager` when files or directories are
/// added or removed.
#[derive(Debug, Clone)]
pub struct GlobReload {
    tracker: GlobTracker,
}

impl GlobReload {
    pub fn new(tracker: GlobTracker) -> Self {
        Self { tracker }
    }

    pub fn tracker(&self) -> &GlobTracker {
        &self.tracker
    }
}

impl Plugin for GlobReload {
    fn name(&self) -> &str {
        GLOB_RELOAD_PLUGIN_NAME
    }

    /// (Un)track the module, leaving its code untouched.
    fn transform(&self, code: &str, id: &str) -> Result<Option<String>> {
        self.tracker.record(id, code);
        Ok(None)
    }

    /// Subscribe one shared listener to all four structural event kinds.
    fn configure_server(&self, server: &ServerContext) -> Result<()> {
        let listener = Arc::new(InvalidationListener::new(
            self.tracker.watch_set().clone(),
            Arc::clone(&server.graph),
            Arc::clone(&server.logger),
            server.root.clone(),
            server.config.server.log_level,
        ));

        for kind in StructuralEventKind::ALL {
            let listener = Arc::clone(&listener);
            server.hub.subscribe(kind, move |event| {
                listener.on_structural_change(event);
            });
        }

        debug!(root = ?server.root, "glob-reload listener subscribed");
        Ok(())
    }
}
