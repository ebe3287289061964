// src/server.rs

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ConfigFile;
use crate::graph::ModuleGraph;
use crate::logging::InfoLogger;
use crate::watch::WatcherHub;

/// Handles passed to [`Plugin::configure_server`](crate::plugin::Plugin::configure_server).
#[derive(Clone)]
pub struct ServerContext {
    pub config: ConfigFile,
    /// Absolute project root.
    pub root: PathBuf,
    pub graph: Arc<dyn ModuleGraph>,
    pub hub: Arc<WatcherHub>,
    pub logger: Arc<dyn InfoLogger>,
}

impl fmt::Debug for ServerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerContext")
            .field("config", &self.config)
            .field("root", &self.root)
            .field("hub", &self.hub)
            .finish_non_exhaustive()
    }
}
