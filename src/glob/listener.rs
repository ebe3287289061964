// src/glob/listener.rs

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::glob::watch_set::WatchSet;
use crate::graph::ModuleGraph;
use crate::logging::{InfoLogger, LogOptions};
use crate::types::ServerLogLevel;
use crate::watch::path_utils::short_name;
use crate::watch::StructuralEvent;

/// Outcome of one sweep over the watch set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Ids whose graph record was invalidated.
    pub invalidated: Vec<String>,
    /// Tracked ids with no record in the graph.
    pub skipped: Vec<String>,
    /// Ids the graph failed to invalidate.
    pub failed: Vec<String>,
}

impl SweepReport {
    pub fn is_empty(&self) -> bool {
        self.invalidated.is_empty() && self.skipped.is_empty() && self.failed.is_empty()
    }
}

/// Forces every glob-importing module out of the graph's cache whenever the
/// shape of the watched tree changes.
///
/// All structural event kinds trigger the same sweep over the whole watch
/// set, whichever path changed.
pub struct InvalidationListener {
    set: WatchSet,
    graph: Arc<dyn ModuleGraph>,
    logger: Arc<dyn InfoLogger>,
    root: PathBuf,
    log_level: ServerLogLevel,
}

impl fmt::Debug for InvalidationListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvalidationListener")
            .field("set", &self.set)
            .field("root", &self.root)
            .field("log_level", &self.log_level)
            .finish_non_exhaustive()
    }
}

impl InvalidationListener {
    pub fn new(
        set: WatchSet,
        graph: Arc<dyn ModuleGraph>,
        logger: Arc<dyn InfoLogger>,
        root: impl Into<PathBuf>,
        log_level: ServerLogLevel,
    ) -> Self {
        Self {
            set,
            graph,
            logger,
            root: root.into(),
            log_level,
        }
    }

    /// Handler subscribed to every structural event kind.
    pub fn on_structural_change(&self, event: &StructuralEvent) -> SweepReport {
        debug!(kind = %event.kind, path = ?event.path, "structural change; sweeping glob modules");
        self.sweep()
    }

    /// Invalidate every tracked module that has a record in the graph.
    ///
    /// Iterates over a snapshot, so the tracker may add or remove ids while a
    /// sweep is in progress. Failures are per id and never stop the sweep.
    pub fn sweep(&self) -> SweepReport {
        let mut report = SweepReport::default();

        let ids = self.set.snapshot();
        if ids.is_empty() {
            return report;
        }

        let should_log_info = self.log_level.allows_info();

        for id in ids {
            let Some(module) = self.graph.module_by_id(&id) else {
                report.skipped.push(id);
                continue;
            };

            if let Err(err) = self.graph.invalidate_module(&module) {
                warn!(id = %id, error = %err, "failed to invalidate glob-importing module");
                report.failed.push(id);
                continue;
            }

            if should_log_info {
                let message = format!("force invalidated {}", short_name(&id, &self.root));
                if let Err(err) = self.logger.info(&message, LogOptions { timestamp: true }) {
                    debug!(id = %id, error = %err, "info logger failed");
                }
            }

            report.invalidated.push(id);
        }

        report
    }
}
