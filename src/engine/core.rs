// src/engine/core.rs

//! Synchronous dev server core.
//!
//! Consumes one [`ServerEvent`] at a time. All state lives in the module
//! graph, the watch set and the hub subscribers; the core only sequences
//! them. Processing failures for one module are logged and never stop the
//! server.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::glob::GlobTracker;
use crate::graph::{InMemoryModuleGraph, ModuleGraph};
use crate::pipeline::SourcePipeline;
use crate::watch::path_utils::{module_id_for_path, slash_str};
use crate::watch::{StructuralEvent, StructuralEventKind, WatcherHub};

use super::{ModuleId, RuntimeOptions, ServerEvent};

/// Result of handling a single event.
#[derive(Debug, Clone, Default)]
pub struct CoreStep {
    /// Modules (re)processed while handling the event.
    pub processed: Vec<ModuleId>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    fn running(processed: Vec<ModuleId>) -> Self {
        Self {
            processed,
            keep_running: true,
        }
    }
}

#[derive(Debug)]
pub struct DevServerCore {
    pipeline: SourcePipeline,
    hub: Arc<WatcherHub>,
    tracker: GlobTracker,
    root: PathBuf,
    options: RuntimeOptions,
}

impl DevServerCore {
    pub fn new(
        pipeline: SourcePipeline,
        hub: Arc<WatcherHub>,
        tracker: GlobTracker,
        root: impl Into<PathBuf>,
        options: RuntimeOptions,
    ) -> Self {
        Self {
            pipeline,
            hub,
            tracker,
            root: root.into(),
            options,
        }
    }

    pub fn options(&self) -> RuntimeOptions {
        self.options
    }

    pub fn graph(&self) -> &Arc<InMemoryModuleGraph> {
        self.pipeline.graph()
    }

    pub fn tracker(&self) -> &GlobTracker {
        &self.tracker
    }

    pub fn step(&mut self, event: ServerEvent) -> CoreStep {
        match event {
            ServerEvent::Request { id } => CoreStep::running(self.handle_request(&id)),
            ServerEvent::FileChanged { path } => {
                CoreStep::running(self.handle_file_changed(&path))
            }
            ServerEvent::Structural(event) => CoreStep::running(self.handle_structural(&event)),
            ServerEvent::ShutdownRequested => CoreStep {
                processed: Vec::new(),
                keep_running: false,
            },
        }
    }

    fn handle_request(&self, raw: &str) -> Vec<ModuleId> {
        let id = module_id_for_path(&self.root, Path::new(raw));
        let was_cached = self
            .graph()
            .module_by_id(&id)
            .is_some_and(|m| !m.is_stale());

        match self.pipeline.transform_request(&id) {
            Ok(_) if was_cached => Vec::new(),
            Ok(_) => vec![id],
            Err(err) => {
                warn!(id = %id, error = %err, "failed to serve module");
                Vec::new()
            }
        }
    }

    /// Hot update: a loaded module's own file changed, so it is recomputed,
    /// which also refreshes its glob tracking.
    fn handle_file_changed(&self, path: &Path) -> Vec<ModuleId> {
        let id = slash_str(path);
        let Some(module) = self.graph().module_by_id(&id) else {
            return Vec::new();
        };

        if let Err(err) = self.graph().invalidate_module(&module) {
            warn!(id = %id, error = %err, "failed to invalidate changed module");
        }

        match self.pipeline.process(&id) {
            Ok(_) => {
                info!(id = %id, "hot update");
                vec![id]
            }
            Err(err) => {
                warn!(id = %id, error = %err, "failed to re-process changed module");
                Vec::new()
            }
        }
    }

    fn handle_structural(&self, event: &StructuralEvent) -> Vec<ModuleId> {
        let handlers = self.hub.emit(event);
        debug!(kind = %event.kind, path = ?event.path, handlers, "structural event dispatched");

        let mut processed = Vec::new();
        if event.kind.is_removal() {
            for id in self.graph().ids_under(&event.path) {
                self.graph().remove(&id);
                self.tracker.forget(&id);
            }
        } else if event.kind == StructuralEventKind::EntryAdded {
            // Atomic saves rename a temp file over the target, so an "added"
            // path may already be a loaded module with new contents.
            processed.extend(self.handle_file_changed(&event.path));
        }

        if self.options.rewarm {
            processed.extend(self.rewarm_stale());
        }
        processed
    }

    /// Re-process every module whose cached result has been dropped.
    fn rewarm_stale(&self) -> Vec<ModuleId> {
        let mut processed = Vec::new();
        for id in self.graph().stale_ids() {
            match self.pipeline.process(&id) {
                Ok(_) => processed.push(id),
                Err(err) => warn!(id = %id, error = %err, "failed to re-process module"),
            }
        }
        processed
    }
}
