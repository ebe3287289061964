//! Recording and failing stand-ins for the logger and module graph.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use globreload::errors::{GlobReloadError, Result};
use globreload::graph::{ModuleGraph, ModuleRecord, TransformResult};
use globreload::logging::{InfoLogger, LogOptions};

/// Logger that keeps every line it is given.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    lines: Arc<Mutex<Vec<(String, LogOptions)>>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn options(&self) -> Vec<LogOptions> {
        self.lines.lock().unwrap().iter().map(|(_, o)| *o).collect()
    }

    pub fn count(&self) -> usize {
        self.lines.lock().unwrap().len()
    }
}

impl InfoLogger for RecordingLogger {
    fn info(&self, message: &str, options: LogOptions) -> anyhow::Result<()> {
        self.lines
            .lock()
            .unwrap()
            .push((message.to_string(), options));
        Ok(())
    }
}

/// Logger whose every call fails.
#[derive(Debug, Clone, Default)]
pub struct FailingLogger {
    calls: Arc<AtomicUsize>,
}

impl FailingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl InfoLogger for FailingLogger {
    fn info(&self, _message: &str, _options: LogOptions) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(anyhow!("log sink closed"))
    }
}

/// Module graph that records every call made against it.
///
/// Ids passed to [`CountingGraph::fail_on`] exist in the graph but refuse to
/// be invalidated.
#[derive(Debug, Default)]
pub struct CountingGraph {
    records: Mutex<HashMap<String, ModuleRecord>>,
    failing: Mutex<HashSet<String>>,
    lookups: Mutex<Vec<String>>,
    invalidations: Mutex<Vec<String>>,
}

impl CountingGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph holding a compiled record for each of `ids`.
    pub fn with_modules(ids: &[&str]) -> Self {
        let graph = Self::new();
        for id in ids {
            graph.add_module(id);
        }
        graph
    }

    pub fn add_module(&self, id: &str) {
        let mut record = ModuleRecord::new(id, None);
        record.transform_result = Some(TransformResult {
            code: format!("// {id}"),
        });
        self.records.lock().unwrap().insert(id.to_string(), record);
    }

    pub fn fail_on(&self, id: &str) {
        self.failing.lock().unwrap().insert(id.to_string());
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }

    pub fn invalidations(&self) -> Vec<String> {
        self.invalidations.lock().unwrap().clone()
    }

    /// Total number of calls of either capability.
    pub fn call_count(&self) -> usize {
        self.lookups.lock().unwrap().len() + self.invalidations.lock().unwrap().len()
    }

    pub fn is_stale(&self, id: &str) -> bool {
        self.records
            .lock()
            .unwrap()
            .get(id)
            .is_some_and(|r| r.is_stale())
    }
}

impl ModuleGraph for CountingGraph {
    fn module_by_id(&self, id: &str) -> Option<ModuleRecord> {
        self.lookups.lock().unwrap().push(id.to_string());
        self.records.lock().unwrap().get(id).cloned()
    }

    fn invalidate_module(&self, module: &ModuleRecord) -> Result<()> {
        self.invalidations.lock().unwrap().push(module.id.clone());
        if self.failing.lock().unwrap().contains(&module.id) {
            return Err(GlobReloadError::Other(anyhow!(
                "refusing to invalidate {}",
                module.id
            )));
        }
        if let Some(record) = self.records.lock().unwrap().get_mut(&module.id) {
            record.transform_result = None;
        }
        Ok(())
    }
}
