// src/graph/memory.rs

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::errors::{GlobReloadError, Result};
use crate::graph::{ModuleGraph, ModuleRecord, TransformResult};

/// Module graph held entirely in memory, keyed by module id.
#[derive(Debug, Default)]
pub struct InMemoryModuleGraph {
    modules: Mutex<HashMap<String, ModuleRecord>>,
}

impl InMemoryModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, ModuleRecord>> {
        self.modules.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store the transform output for `id`, creating the record if needed.
    pub fn set_transform_result(&self, id: &str, file: Option<PathBuf>, result: TransformResult) {
        let mut modules = self.lock();
        let record = modules
            .entry(id.to_string())
            .or_insert_with(|| ModuleRecord::new(id, file));
        record.transform_result = Some(result);
    }

    /// Drop the record for `id` entirely. Returns the removed record.
    pub fn remove(&self, id: &str) -> Option<ModuleRecord> {
        let removed = self.lock().remove(id);
        if removed.is_some() {
            debug!(id, "removed module from graph");
        }
        removed
    }

    /// Ids of all records without a cached transform result, sorted.
    pub fn stale_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .lock()
            .values()
            .filter(|m| m.is_stale())
            .map(|m| m.id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Ids of every record whose backing file is `path` or lives below it.
    pub fn ids_under(&self, path: &std::path::Path) -> Vec<String> {
        let mut ids: Vec<String> = self
            .lock()
            .values()
            .filter(|m| m.file.as_deref().is_some_and(|f| f.starts_with(path)))
            .map(|m| m.id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// All module ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.lock().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl ModuleGraph for InMemoryModuleGraph {
    fn module_by_id(&self, id: &str) -> Option<ModuleRecord> {
        self.lock().get(id).cloned()
    }

    fn invalidate_module(&self, module: &ModuleRecord) -> Result<()> {
        let mut modules = self.lock();
        match modules.get_mut(&module.id) {
            Some(record) => {
                record.transform_result = None;
                debug!(id = %module.id, "invalidated module");
                Ok(())
            }
            None => Err(GlobReloadError::ModuleNotFound(module.id.clone())),
        }
    }
}
