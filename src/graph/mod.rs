// src/graph/mod.rs

//! Module graph abstraction.
//!
//! The invalidation core only needs two capabilities from the graph:
//! lookup by id and invalidation. They are expressed by the
//! [`ModuleGraph`] trait so tests can substitute counting or failing graphs.
//!
//! [`memory`] provides the in-memory graph the dev server runs on.

pub mod memory;

use std::path::PathBuf;

use crate::errors::Result;

pub use memory::InMemoryModuleGraph;

/// Output of running a module's source through the plugin pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    pub code: String,
}

/// A module known to the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
    /// Resolved id (absolute file path or virtual id).
    pub id: String,
    /// Backing file on disk, if any.
    pub file: Option<PathBuf>,
    /// Cached transform output; `None` once the module has been invalidated.
    pub transform_result: Option<TransformResult>,
}

impl ModuleRecord {
    pub fn new(id: impl Into<String>, file: Option<PathBuf>) -> Self {
        Self {
            id: id.into(),
            file,
            transform_result: None,
        }
    }

    /// True when the next request must recompute this module.
    pub fn is_stale(&self) -> bool {
        self.transform_result.is_none()
    }
}

/// Capabilities of the module graph consumed by the invalidation core.
pub trait ModuleGraph: Send + Sync {
    /// Look up the record for `id`, if the module was ever loaded.
    fn module_by_id(&self, id: &str) -> Option<ModuleRecord>;

    /// Drop any cached state for `module` so the next request recomputes it.
    ///
    /// Invalidating an already-invalidated module is a no-op.
    fn invalidate_module(&self, module: &ModuleRecord) -> Result<()>;
}
