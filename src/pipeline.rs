// src/pipeline.rs

//! Source processing pipeline.
//!
//! Reads a module's source, runs it through the ordered plugin `transform`
//! hooks and caches the result in the module graph. Modules are served from
//! the cache until something invalidates them.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::errors::{GlobReloadError, Result};
use crate::fs::FileSystem;
use crate::graph::{InMemoryModuleGraph, ModuleGraph, TransformResult};
use crate::plugin::Plugin;

pub struct SourcePipeline {
    plugins: Vec<Arc<dyn Plugin>>,
    fs: Arc<dyn FileSystem>,
    graph: Arc<InMemoryModuleGraph>,
}

impl fmt::Debug for SourcePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.plugins.iter().map(|p| p.name()).collect();
        f.debug_struct("SourcePipeline")
            .field("plugins", &names)
            .field("fs", &self.fs)
            .finish_non_exhaustive()
    }
}

impl SourcePipeline {
    pub fn new(
        plugins: Vec<Arc<dyn Plugin>>,
        fs: Arc<dyn FileSystem>,
        graph: Arc<InMemoryModuleGraph>,
    ) -> Self {
        Self { plugins, fs, graph }
    }

    pub fn graph(&self) -> &Arc<InMemoryModuleGraph> {
        &self.graph
    }

    /// Serve `id`, recomputing it only when there is no cached result.
    pub fn transform_request(&self, id: &str) -> Result<TransformResult> {
        if let Some(cached) = self
            .graph
            .module_by_id(id)
            .and_then(|m| m.transform_result)
        {
            debug!(id, "serving cached transform result");
            return Ok(cached);
        }
        self.process(id)
    }

    /// Read `id` from disk and run it through every plugin, in order.
    ///
    /// A plugin returning `Some(code)` replaces the code seen by later
    /// plugins. The final code is stored in the graph.
    pub fn process(&self, id: &str) -> Result<TransformResult> {
        let file = PathBuf::from(id);
        let mut code = self.fs.read_to_string_lossy(&file)?;

        for plugin in self.plugins.iter() {
            match plugin.transform(&code, id) {
                Ok(Some(transformed)) => code = transformed,
                Ok(None) => {}
                Err(err) => {
                    return Err(GlobReloadError::Transform {
                        id: id.to_string(),
                        plugin: plugin.name().to_string(),
                        message: format!("{err:#}"),
                    });
                }
            }
        }

        let result = TransformResult { code };
        self.graph
            .set_transform_result(id, Some(file), result.clone());
        debug!(id, "processed module");
        Ok(result)
    }
}
