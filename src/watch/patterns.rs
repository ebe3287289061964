// src/watch/patterns.rs

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};

use crate::config::ConfigFile;
use crate::watch::path_utils::relative_str;

/// Compiled `[watch].exclude` globs.
///
/// Patterns are matched against paths relative to the project root, with
/// forward slashes (e.g. `"node_modules/foo/index.js"`).
#[derive(Clone)]
pub struct ExcludeFilter {
    patterns: Vec<String>,
    set: Option<GlobSet>,
}

impl fmt::Debug for ExcludeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExcludeFilter")
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl Default for ExcludeFilter {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            set: None,
        }
    }
}

impl ExcludeFilter {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let set = if patterns.is_empty() {
            None
        } else {
            Some(build_globset(patterns)?)
        };
        Ok(Self {
            patterns: patterns.to_vec(),
            set,
        })
    }

    pub fn from_config(cfg: &ConfigFile) -> Result<Self> {
        Self::new(&cfg.watch.exclude)
    }

    /// True if events for `rel_path` should be dropped.
    pub fn is_excluded(&self, rel_path: &str) -> bool {
        match &self.set {
            Some(set) => set.is_match(rel_path),
            None => false,
        }
    }

    /// Whether an event for the absolute `path` should reach the server.
    ///
    /// Paths that cannot be related to `root` are dropped, as are paths whose
    /// root-relative form matches an exclude glob.
    pub fn should_forward(&self, root: &Path, path: &Path) -> bool {
        let Some(rel) = relative_str(root, path) else {
            warn!("could not relativize path {:?} against root {:?}", path, root);
            return false;
        };
        if self.is_excluded(&rel) {
            debug!(path = %rel, "excluded path; ignoring event");
            return false;
        }
        true
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .with_context(|| format!("invalid exclude glob pattern: {pattern}"))?;
        builder.add(glob);
    }
    let set = builder
        .build()
        .context("failed to build exclude glob set")?;
    Ok(set)
}
