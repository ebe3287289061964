// src/glob/tracker.rs

use tracing::debug;

use crate::config::DEFAULT_GLOB_MARKER;
use crate::glob::watch_set::WatchSet;

/// Keeps the [`WatchSet`] in line with the latest source of every module.
///
/// A module is tracked iff the most recent source recorded for it contains
/// the glob marker. Recording is idempotent and last-write-wins, so a module
/// that drops its glob import stops being tracked on its next update.
#[derive(Debug, Clone)]
pub struct GlobTracker {
    set: WatchSet,
    marker: String,
}

impl Default for GlobTracker {
    fn default() -> Self {
        Self::new(DEFAULT_GLOB_MARKER)
    }
}

impl GlobTracker {
    /// Tracker over a fresh, empty set.
    pub fn new(marker: impl Into<String>) -> Self {
        Self::with_watch_set(marker, WatchSet::new())
    }

    pub fn with_watch_set(marker: impl Into<String>, set: WatchSet) -> Self {
        Self {
            set,
            marker: marker.into(),
        }
    }

    /// Update membership for `id` from its just-processed `source`.
    ///
    /// An absent source is passed as `""`, which untracks the id. Returns
    /// whether `id` is tracked afterwards.
    pub fn record(&self, id: &str, source: &str) -> bool {
        if source.contains(self.marker.as_str()) {
            if self.set.insert(id) {
                debug!(id, "tracking glob-importing module");
            }
            true
        } else {
            if self.set.remove(id) {
                debug!(id, "module no longer uses glob imports; untracked");
            }
            false
        }
    }

    /// Stop tracking `id` regardless of its source, e.g. when its file is
    /// deleted.
    pub fn forget(&self, id: &str) -> bool {
        let removed = self.set.remove(id);
        if removed {
            debug!(id, "forgot glob-importing module");
        }
        removed
    }

    pub fn is_tracked(&self, id: &str) -> bool {
        self.set.contains(id)
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Shared handle to the underlying set, for wiring up the listener.
    pub fn watch_set(&self) -> &WatchSet {
        &self.set
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.set.snapshot()
    }
}
