// src/glob/watch_set.rs

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Set of module ids whose latest processed source used a glob import.
///
/// Cloning yields another handle to the same set. The tracker writes through
/// one handle, the invalidation listener reads through another. The lock is
/// only held for a single mutation or snapshot copy.
#[derive(Debug, Clone, Default)]
pub struct WatchSet {
    ids: Arc<Mutex<HashSet<String>>>,
}

impl WatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    // Set membership is valid after any partial operation, so a poisoned
    // lock is recovered rather than propagated.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns true if `id` was not already present.
    pub fn insert(&self, id: &str) -> bool {
        let mut ids = self.lock();
        if ids.contains(id) {
            return false;
        }
        ids.insert(id.to_string())
    }

    /// Returns true if `id` was present.
    pub fn remove(&self, id: &str) -> bool {
        self.lock().remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current membership, sorted.
    pub fn snapshot(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.lock().iter().cloned().collect();
        ids.sort();
        ids
    }
}
