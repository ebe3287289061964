// src/watch/hub.rs

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::watch::events::{StructuralEvent, StructuralEventKind};

pub type EventHandler = Arc<dyn Fn(&StructuralEvent) + Send + Sync>;

/// Per-kind subscriber lists for structural events.
///
/// Handlers run in subscription order, outside the hub's lock, so a handler
/// may subscribe further handlers without deadlocking.
#[derive(Default)]
pub struct WatcherHub {
    handlers: Mutex<HashMap<StructuralEventKind, Vec<EventHandler>>>,
}

impl fmt::Debug for WatcherHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<StructuralEventKind, usize> = self
            .lock()
            .iter()
            .map(|(kind, handlers)| (*kind, handlers.len()))
            .collect();
        f.debug_struct("WatcherHub").field("handlers", &counts).finish()
    }
}

impl WatcherHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<StructuralEventKind, Vec<EventHandler>>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe<F>(&self, kind: StructuralEventKind, handler: F)
    where
        F: Fn(&StructuralEvent) + Send + Sync + 'static,
    {
        self.subscribe_shared(kind, Arc::new(handler));
    }

    pub fn subscribe_shared(&self, kind: StructuralEventKind, handler: EventHandler) {
        self.lock().entry(kind).or_default().push(handler);
    }

    /// Number of handlers subscribed to `kind`.
    pub fn handler_count(&self, kind: StructuralEventKind) -> usize {
        self.lock().get(&kind).map_or(0, Vec::len)
    }

    /// Deliver `event` to every handler subscribed to its kind. Returns the
    /// number of handlers called.
    pub fn emit(&self, event: &StructuralEvent) -> usize {
        let handlers: Vec<EventHandler> = match self.lock().get(&event.kind) {
            Some(handlers) => handlers.clone(),
            None => return 0,
        };

        trace!(kind = %event.kind, count = handlers.len(), "dispatching structural event");
        for handler in handlers.iter() {
            handler(event);
        }
        handlers.len()
    }
}
