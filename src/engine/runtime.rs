// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::Result;

use super::core::DevServerCore;
use super::ServerEvent;

/// Async shell around [`DevServerCore`]: reads [`ServerEvent`]s from a
/// channel and feeds them to the core one at a time, so source processing
/// and invalidation sweeps never interleave.
pub struct Runtime {
    core: DevServerCore,
    event_rx: mpsc::Receiver<ServerEvent>,
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl Runtime {
    pub fn new(core: DevServerCore, event_rx: mpsc::Receiver<ServerEvent>) -> Self {
        Self { core, event_rx }
    }

    /// Main event loop.
    pub async fn run(mut self) -> Result<()> {
        info!("globreload dev server started");

        loop {
            if self.core.options().exit_when_idle && self.event_rx.is_empty() {
                info!("no pending events; exiting");
                break;
            }

            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("server event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            let step = self.core.step(event);
            if !step.processed.is_empty() {
                debug!(processed = ?step.processed, "modules processed");
            }

            if !step.keep_running {
                info!("shutdown requested; stopping runtime");
                break;
            }
        }

        info!("runtime exiting");
        Ok(())
    }
}
