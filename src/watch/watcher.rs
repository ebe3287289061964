// src/watch/watcher.rs

use std::path::PathBuf;
use std::sync::Arc;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::ServerEvent;
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::watch::classify::classify;
use crate::watch::patterns::ExcludeFilter;

/// Handle for the filesystem watcher.
///
/// Keeps the underlying `RecommendedWatcher` alive. Dropping this handle will
/// stop file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a filesystem watcher that observes `root` recursively and forwards
/// classified events as [`ServerEvent`]s.
///
/// - `root` is the absolute project root.
/// - `exclude` drops events for matching root-relative paths.
/// - `fs` is used to tell files from directories on ambiguous events.
/// - `server_tx` is the channel into the dev server runtime.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    exclude: ExcludeFilter,
    fs: Arc<dyn FileSystem>,
    server_tx: mpsc::Sender<ServerEvent>,
) -> Result<WatcherHandle> {
    let root = root.into();

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    eprintln!("globreload: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("globreload: file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;

    info!("file watcher started on {:?}", root);

    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            debug!(?event, "received notify event");

            for watch_event in classify(&event, fs.as_ref()) {
                if !exclude.should_forward(&root, watch_event.path()) {
                    continue;
                }

                if server_tx.send(ServerEvent::from(watch_event)).await.is_err() {
                    debug!("server event channel closed; stopping watcher loop");
                    return;
                }
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle { _inner: watcher })
}
