// src/plugin/resolve.rs

use std::sync::Arc;

use tracing::debug;

use crate::glob::{GlobReload, GlobTracker};
use crate::plugin::Plugin;
use crate::types::Mode;

/// Assemble the final plugin order.
///
/// User plugins keep their `pre`, `normal`, `post` grouping. Internal
/// server-only plugins always come after everything else and are left out
/// entirely for builds.
pub fn resolve_plugins(
    mode: Mode,
    tracker: &GlobTracker,
    pre: Vec<Arc<dyn Plugin>>,
    normal: Vec<Arc<dyn Plugin>>,
    post: Vec<Arc<dyn Plugin>>,
) -> Vec<Arc<dyn Plugin>> {
    let mut plugins: Vec<Arc<dyn Plugin>> = Vec::with_capacity(pre.len() + normal.len() + post.len() + 1);
    plugins.extend(pre);
    plugins.extend(normal);
    plugins.extend(post);

    if mode == Mode::Serve {
        plugins.push(Arc::new(GlobReload::new(tracker.clone())));
    }

    let names: Vec<&str> = plugins.iter().map(|p| p.name()).collect();
    debug!(?mode, ?names, "resolved plugin order");

    plugins
}
