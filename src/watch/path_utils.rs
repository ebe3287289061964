// src/watch/path_utils.rs

//! Path helpers shared by the watcher, the engine and log formatting.

use std::path::Path;

/// Forward-slash string form of `path`.
pub fn slash_str(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Module id for a file on disk: its path with forward slashes.
///
/// Relative `raw` ids (e.g. config entries) are joined onto `root`.
pub fn module_id_for_path(root: &Path, raw: &Path) -> String {
    if raw.is_absolute() {
        slash_str(raw)
    } else {
        slash_str(&root.join(raw))
    }
}

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// A direct `strip_prefix(root)` is tried first. If that fails (e.g. due to
/// symlinks such as macOS' `/private/var`), both paths are canonicalized and
/// the strip is retried. Paths that no longer exist (removals) can only take
/// the first route.
///
/// Returns `None` if the path cannot be related to `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    if let Ok(rel) = path.strip_prefix(root) {
        return Some(slash_str(rel));
    }

    if let (Ok(root_canon), Ok(path_canon)) = (root.canonicalize(), path.canonicalize()) {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            return Some(slash_str(rel));
        }
    }

    None
}

/// Display name for a module id in log lines.
///
/// Ids strictly below `root` are shown relative to it; anything else
/// (virtual ids, files outside the root, the root itself) is shown verbatim.
pub fn short_name(id: &str, root: &Path) -> String {
    let root = slash_str(root);
    let root = root.trim_end_matches('/');
    match id.strip_prefix(root).and_then(|rest| rest.strip_prefix('/')) {
        Some(rel) if !rel.is_empty() => rel.to_string(),
        _ => id.to_string(),
    }
}
