// src/watch/classify.rs

//! Mapping of raw `notify` events onto [`WatchEvent`]s.

use std::path::Path;

use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Event, EventKind};

use crate::fs::FileSystem;
use crate::watch::events::{StructuralEvent, StructuralEventKind, WatchEvent};

/// Classify one `notify` event.
///
/// - create/remove with a known file or folder kind map directly;
/// - create with an unknown kind is resolved by checking the path on disk;
/// - remove with an unknown kind becomes `EntryRemoved` (the path is gone);
/// - renames become a removal of the old path and/or an addition of the new;
/// - in-place data changes become [`WatchEvent::Changed`];
/// - access and metadata events are ignored.
pub fn classify(event: &Event, fs: &dyn FileSystem) -> Vec<WatchEvent> {
    use StructuralEventKind::*;

    let paths = event.paths.iter();
    match event.kind {
        EventKind::Create(CreateKind::File) => structural_all(EntryAdded, paths),
        EventKind::Create(CreateKind::Folder) => structural_all(DirectoryAdded, paths),
        EventKind::Create(_) => paths.map(|p| added(p, fs)).collect(),

        EventKind::Remove(RemoveKind::Folder) => structural_all(DirectoryRemoved, paths),
        EventKind::Remove(_) => structural_all(EntryRemoved, paths),

        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
            structural_all(EntryRemoved, paths)
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
            paths.map(|p| added(p, fs)).collect()
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            let mut out = Vec::with_capacity(2);
            if let Some(from) = event.paths.first() {
                out.push(structural(EntryRemoved, from));
            }
            if let Some(to) = event.paths.get(1) {
                out.push(added(to, fs));
            }
            out
        }
        // Backends that cannot tell which side of a rename a path is on.
        EventKind::Modify(ModifyKind::Name(_)) => paths
            .map(|p| {
                if fs.exists(p) {
                    added(p, fs)
                } else {
                    structural(EntryRemoved, p)
                }
            })
            .collect(),

        EventKind::Modify(ModifyKind::Metadata(_)) => Vec::new(),
        EventKind::Modify(_) => paths
            .map(|p| WatchEvent::Changed(p.to_path_buf()))
            .collect(),

        EventKind::Access(_) | EventKind::Any | EventKind::Other => Vec::new(),
    }
}

fn structural(kind: StructuralEventKind, path: &Path) -> WatchEvent {
    WatchEvent::Structural(StructuralEvent::new(kind, path))
}

fn structural_all<'a>(
    kind: StructuralEventKind,
    paths: impl Iterator<Item = &'a std::path::PathBuf>,
) -> Vec<WatchEvent> {
    paths.map(|p| structural(kind, p)).collect()
}

fn added(path: &Path, fs: &dyn FileSystem) -> WatchEvent {
    if fs.is_dir(path) {
        structural(StructuralEventKind::DirectoryAdded, path)
    } else {
        structural(StructuralEventKind::EntryAdded, path)
    }
}
