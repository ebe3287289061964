// src/watch/events.rs

use std::fmt;
use std::path::PathBuf;

/// Kinds of filesystem events that change the *shape* of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralEventKind {
    EntryAdded,
    DirectoryAdded,
    EntryRemoved,
    DirectoryRemoved,
}

impl StructuralEventKind {
    pub const ALL: [StructuralEventKind; 4] = [
        StructuralEventKind::EntryAdded,
        StructuralEventKind::DirectoryAdded,
        StructuralEventKind::EntryRemoved,
        StructuralEventKind::DirectoryRemoved,
    ];

    pub fn is_removal(self) -> bool {
        matches!(
            self,
            StructuralEventKind::EntryRemoved | StructuralEventKind::DirectoryRemoved
        )
    }
}

impl fmt::Display for StructuralEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StructuralEventKind::EntryAdded => "entry-added",
            StructuralEventKind::DirectoryAdded => "directory-added",
            StructuralEventKind::EntryRemoved => "entry-removed",
            StructuralEventKind::DirectoryRemoved => "directory-removed",
        };
        f.write_str(s)
    }
}

/// A file or directory was created or deleted at `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralEvent {
    pub kind: StructuralEventKind,
    pub path: PathBuf,
}

impl StructuralEvent {
    pub fn new(kind: StructuralEventKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// Classified watcher output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    Structural(StructuralEvent),
    /// A file's contents changed in place.
    Changed(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &std::path::Path {
        match self {
            WatchEvent::Structural(ev) => &ev.path,
            WatchEvent::Changed(path) => path,
        }
    }
}
