use std::path::{Path, PathBuf};

use globreload::config::ConfigFile;
use globreload::fs::mock::MockFileSystem;
use globreload::watch::{classify, ExcludeFilter, StructuralEvent, StructuralEventKind, WatchEvent};
use notify::event::{
    AccessKind, CreateKind, DataChange, MetadataKind, ModifyKind, RemoveKind, RenameMode,
};
use notify::{Event, EventKind};

fn structural(kind: StructuralEventKind, path: &str) -> WatchEvent {
    WatchEvent::Structural(StructuralEvent::new(kind, path))
}

fn fs_with_pages_dir() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_dir("/project/src/pages");
    fs.add_file("/project/src/pages/home.js", "export default 'home';");
    fs
}

#[test]
fn typed_creates_and_removes_map_directly() {
    let fs = MockFileSystem::new();
    let cases = [
        (EventKind::Create(CreateKind::File), StructuralEventKind::EntryAdded),
        (EventKind::Create(CreateKind::Folder), StructuralEventKind::DirectoryAdded),
        (EventKind::Remove(RemoveKind::File), StructuralEventKind::EntryRemoved),
        (EventKind::Remove(RemoveKind::Folder), StructuralEventKind::DirectoryRemoved),
    ];

    for (kind, expected) in cases {
        let event = Event::new(kind).add_path(PathBuf::from("/project/src/x"));
        assert_eq!(classify(&event, &fs), vec![structural(expected, "/project/src/x")]);
    }
}

#[test]
fn untyped_creates_are_resolved_on_disk() {
    let fs = fs_with_pages_dir();

    let dir = Event::new(EventKind::Create(CreateKind::Any))
        .add_path(PathBuf::from("/project/src/pages"));
    assert_eq!(
        classify(&dir, &fs),
        vec![structural(StructuralEventKind::DirectoryAdded, "/project/src/pages")]
    );

    let file = Event::new(EventKind::Create(CreateKind::Other))
        .add_path(PathBuf::from("/project/src/pages/home.js"));
    assert_eq!(
        classify(&file, &fs),
        vec![structural(StructuralEventKind::EntryAdded, "/project/src/pages/home.js")]
    );
}

#[test]
fn untyped_removes_become_entry_removed() {
    let fs = MockFileSystem::new();
    let event = Event::new(EventKind::Remove(RemoveKind::Any))
        .add_path(PathBuf::from("/project/src/gone"));
    assert_eq!(
        classify(&event, &fs),
        vec![structural(StructuralEventKind::EntryRemoved, "/project/src/gone")]
    );
}

#[test]
fn renames_are_a_removal_plus_an_addition() {
    let fs = fs_with_pages_dir();

    let both = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
        .add_path(PathBuf::from("/project/src/views"))
        .add_path(PathBuf::from("/project/src/pages"));
    assert_eq!(
        classify(&both, &fs),
        vec![
            structural(StructuralEventKind::EntryRemoved, "/project/src/views"),
            structural(StructuralEventKind::DirectoryAdded, "/project/src/pages"),
        ]
    );

    let from = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::From)))
        .add_path(PathBuf::from("/project/src/old.js"));
    assert_eq!(
        classify(&from, &fs),
        vec![structural(StructuralEventKind::EntryRemoved, "/project/src/old.js")]
    );

    let to = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::To)))
        .add_path(PathBuf::from("/project/src/pages/home.js"));
    assert_eq!(
        classify(&to, &fs),
        vec![structural(StructuralEventKind::EntryAdded, "/project/src/pages/home.js")]
    );

    let unknown = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Any)))
        .add_path(PathBuf::from("/project/src/pages/home.js"))
        .add_path(PathBuf::from("/project/src/pages/gone.js"));
    assert_eq!(
        classify(&unknown, &fs),
        vec![
            structural(StructuralEventKind::EntryAdded, "/project/src/pages/home.js"),
            structural(StructuralEventKind::EntryRemoved, "/project/src/pages/gone.js"),
        ]
    );
}

#[test]
fn content_changes_are_not_structural() {
    let fs = MockFileSystem::new();
    let event = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
        .add_path(PathBuf::from("/project/src/main.js"));
    assert_eq!(
        classify(&event, &fs),
        vec![WatchEvent::Changed(PathBuf::from("/project/src/main.js"))]
    );
}

#[test]
fn access_and_metadata_events_are_ignored() {
    let fs = MockFileSystem::new();
    for kind in [
        EventKind::Access(AccessKind::Any),
        EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions)),
        EventKind::Any,
        EventKind::Other,
    ] {
        let event = Event::new(kind).add_path(PathBuf::from("/project/src/main.js"));
        assert!(classify(&event, &fs).is_empty(), "{kind:?} should be ignored");
    }
}

#[test]
fn exclude_filter_matches_root_relative_paths() -> anyhow::Result<()> {
    let filter = ExcludeFilter::new(&[
        "**/node_modules/**".to_string(),
        "dist/**".to_string(),
    ])?;

    assert!(filter.is_excluded("node_modules/react/index.js"));
    assert!(filter.is_excluded("packages/a/node_modules/b/c.js"));
    assert!(filter.is_excluded("dist/bundle.js"));
    assert!(!filter.is_excluded("src/pages/home.js"));

    assert!(!ExcludeFilter::default().is_excluded("node_modules/react/index.js"));
    Ok(())
}

#[test]
fn forwarding_uses_root_relative_paths_and_default_excludes() -> anyhow::Result<()> {
    let filter = ExcludeFilter::from_config(&ConfigFile::default())?;
    let root = Path::new("/project");

    assert!(filter.should_forward(root, Path::new("/project/src/pages/home.js")));
    assert!(filter.should_forward(root, Path::new("/project/src")));
    assert!(!filter.should_forward(root, Path::new("/project/node_modules/x.js")));
    assert!(!filter.should_forward(root, Path::new("/project/packages/a/node_modules/b/c.js")));
    assert!(!filter.should_forward(root, Path::new("/project/.git/HEAD")));
    Ok(())
}

#[test]
fn paths_outside_the_root_are_never_forwarded() {
    let root = Path::new("/project");
    let filter = ExcludeFilter::default();

    assert!(!filter.should_forward(root, Path::new("/elsewhere/lib.js")));
    assert!(!filter.should_forward(root, Path::new("/project-b/src/main.js")));
    assert!(filter.should_forward(root, Path::new("/project/src/main.js")));
}

#[test]
fn invalid_exclude_globs_are_rejected() {
    assert!(ExcludeFilter::new(&["src/[".to_string()]).is_err());
}
