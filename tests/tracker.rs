use globreload::glob::{GlobTracker, WatchSet};
use globreload_test_utils::init_tracing;
use proptest::prelude::*;

const WITH_GLOB: &str = "const mods = import.meta.glob('./dir/*.js');";
const WITH_GLOB_EAGER: &str = "const mods = import.meta.globEager('./dir/*.js');";
const PLAIN: &str = "import x from './x.js';";

#[test]
fn recording_same_source_twice_is_idempotent() {
    init_tracing();
    let tracker = GlobTracker::default();

    assert!(tracker.record("/app/a.js", WITH_GLOB));
    assert!(tracker.record("/app/a.js", WITH_GLOB));
    assert_eq!(tracker.snapshot(), vec!["/app/a.js".to_string()]);

    assert!(!tracker.record("/app/b.js", PLAIN));
    assert!(!tracker.record("/app/b.js", PLAIN));
    assert!(!tracker.is_tracked("/app/b.js"));
    assert_eq!(tracker.len(), 1);
}

#[test]
fn dropping_the_glob_import_untracks_the_module() {
    let tracker = GlobTracker::default();

    tracker.record("/app/a.js", WITH_GLOB);
    assert!(tracker.is_tracked("/app/a.js"));

    tracker.record("/app/a.js", PLAIN);
    assert!(!tracker.is_tracked("/app/a.js"));
    assert!(tracker.is_empty());

    // And back again.
    tracker.record("/app/a.js", WITH_GLOB);
    assert!(tracker.is_tracked("/app/a.js"));
}

#[test]
fn glob_eager_is_covered_by_the_default_marker() {
    let tracker = GlobTracker::default();
    assert!(tracker.record("virtual:pages", WITH_GLOB_EAGER));
}

#[test]
fn empty_source_counts_as_no_marker() {
    let tracker = GlobTracker::default();
    tracker.record("/app/a.js", WITH_GLOB);
    assert!(!tracker.record("/app/a.js", ""));
    assert!(!tracker.is_tracked("/app/a.js"));
}

#[test]
fn custom_marker_is_honoured() {
    let tracker = GlobTracker::new("require.context");
    assert!(!tracker.record("/app/a.js", WITH_GLOB));
    assert!(tracker.record("/app/b.js", "const ctx = require.context('./dir');"));
    assert_eq!(tracker.marker(), "require.context");
}

#[test]
fn forget_removes_regardless_of_source() {
    let tracker = GlobTracker::default();
    tracker.record("/app/a.js", WITH_GLOB);
    assert!(tracker.forget("/app/a.js"));
    assert!(!tracker.forget("/app/a.js"));
    assert!(tracker.is_empty());
}

#[test]
fn trackers_sharing_a_watch_set_see_each_others_writes() {
    let set = WatchSet::new();
    let writer = GlobTracker::with_watch_set("import.meta.glob", set.clone());

    writer.record("/app/a.js", WITH_GLOB);
    assert!(set.contains("/app/a.js"));
    assert_eq!(set.snapshot(), vec!["/app/a.js".to_string()]);

    writer.record("/app/a.js", PLAIN);
    assert!(set.is_empty());
}

proptest! {
    /// Membership after any sequence of updates depends only on the last
    /// source recorded for each id.
    #[test]
    fn membership_follows_last_write(
        updates in proptest::collection::vec((0..4usize, any::<bool>()), 0..40)
    ) {
        let tracker = GlobTracker::default();
        let mut last = std::collections::HashMap::new();

        for (idx, has_glob) in updates {
            let id = format!("/app/m{idx}.js");
            tracker.record(&id, if has_glob { WITH_GLOB } else { PLAIN });
            last.insert(id, has_glob);
        }

        for (id, has_glob) in last.iter() {
            prop_assert_eq!(tracker.is_tracked(id), *has_glob);
        }
        let expected = last.values().filter(|v| **v).count();
        prop_assert_eq!(tracker.len(), expected);
    }
}
