use std::sync::Arc;

use globreload::errors::Result;
use globreload::glob::{GlobTracker, InvalidationListener, WatchSet};
use globreload::graph::{ModuleGraph, ModuleRecord};
use globreload::logging::InfoLogger;
use globreload::types::ServerLogLevel;
use globreload::watch::{StructuralEvent, StructuralEventKind};
use globreload_test_utils::fakes::{CountingGraph, FailingLogger, RecordingLogger};
use globreload_test_utils::init_tracing;

const GLOB: &str = "export default import.meta.glob('./*.js');";

fn tracked(ids: &[&str]) -> (GlobTracker, WatchSet) {
    let set = WatchSet::new();
    let tracker = GlobTracker::with_watch_set("import.meta.glob", set.clone());
    for id in ids {
        tracker.record(id, GLOB);
    }
    (tracker, set)
}

fn listener(
    set: &WatchSet,
    graph: &Arc<CountingGraph>,
    logger: Arc<dyn InfoLogger>,
    level: ServerLogLevel,
) -> InvalidationListener {
    InvalidationListener::new(
        set.clone(),
        Arc::clone(graph) as Arc<dyn ModuleGraph>,
        logger,
        "/project",
        level,
    )
}

fn event(kind: StructuralEventKind) -> StructuralEvent {
    StructuralEvent::new(kind, "/project/src/pages/new.js")
}

#[test]
fn sweep_invalidates_exactly_the_tracked_modules_present_in_the_graph() {
    init_tracing();
    let (_tracker, set) = tracked(&["/project/a.js", "/project/b.js", "/project/c.js"]);
    let graph = Arc::new(CountingGraph::with_modules(&["/project/a.js", "/project/c.js"]));
    let logger = RecordingLogger::new();
    let listener = listener(&set, &graph, Arc::new(logger.clone()), ServerLogLevel::Info);

    let report = listener.on_structural_change(&event(StructuralEventKind::EntryAdded));

    assert_eq!(report.invalidated, vec!["/project/a.js", "/project/c.js"]);
    assert_eq!(report.skipped, vec!["/project/b.js"]);
    assert!(report.failed.is_empty());

    assert_eq!(graph.invalidations(), vec!["/project/a.js", "/project/c.js"]);
    assert!(graph.is_stale("/project/a.js"));
    assert!(graph.is_stale("/project/c.js"));
}

#[test]
fn every_structural_kind_triggers_the_same_sweep() {
    let mut reports = Vec::new();
    let mut invalidations = Vec::new();

    for kind in StructuralEventKind::ALL {
        let (_tracker, set) = tracked(&["/project/a.js", "/project/b.js"]);
        let graph = Arc::new(CountingGraph::with_modules(&["/project/a.js"]));
        let listener = listener(
            &set,
            &graph,
            Arc::new(RecordingLogger::new()),
            ServerLogLevel::Info,
        );

        reports.push(listener.on_structural_change(&event(kind)));
        invalidations.push(graph.invalidations());
    }

    assert!(reports.windows(2).all(|w| w[0] == w[1]));
    assert!(invalidations.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(invalidations[0], vec!["/project/a.js"]);
}

#[test]
fn empty_watch_set_makes_no_graph_or_log_calls() {
    let (_tracker, set) = tracked(&[]);
    let graph = Arc::new(CountingGraph::with_modules(&["/project/a.js"]));
    let logger = RecordingLogger::new();
    let listener = listener(&set, &graph, Arc::new(logger.clone()), ServerLogLevel::Info);

    let report = listener.on_structural_change(&event(StructuralEventKind::DirectoryRemoved));

    assert!(report.is_empty());
    assert!(graph.lookups().is_empty());
    assert_eq!(graph.call_count(), 0);
    assert_eq!(logger.count(), 0);
}

#[test]
fn info_lines_are_gated_by_server_log_level() {
    let ids = ["/project/a.js", "/project/b.js", "/project/c.js"];

    for level in [ServerLogLevel::Silent, ServerLogLevel::Error, ServerLogLevel::Warn] {
        let (_tracker, set) = tracked(&ids);
        let graph = Arc::new(CountingGraph::with_modules(&ids));
        let logger = RecordingLogger::new();
        let listener = listener(&set, &graph, Arc::new(logger.clone()), level);

        let report = listener.sweep();
        assert_eq!(report.invalidated.len(), 3);
        assert_eq!(logger.count(), 0, "level {level:?} must not log");
    }

    let (_tracker, set) = tracked(&ids);
    let graph = Arc::new(CountingGraph::with_modules(&ids));
    let logger = RecordingLogger::new();
    let listener = listener(&set, &graph, Arc::new(logger.clone()), ServerLogLevel::Info);

    listener.sweep();
    assert_eq!(
        logger.lines(),
        vec![
            "force invalidated a.js",
            "force invalidated b.js",
            "force invalidated c.js",
        ]
    );
    assert!(logger.options().iter().all(|o| o.timestamp));
}

#[test]
fn modules_outside_the_root_are_logged_verbatim() {
    let (_tracker, set) = tracked(&["/elsewhere/lib.js", "\0virtual:pages"]);
    let graph = Arc::new(CountingGraph::with_modules(&["/elsewhere/lib.js", "\0virtual:pages"]));
    let logger = RecordingLogger::new();
    let listener = listener(&set, &graph, Arc::new(logger.clone()), ServerLogLevel::Info);

    listener.sweep();

    let mut lines = logger.lines();
    lines.sort();
    assert_eq!(
        lines,
        vec![
            "force invalidated \0virtual:pages".to_string(),
            "force invalidated /elsewhere/lib.js".to_string(),
        ]
    );
}

#[test]
fn a_failed_invalidation_does_not_stop_the_sweep() {
    let ids = ["/project/a.js", "/project/b.js", "/project/c.js"];
    let (_tracker, set) = tracked(&ids);
    let graph = Arc::new(CountingGraph::with_modules(&ids));
    graph.fail_on("/project/b.js");
    let logger = RecordingLogger::new();
    let listener = listener(&set, &graph, Arc::new(logger.clone()), ServerLogLevel::Info);

    let report = listener.sweep();

    assert_eq!(report.invalidated, vec!["/project/a.js", "/project/c.js"]);
    assert_eq!(report.failed, vec!["/project/b.js"]);
    assert_eq!(graph.invalidations().len(), 3);
    // Only successful invalidations are announced.
    assert_eq!(logger.count(), 2);
}

#[test]
fn a_failing_logger_does_not_stop_the_sweep() {
    let ids = ["/project/a.js", "/project/b.js"];
    let (_tracker, set) = tracked(&ids);
    let graph = Arc::new(CountingGraph::with_modules(&ids));
    let logger = FailingLogger::new();
    let listener = listener(&set, &graph, Arc::new(logger.clone()), ServerLogLevel::Info);

    let report = listener.sweep();

    assert_eq!(report.invalidated.len(), 2);
    assert_eq!(logger.calls(), 2);
    assert!(graph.is_stale("/project/a.js"));
    assert!(graph.is_stale("/project/b.js"));
}

#[test]
fn repeated_events_invalidate_again_without_error() {
    let (_tracker, set) = tracked(&["/project/a.js"]);
    let graph = Arc::new(CountingGraph::with_modules(&["/project/a.js"]));
    let listener = listener(
        &set,
        &graph,
        Arc::new(RecordingLogger::new()),
        ServerLogLevel::Info,
    );

    for _ in 0..3 {
        let report = listener.on_structural_change(&event(StructuralEventKind::EntryRemoved));
        assert_eq!(report.invalidated, vec!["/project/a.js"]);
    }
    assert_eq!(graph.invalidations().len(), 3);
}

/// Graph that rewrites the watch set while it is being swept.
struct MutatingGraph {
    inner: CountingGraph,
    tracker: GlobTracker,
}

impl ModuleGraph for MutatingGraph {
    fn module_by_id(&self, id: &str) -> Option<ModuleRecord> {
        if id == "/project/a.js" {
            self.tracker.record("/project/b.js", "no glob here");
            self.tracker.record("/project/z.js", GLOB);
        }
        self.inner.module_by_id(id)
    }

    fn invalidate_module(&self, module: &ModuleRecord) -> Result<()> {
        self.inner.invalidate_module(module)
    }
}

#[test]
fn tracker_updates_during_a_sweep_are_tolerated() {
    let ids = ["/project/a.js", "/project/b.js"];
    let (tracker, set) = tracked(&ids);
    let graph = Arc::new(MutatingGraph {
        inner: CountingGraph::with_modules(&["/project/a.js", "/project/b.js", "/project/z.js"]),
        tracker: tracker.clone(),
    });
    let listener = InvalidationListener::new(
        set.clone(),
        graph.clone() as Arc<dyn ModuleGraph>,
        Arc::new(RecordingLogger::new()),
        "/project",
        ServerLogLevel::Info,
    );

    let report = listener.sweep();

    // The sweep works on the membership it started with.
    assert_eq!(report.invalidated, vec!["/project/a.js", "/project/b.js"]);
    assert_eq!(
        set.snapshot(),
        vec!["/project/a.js".to_string(), "/project/z.js".to_string()]
    );

    // The next event sees the updated membership.
    let report = listener.sweep();
    assert_eq!(report.invalidated, vec!["/project/a.js", "/project/z.js"]);
}
