// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod glob;
pub mod graph;
pub mod logging;
pub mod pipeline;
pub mod plugin;
pub mod server;
pub mod types;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{default_config_path, load_and_validate, ConfigFile};
use crate::engine::{DevServerCore, Runtime, RuntimeOptions, ServerEvent};
use crate::fs::{FileSystem, RealFileSystem};
use crate::glob::GlobTracker;
use crate::graph::{InMemoryModuleGraph, ModuleGraph};
use crate::logging::{InfoLogger, TracingLogger};
use crate::pipeline::SourcePipeline;
use crate::plugin::{resolve_plugins, Plugin};
use crate::server::ServerContext;
use crate::types::Mode;
use crate::watch::path_utils::short_name;
use crate::watch::{ExcludeFilter, WatcherHub};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - plugin resolution and `configure_server`
/// - module graph / pipeline / runtime
/// - (optional) file watcher
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_config(&config_path)?;

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let root = resolve_root(&config_path, &cfg, args.root.as_deref(), fs.as_ref())?;

    let tracker = GlobTracker::new(cfg.glob.marker.clone());
    let plugins = resolve_plugins(Mode::Serve, &tracker, Vec::new(), Vec::new(), Vec::new());

    if args.dry_run {
        print_dry_run(&cfg, &root, &plugins);
        return Ok(());
    }

    let graph = Arc::new(InMemoryModuleGraph::new());
    let hub = Arc::new(WatcherHub::new());
    let logger: Arc<dyn InfoLogger> = Arc::new(TracingLogger);

    let ctx = ServerContext {
        config: cfg.clone(),
        root: root.clone(),
        graph: Arc::clone(&graph) as Arc<dyn ModuleGraph>,
        hub: Arc::clone(&hub),
        logger,
    };
    for plugin in plugins.iter() {
        plugin
            .configure_server(&ctx)
            .with_context(|| format!("plugin '{}' failed in configure_server", plugin.name()))?;
    }

    let pipeline = SourcePipeline::new(plugins, Arc::clone(&fs), Arc::clone(&graph));

    let (server_tx, server_rx) = mpsc::channel::<ServerEvent>(256);

    // Optional file watcher (disabled in --once mode).
    let _watcher_handle = if !args.once {
        let exclude = ExcludeFilter::from_config(&cfg)?;
        Some(crate::watch::spawn_watcher(
            root.clone(),
            exclude,
            Arc::clone(&fs),
            server_tx.clone(),
        )?)
    } else {
        None
    };

    // Ctrl-C → graceful shutdown.
    {
        let tx = server_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(ServerEvent::ShutdownRequested).await;
        });
    }

    info!(entries = ?cfg.server.entries, "requesting entry modules");
    for entry in cfg.server.entries.iter() {
        server_tx
            .send(ServerEvent::Request { id: entry.clone() })
            .await?;
    }

    let options = RuntimeOptions {
        exit_when_idle: args.once,
        rewarm: cfg.server.rewarm,
    };

    let core = DevServerCore::new(pipeline, hub, tracker.clone(), root.clone(), options);
    let runtime = Runtime::new(core, server_rx);
    runtime.run().await?;

    if args.once {
        print_tracked(&tracker, &root);
    }

    Ok(())
}

/// Load `path`, falling back to built-in defaults when the *default* config
/// file is absent. An explicitly given path must exist.
fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() && path == default_config_path() {
        debug!(?path, "no config file found; using defaults");
        return Ok(ConfigFile::default());
    }
    let cfg = load_and_validate(path)
        .with_context(|| format!("loading config {:?}", path))?;
    Ok(cfg)
}

/// Absolute project root.
///
/// `--root` wins over `[server].root`; a relative `[server].root` is taken
/// relative to the config file's directory.
fn resolve_root(
    config_path: &Path,
    cfg: &ConfigFile,
    cli_root: Option<&str>,
    fs: &dyn FileSystem,
) -> Result<PathBuf> {
    let root = match cli_root {
        Some(r) => PathBuf::from(r),
        None if cfg.server.root.is_absolute() => cfg.server.root.clone(),
        None => config_root_dir(config_path).join(&cfg.server.root),
    };
    fs.canonicalize(&root)
        .with_context(|| format!("project root {:?} is not accessible", root))
}

/// Directory of the config file, or the current working directory for a bare
/// filename like `GlobReload.toml`.
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

fn print_dry_run(cfg: &ConfigFile, root: &Path, plugins: &[Arc<dyn Plugin>]) {
    println!("globreload dry-run");
    println!("  root = {}", root.display());
    println!("  server.log_level = {:?}", cfg.server.log_level);
    println!("  server.rewarm = {}", cfg.server.rewarm);
    println!("  glob.marker = {:?}", cfg.glob.marker);
    println!("  watch.exclude = {:?}", cfg.watch.exclude);
    println!();

    println!("entries ({}):", cfg.server.entries.len());
    for entry in cfg.server.entries.iter() {
        println!("  - {entry}");
    }
    println!();

    println!("plugins ({}):", plugins.len());
    for plugin in plugins.iter() {
        println!("  - {}", plugin.name());
    }

    debug!("dry-run complete (nothing served)");
}

fn print_tracked(tracker: &GlobTracker, root: &Path) {
    let tracked = tracker.snapshot();
    println!("glob-importing modules ({}):", tracked.len());
    for id in tracked.iter() {
        println!("  - {}", short_name(id, root));
    }
}
