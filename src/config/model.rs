// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::ServerLogLevel;

/// Substring that marks a module as using dynamic glob imports.
///
/// Also matches `import.meta.globEager`.
pub const DEFAULT_GLOB_MARKER: &str = "import.meta.glob";

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [server]
/// root = "."
/// log_level = "info"
/// entries = ["src/main.js"]
///
/// [glob]
/// marker = "import.meta.glob"
///
/// [watch]
/// exclude = ["**/node_modules/**"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub glob: GlobSection,

    #[serde(default)]
    pub watch: WatchSection,
}

/// Validated configuration.
///
/// Only constructed through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// [`ConfigFile::default`].
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub server: ServerSection,
    pub glob: GlobSection,
    pub watch: WatchSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        server: ServerSection,
        glob: GlobSection,
        watch: WatchSection,
    ) -> Self {
        Self {
            server,
            glob,
            watch,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        let raw = RawConfigFile::default();
        Self::new_unchecked(raw.server, raw.glob, raw.watch)
    }
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    /// Project root. Relative paths are resolved against the directory that
    /// contains the config file.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Verbosity of user-facing server messages.
    #[serde(default)]
    pub log_level: ServerLogLevel,

    /// Modules (root-relative paths) requested at startup.
    #[serde(default)]
    pub entries: Vec<String>,

    /// Re-process invalidated modules right after a structural change instead
    /// of waiting for the next request.
    #[serde(default = "default_rewarm")]
    pub rewarm: bool,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_rewarm() -> bool {
    true
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            log_level: ServerLogLevel::default(),
            entries: Vec::new(),
            rewarm: default_rewarm(),
        }
    }
}

/// `[glob]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct GlobSection {
    #[serde(default = "default_marker")]
    pub marker: String,
}

fn default_marker() -> String {
    DEFAULT_GLOB_MARKER.to_string()
}

impl Default for GlobSection {
    fn default() -> Self {
        Self {
            marker: default_marker(),
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Root-relative globs whose filesystem events are ignored.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

fn default_exclude() -> Vec<String> {
    vec!["**/node_modules/**".to_string(), "**/.git/**".to_string()]
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            exclude: default_exclude(),
        }
    }
}
