#![allow(dead_code)]

use std::path::PathBuf;

use globreload::config::{ConfigFile, RawConfigFile};
use globreload::types::ServerLogLevel;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn root(mut self, root: &str) -> Self {
        self.config.server.root = PathBuf::from(root);
        self
    }

    pub fn log_level(mut self, level: ServerLogLevel) -> Self {
        self.config.server.log_level = level;
        self
    }

    pub fn entry(mut self, entry: &str) -> Self {
        self.config.server.entries.push(entry.to_string());
        self
    }

    pub fn rewarm(mut self, val: bool) -> Self {
        self.config.server.rewarm = val;
        self
    }

    pub fn marker(mut self, marker: &str) -> Self {
        self.config.glob.marker = marker.to_string();
        self
    }

    pub fn exclude(mut self, pattern: &str) -> Self {
        self.config.watch.exclude.push(pattern.to_string());
        self
    }

    pub fn no_excludes(mut self) -> Self {
        self.config.watch.exclude.clear();
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
