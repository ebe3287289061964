// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlobReloadError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("Plugin '{plugin}' failed to transform '{id}': {message}")]
    Transform {
        id: String,
        plugin: String,
        message: String,
    },

    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GlobReloadError>;
