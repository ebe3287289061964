// src/config/validate.rs

use globset::Glob;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{GlobReloadError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::GlobReloadError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.server, raw.glob, raw.watch))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_glob_marker(cfg)?;
    validate_entries(cfg)?;
    validate_exclude_patterns(cfg)?;
    Ok(())
}

fn validate_glob_marker(cfg: &RawConfigFile) -> Result<()> {
    if cfg.glob.marker.trim().is_empty() {
        return Err(GlobReloadError::ConfigError(
            "[glob].marker must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_entries(cfg: &RawConfigFile) -> Result<()> {
    for (idx, entry) in cfg.server.entries.iter().enumerate() {
        if entry.trim().is_empty() {
            return Err(GlobReloadError::ConfigError(format!(
                "[server].entries[{idx}] must not be empty"
            )));
        }
    }
    Ok(())
}

fn validate_exclude_patterns(cfg: &RawConfigFile) -> Result<()> {
    for pattern in cfg.watch.exclude.iter() {
        Glob::new(pattern).map_err(|e| {
            GlobReloadError::ConfigError(format!(
                "invalid [watch].exclude pattern '{pattern}': {e}"
            ))
        })?;
    }
    Ok(())
}
