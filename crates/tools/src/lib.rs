//! Shared setup for the command-line drivers.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use dungeon_core::{RaceCatalog, SessionConfig};
use tracing::Level;

/// Installs a plain stderr subscriber. `-v` enables debug, `-vv` trace.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_writer(io::stderr).init();
}

pub fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    match path {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display())),
        None => Ok(SessionConfig::default()),
    }
}

pub fn load_catalog(path: Option<&Path>) -> Result<RaceCatalog> {
    let Some(path) = path else {
        return Ok(RaceCatalog::builtin());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read race file: {}", path.display()))?;
    RaceCatalog::from_toml_str(&text)
        .with_context(|| format!("Invalid race file: {}", path.display()))
}
