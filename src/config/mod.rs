//! Configuration module for mediamux
//!
//! Handles loading settings from YAML files and environment variables.
//! Settings are passed explicitly to every component at startup.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_VAR: &str = "MEDIAMUX_SETTINGS_PATH";

/// First settings file that exists: `MEDIAMUX_SETTINGS_PATH`, then the
/// default locations
pub fn locate() -> Option<PathBuf> {
    std::env::var(SETTINGS_PATH_VAR)
        .ok()
        .map(PathBuf::from)
        .into_iter()
        .chain(default_paths())
        .find(|path| path.exists())
}

/// Load settings from `path`, or defaults when there is none, then apply
/// environment overrides
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    settings.merge_env();
    Ok(settings)
}

fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/mediamux/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("mediamux/settings.yml"));
    }
    paths
}
