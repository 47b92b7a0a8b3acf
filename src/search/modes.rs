//! Mode table: search mode to ordered provider handles

use super::models::SearchMode;
use crate::config::ModeSettings;
use crate::providers::{ProviderRegistry, SearchSource};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Ordered source lists per search mode
#[derive(Clone, Default)]
pub struct ModeTable {
    modes: HashMap<SearchMode, Vec<Arc<dyn SearchSource>>>,
}

impl ModeTable {
    /// Create an empty table; every mode has no sources
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from configured provider names.
    ///
    /// Names with no registered source are skipped with a warning.
    pub fn from_settings(settings: &ModeSettings, registry: &ProviderRegistry) -> Self {
        let mut table = Self::new();
        let entries = [
            (SearchMode::All, &settings.all),
            (SearchMode::Video, &settings.video),
            (SearchMode::Audio, &settings.audio),
            (SearchMode::Event, &settings.event),
        ];

        for (mode, names) in entries {
            let sources = names
                .iter()
                .filter_map(|name| {
                    let source = registry.get(name).cloned();
                    if source.is_none() {
                        warn!("Mode {} references unknown provider: {}", mode, name);
                    }
                    source
                })
                .collect();
            table.set(mode, sources);
        }

        table
    }

    /// Replace the sources for a mode
    pub fn set(&mut self, mode: SearchMode, sources: Vec<Arc<dyn SearchSource>>) {
        self.modes.insert(mode, sources);
    }

    /// Sources for a mode, in interleave order
    pub fn sources(&self, mode: SearchMode) -> &[Arc<dyn SearchSource>] {
        self.modes.get(&mode).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Source names for a mode, in interleave order
    pub fn names(&self, mode: SearchMode) -> Vec<&str> {
        self.sources(mode).iter().map(|s| s.name()).collect()
    }
}
