//! Registry of available search sources

use super::traits::SearchSource;
use std::collections::HashMap;
use std::sync::Arc;

/// Search sources by name
pub struct ProviderRegistry {
    sources: HashMap<String, Arc<dyn SearchSource>>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    /// Register a source under its own name, replacing any previous one
    pub fn register(&mut self, source: Arc<dyn SearchSource>) {
        self.sources.insert(source.name().to_string(), source);
    }

    /// Get a source by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn SearchSource>> {
        self.sources.get(name)
    }

    /// Get all source names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sources.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Check if a source exists
    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    /// Get number of registered sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
