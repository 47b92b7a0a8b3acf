//! Profile substring lookup
//!
//! A thin delegation to a [`ProfileStore`]; store failures are logged and
//! reported as an empty list.

use crate::results::SearchResults;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tracing::warn;

/// A stored profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub pid: String,
    pub name: String,
    pub bio: String,
    pub url: String,
    pub image: String,
}

/// Persistence collaborator for profiles
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Profiles whose pid or name contains `substring`
    async fn find_by_substring(&self, substring: &str) -> anyhow::Result<Vec<Profile>>;
}

/// In-memory profile store, matching case-insensitively
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<Vec<Profile>>,
}

impl MemoryProfileStore {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: RwLock::new(profiles),
        }
    }

    /// Add a profile
    pub fn insert(&self, profile: Profile) {
        self.profiles
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(profile);
    }

    pub fn len(&self) -> usize {
        self.profiles.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn find_by_substring(&self, substring: &str) -> anyhow::Result<Vec<Profile>> {
        let needle = substring.to_lowercase();
        let profiles = self
            .profiles
            .read()
            .map_err(|_| anyhow::anyhow!("profile store lock poisoned"))?;

        Ok(profiles
            .iter()
            .filter(|p| {
                p.pid.to_lowercase().contains(&needle) || p.name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }
}

/// Profile lookup capability
#[derive(Clone)]
pub struct ProfileSearch {
    store: Arc<dyn ProfileStore>,
}

impl ProfileSearch {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Profiles matching `substring`; empty on any store failure
    pub async fn search(&self, substring: &str) -> SearchResults<Vec<Profile>> {
        match self.store.find_by_substring(substring).await {
            Ok(profiles) => SearchResults::new(profiles),
            Err(e) => {
                warn!("Profile lookup for '{}' failed: {}", substring, e);
                SearchResults::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(pid: &str, name: &str) -> Profile {
        Profile {
            pid: pid.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn store() -> Arc<MemoryProfileStore> {
        Arc::new(MemoryProfileStore::new(vec![
            profile("milesd", "Miles Davis"),
            profile("coltrane", "John Coltrane"),
            profile("bird", "Charlie Parker"),
        ]))
    }

    struct FailingStore;

    #[async_trait]
    impl ProfileStore for FailingStore {
        async fn find_by_substring(&self, _substring: &str) -> anyhow::Result<Vec<Profile>> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_matches_pid_and_name() {
        let search = ProfileSearch::new(store());

        let by_name = search.search("DAVIS").await;
        assert_eq!(by_name.results, vec![profile("milesd", "Miles Davis")]);

        let by_pid = search.search("bir").await;
        assert_eq!(by_pid.len(), 1);
        assert_eq!(by_pid.results[0].pid, "bird");
    }

    #[tokio::test]
    async fn test_preserves_store_order() {
        let search = ProfileSearch::new(store());
        let pids: Vec<_> = search
            .search("r")
            .await
            .results
            .into_iter()
            .map(|p| p.pid)
            .collect();
        assert_eq!(pids, vec!["coltrane", "bird"]);
    }

    #[tokio::test]
    async fn test_store_failure_is_swallowed() {
        let search = ProfileSearch::new(Arc::new(FailingStore));
        assert!(search.search("miles").await.is_empty());
    }

    #[test]
    fn test_insert() {
        let store = MemoryProfileStore::default();
        assert!(store.is_empty());
        store.insert(profile("monk", "Thelonious Monk"));
        assert_eq!(store.len(), 1);

        let found = tokio_test::block_on(store.find_by_substring("monk")).unwrap();
        assert_eq!(found.len(), 1);
    }
}
