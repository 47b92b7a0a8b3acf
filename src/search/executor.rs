//! Multiplexed search execution

use super::merge::round_robin;
use super::models::{SearchMode, SearchQuery};
use super::modes::ModeTable;
use crate::config::Settings;
use crate::metrics::Metrics;
use crate::providers::{ProviderRegistry, SearchSource};
use crate::results::{Item, ProviderResult, SearchResults};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

/// Runs a mode's sources concurrently under one deadline and interleaves
/// whatever arrived in time
pub struct Aggregator {
    modes: ModeTable,
    timeout: Duration,
    metrics: Option<Arc<Metrics>>,
}

impl Aggregator {
    /// Create a new aggregator
    pub fn new(modes: ModeTable, timeout: Duration) -> Self {
        Self {
            modes,
            timeout,
            metrics: None,
        }
    }

    /// Build the mode table and deadline from settings
    pub fn from_settings(settings: &Settings, registry: &ProviderRegistry) -> Self {
        Self::new(
            ModeTable::from_settings(&settings.search.modes, registry),
            Duration::from_millis(settings.search.timeout_ms),
        )
    }

    /// Record searches and deadline misses into `metrics`
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Aggregation deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Mode table in use
    pub fn modes(&self) -> &ModeTable {
        &self.modes
    }

    /// Search the sources configured for `query.mode`
    pub async fn search(&self, query: &SearchQuery) -> SearchResults<Vec<Item>> {
        let sources = self.modes.sources(query.mode);
        self.multiplexed_search(sources, query).await
    }

    /// Search every media provider
    pub async fn item_search(&self, query: &str, pid: Option<&str>) -> SearchResults<Vec<Item>> {
        self.search(&Self::query(query, pid, SearchMode::All)).await
    }

    /// Search video providers only
    pub async fn video_search(&self, query: &str, pid: Option<&str>) -> SearchResults<Vec<Item>> {
        self.search(&Self::query(query, pid, SearchMode::Video)).await
    }

    /// Search audio providers only
    pub async fn audio_search(&self, query: &str, pid: Option<&str>) -> SearchResults<Vec<Item>> {
        self.search(&Self::query(query, pid, SearchMode::Audio)).await
    }

    /// Search event providers only
    pub async fn event_search(&self, query: &str, pid: Option<&str>) -> SearchResults<Vec<Item>> {
        self.search(&Self::query(query, pid, SearchMode::Event)).await
    }

    fn query(query: &str, pid: Option<&str>, mode: SearchMode) -> SearchQuery {
        let search_query = SearchQuery::new(query).with_mode(mode);
        match pid {
            Some(pid) => search_query.with_pid(pid),
            None => search_query,
        }
    }

    /// Run `sources` concurrently and interleave their results.
    ///
    /// Each source runs in its own task and reports through a single-slot
    /// channel. Collection stops when every source has reported or the
    /// deadline passes, whichever is first; late results are dropped and
    /// their tasks left to finish on their own. Output order depends only
    /// on the order of `sources` and each source's own ranking.
    pub async fn multiplexed_search(
        &self,
        sources: &[Arc<dyn SearchSource>],
        query: &SearchQuery,
    ) -> SearchResults<Vec<Item>> {
        if let Some(ref metrics) = self.metrics {
            metrics.inc_search();
        }

        if sources.is_empty() || query.is_empty() {
            return SearchResults::empty();
        }

        let deadline = Instant::now() + self.timeout;
        let shared_query = Arc::new(query.clone());

        info!(
            "Executing {} search '{}' on {} providers",
            query.mode,
            query.query,
            sources.len()
        );

        let mut pending: FuturesUnordered<_> = sources
            .iter()
            .enumerate()
            .map(|(index, source)| {
                let (tx, rx) = oneshot::channel::<ProviderResult>();
                let source = Arc::clone(source);
                let query = Arc::clone(&shared_query);

                tokio::spawn(async move {
                    let items = source.search(&query).await;
                    // Receiver is gone once the deadline has passed
                    let _ = tx.send(items);
                });

                async move { (index, rx.await) }
            })
            .collect();

        let mut slots: Vec<Option<ProviderResult>> = vec![None; sources.len()];

        let collection = async {
            while let Some((index, received)) = pending.next().await {
                match received {
                    Ok(items) => slots[index] = Some(items),
                    Err(_) => warn!("Provider {} stopped without reporting", sources[index].name()),
                }
            }
        };

        if timeout_at(deadline, collection).await.is_err() {
            for (slot, source) in slots.iter().zip(sources) {
                if slot.is_none() {
                    debug!("Search timed out waiting for {}", source.name());
                    if let Some(ref metrics) = self.metrics {
                        metrics.record_timeout(source.name());
                    }
                }
            }
        }

        SearchResults::new(round_robin(slots.into_iter().flatten().collect()))
    }
}
