//! Application state shared across handlers

use crate::config::Settings;
use crate::metrics::Metrics;
use crate::network::HttpClient;
use crate::profiles::{MemoryProfileStore, ProfileSearch};
use crate::providers::ProviderLoader;
use crate::search::Aggregator;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Loaded settings
    pub settings: Arc<Settings>,
    /// Multiplexed media search
    pub aggregator: Arc<Aggregator>,
    /// Profile lookup
    pub profiles: ProfileSearch,
    /// Provider metrics
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Wire providers, the aggregator and the profile store from settings
    pub fn new(settings: Settings, client: HttpClient) -> Self {
        let metrics = Arc::new(Metrics::new());
        let registry = ProviderLoader::load(&settings, &client, metrics.clone());
        let aggregator = Aggregator::from_settings(&settings, &registry).with_metrics(metrics.clone());
        let store = Arc::new(MemoryProfileStore::new(settings.profiles.clone()));

        Self::from_parts(settings, aggregator, ProfileSearch::new(store), metrics)
    }

    /// Assemble state from prebuilt components
    pub fn from_parts(
        settings: Settings,
        aggregator: Aggregator,
        profiles: ProfileSearch,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            aggregator: Arc::new(aggregator),
            profiles,
            metrics,
        }
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
