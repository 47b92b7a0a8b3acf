//! Provider loader for initializing sources from configuration

use super::eventful::Eventful;
use super::lastfm::LastfmArtwork;
use super::registry::ProviderRegistry;
use super::source::HttpSource;
use super::spotify::Spotify;
use super::traits::Provider;
use super::youtube::YouTube;
use crate::config::{ProviderConfig, Settings};
use crate::metrics::Metrics;
use crate::network::HttpClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Loader for initializing providers from configuration
pub struct ProviderLoader;

impl ProviderLoader {
    /// Build a registry with every enabled provider
    pub fn load(settings: &Settings, client: &HttpClient, metrics: Arc<Metrics>) -> ProviderRegistry {
        let mut registry = ProviderRegistry::new();
        let providers = &settings.providers;

        let candidates: Vec<(&ProviderConfig, Arc<dyn Provider>)> = vec![
            (
                &providers.youtube,
                Arc::new(YouTube::from_config(&providers.youtube)) as Arc<dyn Provider>,
            ),
            (
                &providers.eventful,
                Arc::new(Eventful::from_config(&providers.eventful)) as Arc<dyn Provider>,
            ),
            (
                &providers.spotify,
                Arc::new(Self::spotify(settings)) as Arc<dyn Provider>,
            ),
        ];

        for (config, provider) in candidates {
            if config.disabled {
                info!("Skipping disabled provider: {}", provider.name());
                continue;
            }
            info!(
                "Loaded provider: {} ({}, pid {})",
                provider.name(),
                provider.media_kind(),
                config.pid
            );
            let source = HttpSource::new(provider, client.clone()).with_metrics(metrics.clone());
            registry.register(Arc::new(source));
        }

        info!("Loaded {} providers", registry.len());
        registry
    }

    fn spotify(settings: &Settings) -> Spotify {
        let spotify = Spotify::from_config(&settings.providers.spotify)
            .with_cover_ttl(Duration::from_secs(settings.artwork.cache_ttl.max(1)));
        match LastfmArtwork::from_settings(&settings.artwork) {
            Some(artwork) => spotify.with_artwork(artwork),
            None => spotify,
        }
    }
}
