//! Fail-soft adapter running a `Provider` over HTTP

use super::traits::{Provider, RequestParams, SearchSource};
use crate::error::ProviderError;
use crate::metrics::Metrics;
use crate::network::HttpClient;
use crate::results::{Item, ProviderResult};
use crate::search::SearchQuery;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Adapter that turns a [`Provider`] into an infallible [`SearchSource`]
pub struct HttpSource {
    provider: Arc<dyn Provider>,
    client: HttpClient,
    metrics: Option<Arc<Metrics>>,
}

impl HttpSource {
    pub fn new(provider: Arc<dyn Provider>, client: HttpClient) -> Self {
        Self {
            provider,
            client,
            metrics: None,
        }
    }

    /// Record outcomes into `metrics`
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    async fn try_search(&self, params: &RequestParams) -> anyhow::Result<Vec<Item>> {
        let request = self.provider.request(params)?;
        let response = self.client.execute(request).await?;

        if !response.is_success() {
            return Err(ProviderError::Http(response.status).into());
        }

        let mut items = self.provider.response(response)?;
        if let Some(max) = self.provider.max_results() {
            items.truncate(max);
        }

        Ok(self.provider.enrich(&self.client, items).await)
    }
}

#[async_trait]
impl SearchSource for HttpSource {
    fn name(&self) -> &str {
        self.provider.name()
    }

    async fn search(&self, query: &SearchQuery) -> ProviderResult {
        let name = self.provider.name();
        let start = Instant::now();
        if let Some(ref metrics) = self.metrics {
            metrics.record_provider_search(name);
        }

        let params = RequestParams::from(query);
        let outcome = self.try_search(&params).await;
        let elapsed = start.elapsed();

        match outcome {
            Ok(items) => {
                debug!(
                    "Provider {} returned {} items matching '{}' in {:?}",
                    name,
                    items.len(),
                    query.query,
                    elapsed
                );
                if let Some(ref metrics) = self.metrics {
                    metrics.record_success(name);
                    metrics.record_response_time(name, elapsed.as_millis() as u64);
                }
                items
            }
            Err(e) => {
                warn!("Search on provider {} failed: {}", name, e);
                if let Some(ref metrics) = self.metrics {
                    metrics.record_error(name);
                }
                Vec::new()
            }
        }
    }
}
