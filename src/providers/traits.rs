//! Provider traits and request/response types

use crate::error::ProviderError;
use crate::network::HttpClient;
use crate::results::{Item, MediaKind, ProviderResult};
use crate::search::SearchQuery;
use async_trait::async_trait;
use std::collections::HashMap;

/// Parameters handed to a provider when building its request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParams {
    /// Search query string
    pub query: String,
    /// Profile scope forwarded from the caller
    pub pid: Option<String>,
}

impl RequestParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            pid: None,
        }
    }
}

impl From<&SearchQuery> for RequestParams {
    fn from(query: &SearchQuery) -> Self {
        Self {
            query: query.query.clone(),
            pid: query.pid.clone(),
        }
    }
}

/// GET request to be made for a provider
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// URL to request
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: HashMap<String, String>,
}

impl ProviderRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            params: HashMap::new(),
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// HTTP response from a provider request
#[derive(Debug)]
pub struct ProviderResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl ProviderResponse {
    /// Parse response as JSON; a malformed body is a [`ProviderError::Parse`]
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, ProviderError> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// An external media service that can be searched over HTTP
///
/// Implementations only translate: build the request, parse the body into
/// [`Item`]s. Transport, error absorption and result capping are handled
/// by [`HttpSource`](super::HttpSource).
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name, used in mode tables and logs
    fn name(&self) -> &str;

    /// Media kind stamped on every item
    fn media_kind(&self) -> MediaKind;

    /// Maximum number of items kept from one response
    fn max_results(&self) -> Option<usize> {
        None
    }

    /// Build the HTTP request for a search
    fn request(&self, params: &RequestParams) -> anyhow::Result<ProviderRequest>;

    /// Parse the HTTP response into items
    fn response(&self, response: ProviderResponse) -> anyhow::Result<Vec<Item>>;

    /// Auxiliary lookups run after parsing. Must not fail.
    async fn enrich(&self, _client: &HttpClient, items: Vec<Item>) -> Vec<Item> {
        items
    }
}

/// Uniform search capability consumed by the aggregator
///
/// `search` is infallible: any failure is reduced to an empty list.
#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Source name
    fn name(&self) -> &str;

    /// Run one search
    async fn search(&self, query: &SearchQuery) -> ProviderResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = ProviderRequest::get("http://example.com/search")
            .param("q", "miles davis")
            .header("Accept", "text/html");

        assert_eq!(request.params.get("q").map(String::as_str), Some("miles davis"));
        assert_eq!(request.headers.len(), 1);
    }

    #[test]
    fn test_params_from_query() {
        let query = SearchQuery::new("jazz").with_pid("alice");
        let params = RequestParams::from(&query);
        assert_eq!(params.query, "jazz");
        assert_eq!(params.pid.as_deref(), Some("alice"));
    }

    #[test]
    fn test_response_status() {
        let response = ProviderResponse {
            status: 204,
            headers: HashMap::new(),
            text: String::new(),
            url: String::new(),
        };
        assert!(response.is_success());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let response = ProviderResponse {
            status: 200,
            headers: HashMap::new(),
            text: "<html>not json</html>".to_string(),
            url: String::new(),
        };
        let err = response.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }
}
