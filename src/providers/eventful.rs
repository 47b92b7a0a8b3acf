//! Eventful event search provider

use super::de::{decode_records, null_default};
use super::traits::*;
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::results::{event_precision, Item, MediaKind, NO_EVENT};
use anyhow::Result as AnyhowResult;
use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "http://api.eventful.com/json/events/search";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Eventful upcoming-event search
pub struct Eventful {
    base_url: String,
    app_key: Option<String>,
    pid: String,
}

impl Eventful {
    pub fn new(app_key: Option<String>, pid: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_key,
            pid: pid.into(),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        let mut eventful = Self::new(config.api_key.clone(), config.pid.clone());
        if let Some(ref url) = config.base_url {
            eventful.base_url = url.clone();
        }
        eventful
    }

    fn to_item(&self, event: Event) -> Item {
        let image = event
            .image
            .and_then(|i| i.medium)
            .map(|m| m.url)
            .unwrap_or_default();

        let (event_time, duration) = event_window(&event.start_time, event.stop_time.as_deref());

        Item::new(&event.id, &self.pid, self.media_kind(), event.title, event.url)
            .with_image(image)
            .with_event_time(event_time)
            .with_duration(duration)
    }
}

/// Coarse start time and duration of an event.
///
/// An unparseable start yields `(NO_EVENT, 0)`; a missing or unparseable
/// stop yields a zero duration.
fn event_window(start: &str, stop: Option<&str>) -> (i64, i64) {
    let start = match NaiveDateTime::parse_from_str(start, TIME_FORMAT) {
        Ok(t) => t,
        Err(_) => return (NO_EVENT, 0),
    };

    let duration = stop
        .and_then(|s| NaiveDateTime::parse_from_str(s, TIME_FORMAT).ok())
        .map(|stop| (stop - start).num_seconds())
        .unwrap_or(0);

    (event_precision(start), duration)
}

impl Provider for Eventful {
    fn name(&self) -> &str {
        "eventful"
    }

    fn media_kind(&self) -> MediaKind {
        MediaKind::Event
    }

    fn request(&self, params: &RequestParams) -> AnyhowResult<ProviderRequest> {
        let app_key = self
            .app_key
            .as_deref()
            .ok_or_else(|| ProviderError::Config("eventful app key missing".into()))?;

        Ok(ProviderRequest::get(&self.base_url)
            .param("app_key", app_key)
            .param("keywords", &params.query)
            .param("date", "Future"))
    }

    fn response(&self, response: ProviderResponse) -> AnyhowResult<Vec<Item>> {
        let body: SearchResponse = response.json()?;
        let records = body.events.map(|e| e.event.into_vec()).unwrap_or_default();
        let events: Vec<Event> = decode_records(self.name(), records);

        debug!("Received {} events from eventful", events.len());
        Ok(events.into_iter().map(|e| self.to_item(e)).collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    events: Option<Events>,
}

#[derive(Debug, Deserialize)]
struct Events {
    event: OneOrMany<serde_json::Value>,
}

/// A single match is returned as an object rather than a one-element list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(v) => v,
            Self::One(t) => vec![t],
        }
    }
}

#[derive(Debug, Deserialize)]
struct Event {
    id: String,
    #[serde(default, deserialize_with = "null_default")]
    title: String,
    #[serde(default, deserialize_with = "null_default")]
    url: String,
    #[serde(default, deserialize_with = "null_default")]
    start_time: String,
    #[serde(default)]
    stop_time: Option<String>,
    #[serde(default)]
    image: Option<EventImage>,
}

#[derive(Debug, Deserialize)]
struct EventImage {
    #[serde(default)]
    medium: Option<ImageRef>,
}

#[derive(Debug, Deserialize)]
struct ImageRef {
    #[serde(default, deserialize_with = "null_default")]
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::HttpClient;
    use crate::providers::{HttpSource, SearchSource};
    use crate::results::item_id;
    use crate::search::SearchQuery;
    use std::collections::HashMap;
    use std::sync::Arc;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn response(body: serde_json::Value) -> ProviderResponse {
        ProviderResponse {
            status: 200,
            headers: HashMap::new(),
            text: body.to_string(),
            url: String::new(),
        }
    }

    fn events() -> serde_json::Value {
        serde_json::json!({
            "events": {
                "event": [
                    {
                        "id": "E0-001-000000001-1",
                        "title": "Jazz Night",
                        "url": "http://eventful.com/events/jazz-night",
                        "start_time": "2024-05-01 20:15:42",
                        "stop_time": "2024-05-01 23:15:42",
                        "image": { "medium": { "url": "http://img/medium.jpg" } }
                    },
                    {
                        "id": "E0-001-000000002-2",
                        "title": "Open Mic",
                        "url": "http://eventful.com/events/open-mic",
                        "start_time": "sometime soon",
                        "stop_time": null,
                        "image": null
                    }
                ]
            }
        })
    }

    #[test]
    fn test_request_requires_app_key() {
        let eventful = Eventful::new(None, "ev");
        assert!(eventful.request(&RequestParams::new("jazz")).is_err());

        let eventful = Eventful::new(Some("key".into()), "ev");
        let request = eventful.request(&RequestParams::new("jazz")).unwrap();
        assert_eq!(request.params.get("keywords").map(String::as_str), Some("jazz"));
        assert_eq!(request.params.get("date").map(String::as_str), Some("Future"));
        assert_eq!(request.params.get("app_key").map(String::as_str), Some("key"));
    }

    #[test]
    fn test_eventful_response() {
        let eventful = Eventful::new(Some("key".into()), "ev");
        let items = eventful.response(response(events())).unwrap();

        assert_eq!(items.len(), 2);
        let first = &items[0];
        assert_eq!(first.id, item_id("E0-001-000000001-1"));
        assert_eq!(first.media_kind, MediaKind::Event);
        assert_eq!(first.image, "http://img/medium.jpg");
        assert_eq!(first.duration_seconds, 3 * 3600);
        let start = NaiveDateTime::parse_from_str("2024-05-01 20:15:00", TIME_FORMAT).unwrap();
        assert_eq!(first.event_time, start.and_utc().timestamp());

        let second = &items[1];
        assert_eq!(second.event_time, NO_EVENT);
        assert_eq!(second.duration_seconds, 0);
        assert_eq!(second.image, "");
    }

    #[test]
    fn test_single_event_object() {
        let body = serde_json::json!({
            "events": { "event": { "id": "E1", "title": "Solo", "start_time": "2024-01-01 10:00:00" } }
        });
        let eventful = Eventful::new(Some("key".into()), "ev");
        let items = eventful.response(response(body)).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "Solo");
    }

    #[test]
    fn test_null_fields_keep_the_event() {
        let body = serde_json::json!({
            "events": {
                "event": [
                    {
                        "id": "E1",
                        "title": "Jazz Night",
                        "start_time": "2024-05-01 20:15:42",
                        "image": { "medium": { "url": "http://img/medium.jpg" } }
                    },
                    {
                        "id": "E2",
                        "title": null,
                        "url": null,
                        "start_time": null,
                        "image": { "medium": { "width": "128" } }
                    },
                    { "title": "no id" }
                ]
            }
        });
        let eventful = Eventful::new(Some("key".into()), "ev");
        let items = eventful.response(response(body)).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].image, "http://img/medium.jpg");
        assert_eq!(items[1].id, item_id("E2"));
        assert_eq!(items[1].text, "");
        assert_eq!(items[1].image, "");
        assert_eq!(items[1].event_time, NO_EVENT);
    }

    #[test]
    fn test_no_events() {
        let eventful = Eventful::new(Some("key".into()), "ev");
        let items = eventful
            .response(response(serde_json::json!({ "events": null, "total_items": "0" })))
            .unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_event_window_without_stop() {
        let (time, duration) = event_window("2024-01-01 10:00:30", None);
        assert_eq!(time % 60, 0);
        assert_ne!(time, NO_EVENT);
        assert_eq!(duration, 0);
    }

    #[tokio::test]
    async fn test_eventful_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("keywords", "jazz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(events()))
            .mount(&server)
            .await;

        let config = ProviderConfig {
            api_key: Some("key".into()),
            base_url: Some(server.uri()),
            ..ProviderConfig::with_pid("ev")
        };
        let source = HttpSource::new(
            Arc::new(Eventful::from_config(&config)),
            HttpClient::new().unwrap(),
        );
        let items = source.search(&SearchQuery::new("jazz")).await;
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.provider_group_id == "ev"));
    }

    #[tokio::test]
    async fn test_eventful_without_key_is_empty() {
        let source = HttpSource::new(
            Arc::new(Eventful::new(None, "ev")),
            HttpClient::new().unwrap(),
        );
        assert!(source.search(&SearchQuery::new("jazz")).await.is_empty());
    }
}
