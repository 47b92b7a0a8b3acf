//! Spotify track search provider
//!
//! The search API carries no artwork, so covers are scraped from the public
//! track page, falling back to Last.fm when configured.

use super::lastfm::LastfmArtwork;
use super::traits::*;
use crate::config::ProviderConfig;
use crate::network::HttpClient;
use crate::results::{Item, MediaKind};
use anyhow::Result as AnyhowResult;
use async_trait::async_trait;
use futures::future::join_all;
use moka::future::Cache;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "http://ws.spotify.com/search/1/track.json";
const DEFAULT_PAGE_URL: &str = "http://open.spotify.com/track";
const TRACK_URI_PREFIX: &str = "spotify:track:";
const MIN_TRACK_URI_LEN: usize = 36;

/// Tracks kept from one search
pub const MAX_TRACKS: usize = 16;

static COVER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""(https?://o\.scdn\.co/300/[A-Za-z0-9]+)""#).unwrap());

/// Spotify track search
pub struct Spotify {
    base_url: String,
    page_url: String,
    pid: String,
    max_results: usize,
    covers: Cache<String, String>,
    artwork: Option<LastfmArtwork>,
}

impl Spotify {
    pub fn new(pid: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_url: DEFAULT_PAGE_URL.to_string(),
            pid: pid.into(),
            max_results: MAX_TRACKS,
            covers: Cache::builder()
                .time_to_live(Duration::from_secs(3600))
                .max_capacity(10_000)
                .build(),
            artwork: None,
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        let mut spotify = Self::new(config.pid.clone());
        if let Some(ref url) = config.base_url {
            spotify.base_url = url.clone();
        }
        if let Some(ref url) = config.page_url {
            spotify.page_url = url.clone();
        }
        if let Some(max) = config.max_results {
            spotify.max_results = max;
        }
        spotify
    }

    /// Fall back to Last.fm for covers the track page does not yield
    pub fn with_artwork(mut self, artwork: LastfmArtwork) -> Self {
        self.artwork = Some(artwork);
        self
    }

    /// Lifetime of memoised track-page covers
    pub fn with_cover_ttl(mut self, ttl: Duration) -> Self {
        self.covers = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(10_000)
            .build();
        self
    }

    /// Public page for a `spotify:track:<id>` URI
    fn track_page_url(&self, uri: &str) -> Option<String> {
        if uri.len() < MIN_TRACK_URI_LEN {
            return None;
        }
        let hash = uri.strip_prefix(TRACK_URI_PREFIX)?;
        Some(format!("{}/{}", self.page_url.trim_end_matches('/'), hash))
    }

    async fn scrape_cover(&self, client: &HttpClient, uri: &str) -> String {
        let page_url = match self.track_page_url(uri) {
            Some(url) => url,
            None => return String::new(),
        };

        if let Some(cover) = self.covers.get(uri).await {
            return cover;
        }

        let page = match client.get_page(&page_url).await {
            Ok(page) if page.is_success() => page,
            Ok(page) => {
                warn!("Fetch of spotify page {} got status {}", page_url, page.status);
                return String::new();
            }
            Err(e) => {
                warn!("Fetch of spotify page {} failed: {}", page_url, e);
                return String::new();
            }
        };

        let cover = extract_cover(&page.text).unwrap_or_default();
        if !cover.is_empty() {
            self.covers.insert(uri.to_string(), cover.clone()).await;
        }
        cover
    }

    async fn cover_for(&self, client: &HttpClient, item: &Item) -> String {
        let cover = self.scrape_cover(client, &item.link).await;
        if !cover.is_empty() {
            return cover;
        }

        let (artwork, (track, artist)) = match (&self.artwork, split_track_text(&item.text)) {
            (Some(artwork), Some(parts)) => (artwork, parts),
            _ => return cover,
        };

        match artwork.lookup(client, track, artist, &item.id).await {
            Ok(url) => url,
            Err(e) => {
                warn!("Last.fm lookup for {} / {} failed: {}", track, artist, e);
                String::new()
            }
        }
    }
}

/// First 300px cover URL embedded in a track page
fn extract_cover(html: &str) -> Option<String> {
    COVER_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Display text for a track
fn track_text(track: &str, artist: &str) -> String {
    format!("{} / {}", track, artist)
}

/// Inverse of `track_text`; the artist is whatever follows the last separator
fn split_track_text(text: &str) -> Option<(&str, &str)> {
    text.rsplit_once(" / ")
}

#[async_trait]
impl Provider for Spotify {
    fn name(&self) -> &str {
        "spotify"
    }

    fn media_kind(&self) -> MediaKind {
        MediaKind::Audio
    }

    fn max_results(&self) -> Option<usize> {
        Some(self.max_results)
    }

    fn request(&self, params: &RequestParams) -> AnyhowResult<ProviderRequest> {
        Ok(ProviderRequest::get(&self.base_url)
            .param("q", &params.query)
            .param("page", "1"))
    }

    fn response(&self, response: ProviderResponse) -> AnyhowResult<Vec<Item>> {
        let body: TrackSearch = response.json()?;
        debug!("Received {} tracks from spotify", body.tracks.len());

        Ok(body
            .tracks
            .into_iter()
            .filter_map(|track| {
                let artist = track.artists.first()?.name.clone();
                Some(
                    Item::new(
                        &track.href,
                        &self.pid,
                        self.media_kind(),
                        track_text(&track.name, &artist),
                        track.href.clone(),
                    )
                    .with_duration(track.length as i64),
                )
            })
            .collect())
    }

    async fn enrich(&self, client: &HttpClient, items: Vec<Item>) -> Vec<Item> {
        let covers = join_all(items.iter().map(|item| self.cover_for(client, item))).await;

        items
            .into_iter()
            .zip(covers)
            .map(|(item, cover)| item.with_image(cover))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct TrackSearch {
    #[serde(default)]
    tracks: Vec<Track>,
}

#[derive(Debug, Deserialize)]
struct Track {
    name: String,
    href: String,
    #[serde(default)]
    length: f64,
    #[serde(default)]
    artists: Vec<Artist>,
}

#[derive(Debug, Deserialize)]
struct Artist {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArtworkSettings;
    use crate::providers::{HttpSource, SearchSource};
    use crate::results::item_id;
    use crate::search::SearchQuery;
    use std::collections::HashMap;
    use std::sync::Arc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const URI_A: &str = "spotify:track:24H5KPBdSvHQMRXTp12K3J";
    const URI_B: &str = "spotify:track:0000000000000000000000";

    fn track(name: &str, uri: &str, artists: &[&str]) -> serde_json::Value {
        let artists: Vec<_> = artists
            .iter()
            .map(|a| serde_json::json!({ "name": a }))
            .collect();
        serde_json::json!({ "name": name, "href": uri, "length": 212.7, "artists": artists })
    }

    fn response(body: serde_json::Value) -> ProviderResponse {
        ProviderResponse {
            status: 200,
            headers: HashMap::new(),
            text: body.to_string(),
            url: String::new(),
        }
    }

    #[test]
    fn test_response_skips_tracks_without_artist() {
        let spotify = Spotify::new("sp");
        let body = serde_json::json!({
            "tracks": [
                track("So What", URI_A, &["Miles Davis", "John Coltrane"]),
                track("Untitled", URI_B, &[]),
            ]
        });
        let items = spotify.response(response(body)).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "So What / Miles Davis");
        assert_eq!(items[0].link, URI_A);
        assert_eq!(items[0].id, item_id(URI_A));
        assert_eq!(items[0].duration_seconds, 212);
        assert_eq!(items[0].media_kind, MediaKind::Audio);
    }

    #[test]
    fn test_track_page_url() {
        let spotify = Spotify::new("sp");
        assert_eq!(
            spotify.track_page_url(URI_A).as_deref(),
            Some("http://open.spotify.com/track/24H5KPBdSvHQMRXTp12K3J")
        );
        assert!(spotify.track_page_url("spotify:track:short").is_none());
    }

    #[test]
    fn test_extract_cover() {
        let html = r#"<meta content="http://o.scdn.co/300/abc123DEF"><img src="http://o.scdn.co/300/zzz">"#;
        assert_eq!(extract_cover(html).as_deref(), Some("http://o.scdn.co/300/abc123DEF"));
        assert!(extract_cover("<html></html>").is_none());
    }

    #[test]
    fn test_split_track_text() {
        let text = track_text("A / B Side", "Artist");
        assert_eq!(split_track_text(&text), Some(("A / B Side", "Artist")));
    }

    #[tokio::test]
    async fn test_search_caps_and_scrapes_covers() {
        let server = MockServer::start().await;
        let tracks: Vec<_> = (0..20)
            .map(|i| track(&format!("Track {}", i), &format!("spotify:track:{:022}", i), &["Band"]))
            .collect();
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "band"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "tracks": tracks })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/track/{:022}", 0)))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"<x content="http://o.scdn.co/300/cover0">"#),
            )
            .mount(&server)
            .await;

        let config = ProviderConfig {
            base_url: Some(format!("{}/search", server.uri())),
            page_url: Some(format!("{}/track", server.uri())),
            ..ProviderConfig::with_pid("sp")
        };
        let source = HttpSource::new(
            Arc::new(Spotify::from_config(&config)),
            HttpClient::new().unwrap(),
        );
        let items = source.search(&SearchQuery::new("band")).await;

        assert_eq!(items.len(), MAX_TRACKS);
        assert_eq!(items[0].image, "http://o.scdn.co/300/cover0");
        assert!(items[1..].iter().all(|i| i.image.is_empty()));
    }

    #[tokio::test]
    async fn test_lastfm_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/track/24H5KPBdSvHQMRXTp12K3J"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/lastfm"))
            .and(query_param("track", "So What"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "track": { "album": { "image": [ { "#text": "http://lfm/mega.png", "size": "mega" } ] } }
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let artwork = LastfmArtwork::from_settings(&ArtworkSettings {
            lastfm_api_key: Some("key".into()),
            lastfm_base_url: Some(format!("{}/lastfm", server.uri())),
            image_path: dir.path().to_path_buf(),
            cache_ttl: 60,
        })
        .unwrap();

        let config = ProviderConfig {
            page_url: Some(format!("{}/track", server.uri())),
            ..ProviderConfig::with_pid("sp")
        };
        let spotify = Spotify::from_config(&config).with_artwork(artwork);
        let client = HttpClient::new().unwrap();
        let item = Item::new(URI_A, "sp", MediaKind::Audio, "So What / Miles Davis", URI_A);

        let enriched = spotify.enrich(&client, vec![item]).await;
        assert_eq!(enriched[0].image, "http://lfm/mega.png");
    }

    #[tokio::test]
    async fn test_cover_failure_leaves_image_empty() {
        let spotify = Spotify::from_config(&ProviderConfig {
            page_url: Some("http://127.0.0.1:1/track".into()),
            ..ProviderConfig::with_pid("sp")
        });
        let client = HttpClient::new().unwrap();
        let item = Item::new(URI_A, "sp", MediaKind::Audio, "So What / Miles Davis", URI_A);

        let enriched = spotify.enrich(&client, vec![item]).await;
        assert_eq!(enriched.len(), 1);
        assert!(enriched[0].image.is_empty());
    }
}
