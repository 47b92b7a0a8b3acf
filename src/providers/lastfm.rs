//! Last.fm cover-art lookup used to enrich audio items

use super::images::{best_image, LASTFM_SIZES};
use super::traits::ProviderRequest;
use crate::config::ArtworkSettings;
use crate::error::ProviderError;
use crate::network::HttpClient;
use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_BASE_URL: &str = "http://ws.audioscrobbler.com/2.0/";

/// Album-art resolver backed by `track.getInfo`
pub struct LastfmArtwork {
    base_url: String,
    api_key: String,
    image_path: PathBuf,
}

impl LastfmArtwork {
    pub fn new(api_key: impl Into<String>, image_path: impl Into<PathBuf>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            image_path: image_path.into(),
        }
    }

    /// Build from settings; `None` when no API key is configured
    pub fn from_settings(settings: &ArtworkSettings) -> Option<Self> {
        let key = settings.lastfm_api_key.as_deref()?;
        let mut artwork = Self::new(key, settings.image_path.clone());
        if let Some(ref url) = settings.lastfm_base_url {
            artwork.base_url = url.clone();
        }
        Some(artwork)
    }

    /// Resolve a cover for a track.
    ///
    /// A previously stored `<item_id>.png` under the image directory wins and
    /// its file name is returned; otherwise the best album image URL. Returns
    /// an empty string when the track has no album art.
    pub async fn lookup(
        &self,
        client: &HttpClient,
        track: &str,
        artist: &str,
        item_id: &str,
    ) -> Result<String> {
        let filename = format!("{}.png", item_id);
        if tokio::fs::metadata(self.image_path.join(&filename)).await.is_ok() {
            return Ok(filename);
        }

        let request = ProviderRequest::get(&self.base_url)
            .param("method", "track.getInfo")
            .param("api_key", &self.api_key)
            .param("track", track)
            .param("artist", artist)
            .param("format", "json");

        let response = client.execute(request).await?;
        if !response.is_success() {
            return Err(ProviderError::Http(response.status).into());
        }

        let info: TrackInfoResponse = response.json()?;
        let images = info
            .track
            .and_then(|t| t.album)
            .map(|a| a.image)
            .unwrap_or_default();

        Ok(best_image(
            images.iter().map(|i| (i.size.as_str(), i.url.as_str())),
            LASTFM_SIZES,
        )
        .unwrap_or_default()
        .to_string())
    }
}

#[derive(Debug, Deserialize)]
struct TrackInfoResponse {
    track: Option<TrackInfo>,
}

#[derive(Debug, Deserialize)]
struct TrackInfo {
    album: Option<Album>,
}

#[derive(Debug, Deserialize)]
struct Album {
    #[serde(default)]
    image: Vec<AlbumImage>,
}

#[derive(Debug, Deserialize)]
struct AlbumImage {
    #[serde(rename = "#text", default)]
    url: String,
    #[serde(default)]
    size: String,
}
