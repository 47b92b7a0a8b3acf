//! YouTube video search provider (JSON feed API)

use super::de::{decode_records, null_default};
use super::images::{best_image, YOUTUBE_THUMBNAILS};
use super::traits::*;
use crate::config::ProviderConfig;
use crate::results::{Item, MediaKind};
use anyhow::Result as AnyhowResult;
use serde::{Deserialize, Deserializer};

const DEFAULT_BASE_URL: &str = "https://gdata.youtube.com/feeds/api/videos";

/// YouTube video search
pub struct YouTube {
    base_url: String,
    pid: String,
}

impl YouTube {
    pub fn new(pid: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            pid: pid.into(),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        let mut youtube = Self::new(config.pid.clone());
        if let Some(ref url) = config.base_url {
            youtube.base_url = url.clone();
        }
        youtube
    }

    fn to_item(&self, entry: Entry) -> Item {
        let link = entry
            .links
            .iter()
            .find(|l| l.rel == "self")
            .map(|l| l.href.clone())
            .unwrap_or_default();

        let image = best_image(
            entry
                .media
                .thumbnails
                .iter()
                .map(|t| (t.name.as_str(), t.url.as_str())),
            YOUTUBE_THUMBNAILS,
        )
        .unwrap_or_default()
        .to_string();

        let duration = entry.media.duration.map(|d| d.seconds).unwrap_or(0);

        Item::new(&entry.id.value, &self.pid, self.media_kind(), entry.title.value, link)
            .with_image(image)
            .with_duration(duration)
    }
}

impl Provider for YouTube {
    fn name(&self) -> &str {
        "youtube"
    }

    fn media_kind(&self) -> MediaKind {
        MediaKind::Video
    }

    fn request(&self, params: &RequestParams) -> AnyhowResult<ProviderRequest> {
        Ok(ProviderRequest::get(&self.base_url)
            .param("q", &params.query)
            .param("alt", "json")
            .param("v", "2"))
    }

    fn response(&self, response: ProviderResponse) -> AnyhowResult<Vec<Item>> {
        let body: FeedResponse = response.json()?;
        let records = body.feed.map(|f| f.entries).unwrap_or_default();
        let entries: Vec<Entry> = decode_records(self.name(), records);

        Ok(entries.into_iter().map(|e| self.to_item(e)).collect())
    }
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    feed: Option<Feed>,
}

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "entry", default, deserialize_with = "null_default")]
    entries: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    id: TextNode,
    #[serde(default, deserialize_with = "null_default")]
    title: TextNode,
    #[serde(rename = "link", default)]
    links: Vec<Link>,
    #[serde(rename = "media$group", default, deserialize_with = "null_default")]
    media: MediaGroup,
}

#[derive(Debug, Default, Deserialize)]
struct TextNode {
    #[serde(rename = "$t", default, deserialize_with = "null_default")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct Link {
    #[serde(default)]
    rel: String,
    #[serde(default)]
    href: String,
}

#[derive(Debug, Default, Deserialize)]
struct MediaGroup {
    #[serde(rename = "media$thumbnail", default)]
    thumbnails: Vec<Thumbnail>,
    #[serde(rename = "yt$duration")]
    duration: Option<Duration>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    #[serde(default, deserialize_with = "null_default")]
    url: String,
    #[serde(rename = "yt$name", default, deserialize_with = "null_default")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct Duration {
    #[serde(deserialize_with = "lenient_seconds")]
    seconds: i64,
}

/// The feed encodes seconds as a string; accept numbers too
fn lenient_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => Ok(n.as_f64().unwrap_or(0.0) as i64),
        serde_json::Value::String(s) => Ok(s.trim().parse().unwrap_or(0)),
        _ => Ok(0),
    }
}
