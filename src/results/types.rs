//! Result type definitions

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Ordered items returned by a single provider invocation
pub type ProviderResult = Vec<Item>;

/// Sentinel `event_time` for items that are not events
pub const NO_EVENT: i64 = 0;

/// A normalized search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Content fingerprint of the provider's unique token
    pub id: String,
    /// Content bucket the item belongs to
    pub provider_group_id: String,
    /// Coarse start time in epoch seconds, `NO_EVENT` when not applicable
    pub event_time: i64,
    /// Human-readable title
    pub text: String,
    /// Canonical URL or URI
    pub link: String,
    /// Rendering treatment downstream
    pub media_kind: MediaKind,
    /// Thumbnail or cover URL, empty when unavailable
    pub image: String,
    /// Duration in seconds, 0 when unknown
    pub duration_seconds: i64,
}

impl Item {
    /// Create a new item, deriving the id from `token`
    pub fn new(
        token: &str,
        provider_group_id: impl Into<String>,
        media_kind: MediaKind,
        text: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            id: item_id(token),
            provider_group_id: provider_group_id.into(),
            event_time: NO_EVENT,
            text: text.into(),
            link: link.into(),
            media_kind,
            image: String::new(),
            duration_seconds: 0,
        }
    }

    /// Set the thumbnail URL
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the duration
    pub fn with_duration(mut self, seconds: i64) -> Self {
        self.duration_seconds = seconds.max(0);
        self
    }

    /// Set the event start time
    pub fn with_event_time(mut self, event_time: i64) -> Self {
        self.event_time = event_time;
        self
    }
}

/// Media treatment tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
    Event,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Event => "event",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable id for a provider token: lowercase hex MD5
pub fn item_id(token: &str) -> String {
    format!("{:x}", md5::compute(token.as_bytes()))
}

/// Epoch seconds of `time`, truncated to the minute
pub fn event_precision(time: NaiveDateTime) -> i64 {
    let secs = time.and_utc().timestamp();
    secs - secs.rem_euclid(60)
}
