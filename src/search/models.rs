//! Search query and mode models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named search mode selecting a fixed subset of providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Every media provider
    #[default]
    All,
    Video,
    Audio,
    Event,
}

impl SearchMode {
    /// Every mode, in display order
    pub const ALL: [SearchMode; 4] = [Self::All, Self::Video, Self::Audio, Self::Event];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised mode name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search mode: {0}")]
pub struct UnknownMode(pub String);

impl FromStr for SearchMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "items" => Ok(Self::All),
            "video" | "videos" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            "event" | "events" => Ok(Self::Event),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// A search request: query text, mode and profile scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The search query string
    pub query: String,
    /// Which provider subset to use
    #[serde(default)]
    pub mode: SearchMode,
    /// Profile scope, forwarded to providers
    #[serde(default)]
    pub pid: Option<String>,
}

impl SearchQuery {
    /// Query across all providers with no profile scope
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            mode: SearchMode::All,
            pid: None,
        }
    }

    /// Set mode
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set profile scope
    pub fn with_pid(mut self, pid: impl Into<String>) -> Self {
        self.pid = Some(pid.into());
        self
    }

    /// Check if query is empty
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
    }
}
