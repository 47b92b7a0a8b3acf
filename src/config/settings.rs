//! Settings structures for mediamux configuration

use crate::profiles::Profile;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main settings structure, mirrors settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
    pub providers: ProvidersSettings,
    pub artwork: ArtworkSettings,
    /// Profiles seeded into the in-memory profile store
    pub profiles: Vec<Profile>,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (MEDIAMUX_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a variable lookup
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("MEDIAMUX_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = lookup("MEDIAMUX_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("MEDIAMUX_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = lookup("MEDIAMUX_SEARCH_TIMEOUT_MS") {
            if let Ok(ms) = val.parse() {
                self.search.timeout_ms = ms;
            }
        }
        if let Some(val) = lookup("MEDIAMUX_EVENTFUL_APP_KEY") {
            self.providers.eventful.api_key = Some(val);
        }
        if let Some(val) = lookup("MEDIAMUX_LASTFM_API_KEY") {
            self.artwork.lastfm_api_key = Some(val);
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name reported by the health endpoint
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "mediamux".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub port: u16,
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8888,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Deadline for one aggregation call, in milliseconds
    pub timeout_ms: u64,
    /// Provider names per search mode, in interleave order
    pub modes: ModeSettings,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            timeout_ms: crate::DEFAULT_TIMEOUT_MS,
            modes: ModeSettings::default(),
        }
    }
}

/// Mode to provider-name table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeSettings {
    pub all: Vec<String>,
    pub video: Vec<String>,
    pub audio: Vec<String>,
    pub event: Vec<String>,
}

impl Default for ModeSettings {
    fn default() -> Self {
        Self {
            all: vec![
                "youtube".to_string(),
                "eventful".to_string(),
                "spotify".to_string(),
            ],
            video: vec!["youtube".to_string()],
            audio: vec!["spotify".to_string()],
            event: vec!["eventful".to_string()],
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Per-request timeout in seconds
    pub request_timeout: f64,
    /// Max idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Route every request through this proxy
    pub proxy: Option<String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 5.0,
            pool_maxsize: 20,
            verify_ssl: true,
            proxy: None,
        }
    }
}

/// Per-provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersSettings {
    pub youtube: ProviderConfig,
    pub eventful: ProviderConfig,
    pub spotify: ProviderConfig,
}

impl Default for ProvidersSettings {
    fn default() -> Self {
        Self {
            youtube: ProviderConfig::with_pid("youtube"),
            eventful: ProviderConfig::with_pid("eventful"),
            spotify: ProviderConfig::with_pid("spotify"),
        }
    }
}

/// Individual provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Whether the provider is disabled
    pub disabled: bool,
    /// Content bucket stamped on every item
    pub pid: String,
    /// API or app key if the provider needs one
    pub api_key: Option<String>,
    /// Override for the search endpoint
    pub base_url: Option<String>,
    /// Override for the secondary page endpoint (track pages)
    pub page_url: Option<String>,
    /// Override for the result cap
    pub max_results: Option<usize>,
}

impl ProviderConfig {
    pub fn with_pid(pid: impl Into<String>) -> Self {
        Self {
            pid: pid.into(),
            ..Default::default()
        }
    }
}

/// Cover-art lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkSettings {
    /// Last.fm API key; the lookup is skipped without one
    pub lastfm_api_key: Option<String>,
    /// Override for the Last.fm endpoint
    pub lastfm_base_url: Option<String>,
    /// Directory holding cached `<item id>.png` covers
    pub image_path: PathBuf,
    /// Lifetime of memoised track-page lookups, in seconds
    pub cache_ttl: u64,
}

impl Default for ArtworkSettings {
    fn default() -> Self {
        Self {
            lastfm_api_key: None,
            lastfm_base_url: None,
            image_path: PathBuf::from("images"),
            cache_ttl: 3600,
        }
    }
}
