//! Mediamux: a multiplexed media search service
//!
//! A single query fans out to several external media providers (video,
//! audio, events) concurrently. Each provider's answer is normalized into a
//! common [`Item`] shape and the lists are interleaved round-robin under a
//! shared deadline.

pub mod config;
pub mod error;
pub mod metrics;
pub mod network;
pub mod profiles;
pub mod providers;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use error::ProviderError;
pub use results::{Item, MediaKind, SearchResults};
pub use search::{Aggregator, SearchMode, SearchQuery};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default collection deadline for a multiplexed search, in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;
