//! HTTP networking module
//!
//! Provides the shared HTTP client used by every provider adapter.

mod client;
mod user_agent;

pub use client::HttpClient;
pub use user_agent::generate_user_agent;
