//! Metrics collection module
//!
//! Tracks provider performance, error rates, and usage statistics.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Response times kept per provider
const RESPONSE_WINDOW: usize = 100;

/// In-process metrics collector
pub struct Metrics {
    /// Total aggregation calls
    total_searches: AtomicU64,
    provider_searches: RwLock<HashMap<String, u64>>,
    /// Recent response times in ms
    response_times: RwLock<HashMap<String, Vec<u64>>>,
    errors: RwLock<HashMap<String, u64>>,
    successes: RwLock<HashMap<String, u64>>,
    /// Results abandoned at the aggregation deadline
    timeouts: RwLock<HashMap<String, u64>>,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            total_searches: AtomicU64::new(0),
            provider_searches: RwLock::new(HashMap::new()),
            response_times: RwLock::new(HashMap::new()),
            errors: RwLock::new(HashMap::new()),
            successes: RwLock::new(HashMap::new()),
            timeouts: RwLock::new(HashMap::new()),
        }
    }

    /// Increment total search count
    pub fn inc_search(&self) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a provider search
    pub fn record_provider_search(&self, provider: &str) {
        bump(&self.provider_searches, provider);
    }

    /// Record provider response time
    pub fn record_response_time(&self, provider: &str, time_ms: u64) {
        let mut times = self.response_times.write().unwrap_or_else(|e| e.into_inner());
        let entry = times.entry(provider.to_string()).or_default();

        if entry.len() >= RESPONSE_WINDOW {
            entry.remove(0);
        }
        entry.push(time_ms);
    }

    /// Record provider error
    pub fn record_error(&self, provider: &str) {
        bump(&self.errors, provider);
    }

    /// Record provider success
    pub fn record_success(&self, provider: &str) {
        bump(&self.successes, provider);
    }

    /// Record a provider that missed the aggregation deadline
    pub fn record_timeout(&self, provider: &str) {
        bump(&self.timeouts, provider);
    }

    /// Get total searches
    pub fn get_total_searches(&self) -> u64 {
        self.total_searches.load(Ordering::Relaxed)
    }

    /// Get average response time for a provider
    pub fn get_avg_response_time(&self, provider: &str) -> Option<u64> {
        let times = self.response_times.read().unwrap_or_else(|e| e.into_inner());
        times.get(provider).and_then(|t| {
            if t.is_empty() {
                None
            } else {
                Some(t.iter().sum::<u64>() / t.len() as u64)
            }
        })
    }

    /// Get reliability percentage for a provider
    pub fn get_reliability(&self, provider: &str) -> f64 {
        let error_count = count(&self.errors, provider);
        let success_count = count(&self.successes, provider);

        let total = error_count + success_count;
        if total == 0 {
            100.0
        } else {
            (success_count as f64 / total as f64) * 100.0
        }
    }

    /// Get timeout count for a provider
    pub fn get_timeouts(&self, provider: &str) -> u64 {
        count(&self.timeouts, provider)
    }

    /// Get all provider statistics, keyed by name
    pub fn get_provider_stats(&self) -> BTreeMap<String, ProviderStats> {
        let names: Vec<String> = {
            let searches = self.provider_searches.read().unwrap_or_else(|e| e.into_inner());
            searches.keys().cloned().collect()
        };

        names
            .into_iter()
            .map(|name| {
                let stats = ProviderStats {
                    searches: count(&self.provider_searches, &name),
                    avg_response_time: self.get_avg_response_time(&name),
                    reliability: self.get_reliability(&name),
                    timeouts: self.get_timeouts(&name),
                };
                (name, stats)
            })
            .collect()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

fn bump(map: &RwLock<HashMap<String, u64>>, key: &str) {
    let mut map = map.write().unwrap_or_else(|e| e.into_inner());
    *map.entry(key.to_string()).or_insert(0) += 1;
}

fn count(map: &RwLock<HashMap<String, u64>>, key: &str) -> u64 {
    let map = map.read().unwrap_or_else(|e| e.into_inner());
    map.get(key).copied().unwrap_or(0)
}

/// Statistics for a single provider
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStats {
    pub searches: u64,
    pub avg_response_time: Option<u64>,
    pub reliability: f64,
    pub timeouts: u64,
}
