//! Lenient decoding helpers for provider payloads

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::debug;

/// Deserialize a `null` field as its default value
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode each record on its own, dropping only the malformed ones
pub(crate) fn decode_records<T: DeserializeOwned>(
    provider: &str,
    records: Vec<serde_json::Value>,
) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value(record) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                debug!("Skipping malformed {} record: {}", provider, e);
                None
            }
        })
        .collect()
}
