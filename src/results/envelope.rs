//! Response envelope

use serde::{Deserialize, Serialize};

/// Generic `{"results": ...}` wrapper returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults<T> {
    pub results: T,
}

impl<T> SearchResults<T> {
    pub fn new(results: T) -> Self {
        Self { results }
    }
}

impl<T> SearchResults<Vec<T>> {
    /// Empty result list
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<T> Default for SearchResults<Vec<T>> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let wrapped = SearchResults::new(vec![1, 2, 3]);
        let json = serde_json::to_value(&wrapped).unwrap();
        assert_eq!(json, serde_json::json!({ "results": [1, 2, 3] }));
    }

    #[test]
    fn test_empty_envelope() {
        let wrapped: SearchResults<Vec<String>> = SearchResults::empty();
        assert!(wrapped.is_empty());
        assert_eq!(serde_json::to_string(&wrapped).unwrap(), r#"{"results":[]}"#);
    }
}
