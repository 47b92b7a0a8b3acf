//! Result types and the response envelope
//!
//! Defines the normalized `Item` every provider produces and the
//! `SearchResults` wrapper handed back to callers.

mod envelope;
mod types;

pub use envelope::SearchResults;
pub use types::*;
