//! Search orchestration module
//!
//! Runs the providers selected by a search mode concurrently under a single
//! deadline and merges their results round-robin.

mod executor;
mod merge;
mod models;
mod modes;

pub use executor::Aggregator;
pub use merge::round_robin;
pub use models::*;
pub use modes::ModeTable;
