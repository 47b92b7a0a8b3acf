//! Provider adapter module
//!
//! Defines the `Provider` and `SearchSource` traits, the fail-soft HTTP
//! adapter, and the concrete media providers.

mod de;
mod images;
mod loader;
mod registry;
mod source;
mod traits;

// Provider implementations
pub mod eventful;
pub mod lastfm;
pub mod spotify;
pub mod youtube;

pub use images::{best_image, LASTFM_SIZES, YOUTUBE_THUMBNAILS};
pub use loader::ProviderLoader;
pub use registry::ProviderRegistry;
pub use source::HttpSource;
pub use traits::*;
