//! Download module for media fetching.
//!
//! This module provides:
//! - The media fetch capability and streaming to disk
//! - The thumbnail cache and the per-listing thumbnail batch
//! - Full-size image and gallery downloads
//! - Batch state tracking

pub mod cache;
pub mod desktop;
pub mod fetch;
pub mod state;
pub mod thumbnails;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::ThumbnailCache;
pub use desktop::DesktopDownloader;
pub use fetch::{discard_partial, stream_to_file, MediaBody, MediaFetcher};
pub use state::BatchState;
pub use thumbnails::download_thumbnails;
