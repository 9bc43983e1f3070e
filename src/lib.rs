//! reddit-fetcher - Reddit JSON backend for a desktop Reddit viewer
//!
//! Fetches subreddit listings and comment threads from the public JSON
//! endpoints, classifies what each post links to and resolves the best
//! image and thumbnail for it. Results are printed as a single JSON
//! document on stdout for the viewer to parse.
//!
//! # Features
//!
//! - Listing fetch with sort modes and pagination cursors
//! - Content classification (self, video, image, article, link)
//! - Media resolution across galleries, direct images, previews and
//!   platform thumbnails
//! - Local thumbnail cache with a size ceiling
//! - Full-size image and gallery downloads to the Desktop
//!
//! # Example
//!
//! ```no_run
//! use reddit_fetcher::{fetch_listing, Config, ListingQuery, RedditApi, SortMode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let api = RedditApi::new(&config.api)?;
//!     let query = ListingQuery::new("rust", SortMode::Top, 25, None, None)?;
//!
//!     let response = fetch_listing(&api, &config, &query).await;
//!     println!("{}", serde_json::to_string(&response)?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fetch;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{ListingQuery, PostRecord, RedditApi};
pub use config::{Config, SortMode};
pub use download::{DesktopDownloader, MediaFetcher, ThumbnailCache};
pub use error::{Error, Result};
pub use fetch::{fetch_comments, fetch_listing};
pub use media::{describe, resolve, ContentType, ImageType, MediaDescriptor};
pub use output::{ListingResponse, OutputPost};
