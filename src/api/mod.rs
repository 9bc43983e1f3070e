//! Reddit API module.
//!
//! This module provides:
//! - HTTP client for the public Reddit JSON endpoints
//! - API response types

pub mod client;
pub mod types;

pub use client::{listing_url, Cursor, ListingQuery, RedditApi};
pub use types::*;
