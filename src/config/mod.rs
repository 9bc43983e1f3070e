//! Configuration module for the reddit-fetcher.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Listing sort modes
//! - Validation of configuration and command inputs

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{ApiConfig, CacheConfig, Config, OptionsConfig};
pub use modes::SortMode;
pub use validation::{
    clamp_limit, normalize_permalink, normalize_subreddit, parse_cursor, validate_config,
};
