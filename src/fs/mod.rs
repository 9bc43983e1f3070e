//! Filesystem module.
//!
//! Provides:
//! - Cache and download directory resolution
//! - Filename generation and manipulation

pub mod naming;
pub mod paths;

pub use naming::{
    cache_filename, filename_from_url, make_unique_path, safe_title, sanitize_filename, short_hash,
};
pub use paths::{ensure_dir, get_cache_dir, get_download_dir, prepare_cache_dir};
