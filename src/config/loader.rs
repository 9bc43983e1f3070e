//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

/// Reddit API endpoints and request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for subreddit listings.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base URL that comment permalinks are appended to.
    #[serde(default = "default_comments_base_url")]
    pub comments_base_url: String,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for listing requests.
    #[serde(default = "default_listing_timeout")]
    pub listing_timeout_secs: u64,

    /// Timeout for comment requests.
    #[serde(default = "default_comments_timeout")]
    pub comments_timeout_secs: u64,
}

/// Behaviour options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Text-only listings: skip media resolution and thumbnail caching.
    #[serde(default)]
    pub simple_mode: bool,

    /// Whether to cache thumbnails after a listing fetch.
    #[serde(default = "default_true")]
    pub download_thumbnails: bool,

    /// Destination for full image and gallery downloads. Defaults to the Desktop.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Timeout for full image and gallery downloads.
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,

    /// Pause between successive thumbnail downloads.
    #[serde(default = "default_thumbnail_delay")]
    pub thumbnail_delay_ms: u64,

    /// Hide progress bars.
    #[serde(default)]
    pub quiet: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            simple_mode: false,
            download_thumbnails: true,
            download_directory: None,
            download_timeout_secs: default_download_timeout(),
            thumbnail_delay_ms: default_thumbnail_delay(),
            quiet: false,
        }
    }
}

/// Thumbnail cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache directory. Defaults to the platform cache dir.
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Largest thumbnail accepted into the cache, in bytes.
    #[serde(default = "default_max_thumbnail_bytes")]
    pub max_thumbnail_bytes: u64,

    /// Timeout for a single thumbnail download.
    #[serde(default = "default_thumbnail_timeout")]
    pub thumbnail_timeout_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: None,
            max_thumbnail_bytes: default_max_thumbnail_bytes(),
            thumbnail_timeout_secs: default_thumbnail_timeout(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            comments_base_url: default_comments_base_url(),
            user_agent: default_user_agent(),
            listing_timeout_secs: default_listing_timeout(),
            comments_timeout_secs: default_comments_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://old.reddit.com".to_string()
}

fn default_comments_base_url() -> String {
    "https://reddit.com".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; PPC Mac OS X 10_4) Reddit Viewer 1.0".to_string()
}

fn default_true() -> bool {
    true
}

fn default_listing_timeout() -> u64 {
    15
}

fn default_comments_timeout() -> u64 {
    20
}

fn default_download_timeout() -> u64 {
    30
}

fn default_thumbnail_delay() -> u64 {
    100
}

fn default_max_thumbnail_bytes() -> u64 {
    200 * 1024
}

fn default_thumbnail_timeout() -> u64 {
    5
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

impl ApiConfig {
    pub fn listing_timeout(&self) -> Duration {
        Duration::from_secs(self.listing_timeout_secs)
    }

    pub fn comments_timeout(&self) -> Duration {
        Duration::from_secs(self.comments_timeout_secs)
    }
}

impl OptionsConfig {
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    pub fn thumbnail_delay(&self) -> Duration {
        Duration::from_millis(self.thumbnail_delay_ms)
    }
}

impl CacheConfig {
    pub fn thumbnail_timeout(&self) -> Duration {
        Duration::from_secs(self.thumbnail_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "https://old.reddit.com");
        assert_eq!(config.cache.max_thumbnail_bytes, 204_800);
        assert_eq!(config.options.thumbnail_delay_ms, 100);
        assert!(config.options.download_thumbnails);
        assert!(!config.options.simple_mode);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [options]
            simple_mode = true

            [cache]
            max_thumbnail_bytes = 1024
            "#,
        )
        .unwrap();

        assert!(config.options.simple_mode);
        assert_eq!(config.options.download_timeout_secs, 30);
        assert_eq!(config.cache.max_thumbnail_bytes, 1024);
        assert_eq!(config.cache.thumbnail_timeout_secs, 5);
        assert_eq!(config.api.comments_timeout_secs, 20);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.api.listing_timeout_secs, 15);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[options\nsimple_mode = ").unwrap();
        assert!(matches!(Config::load(&path), Err(Error::TomlParse(_))));
    }
}
