//! Content-addressed thumbnail cache.
//!
//! Entries are named from a hash of the cleaned URL and are never
//! revalidated or evicted, so the cache grows without bound.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::download::fetch::{discard_partial, stream_to_file, MediaFetcher};
use crate::error::{Error, Result};
use crate::fs::{cache_filename, get_cache_dir, prepare_cache_dir};
use crate::media::clean_image_url;

/// Downloads thumbnails into a local cache directory.
pub struct ThumbnailCache<'a, F: MediaFetcher + ?Sized> {
    fetcher: &'a F,
    dir: PathBuf,
    max_bytes: u64,
    timeout: Duration,
}

impl<'a, F: MediaFetcher + ?Sized> ThumbnailCache<'a, F> {
    /// Create a cache rooted at an existing directory.
    pub fn new(fetcher: &'a F, dir: PathBuf, max_bytes: u64, timeout: Duration) -> Self {
        Self {
            fetcher,
            dir,
            max_bytes,
            timeout,
        }
    }

    /// Create a cache from configuration, creating its directory.
    pub fn from_config(fetcher: &'a F, config: &Config) -> Self {
        let dir = prepare_cache_dir(&get_cache_dir(config));
        Self::new(
            fetcher,
            dir,
            config.cache.max_thumbnail_bytes,
            config.cache.thumbnail_timeout(),
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Deterministic cache location for a URL.
    pub fn path_for(&self, url: &str) -> PathBuf {
        self.dir.join(cache_filename(url))
    }

    /// Return the cached file for `url`, downloading it on first use.
    ///
    /// Never fails: oversized, empty and unreachable media all yield `None`
    /// and leave nothing behind on disk.
    pub async fn download(&self, url: &str) -> Option<PathBuf> {
        if !url.starts_with("http") {
            return None;
        }

        let path = self.path_for(url);
        if path.exists() {
            tracing::debug!("Cache hit: {}", path.display());
            return Some(path);
        }

        let cleaned = clean_image_url(url);
        match self.fetch_into(&cleaned, &path).await {
            Ok(bytes) => {
                tracing::debug!("Downloaded {} bytes to {}", bytes, path.display());
                Some(path)
            }
            Err(Error::TooLarge { size, limit }) => {
                tracing::debug!("Skipping large image ({} bytes, limit {})", size, limit);
                discard_partial(&path).await;
                None
            }
            Err(e) => {
                tracing::debug!("Failed to download {}: {}", url, e);
                discard_partial(&path).await;
                None
            }
        }
    }

    async fn fetch_into(&self, url: &str, path: &Path) -> Result<u64> {
        let body = self.fetcher.fetch(url, self.timeout).await?;
        let written = stream_to_file(body, path, Some(self.max_bytes), None).await?;

        if written == 0 {
            return Err(Error::EmptyBody);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::test_support::{FakeFetcher, FakeResponse};

    const LIMIT: u64 = 16;

    fn cache<'a>(fetcher: &'a FakeFetcher, dir: &Path) -> ThumbnailCache<'a, FakeFetcher> {
        ThumbnailCache::new(fetcher, dir.to_path_buf(), LIMIT, Duration::from_secs(5))
    }

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_second_download_is_a_cache_hit() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::new().with("https://i.redd.it/a.jpg", b"jpegdata");
        let cache = cache(&fetcher, dir.path());

        let first = cache.download("https://i.redd.it/a.jpg").await.unwrap();
        let second = cache.download("https://i.redd.it/a.jpg").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(std::fs::read(&first).unwrap(), b"jpegdata");
        assert!(first.extension().is_some_and(|e| e == "jpg"));
    }

    #[tokio::test]
    async fn test_query_variants_share_an_entry() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::new().with("https://i.redd.it/b.png", b"png");
        let cache = cache(&fetcher, dir.path());

        let first = cache.download("https://i.redd.it/b.png?width=108").await;
        let second = cache.download("https://i.redd.it/b.png?width=640").await;

        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(fetcher.requests(), ["https://i.redd.it/b.png"]);
    }

    #[tokio::test]
    async fn test_declared_oversize_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::new().with_response(
            "https://i.redd.it/big.jpg",
            FakeResponse {
                body: b"tiny".to_vec(),
                declared_length: Some(LIMIT + 1),
                fail_mid_stream: false,
            },
        );
        let cache = cache(&fetcher, dir.path());

        assert_eq!(cache.download("https://i.redd.it/big.jpg").await, None);
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_undeclared_oversize_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::new().with_response(
            "https://i.redd.it/big.jpg",
            FakeResponse {
                body: vec![7u8; (LIMIT * 2) as usize],
                declared_length: None,
                fail_mid_stream: false,
            },
        );
        let cache = cache(&fetcher, dir.path());

        assert_eq!(cache.download("https://i.redd.it/big.jpg").await, None);
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_stream_failure_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::new().with_response(
            "https://i.redd.it/cut.jpg",
            FakeResponse {
                body: b"abcdefgh".to_vec(),
                declared_length: Some(8),
                fail_mid_stream: true,
            },
        );
        let cache = cache(&fetcher, dir.path());

        assert_eq!(cache.download("https://i.redd.it/cut.jpg").await, None);
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_http_error_and_empty_body() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::new().with("https://i.redd.it/empty.jpg", b"");
        let cache = cache(&fetcher, dir.path());

        assert_eq!(cache.download("https://i.redd.it/missing.jpg").await, None);
        assert_eq!(cache.download("https://i.redd.it/empty.jpg").await, None);
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_non_http_urls_are_not_fetched() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::new();
        let cache = cache(&fetcher, dir.path());

        assert_eq!(cache.download("").await, None);
        assert_eq!(cache.download("self").await, None);
        assert_eq!(cache.download("/tmp/local.jpg").await, None);
        assert_eq!(fetcher.calls(), 0);
    }
}
