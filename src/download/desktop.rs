//! Full-size image and gallery downloads to the user's download folder.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::download::fetch::{discard_partial, stream_to_file, MediaFetcher};
use crate::download::state::BatchState;
use crate::error::Result;
use crate::fs::{
    ensure_dir, filename_from_url, get_download_dir, make_unique_path, safe_title, short_hash,
};
use crate::media::clean_image_url;
use crate::output::{
    create_download_bar, create_item_bar, print_batch_stats, DownloadResult, GalleryResult,
};

/// Minimum file size to show progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Title characters kept in a fallback image filename.
const IMAGE_TITLE_CHARS: usize = 30;

/// Title characters kept in a gallery folder name.
const GALLERY_TITLE_CHARS: usize = 50;

/// Saves full-size media into a destination directory.
pub struct DesktopDownloader<'a, F: MediaFetcher + ?Sized> {
    fetcher: &'a F,
    dir: PathBuf,
    timeout: Duration,
    quiet: bool,
}

impl<'a, F: MediaFetcher + ?Sized> DesktopDownloader<'a, F> {
    pub fn new(fetcher: &'a F, dir: PathBuf, timeout: Duration, quiet: bool) -> Self {
        Self {
            fetcher,
            dir,
            timeout,
            quiet,
        }
    }

    pub fn from_config(fetcher: &'a F, config: &Config) -> Self {
        Self::new(
            fetcher,
            get_download_dir(config),
            config.options.download_timeout(),
            config.options.quiet,
        )
    }

    /// Download one full-size image.
    pub async fn download_image(&self, url: &str, title: &str) -> DownloadResult {
        if !url.starts_with("http") {
            return DownloadResult::rejected();
        }

        let cleaned = clean_image_url(url);
        let filename =
            filename_from_url(&cleaned).unwrap_or_else(|| fallback_filename(title, &cleaned));

        if let Err(e) = ensure_dir(&self.dir) {
            tracing::warn!("Could not create {}: {}", self.dir.display(), e);
            return DownloadResult::failed(e.to_string());
        }
        let path = make_unique_path(&self.dir.join(filename));

        match self.save(&cleaned, &path, true).await {
            Ok(bytes) => {
                tracing::info!("Saved {} ({} bytes)", path.display(), bytes);
                DownloadResult::saved(&path)
            }
            Err(e) => {
                tracing::warn!("Download failed for {}: {}", cleaned, e);
                discard_partial(&path).await;
                DownloadResult::failed(e.to_string())
            }
        }
    }

    /// Download every image of a gallery into a new folder.
    pub async fn download_gallery(&self, urls: &[String], title: &str) -> GalleryResult {
        let urls: Vec<&str> = urls
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .collect();
        if urls.is_empty() {
            return GalleryResult::failure("No gallery images found");
        }

        let folder = match self.create_gallery_folder(title) {
            Ok(folder) => folder,
            Err(e) => {
                tracing::warn!("Could not create gallery folder: {}", e);
                return GalleryResult::failure(format!("Could not create folder: {}", e));
            }
        };

        let mut state = BatchState::new(urls.len() as u64);
        let mut files = Vec::with_capacity(urls.len());
        let progress = create_item_bar(state.total, "Gallery", self.quiet);

        for (index, url) in urls.iter().enumerate() {
            let cleaned = clean_image_url(url);
            let filename = filename_from_url(&cleaned)
                .unwrap_or_else(|| format!("image_{}.jpg", index + 1));
            let path = make_unique_path(&folder.join(filename));

            match self.save(&cleaned, &path, false).await {
                Ok(_) => {
                    if let Some(name) = path.file_name() {
                        files.push(name.to_string_lossy().into_owned());
                    }
                    state.record_success();
                }
                Err(e) => {
                    tracing::warn!("Gallery image {} failed ({}): {}", index + 1, cleaned, e);
                    discard_partial(&path).await;
                    state.record_failure();
                }
            }
            progress.inc(1);
        }

        progress.finish_and_clear();
        print_batch_stats("Gallery", &state, self.quiet);

        GalleryResult::saved(&folder, files, state.failed as usize)
    }

    fn create_gallery_folder(&self, title: &str) -> Result<PathBuf> {
        let name = format!("reddit_gallery_{}", safe_title(title, GALLERY_TITLE_CHARS));
        let folder = make_unique_path(&self.dir.join(name));
        std::fs::create_dir_all(&folder)?;
        Ok(folder)
    }

    async fn save(&self, url: &str, path: &Path, show_progress: bool) -> Result<u64> {
        tracing::debug!("Downloading {} to {}", url, path.display());
        let body = self.fetcher.fetch(url, self.timeout).await?;

        let progress = match body.content_length {
            Some(length) if show_progress && length > PROGRESS_THRESHOLD => {
                Some(create_download_bar(length, self.quiet))
            }
            _ => None,
        };

        let written = stream_to_file(body, path, None, progress.as_ref()).await;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        written
    }
}

/// Filename for an image URL without a usable last segment.
fn fallback_filename(title: &str, url: &str) -> String {
    let title = safe_title(title, IMAGE_TITLE_CHARS);
    if title.is_empty() {
        format!("reddit_image_{}.jpg", short_hash(url))
    } else {
        format!("reddit_{}.jpg", title)
    }
}
