//! Media fetch capability and streaming to disk.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use indicatif::ProgressBar;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

/// An HTTP response body being streamed.
pub struct MediaBody {
    /// Declared `Content-Length`, if the server sent one.
    pub content_length: Option<u64>,
    pub chunks: BoxStream<'static, Result<Vec<u8>>>,
}

/// Something that can fetch a media URL.
///
/// Implemented by [`crate::api::RedditApi`]; tests substitute a fake.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Start a GET request. Non-success statuses are errors.
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<MediaBody>;
}

/// Stream a body to `path`, returning the number of bytes written.
///
/// With a `limit`, a declared length above it fails before the file is
/// created, and a body that grows past it fails mid-stream. The caller is
/// responsible for removing a partial file on error.
pub async fn stream_to_file(
    body: MediaBody,
    path: &Path,
    limit: Option<u64>,
    progress: Option<&ProgressBar>,
) -> Result<u64> {
    if let (Some(limit), Some(declared)) = (limit, body.content_length) {
        if declared > limit {
            return Err(Error::TooLarge {
                size: declared,
                limit,
            });
        }
    }

    let mut file = File::create(path).await?;
    let mut chunks = body.chunks;
    let mut written: u64 = 0;

    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        written += chunk.len() as u64;

        if let Some(limit) = limit {
            if written > limit {
                return Err(Error::TooLarge {
                    size: written,
                    limit,
                });
            }
        }

        file.write_all(&chunk).await?;

        if let Some(pb) = progress {
            pb.set_position(written);
        }
    }

    file.flush().await?;

    Ok(written)
}

/// Remove a partially written file, ignoring one that was never created.
pub async fn discard_partial(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("Could not remove partial file {}: {}", path.display(), e);
        }
    }
}
