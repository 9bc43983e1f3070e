//! Thumbnail batch for a listing page.

use std::time::Duration;

use crate::download::cache::ThumbnailCache;
use crate::download::fetch::MediaFetcher;
use crate::download::state::BatchState;
use crate::output::{create_item_bar, OutputPost};

/// Cache the thumbnail of every post that has a remote one.
///
/// Posts are processed one at a time in listing order, pausing `delay`
/// between downloads. A cached thumbnail replaces the remote URL with the
/// local path; a failed one keeps the URL.
pub async fn download_thumbnails<F: MediaFetcher + ?Sized>(
    cache: &ThumbnailCache<'_, F>,
    posts: &mut [OutputPost],
    delay: Duration,
    quiet: bool,
) -> BatchState {
    let pending: Vec<usize> = posts
        .iter()
        .enumerate()
        .filter(|(_, post)| post.media.has_remote_thumbnail())
        .map(|(index, _)| index)
        .collect();

    let mut state = BatchState::new(pending.len() as u64);
    if pending.is_empty() {
        return state;
    }

    tracing::debug!("Caching {} thumbnails in {}", pending.len(), cache.dir().display());
    let progress = create_item_bar(state.total, "Thumbnails", quiet);

    for index in pending {
        let post = &mut posts[index];
        let Some(url) = post.media.thumbnail.clone() else {
            continue;
        };

        match cache.download(&url).await {
            Some(path) => {
                post.media.thumbnail = Some(path.display().to_string());
                state.record_success();
            }
            None => {
                tracing::warn!("Thumbnail not cached for '{}'", post.title);
                state.record_failure();
            }
        }
        progress.inc(1);

        if state.has_remaining() && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    progress.finish_and_clear();
    tracing::info!(
        "Thumbnails: {} cached, {} failed",
        state.downloaded,
        state.failed
    );

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::test_support::FakeFetcher;
    use crate::media::{ContentType, MediaDescriptor};

    fn post(title: &str, thumbnail: Option<&str>) -> OutputPost {
        let mut media = MediaDescriptor::new(ContentType::Image, false);
        media.set_thumbnail(thumbnail.map(str::to_string));
        OutputPost {
            title: title.to_string(),
            author: "someone".to_string(),
            subreddit: "pics".to_string(),
            score: 1,
            num_comments: 0,
            url: String::new(),
            permalink: String::new(),
            is_self: false,
            selftext: String::new(),
            created_utc: 0.0,
            media,
        }
    }

    #[tokio::test]
    async fn test_thumbnails_replaced_in_listing_order() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::new()
            .with("https://i.redd.it/one.jpg", b"one")
            .with("https://i.redd.it/two.png", b"two");
        let cache = ThumbnailCache::new(
            &fetcher,
            dir.path().to_path_buf(),
            1024,
            Duration::from_secs(5),
        );

        let mut posts = vec![
            post("first", Some("https://i.redd.it/one.jpg")),
            post("text", None),
            post("missing", Some("https://i.redd.it/gone.jpg")),
            post("second", Some("https://i.redd.it/two.png")),
        ];

        let state = download_thumbnails(&cache, &mut posts, Duration::ZERO, true).await;

        assert_eq!(state.total, 3);
        assert_eq!(state.downloaded, 2);
        assert_eq!(state.failed, 1);
        assert_eq!(
            fetcher.requests(),
            [
                "https://i.redd.it/one.jpg",
                "https://i.redd.it/gone.jpg",
                "https://i.redd.it/two.png"
            ]
        );

        let first = posts[0].media.thumbnail.as_deref().unwrap();
        assert!(first.starts_with(&dir.path().display().to_string()));
        assert_eq!(posts[1].media.thumbnail, None);
        assert_eq!(
            posts[2].media.thumbnail.as_deref(),
            Some("https://i.redd.it/gone.jpg")
        );
        assert!(posts[3].media.thumbnail.as_deref().unwrap().ends_with(".png"));
    }

    #[tokio::test]
    async fn test_delay_only_between_downloads() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::new()
            .with("https://i.redd.it/a.jpg", b"a")
            .with("https://i.redd.it/b.jpg", b"b")
            .with("https://i.redd.it/c.jpg", b"c");
        let cache = ThumbnailCache::new(
            &fetcher,
            dir.path().to_path_buf(),
            1024,
            Duration::from_secs(5),
        );
        let mut posts = vec![
            post("a", Some("https://i.redd.it/a.jpg")),
            post("b", Some("https://i.redd.it/b.jpg")),
            post("c", Some("https://i.redd.it/c.jpg")),
        ];
        let delay = Duration::from_millis(100);

        let started = std::time::Instant::now();
        let state = download_thumbnails(&cache, &mut posts, delay, true).await;
        let elapsed = started.elapsed();

        assert_eq!(state.downloaded, 3);
        assert!(elapsed >= delay * 2, "slept {:?}", elapsed);
        assert!(elapsed < delay * 3, "slept after the last download: {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_no_remote_thumbnails_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::new();
        let cache = ThumbnailCache::new(
            &fetcher,
            dir.path().to_path_buf(),
            1024,
            Duration::from_secs(5),
        );

        let mut posts = vec![post("text", None)];
        let state = download_thumbnails(&cache, &mut posts, Duration::from_secs(60), true).await;

        assert_eq!(state, BatchState::new(0));
        assert_eq!(fetcher.calls(), 0);
    }
}
