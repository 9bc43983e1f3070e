//! Subreddit listing command.

use crate::api::{ListingQuery, RedditApi};
use crate::config::Config;
use crate::download::{download_thumbnails, BatchState, MediaFetcher, ThumbnailCache};
use crate::media::describe;
use crate::output::{print_batch_stats, ListingResponse, OutputPost, Pagination};

/// Fetch one listing page and describe every post.
///
/// Never fails; errors become the listing failure shape.
pub async fn fetch_listing(
    api: &RedditApi,
    config: &Config,
    query: &ListingQuery,
) -> ListingResponse {
    tracing::debug!(
        "Fetching r/{} ({}, limit {})",
        query.subreddit,
        query.sort,
        query.limit
    );

    let listing = match api.get_listing(query).await {
        Ok(listing) => listing,
        Err(e) => {
            tracing::warn!("Listing fetch failed: {}", e);
            return ListingResponse::failure(e.to_string());
        }
    };

    let simple = config.options.simple_mode;
    let posts: Vec<OutputPost> = listing
        .children
        .iter()
        .map(|child| OutputPost::from_record(&child.data, describe(&child.data, simple)))
        .collect();

    tracing::debug!("Described {} posts", posts.len());

    ListingResponse::success(
        posts,
        Pagination {
            after: listing.after,
            before: listing.before,
        },
    )
}

/// Replace remote thumbnails in a successful listing with cached files.
///
/// Skipped for failed or empty listings, in simple mode, and when
/// thumbnail caching is turned off.
pub async fn cache_thumbnails<F: MediaFetcher + ?Sized>(
    fetcher: &F,
    config: &Config,
    response: &mut ListingResponse,
) -> Option<BatchState> {
    if !response.success
        || response.posts.is_empty()
        || config.options.simple_mode
        || !config.options.download_thumbnails
    {
        return None;
    }

    let cache = ThumbnailCache::from_config(fetcher, config);
    let state = download_thumbnails(
        &cache,
        &mut response.posts,
        config.options.thumbnail_delay(),
        config.options.quiet,
    )
    .await;

    print_batch_stats("Thumbnails", &state, config.options.quiet);
    Some(state)
}
