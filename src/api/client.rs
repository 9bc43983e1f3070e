//! Reddit API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{header, Client};
use url::Url;

use crate::api::types::{Listing, Thing};
use crate::config::{clamp_limit, normalize_permalink, normalize_subreddit, ApiConfig, SortMode};
use crate::download::{MediaBody, MediaFetcher};
use crate::error::{Error, Result};

/// Pagination cursor. Only one direction is sent per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    After(String),
    Before(String),
}

/// A validated listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub subreddit: String,
    pub sort: SortMode,
    pub limit: u32,
    pub cursor: Option<Cursor>,
}

impl ListingQuery {
    /// Build a query, normalizing the subreddit and clamping the limit.
    /// `after` wins when both cursors are given.
    pub fn new(
        subreddit: &str,
        sort: SortMode,
        limit: u32,
        after: Option<String>,
        before: Option<String>,
    ) -> Result<Self> {
        let cursor = match (after, before) {
            (Some(after), _) => Some(Cursor::After(after)),
            (None, Some(before)) => Some(Cursor::Before(before)),
            (None, None) => None,
        };

        Ok(Self {
            subreddit: normalize_subreddit(subreddit)?,
            sort,
            limit: clamp_limit(limit),
            cursor,
        })
    }
}

/// Build the listing URL for a query.
pub fn listing_url(base_url: &str, query: &ListingQuery) -> Result<Url> {
    let sort_segment = query
        .sort
        .path_segment()
        .map(|s| format!("{}/", s))
        .unwrap_or_default();

    let mut url = Url::parse(&format!(
        "{}/r/{}/{}.json",
        base_url.trim_end_matches('/'),
        query.subreddit,
        sort_segment
    ))?;

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("limit", &query.limit.to_string());
        pairs.append_pair("raw_json", "1");
        match &query.cursor {
            Some(Cursor::After(after)) => {
                pairs.append_pair("after", after);
            }
            Some(Cursor::Before(before)) => {
                pairs.append_pair("before", before);
            }
            None => {}
        }
    }

    Ok(url)
}

/// Build the comment thread URL for a permalink.
pub fn comments_url(base_url: &str, permalink: &str) -> Result<Url> {
    let permalink = normalize_permalink(permalink)?;
    let mut url = format!("{}{}", base_url.trim_end_matches('/'), permalink);
    if !url.ends_with(".json") {
        url.push_str(".json");
    }
    Ok(Url::parse(&url)?)
}

/// Reddit API client. Unauthenticated; one request at a time.
pub struct RedditApi {
    client: Client,
    config: ApiConfig,
}

impl RedditApi {
    /// Create a new API client.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Make a GET request and return the body text of a successful response.
    async fn get_text(&self, url: Url, timeout: Duration) -> Result<String> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).timeout(timeout).send().await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(Error::from_status(status));
        }

        Ok(response.text().await?)
    }

    /// Fetch one page of a subreddit listing.
    pub async fn get_listing(&self, query: &ListingQuery) -> Result<Listing> {
        let url = listing_url(&self.config.base_url, query)?;
        let text = self.get_text(url, self.config.listing_timeout()).await?;
        tracing::debug!("Listing response length: {} bytes", text.len());

        let listing: Thing<Listing> = serde_json::from_str(&text).map_err(|e| {
            tracing::debug!(
                "Failed to parse listing: {} - Response: {}",
                e,
                text.chars().take(500).collect::<String>()
            );
            Error::InvalidJson(e)
        })?;

        Ok(listing.data)
    }

    /// Fetch a comment thread, returned exactly as the API sent it.
    pub async fn get_comments(&self, permalink: &str) -> Result<serde_json::Value> {
        let url = comments_url(&self.config.comments_base_url, permalink)?;
        let text = self.get_text(url, self.config.comments_timeout()).await?;
        tracing::debug!("Comments response length: {} bytes", text.len());

        let thread: serde_json::Value = serde_json::from_str(&text).map_err(Error::InvalidJson)?;

        match &thread {
            serde_json::Value::Array(parts) => {
                tracing::debug!("Comment thread has {} parts", parts.len());
            }
            other => {
                tracing::debug!("Comment response is not an array: {}", json_kind(other));
            }
        }

        Ok(thread)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[async_trait]
impl MediaFetcher for RedditApi {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<MediaBody> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, &self.config.user_agent)
            .timeout(timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::from_status(response.status()));
        }

        let content_length = response.content_length();
        let chunks = response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(Error::from))
            .boxed();

        Ok(MediaBody {
            content_length,
            chunks,
        })
    }
}
