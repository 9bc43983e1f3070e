//! Comment thread command.

use crate::api::RedditApi;
use crate::output::{CommentsResponse, ErrorResponse};

/// Fetch the comment thread behind a permalink.
///
/// Any JSON the API returns is passed through untouched.
pub async fn fetch_comments(api: &RedditApi, permalink: &str) -> CommentsResponse {
    match api.get_comments(permalink).await {
        Ok(thread) => CommentsResponse::Thread(thread),
        Err(e) => {
            tracing::warn!("Comments fetch failed for {}: {}", permalink, e);
            CommentsResponse::Failure(ErrorResponse::new(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::fetch::test_server::serve_once;
    use serde_json::json;

    fn api_at(base_url: &str) -> RedditApi {
        RedditApi::new(&ApiConfig {
            comments_base_url: base_url.to_string(),
            comments_timeout_secs: 2,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_thread_is_passed_through() {
        let base = serve_once("200 OK", r#"[{"kind":"Listing","data":{"children":[]}},{"kind":"Listing"}]"#).await;

        let response = fetch_comments(&api_at(&base), "/r/rust/comments/abc/x/").await;

        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!([{"kind": "Listing", "data": {"children": []}}, {"kind": "Listing"}])
        );
    }

    #[tokio::test]
    async fn test_not_found() {
        let base = serve_once("404 Not Found", "{}").await;

        let response = fetch_comments(&api_at(&base), "r/rust/comments/gone").await;

        assert_eq!(
            response,
            CommentsResponse::Failure(ErrorResponse::new("HTTP 404: Not Found"))
        );
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let base = serve_once("200 OK", "not json").await;

        let response = fetch_comments(&api_at(&base), "/r/rust/comments/abc/x/").await;

        assert_eq!(
            response,
            CommentsResponse::Failure(ErrorResponse::new("Invalid JSON response"))
        );
    }

    #[tokio::test]
    async fn test_empty_permalink_fails_without_request() {
        let response = fetch_comments(&api_at("http://127.0.0.1:9"), "").await;

        match response {
            CommentsResponse::Failure(failure) => assert!(!failure.error.is_empty()),
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
