//! JSON documents written to stdout.
//!
//! Every command writes exactly one of these, compactly, and nothing else
//! goes to stdout.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::api::PostRecord;
use crate::error::Result;
use crate::media::MediaDescriptor;

/// Absolute prefix for API permalinks.
pub const PERMALINK_BASE: &str = "https://reddit.com";

/// Self text is cut to this many characters in listings.
pub const SELFTEXT_PREVIEW_CHARS: usize = 300;

/// One post as emitted in a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputPost {
    pub title: String,
    pub author: String,
    pub subreddit: String,
    pub score: i64,
    pub num_comments: u64,
    pub url: String,
    pub permalink: String,
    pub is_self: bool,
    pub selftext: String,
    pub created_utc: f64,
    #[serde(flatten)]
    pub media: MediaDescriptor,
}

impl OutputPost {
    /// Merge a raw post with its media descriptor.
    pub fn from_record(record: &PostRecord, media: MediaDescriptor) -> Self {
        let selftext = if record.is_self {
            record.selftext.chars().take(SELFTEXT_PREVIEW_CHARS).collect()
        } else {
            String::new()
        };

        Self {
            title: record.title.clone(),
            author: record.author.clone(),
            subreddit: record.subreddit.clone(),
            score: record.score,
            num_comments: record.num_comments,
            url: record.url.clone(),
            permalink: format!("{}{}", PERMALINK_BASE, record.permalink),
            is_self: record.is_self,
            selftext,
            created_utc: record.created_utc,
            media,
        }
    }
}

/// Cursors for the neighbouring pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pagination {
    pub after: Option<String>,
    pub before: Option<String>,
}

/// Result of a listing fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub posts: Vec<OutputPost>,
    pub pagination: Pagination,
}

impl ListingResponse {
    pub fn success(posts: Vec<OutputPost>, pagination: Pagination) -> Self {
        Self {
            success: true,
            error: None,
            posts,
            pagination,
        }
    }

    /// Failure shape: no posts and null cursors.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            posts: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

/// Result of a single full-size image download.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadResult {
    pub success: bool,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DownloadResult {
    pub fn saved(path: &Path) -> Self {
        Self {
            success: true,
            path: path.display().to_string(),
            filename: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            error: None,
        }
    }

    /// Failure without a reason, used for rejected URLs.
    pub fn rejected() -> Self {
        Self {
            success: false,
            path: String::new(),
            filename: None,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::rejected()
        }
    }
}

/// Result of a gallery download.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GalleryResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GalleryResult {
    pub fn saved(folder: &Path, files: Vec<String>, failed: usize) -> Self {
        Self {
            success: true,
            folder: Some(folder.display().to_string()),
            count: Some(files.len()),
            files: Some(files),
            failed: Some(failed),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Default::default()
        }
    }
}

/// Generic failure document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Comment thread passthrough, or a failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommentsResponse {
    /// The API's JSON, unchanged.
    Thread(serde_json::Value),
    Failure(ErrorResponse),
}

/// Write `value` as one compact JSON document on stdout.
pub fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer(&mut out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{resolve, ContentType};
    use serde_json::json;

    fn self_post(text: &str) -> PostRecord {
        PostRecord {
            title: "Ask me anything".to_string(),
            author: "someone".to_string(),
            subreddit: "rust".to_string(),
            permalink: "/r/rust/comments/abc/ask/".to_string(),
            url: "https://www.reddit.com/r/rust/comments/abc/ask/".to_string(),
            is_self: true,
            selftext: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_output_post_merges_descriptor() {
        let record = self_post("hello");
        let post = OutputPost::from_record(&record, resolve(&record));
        let value = serde_json::to_value(&post).unwrap();

        assert_eq!(value["permalink"], json!("https://reddit.com/r/rust/comments/abc/ask/"));
        assert_eq!(value["content_type"], json!("self"));
        assert_eq!(value["has_image"], json!(false));
        assert_eq!(value["selftext"], json!("hello"));
        assert!(value.get("media").is_none());
    }

    #[test]
    fn test_selftext_truncated_for_self_posts_only() {
        let long = "é".repeat(400);
        let record = self_post(&long);
        let post = OutputPost::from_record(&record, resolve(&record));
        assert_eq!(post.selftext.chars().count(), SELFTEXT_PREVIEW_CHARS);

        let link = PostRecord {
            is_self: false,
            ..record
        };
        let post = OutputPost::from_record(&link, MediaDescriptor::new(ContentType::Link, false));
        assert_eq!(post.selftext, "");
    }

    #[test]
    fn test_listing_failure_shape() {
        let value = serde_json::to_value(ListingResponse::failure("Network error: refused")).unwrap();
        assert_eq!(
            value,
            json!({
                "success": false,
                "error": "Network error: refused",
                "posts": [],
                "pagination": {"after": null, "before": null}
            })
        );
    }

    #[test]
    fn test_listing_success_has_no_error_key() {
        let response = ListingResponse::success(
            Vec::new(),
            Pagination {
                after: Some("t3_next".to_string()),
                before: None,
            },
        );
        let value = serde_json::to_value(response).unwrap();
        assert!(value.get("error").is_none());
        assert_eq!(value["pagination"]["after"], json!("t3_next"));
    }

    #[test]
    fn test_download_result_shapes() {
        let saved = DownloadResult::saved(Path::new("/tmp/pic.jpg"));
        assert_eq!(saved.filename.as_deref(), Some("pic.jpg"));

        let rejected = serde_json::to_value(DownloadResult::rejected()).unwrap();
        assert_eq!(rejected, json!({"success": false, "path": ""}));

        let failed = serde_json::to_value(DownloadResult::failed("HTTP 404: Not Found")).unwrap();
        assert_eq!(failed["error"], json!("HTTP 404: Not Found"));
    }

    #[test]
    fn test_gallery_result_shapes() {
        let failure = serde_json::to_value(GalleryResult::failure("No gallery images found")).unwrap();
        assert_eq!(
            failure,
            json!({"success": false, "message": "No gallery images found"})
        );

        let saved = GalleryResult::saved(Path::new("/tmp/g"), vec!["a.jpg".into()], 2);
        let value = serde_json::to_value(saved).unwrap();
        assert_eq!(value["folder"], json!("/tmp/g"));
        assert_eq!(value["files"], json!(["a.jpg"]));
        assert_eq!(value["count"], json!(1));
        assert_eq!(value["failed"], json!(2));
    }

    #[test]
    fn test_comments_passthrough_is_unchanged() {
        let thread = json!([{"kind": "Listing"}, {"kind": "Listing"}]);
        let value = serde_json::to_value(CommentsResponse::Thread(thread.clone())).unwrap();
        assert_eq!(value, thread);

        let failure = serde_json::to_value(CommentsResponse::Failure(ErrorResponse::new(
            "Invalid JSON response",
        )))
        .unwrap();
        assert_eq!(failure, json!({"success": false, "error": "Invalid JSON response"}));
    }
}
