//! URL classification primitives and the content-type decision.

use url::Url;

use crate::api::PostRecord;
use crate::media::descriptor::ContentType;
use crate::media::tables::{
    ARTICLE_URL_FRAGMENTS, IMAGE_EXTENSIONS, IMAGE_EXTENSION_PATTERN, IMAGE_HOSTS,
    PLATFORM_URL_FRAGMENTS, VIDEO_EXTENSIONS, VIDEO_URL_FRAGMENTS,
};

/// Lowercased host and path of a URL.
///
/// Strings that do not parse as absolute URLs have no host and use
/// everything before `?` or `#` as the path.
fn host_and_path(url: &str) -> (String, String) {
    let lower = url.to_lowercase();
    match Url::parse(&lower) {
        Ok(parsed) => (
            parsed.host_str().unwrap_or_default().to_string(),
            parsed.path().to_string(),
        ),
        Err(_) => {
            let path = lower.split(['?', '#']).next().unwrap_or_default();
            (String::new(), path.to_string())
        }
    }
}

fn path_has_extension(path: &str, extensions: &[&str]) -> bool {
    extensions.iter().any(|ext| {
        path.strip_suffix(ext)
            .is_some_and(|rest| rest.ends_with('.'))
    })
}

/// Whether a URL points at an image, by extension or by image host.
pub fn is_image_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    let (host, path) = host_and_path(url);
    path_has_extension(&path, IMAGE_EXTENSIONS) || IMAGE_HOSTS.iter().any(|h| host.contains(h))
}

/// Whether a URL points at a video, by extension or by known video host.
pub fn is_video_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    let (_, path) = host_and_path(url);
    if path_has_extension(&path, VIDEO_EXTENSIONS) {
        return true;
    }

    let lower = url.to_lowercase();
    VIDEO_URL_FRAGMENTS.iter().any(|f| lower.contains(f))
}

/// Best-effort guess that an external link is an article.
///
/// Substring matching is intentionally loose; false positives are accepted.
pub fn is_article_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    if PLATFORM_URL_FRAGMENTS.iter().any(|f| url.contains(f)) {
        return false;
    }

    if is_image_url(url) || is_video_url(url) {
        return false;
    }

    let lower = url.to_lowercase();
    ARTICLE_URL_FRAGMENTS.iter().any(|f| lower.contains(f))
}

/// Drop anything after the first image extension that is followed by a
/// query, parameter or the end of the string.
pub fn clean_image_url(url: &str) -> String {
    IMAGE_EXTENSION_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|ext| url[..ext.end()].to_string())
        .unwrap_or_else(|| url.to_string())
}

/// Classify a post. The order of checks is significant: self posts carry
/// their own permalink as `url` and must never be reclassified.
pub fn content_type(record: &PostRecord) -> ContentType {
    let url = record.url.as_str();

    if record.is_self {
        ContentType::SelfText
    } else if is_video_url(url) {
        ContentType::Video
    } else if is_image_url(url) {
        ContentType::Image
    } else if is_article_url(url) {
        ContentType::Article
    } else {
        ContentType::Link
    }
}
