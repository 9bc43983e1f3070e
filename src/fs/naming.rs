//! Filename generation and manipulation.

use std::path::{Path, PathBuf};

use md5::{Digest, Md5};
use url::Url;

use crate::error::{Error, Result};
use crate::media::clean_image_url;
use crate::media::tables::{CACHE_EXTENSIONS, DEFAULT_IMAGE_EXTENSION};

/// Validate and sanitize a filename by removing or replacing invalid characters.
///
/// Returns an error if the filename contains path traversal patterns.
pub fn sanitize_filename(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Turn a post title into a filename-safe fragment.
///
/// Keeps the first `max_chars` characters, drops anything that is not a
/// word character, whitespace or hyphen, and joins words with underscores.
pub fn safe_title(title: &str, max_chars: usize) -> String {
    let kept: String = title
        .chars()
        .take(max_chars)
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    kept.trim().replace(' ', "_")
}

/// First 8 hex characters of the MD5 of `text`.
pub fn short_hash(text: &str) -> String {
    let digest = Md5::digest(text.as_bytes());
    format!("{:x}", digest)[..8].to_string()
}

/// Last path segment of a URL when it looks like a filename (has a dot).
pub fn filename_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.next_back()?;

    if !segment.contains('.') {
        return None;
    }

    sanitize_filename(segment).ok()
}

/// Cache filename for a media URL: `reddit_<hash>.<ext>`.
///
/// The hash covers the cleaned URL so query variations of one image share
/// an entry.
pub fn cache_filename(url: &str) -> String {
    let cleaned = clean_image_url(url);
    format!("reddit_{}.{}", short_hash(&cleaned), cache_extension(&cleaned))
}

fn cache_extension(cleaned_url: &str) -> &'static str {
    let lower = cleaned_url.to_lowercase();
    let path = Url::parse(&lower)
        .map(|u| u.path().to_string())
        .unwrap_or_default();

    path.rsplit_once('.')
        .and_then(|(_, ext)| CACHE_EXTENSIONS.iter().find(|known| **known == ext))
        .copied()
        .unwrap_or(DEFAULT_IMAGE_EXTENSION)
}

/// Generate a unique path by appending a number if the path exists.
///
/// `photo.jpg` becomes `photo_1.jpg`, then `photo_2.jpg`; a directory
/// `gallery` becomes `gallery_1`.
pub fn make_unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parent = path.parent().unwrap_or(Path::new("."));

    let mut counter = 1;
    loop {
        let new_name = if ext.is_empty() {
            format!("{}_{}", stem, counter)
        } else {
            format!("{}_{}.{}", stem, counter, ext)
        };

        let new_path = parent.join(&new_name);
        if !new_path.exists() {
            return new_path;
        }

        counter += 1;
        if counter > 1000 {
            // Safety limit
            return new_path;
        }
    }
}
