//! API response type definitions.
//!
//! Reddit omits or nulls fields freely, so every field here is optional on
//! the wire and falls back to its default.

use serde::{Deserialize, Deserializer};

/// Generic `{kind, data}` wrapper used by every Reddit object.
#[derive(Debug, Deserialize)]
pub struct Thing<T> {
    #[serde(default)]
    pub kind: Option<String>,
    pub data: T,
}

/// One page of a subreddit listing.
#[derive(Debug, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub children: Vec<Thing<PostRecord>>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
}

/// A post as returned by the listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostRecord {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default = "deleted_author", deserialize_with = "nullable_author")]
    pub author: String,
    #[serde(default, deserialize_with = "nullable")]
    pub subreddit: String,
    #[serde(default, deserialize_with = "nullable")]
    pub score: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub num_comments: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub permalink: String,
    #[serde(default, deserialize_with = "nullable")]
    pub is_self: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub selftext: String,
    #[serde(default, deserialize_with = "nullable")]
    pub created_utc: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub over_18: bool,
    /// Platform thumbnail: a URL or one of the no-thumbnail markers.
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub is_gallery: bool,
    /// Gallery media in API order.
    #[serde(default, deserialize_with = "ordered_media_metadata")]
    pub media_metadata: Option<Vec<MediaMetadataEntry>>,
    #[serde(default)]
    pub preview: Option<Preview>,
}

/// One gallery item from `media_metadata`, keyed by its media id.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaMetadataEntry {
    pub id: String,
    /// MIME hint such as `image/png`.
    pub mime: Option<String>,
    /// Full-resolution source URL, still HTML-escaped.
    pub source_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMediaMetadata {
    #[serde(default, rename = "m")]
    mime: Option<String>,
    #[serde(default, rename = "s")]
    source: Option<RawMediaSource>,
}

#[derive(Debug, Deserialize)]
struct RawMediaSource {
    #[serde(default)]
    u: Option<String>,
}

/// Reddit-processed preview images.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Preview {
    #[serde(default, deserialize_with = "nullable")]
    pub images: Vec<PreviewImage>,
}

/// A preview image with its downscaled variants.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewImage {
    #[serde(default)]
    pub source: Option<ImageVariant>,
    /// Downscaled variants, smallest first.
    #[serde(default, deserialize_with = "nullable")]
    pub resolutions: Vec<ImageVariant>,
}

/// One rendition of a preview image.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageVariant {
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub width: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub height: u32,
}

fn deleted_author() -> String {
    "[deleted]".to_string()
}

/// Treat an explicit `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_author<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(deleted_author))
}

/// Read `media_metadata` into a list that keeps the API's key order.
///
/// Entries that do not match the expected shape (failed uploads, unknown
/// media kinds) are kept without a source URL rather than failing the post.
fn ordered_media_metadata<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Vec<MediaMetadataEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = Option::<serde_json::Map<String, serde_json::Value>>::deserialize(deserializer)?;

    Ok(map.map(|map| {
        map.into_iter()
            .map(|(id, value)| {
                let raw = serde_json::from_value::<RawMediaMetadata>(value).ok();
                let (mime, source_url) = match raw {
                    Some(raw) => (raw.mime, raw.source.and_then(|s| s.u)),
                    None => (None, None),
                };
                MediaMetadataEntry {
                    id,
                    mime,
                    source_url,
                }
            })
            .collect()
    }))
}
