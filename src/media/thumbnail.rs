//! Platform thumbnail normalization.

use crate::media::tables::NO_THUMBNAIL_MARKERS;

/// The platform-provided thumbnail, if it is a usable absolute URL.
///
/// Reddit puts marker words (`self`, `default`, `spoiler`, `nsfw`) in the
/// thumbnail field when there is no image; those and any other non-URL
/// value map to `None`.
pub fn platform_thumbnail(raw: Option<&str>) -> Option<&str> {
    let raw = raw?.trim();

    if raw.is_empty() || NO_THUMBNAIL_MARKERS.contains(&raw) || !raw.starts_with("http") {
        return None;
    }

    Some(raw)
}
