//! Media resolution: picks the best image and thumbnail for a post.

use crate::api::{MediaMetadataEntry, PostRecord, PreviewImage};
use crate::media::classify::{clean_image_url, content_type, is_image_url};
use crate::media::descriptor::{ContentType, ImageType, MediaDescriptor};
use crate::media::tables::{
    GALLERY_DIRECT_TEMPLATE, GALLERY_PREVIEW_HOST, GALLERY_URL_FRAGMENT, VIDEO_THUMBNAIL_RULES,
};
use crate::media::thumbnail::platform_thumbnail;

/// Narrowest preview resolution acceptable as a list thumbnail.
pub const MIN_THUMBNAIL_WIDTH: u32 = 150;

/// Describe a post, skipping media resolution in simple mode.
pub fn describe(record: &PostRecord, simple: bool) -> MediaDescriptor {
    if simple {
        MediaDescriptor::text_only(record)
    } else {
        resolve(record)
    }
}

/// Resolve a post's media through the fallback cascade.
///
/// Videos and articles return from their own branch whether or not a
/// thumbnail was found. Everything else tries gallery, direct image,
/// preview and finally the bare platform thumbnail.
pub fn resolve(record: &PostRecord) -> MediaDescriptor {
    let url = record.url.as_str();
    let platform = platform_thumbnail(record.thumbnail.as_deref());
    let mut descriptor = MediaDescriptor::new(content_type(record), record.over_18);

    match descriptor.content_type {
        ContentType::Video => {
            descriptor.is_video = true;
            descriptor.video_url = Some(url.to_string());
            descriptor.image_type = ImageType::Video;
            let thumbnail = platform
                .map(str::to_string)
                .or_else(|| video_thumbnail(url));
            descriptor.set_thumbnail(thumbnail);
            return descriptor;
        }
        ContentType::Article => {
            descriptor.is_article = true;
            descriptor.article_url = Some(url.to_string());
            descriptor.image_type = ImageType::Article;
            // Pages are not scraped for og:image; only the platform thumbnail is used.
            descriptor.set_thumbnail(platform.map(str::to_string));
            return descriptor;
        }
        _ => {}
    }

    if let Some(images) = gallery_images(record) {
        let first = images[0].clone();
        descriptor.image_url = Some(first.clone());
        descriptor.image_type = ImageType::Gallery;
        descriptor.set_thumbnail(Some(platform.map(str::to_string).unwrap_or(first)));
        descriptor.gallery_images = images;
        return descriptor;
    }

    if is_image_url(url) {
        let cleaned = clean_image_url(url);
        descriptor.image_url = Some(cleaned.clone());
        descriptor.image_type = ImageType::Direct;
        descriptor.set_thumbnail(Some(platform.map(str::to_string).unwrap_or(cleaned)));
    } else if let Some((image_url, thumbnail)) = preview_image(record) {
        descriptor.image_url = Some(image_url);
        descriptor.image_type = ImageType::Preview;
        descriptor.set_thumbnail(Some(thumbnail));
    } else if let Some(thumbnail) = platform {
        descriptor.image_url = Some(thumbnail.to_string());
        descriptor.image_type = ImageType::Thumbnail;
        descriptor.set_thumbnail(Some(thumbnail.to_string()));
    }

    descriptor
}

/// Synthesize a thumbnail from a known video host's URL.
fn video_thumbnail(url: &str) -> Option<String> {
    VIDEO_THUMBNAIL_RULES.iter().find_map(|rule| {
        let thumbnail = rule.thumbnail_for(url)?;
        tracing::debug!("Derived {} thumbnail for {}", rule.name, url);
        Some(thumbnail)
    })
}

/// Collect gallery images in API order. `None` when the post is not a
/// gallery or no entry has a usable source.
fn gallery_images(record: &PostRecord) -> Option<Vec<String>> {
    let is_gallery = record.is_gallery || record.url.contains(GALLERY_URL_FRAGMENT);
    if !is_gallery {
        return None;
    }

    let images: Vec<String> = record
        .media_metadata
        .as_ref()?
        .iter()
        .filter_map(gallery_image_url)
        .collect();

    if images.is_empty() {
        None
    } else {
        Some(images)
    }
}

/// Direct URL for one gallery entry.
///
/// Resized previews are rewritten to the direct media host when the entry
/// carries a MIME hint to take the extension from.
fn gallery_image_url(entry: &MediaMetadataEntry) -> Option<String> {
    let source = unescape_amp(entry.source_url.as_deref()?);
    if source.is_empty() {
        return None;
    }

    if source.contains(GALLERY_PREVIEW_HOST) {
        let ext = entry
            .mime
            .as_deref()
            .and_then(|mime| mime.rsplit('/').next())
            .filter(|ext| !ext.is_empty());

        if let Some(ext) = ext {
            return Some(
                GALLERY_DIRECT_TEMPLATE
                    .replace("{id}", &entry.id)
                    .replace("{ext}", ext),
            );
        }
    }

    Some(source)
}

/// Full image and thumbnail from the first preview image.
fn preview_image(record: &PostRecord) -> Option<(String, String)> {
    let first: &PreviewImage = record.preview.as_ref()?.images.first()?;

    let image_url = first
        .source
        .as_ref()
        .map(|source| unescape_amp(&source.url))
        .filter(|url| !url.is_empty())?;

    let resolutions: Vec<_> = first
        .resolutions
        .iter()
        .filter(|r| !r.url.is_empty())
        .collect();

    let thumbnail = resolutions
        .iter()
        .find(|r| r.width >= MIN_THUMBNAIL_WIDTH)
        .or_else(|| resolutions.first())
        .map(|r| unescape_amp(&r.url))
        .unwrap_or_else(|| image_url.clone());

    Some((image_url, thumbnail))
}

/// Undo the HTML escaping Reddit applies to URLs in JSON.
fn unescape_amp(url: &str) -> String {
    url.replace("&amp;", "&")
}
