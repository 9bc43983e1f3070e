//! Media descriptor types produced by classification.

use serde::Serialize;

use crate::api::PostRecord;
use crate::media::classify::content_type;

/// What a post links to. Exactly one holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Text post.
    #[serde(rename = "self")]
    SelfText,
    Video,
    Image,
    Article,
    Link,
}

/// Where the resolved image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    #[default]
    None,
    Video,
    Article,
    Gallery,
    Direct,
    Preview,
    Thumbnail,
}

/// Structured media information derived from a single post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaDescriptor {
    pub has_image: bool,
    pub image_url: Option<String>,
    /// Preview URL, replaced by a local path once cached.
    pub thumbnail: Option<String>,
    pub image_type: ImageType,
    pub content_type: ContentType,
    pub gallery_images: Vec<String>,
    pub is_video: bool,
    pub video_url: Option<String>,
    pub is_article: bool,
    pub article_url: Option<String>,
    pub is_nsfw: bool,
}

impl MediaDescriptor {
    /// A descriptor with no media resolved.
    pub fn new(content_type: ContentType, is_nsfw: bool) -> Self {
        Self {
            has_image: false,
            image_url: None,
            thumbnail: None,
            image_type: ImageType::None,
            content_type,
            gallery_images: Vec::new(),
            is_video: false,
            video_url: None,
            is_article: false,
            article_url: None,
            is_nsfw,
        }
    }

    /// Classification only, used by simple mode.
    pub fn text_only(record: &PostRecord) -> Self {
        Self::new(content_type(record), record.over_18)
    }

    /// Set the thumbnail, keeping `has_image` in step with it.
    pub(crate) fn set_thumbnail(&mut self, thumbnail: Option<String>) {
        if let Some(thumbnail) = thumbnail.filter(|t| !t.is_empty()) {
            self.thumbnail = Some(thumbnail);
            self.has_image = true;
        }
    }

    /// Whether the thumbnail is still a remote URL that can be cached.
    pub fn has_remote_thumbnail(&self) -> bool {
        self.has_image
            && self
                .thumbnail
                .as_deref()
                .is_some_and(|t| t.starts_with("http"))
    }
}
