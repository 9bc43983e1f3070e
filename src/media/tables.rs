//! Static host, extension and URL template tables used by classification.

use std::sync::LazyLock;

use regex::Regex;

/// Path extensions treated as direct images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Hosts that serve bare images even without an extension.
/// Matched as a substring of the URL host.
pub const IMAGE_HOSTS: &[&str] = &["i.redd.it", "i.imgur.com", "imgur.com", "i.postimg.cc"];

/// Path extensions treated as direct videos.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "avi", "mkv", "m4v"];

/// Fragments that mark a video URL anywhere in the lowercased URL.
pub const VIDEO_URL_FRAGMENTS: &[&str] = &[
    "v.redd.it",
    "v.reddit.com",
    "youtube.com",
    "youtu.be",
    "streamable.com",
    "gfycat.com",
    "redgifs.com",
    "imgur.com/a/",
    "clips.twitch.tv",
    "vimeo.com",
];

/// Fragments identifying Reddit's own links, never classified as articles.
pub const PLATFORM_URL_FRAGMENTS: &[&str] = &["reddit.com", "redd.it"];

/// Loose indicators that an external link is an article.
pub const ARTICLE_URL_FRAGMENTS: &[&str] = &[
    ".com",
    ".org",
    ".net",
    ".edu",
    ".gov",
    ".co.uk",
    ".io",
    "news",
    "blog",
    "article",
    "medium.com",
    "substack.com",
];

/// Platform thumbnail values that mean "no thumbnail".
pub const NO_THUMBNAIL_MARKERS: &[&str] = &["self", "default", "spoiler", "nsfw"];

/// URL fragment marking a gallery post.
pub const GALLERY_URL_FRAGMENT: &str = "reddit.com/gallery/";

/// Host of resized gallery previews that can be rewritten to direct media.
pub const GALLERY_PREVIEW_HOST: &str = "preview.redd.it";

/// Direct media template for gallery items: `{id}` and `{ext}` are substituted.
pub const GALLERY_DIRECT_TEMPLATE: &str = "https://i.redd.it/{id}.{ext}";

/// Extension used when a cached file's URL has no recognized one.
pub const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

/// Extensions kept when naming cached thumbnails.
pub const CACHE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Trailing image extension followed by a query, parameter or end of string.
pub static IMAGE_EXTENSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpe?g|png|gif|webp|bmp)(?:[?&]|$)").unwrap());

/// Derives a thumbnail for a video host from the id embedded in its URL.
#[derive(Debug)]
pub struct VideoThumbnailRule {
    /// Host name, used in logs.
    pub name: &'static str,
    /// The rule applies only when the URL contains one of these.
    pub url_fragments: &'static [&'static str],
    /// Capture group 1 is the video id.
    pub pattern: Regex,
    /// Thumbnail URL; `{id}` is substituted.
    pub template: &'static str,
}

impl VideoThumbnailRule {
    /// Build the thumbnail URL for `url` if this rule recognizes it.
    pub fn thumbnail_for(&self, url: &str) -> Option<String> {
        if !self.url_fragments.iter().any(|f| url.contains(f)) {
            return None;
        }

        let id = self.pattern.captures(url)?.get(1)?.as_str();
        Some(self.template.replace("{id}", id))
    }
}

/// Video thumbnail rules, tried in order.
pub static VIDEO_THUMBNAIL_RULES: LazyLock<Vec<VideoThumbnailRule>> = LazyLock::new(|| {
    vec![
        VideoThumbnailRule {
            name: "redgifs",
            url_fragments: &["redgifs.com"],
            pattern: Regex::new(r"/watch/([^/?#]+)").unwrap(),
            template: "https://thumbs2.redgifs.com/{id}-mobile.jpg",
        },
        VideoThumbnailRule {
            name: "youtube",
            url_fragments: &["youtube.com", "youtu.be"],
            pattern: Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([a-zA-Z0-9_-]{11})")
                .unwrap(),
            template: "https://img.youtube.com/vi/{id}/mqdefault.jpg",
        },
    ]
});
