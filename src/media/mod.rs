//! Media module for post classification and media resolution.

pub mod classify;
pub mod descriptor;
pub mod resolver;
pub mod tables;
pub mod thumbnail;

pub use classify::{clean_image_url, content_type, is_article_url, is_image_url, is_video_url};
pub use descriptor::{ContentType, ImageType, MediaDescriptor};
pub use resolver::{describe, resolve};
pub use thumbnail::platform_thumbnail;
