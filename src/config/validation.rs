//! Configuration and command input validation.

use std::sync::LazyLock;

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;
use url::Url;

/// Largest page size the listing endpoint serves.
pub const MAX_LIMIT: u32 = 100;

/// Subreddit used when none is given.
pub const DEFAULT_SUBREDDIT: &str = "all";

/// Subreddit names, `+` multireddits and `-` exclusions such as `all-pics`.
static SUBREDDIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_+-]{1,100}$").unwrap());

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_base_url("api.base_url", &config.api.base_url)?;
    validate_base_url("api.comments_base_url", &config.api.comments_base_url)?;

    if config.api.user_agent.trim().is_empty() {
        return Err(Error::ConfigValidation {
            field: "api.user_agent".to_string(),
            message: "User agent cannot be empty".to_string(),
        });
    }

    if config.cache.max_thumbnail_bytes == 0 {
        return Err(Error::ConfigValidation {
            field: "cache.max_thumbnail_bytes".to_string(),
            message: "Thumbnail size limit must be greater than zero".to_string(),
        });
    }

    Ok(())
}

fn validate_base_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| Error::ConfigValidation {
        field: field.to_string(),
        message: format!("'{}' is not a valid URL: {}", value, e),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!("'{}' must use http or https", value),
        });
    }

    Ok(())
}

/// Normalize a subreddit argument.
///
/// Accepts `pics`, `r/pics`, `/r/pics/`, multireddits such as `pics+aww`
/// and exclusions such as `all-pics`.
/// An empty value selects `all`.
pub fn normalize_subreddit(input: &str) -> Result<String> {
    let trimmed = input.trim().trim_matches('/');
    let name = trimmed
        .strip_prefix("r/")
        .or_else(|| trimmed.strip_prefix("R/"))
        .unwrap_or(trimmed);

    if name.is_empty() {
        return Ok(DEFAULT_SUBREDDIT.to_string());
    }

    if !SUBREDDIT_PATTERN.is_match(name) {
        return Err(Error::ConfigValidation {
            field: "subreddit".to_string(),
            message: format!(
                "Subreddit '{}' contains invalid characters. Only alphanumeric, underscores, '+' and '-' allowed.",
                input
            ),
        });
    }

    Ok(name.to_string())
}

/// Clamp a requested page size into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_LIMIT)
}

/// Interpret a pagination cursor argument; `None` and blanks mean absent.
pub fn parse_cursor(input: Option<&str>) -> Option<String> {
    let value = input?.trim();
    if value.is_empty() || value == "None" || value == "null" {
        None
    } else {
        Some(value.to_string())
    }
}

/// Normalize a comment permalink to an absolute path starting with `/`.
///
/// Full URLs are reduced to their path so that any Reddit host can be pasted.
pub fn normalize_permalink(input: &str) -> Result<String> {
    let input = input.trim();

    let path = if input.starts_with("http://") || input.starts_with("https://") {
        Url::parse(input)?.path().to_string()
    } else {
        input.to_string()
    };

    if path.trim_matches('/').is_empty() {
        return Err(Error::ConfigValidation {
            field: "permalink".to_string(),
            message: "A post permalink is required".to_string(),
        });
    }

    if path.starts_with('/') {
        Ok(path)
    } else {
        Ok(format!("/{}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = Config::default();
        config.api.base_url = "old.reddit.com".to_string();
        assert!(validate_config(&config).is_err());

        config.api.base_url = "ftp://old.reddit.com".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_thumbnail_limit_rejected() {
        let mut config = Config::default();
        config.cache.max_thumbnail_bytes = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_normalize_subreddit() {
        assert_eq!(normalize_subreddit("pics").unwrap(), "pics");
        assert_eq!(normalize_subreddit("r/pics").unwrap(), "pics");
        assert_eq!(normalize_subreddit("/r/pics/").unwrap(), "pics");
        assert_eq!(normalize_subreddit("pics+aww").unwrap(), "pics+aww");
        assert_eq!(normalize_subreddit("").unwrap(), "all");
    }

    #[test]
    fn test_normalize_subreddit_keeps_exclusions() {
        assert_eq!(normalize_subreddit("all-pics").unwrap(), "all-pics");
        assert_eq!(normalize_subreddit("r/all-pics-aww").unwrap(), "all-pics-aww");
    }

    #[test]
    fn test_normalize_subreddit_rejects_paths() {
        assert!(normalize_subreddit("pics/../../api").is_err());
        assert!(normalize_subreddit("pics?x=1").is_err());
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(25), 25);
        assert_eq!(clamp_limit(500), 100);
    }

    #[test]
    fn test_parse_cursor() {
        assert_eq!(parse_cursor(None), None);
        assert_eq!(parse_cursor(Some("None")), None);
        assert_eq!(parse_cursor(Some("  ")), None);
        assert_eq!(parse_cursor(Some("t3_abc")), Some("t3_abc".to_string()));
    }

    #[test]
    fn test_normalize_permalink() {
        assert_eq!(
            normalize_permalink("r/rust/comments/abc/title/").unwrap(),
            "/r/rust/comments/abc/title/"
        );
        assert_eq!(
            normalize_permalink("/r/rust/comments/abc/title/").unwrap(),
            "/r/rust/comments/abc/title/"
        );
        assert_eq!(
            normalize_permalink("https://www.reddit.com/r/rust/comments/abc/title/?context=3")
                .unwrap(),
            "/r/rust/comments/abc/title/"
        );
    }

    #[test]
    fn test_normalize_permalink_empty() {
        assert!(normalize_permalink("").is_err());
        assert!(normalize_permalink("/").is_err());
    }
}
