//! Path and directory management.

use std::path::{Path, PathBuf};

use directories::{ProjectDirs, UserDirs};

use crate::config::Config;
use crate::error::Result;

/// Legacy cache folder under the home directory.
const HOME_CACHE_FOLDER: &str = ".reddit_viewer_cache";

/// Resolve the thumbnail cache directory.
///
/// Uses the configured directory, then the platform cache dir, then a
/// dot-folder in the home directory.
pub fn get_cache_dir(config: &Config) -> PathBuf {
    if let Some(dir) = &config.cache.directory {
        return dir.clone();
    }

    if let Some(dirs) = ProjectDirs::from("", "", "reddit-viewer") {
        return dirs.cache_dir().to_path_buf();
    }

    UserDirs::new()
        .map(|u| u.home_dir().join(HOME_CACHE_FOLDER))
        .unwrap_or_else(|| std::env::temp_dir().join(HOME_CACHE_FOLDER))
}

/// Create the cache directory, falling back to the temp dir if that fails.
pub fn prepare_cache_dir(dir: &Path) -> PathBuf {
    match std::fs::create_dir_all(dir) {
        Ok(()) => {
            tracing::debug!("Using cache directory: {}", dir.display());
            dir.to_path_buf()
        }
        Err(e) => {
            let fallback = std::env::temp_dir();
            tracing::warn!(
                "Could not create cache dir {}: {}; using {}",
                dir.display(),
                e,
                fallback.display()
            );
            fallback
        }
    }
}

/// Resolve where full images and galleries are saved.
///
/// Uses the configured directory, then the user's Desktop, then
/// `~/Desktop`, then the current directory.
pub fn get_download_dir(config: &Config) -> PathBuf {
    if let Some(dir) = &config.options.download_directory {
        return dir.clone();
    }

    if let Some(dirs) = UserDirs::new() {
        if let Some(desktop) = dirs.desktop_dir() {
            return desktop.to_path_buf();
        }
        return dirs.home_dir().join("Desktop");
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_dirs_win() {
        let mut config = Config::default();
        config.cache.directory = Some(PathBuf::from("/tmp/thumbs"));
        config.options.download_directory = Some(PathBuf::from("/tmp/saved"));

        assert_eq!(get_cache_dir(&config), PathBuf::from("/tmp/thumbs"));
        assert_eq!(get_download_dir(&config), PathBuf::from("/tmp/saved"));
    }

    #[test]
    fn test_prepare_cache_dir_creates() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("a").join("b");
        assert_eq!(prepare_cache_dir(&cache), cache);
        assert!(cache.is_dir());
    }

    #[test]
    fn test_prepare_cache_dir_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let result = prepare_cache_dir(&blocker.join("cache"));
        assert_eq!(result, std::env::temp_dir());
    }

    #[test]
    fn test_ensure_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("x").join("y");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }
}
