//! Command-line argument definitions using clap.

use clap::{Args as ClapArgs, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{parse_cursor, Config, SortMode};

/// Reddit JSON fetcher for the Reddit viewer front end.
#[derive(Parser, Debug)]
#[command(
    name = "reddit-fetcher",
    version,
    about = "Fetch Reddit listings and comments as JSON",
    long_about = "Fetches a subreddit listing, classifies each post's media and prints one JSON \
                  document on stdout.\n\n\
                  Subcommands fetch a comment thread or save full-size images and galleries."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub listing: ListingArgs,

    /// Path to configuration file.
    #[arg(long, global = true, default_value = "reddit-fetcher.toml")]
    pub config: PathBuf,

    /// Text-only listing: classify posts but skip media resolution and thumbnails.
    #[arg(long, global = true)]
    pub simple: bool,

    /// Don't cache thumbnails locally.
    #[arg(long, global = true)]
    pub no_thumbnails: bool,

    /// Thumbnail cache directory.
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Directory for full-size images and galleries (default: Desktop).
    #[arg(long, global = true)]
    pub download_dir: Option<PathBuf>,

    /// Hide progress bars and batch summaries.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Positional arguments of the default listing fetch.
#[derive(ClapArgs, Debug, Clone)]
pub struct ListingArgs {
    /// Subreddit name, with or without the `r/` prefix.
    #[arg(default_value = "all")]
    pub subreddit: String,

    /// Sort order: hot, new, top or rising. Anything else means hot.
    #[arg(default_value = "hot")]
    pub sort: String,

    /// Posts per page, clamped to 1..=100.
    #[arg(default_value_t = 10)]
    pub limit: u32,

    /// Fetch the page after this post (`None` means absent).
    pub after: Option<String>,

    /// Fetch the page before this post (`None` means absent).
    pub before: Option<String>,
}

impl ListingArgs {
    pub fn sort_mode(&self) -> SortMode {
        SortMode::from_token(&self.sort)
    }

    pub fn after(&self) -> Option<String> {
        parse_cursor(self.after.as_deref())
    }

    pub fn before(&self) -> Option<String> {
        parse_cursor(self.before.as_deref())
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch a comment thread and print it unchanged.
    #[command(name = "fetch_comments")]
    FetchComments {
        /// Post permalink, e.g. `/r/rust/comments/abc/title/`.
        permalink: String,
    },

    /// Save a full-size image to the download directory.
    #[command(name = "download_full_image")]
    DownloadFullImage {
        #[arg(default_value = "")]
        url: String,

        /// Post title, used when the URL has no filename.
        #[arg(default_value = "")]
        title: String,
    },

    /// Save every image of a gallery into a new folder.
    #[command(name = "download_gallery")]
    DownloadGallery {
        /// Comma-separated image URLs.
        #[arg(default_value = "")]
        urls: String,

        #[arg(default_value = "Gallery")]
        title: String,
    },
}

/// Split a comma-separated URL list, dropping blanks.
pub fn split_urls(urls: &str) -> Vec<String> {
    urls.split(',')
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether the first positional token of a raw command line is a subcommand
/// name. Used to pick the failure shape when parsing fails.
pub fn names_subcommand<I, S>(raw: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let command = Args::command();
    let subcommands: Vec<&str> = command.get_subcommands().map(|c| c.get_name()).collect();
    let valued_flags: Vec<String> = command
        .get_arguments()
        .filter(|arg| !arg.is_positional() && arg.get_action().takes_values())
        .flat_map(|arg| {
            arg.get_long()
                .map(|long| format!("--{}", long))
                .into_iter()
                .chain(arg.get_short().map(|short| format!("-{}", short)))
        })
        .collect();

    let mut tokens = raw.into_iter().skip(1);
    while let Some(token) = tokens.next() {
        let token = token.as_ref();
        if token == "--" {
            return false;
        }
        if token.starts_with('-') {
            if valued_flags.iter().any(|flag| flag == token) {
                tokens.next();
            }
            continue;
        }
        return subcommands.contains(&token);
    }
    false
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(dir) = &self.cache_dir {
            config.cache.directory = Some(dir.clone());
        }

        if let Some(dir) = &self.download_dir {
            config.options.download_directory = Some(dir.clone());
        }

        // Boolean flags (only override if set to non-default)
        if self.simple {
            config.options.simple_mode = true;
        }

        if self.no_thumbnails {
            config.options.download_thumbnails = false;
        }

        if self.quiet {
            config.options.quiet = true;
        }
    }
}
