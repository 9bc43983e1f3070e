//! reddit-fetcher - CLI entry point.
//!
//! Prints exactly one JSON document on stdout; logs go to stderr.

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use reddit_fetcher::{
    api::{ListingQuery, RedditApi},
    cli::{names_subcommand, split_urls, Args, Command},
    config::{validate_config, Config},
    download::DesktopDownloader,
    error::{exit_codes, Result},
    fetch::{cache_thumbnails, fetch_comments, fetch_listing},
    output::{
        print_error, print_info, print_success, print_warning, write_json, CommentsResponse,
        DownloadResult, ErrorResponse, GalleryResult, ListingResponse,
    },
};

/// Whatever a command produced, serialized as-is.
#[derive(Serialize)]
#[serde(untagged)]
enum Response {
    Listing(ListingResponse),
    Comments(CommentsResponse),
    Download(DownloadResult),
    Gallery(GalleryResult),
    Error(ErrorResponse),
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let _ = e.print();
                return ExitCode::from(exit_codes::SUCCESS);
            }
            let message = parse_error_message(&e);
            let raw = std::env::args_os().map(|arg| arg.to_string_lossy().into_owned());
            return emit(&if names_subcommand(raw) {
                Response::Error(ErrorResponse::new(message))
            } else {
                Response::Listing(ListingResponse::failure(message))
            });
        }
    };

    // Set up logging on stderr; stdout is reserved for the result
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let response = match run(&args).await {
        Ok(response) => response,
        Err(e) => {
            print_error(&e.to_string());
            match args.command {
                None => Response::Listing(ListingResponse::failure(e.to_string())),
                Some(_) => Response::Error(ErrorResponse::new(e.to_string())),
            }
        }
    };

    emit(&response)
}

async fn run(args: &Args) -> Result<Response> {
    // Load configuration
    let mut config = Config::load_or_default(&args.config)?;
    args.merge_into_config(&mut config);
    validate_config(&config)?;

    let quiet = config.options.quiet;
    if !quiet && args.config.exists() {
        print_info(&format!("Loaded configuration from {}", args.config.display()));
    }

    let api = RedditApi::new(&config.api)?;

    let response = match &args.command {
        None => {
            let listing = &args.listing;
            let query = ListingQuery::new(
                &listing.subreddit,
                listing.sort_mode(),
                listing.limit,
                listing.after(),
                listing.before(),
            )?;

            let mut response = fetch_listing(&api, &config, &query).await;
            cache_thumbnails(&api, &config, &mut response).await;
            Response::Listing(response)
        }
        Some(Command::FetchComments { permalink }) => {
            Response::Comments(fetch_comments(&api, permalink).await)
        }
        Some(Command::DownloadFullImage { url, title }) => {
            let result = DesktopDownloader::from_config(&api, &config)
                .download_image(url, title)
                .await;
            if result.success && !quiet {
                print_success(&format!("Saved {}", result.path));
            }
            Response::Download(result)
        }
        Some(Command::DownloadGallery { urls, title }) => {
            let result = DesktopDownloader::from_config(&api, &config)
                .download_gallery(&split_urls(urls), title)
                .await;
            if let (Some(folder), Some(failed)) = (&result.folder, result.failed) {
                if failed > 0 && !quiet {
                    print_warning(&format!("{} image(s) could not be saved to {}", failed, folder));
                }
            }
            Response::Gallery(result)
        }
    };

    Ok(response)
}

/// Write the result document, exiting non-zero only if stdout failed.
fn emit(response: &Response) -> ExitCode {
    match write_json(response) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(e) => {
            print_error(&format!("Could not write output: {}", e));
            ExitCode::from(exit_codes::OUTPUT_ERROR)
        }
    }
}

/// First line of a clap error, without its `error:` prefix.
fn parse_error_message(e: &clap::Error) -> String {
    let rendered = e.to_string();
    let line = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error:")
        .trim();

    if line.is_empty() {
        "Invalid arguments".to_string()
    } else {
        line.to_string()
    }
}
