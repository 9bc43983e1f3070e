//! Command-line interface.

pub mod args;

pub use args::{names_subcommand, split_urls, Args, Command, ListingArgs};
