//! Fetch module for the listing and comment commands.
//!
//! Both commands are fail-soft: every outcome, including network and
//! decode failures, becomes a response document.

pub mod comments;
pub mod listing;

#[cfg(test)]
pub(crate) mod test_server;

pub use comments::fetch_comments;
pub use listing::{cache_thumbnails, fetch_listing};
