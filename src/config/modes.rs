//! Listing sort modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available listing sort modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Front page ordering (default).
    #[default]
    Hot,
    /// Newest first.
    New,
    /// Highest score.
    Top,
    /// Gaining traction.
    Rising,
}

impl SortMode {
    /// Path segment inserted after the subreddit, if any.
    ///
    /// `hot` is served from the subreddit root.
    pub fn path_segment(&self) -> Option<&'static str> {
        match self {
            SortMode::Hot => None,
            SortMode::New => Some("new"),
            SortMode::Top => Some("top"),
            SortMode::Rising => Some("rising"),
        }
    }

    /// Parse a sort token, treating anything unknown as `hot`.
    pub fn from_token(token: &str) -> Self {
        token.parse().unwrap_or_else(|e| {
            tracing::debug!("{}, falling back to hot", e);
            SortMode::Hot
        })
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Hot => write!(f, "hot"),
            SortMode::New => write!(f, "new"),
            SortMode::Top => write!(f, "top"),
            SortMode::Rising => write!(f, "rising"),
        }
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hot" => Ok(SortMode::Hot),
            "new" => Ok(SortMode::New),
            "top" => Ok(SortMode::Top),
            "rising" => Ok(SortMode::Rising),
            _ => Err(format!("Unknown sort mode: {}", s)),
        }
    }
}
