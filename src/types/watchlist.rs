use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A title the user has bookmarked.
///
/// Field names on the wire follow the records the web client keeps in
/// browser storage (`movieId`, `addedAt`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    #[serde(rename = "movieId")]
    pub title_id: u64,
    pub watched: bool,
    pub added_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watched_date: Option<DateTime<Utc>>,
}

impl WatchlistEntry {
    /// Creates a fresh, unwatched entry stamped with `added_at`.
    pub fn new(title_id: u64, added_at: DateTime<Utc>) -> Self {
        Self {
            title_id,
            watched: false,
            added_at,
            rating: None,
            notes: None,
            watched_date: None,
        }
    }
}

/// Which entries a watchlist listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchFilter {
    #[default]
    All,
    Watched,
    Unwatched,
}

impl WatchFilter {
    /// Returns true if `entry` passes this filter.
    pub fn matches(&self, entry: &WatchlistEntry) -> bool {
        match self {
            WatchFilter::All => true,
            WatchFilter::Watched => entry.watched,
            WatchFilter::Unwatched => !entry.watched,
        }
    }
}

/// Lowest rating a user can give.
pub const MIN_RATING: u8 = 1;
/// Highest rating a user can give.
pub const MAX_RATING: u8 = 10;
