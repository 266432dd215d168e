use serde::Serialize;

use super::watchlist::WatchlistEntry;

/// Watched runtime split into whole hours and remaining minutes.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct WatchTime {
    pub hours: u64,
    pub minutes: u64,
}

impl WatchTime {
    pub fn from_minutes(total: u64) -> Self {
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }
}

/// How many watched titles carry a given genre.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenreCount {
    pub name: String,
    pub count: usize,
}

/// How many titles were watched in a given month.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthCount {
    pub month: String,
    pub count: usize,
}

/// Aggregate view over the watchlist. Recomputed on demand, never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WatchStatistics {
    pub total_count: usize,
    pub watched_count: usize,
    pub unwatched_count: usize,
    pub completion_percentage: u32,
    pub watch_time: WatchTime,
    pub average_rating: f64,
    pub genre_frequency: Vec<GenreCount>,
    pub monthly_histogram: Vec<MonthCount>,
    pub top_rated: Vec<WatchlistEntry>,
    pub watched_this_month: usize,
}

impl WatchStatistics {
    /// Average rating rendered with one decimal, e.g. `"8.0"`.
    pub fn average_rating_display(&self) -> String {
        format!("{:.1}", self.average_rating)
    }
}
