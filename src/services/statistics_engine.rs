//! Statistics Engine: aggregate views over the watchlist.
//!
//! Everything here is a pure function of the watchlist entries, the metadata
//! the caller fetched for them (keyed by title id), and the current time.
//! Calendar months are taken in the time zone of that current time.
//! Nothing is persisted.

use std::collections::HashMap;
use std::fmt::Display;

use chrono::{DateTime, Datelike, TimeZone};

use crate::types::metadata::MetadataIndex;
use crate::types::statistics::{GenreCount, MonthCount, WatchStatistics, WatchTime};
use crate::types::watchlist::WatchlistEntry;

/// Genres kept in the frequency table.
pub const TOP_GENRES: usize = 8;
/// Entries kept in the top-rated list.
pub const TOP_RATED: usize = 5;
/// Minimum rating for the top-rated list.
pub const TOP_RATED_THRESHOLD: u8 = 8;

/// `round(100 * watched / total)`, rounding halves up. Zero for an empty list.
pub fn completion_percentage(watched: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let (watched, total) = (watched as u64, total as u64);
    ((200 * watched + total) / (2 * total)) as u32
}

/// Total runtime of watched titles whose metadata reports one.
pub fn total_watched_runtime(entries: &[WatchlistEntry], metadata: &MetadataIndex) -> WatchTime {
    let minutes: u64 = entries
        .iter()
        .filter(|e| e.watched)
        .filter_map(|e| metadata.get(&e.title_id)?.runtime)
        .map(u64::from)
        .sum();
    WatchTime::from_minutes(minutes)
}

/// Mean of the ratings that are set; unrated entries are left out entirely.
pub fn average_rating(entries: &[WatchlistEntry]) -> f64 {
    let ratings: Vec<u8> = entries.iter().filter_map(|e| e.rating).collect();
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: u32 = ratings.iter().map(|r| u32::from(*r)).sum();
    f64::from(sum) / ratings.len() as f64
}

/// Counts `keys` in first-seen order.
fn count_in_order<I>(keys: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for key in keys {
        match slots.get(&key) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                slots.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }
    counts
}

/// Genre tallies over watched titles, most frequent first, capped at [`TOP_GENRES`].
///
/// Ties keep the order in which the genres were first seen.
pub fn genre_frequency(entries: &[WatchlistEntry], metadata: &MetadataIndex) -> Vec<GenreCount> {
    let names = entries
        .iter()
        .filter(|e| e.watched)
        .filter_map(|e| metadata.get(&e.title_id))
        .flat_map(|m| m.genres.iter().map(|g| g.name.clone()));

    let mut counts = count_in_order(names);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(TOP_GENRES)
        .map(|(name, count)| GenreCount { name, count })
        .collect()
}

/// Watched titles bucketed by abbreviated month name of their watch date in `tz`.
///
/// Buckets appear in the order first encountered. Years are not distinguished.
pub fn monthly_histogram<Tz>(entries: &[WatchlistEntry], tz: &Tz) -> Vec<MonthCount>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let months = entries
        .iter()
        .filter(|e| e.watched)
        .filter_map(|e| e.watched_date)
        .map(|d| d.with_timezone(tz).format("%b").to_string());

    count_in_order(months)
        .into_iter()
        .map(|(month, count)| MonthCount { month, count })
        .collect()
}

/// Entries rated [`TOP_RATED_THRESHOLD`] or higher, best first, capped at [`TOP_RATED`].
pub fn top_rated(entries: &[WatchlistEntry]) -> Vec<WatchlistEntry> {
    let mut rated: Vec<&WatchlistEntry> = entries
        .iter()
        .filter(|e| e.rating.is_some_and(|r| r >= TOP_RATED_THRESHOLD))
        .collect();
    rated.sort_by(|a, b| b.rating.cmp(&a.rating));
    rated.into_iter().take(TOP_RATED).cloned().collect()
}

/// Entries whose watch date falls in the same calendar month as `now`, in `now`'s zone.
pub fn watched_this_month<Tz>(entries: &[WatchlistEntry], now: &DateTime<Tz>) -> usize
where
    Tz: TimeZone,
{
    let tz = now.timezone();
    entries
        .iter()
        .filter_map(|e| e.watched_date)
        .map(|d| d.with_timezone(&tz))
        .filter(|d| d.year() == now.year() && d.month() == now.month())
        .count()
}

/// Computes every aggregate at once.
pub fn compute_statistics<Tz>(
    entries: &[WatchlistEntry],
    metadata: &MetadataIndex,
    now: DateTime<Tz>,
) -> WatchStatistics
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let total_count = entries.len();
    let watched_count = entries.iter().filter(|e| e.watched).count();

    WatchStatistics {
        total_count,
        watched_count,
        unwatched_count: total_count - watched_count,
        completion_percentage: completion_percentage(watched_count, total_count),
        watch_time: total_watched_runtime(entries, metadata),
        average_rating: average_rating(entries),
        genre_frequency: genre_frequency(entries, metadata),
        monthly_histogram: monthly_histogram(entries, &now.timezone()),
        top_rated: top_rated(entries),
        watched_this_month: watched_this_month(entries, &now),
    }
}
