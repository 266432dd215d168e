//! Watchlist Manager for cinetrack.
//!
//! Implements `WatchlistManagerTrait`: bookmark toggling, watched state, ratings,
//! notes and watch dates. Every mutation writes the whole list through to the
//! key-value store before returning.

use std::collections::HashSet;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::database::codec;
use crate::database::kv_store::{KeyValueStore, WATCHLIST_KEY};
use crate::types::errors::{StorageError, WatchlistError};
use crate::types::watchlist::{WatchFilter, WatchlistEntry, MAX_RATING, MIN_RATING};

/// Trait defining watchlist operations.
///
/// Mutations on a title that is not bookmarked are no-ops, reported through the
/// return value rather than an error.
pub trait WatchlistManagerTrait {
    /// Adds the title if absent, removes it if present. Returns whether it is bookmarked afterwards.
    fn toggle_bookmark(&mut self, title_id: u64) -> Result<bool, WatchlistError>;
    /// Flips the watched flag. Returns the new flag, or `None` if the title is not bookmarked.
    fn toggle_watched(&mut self, title_id: u64) -> Result<Option<bool>, WatchlistError>;
    fn is_bookmarked(&self, title_id: u64) -> bool;
    fn is_watched(&self, title_id: u64) -> bool;
    fn set_rating(&mut self, title_id: u64, rating: u8) -> Result<bool, WatchlistError>;
    fn clear_rating(&mut self, title_id: u64) -> Result<bool, WatchlistError>;
    fn set_notes(&mut self, title_id: u64, notes: Option<&str>) -> Result<bool, WatchlistError>;
    fn set_watched_date(
        &mut self,
        title_id: u64,
        date: Option<DateTime<Utc>>,
    ) -> Result<bool, WatchlistError>;
    fn entries(&self) -> &[WatchlistEntry];
    fn get(&self, title_id: u64) -> Option<&WatchlistEntry>;
    fn list_filtered(&self, filter: WatchFilter) -> Vec<&WatchlistEntry>;
    fn watched_count(&self) -> usize;
    fn unwatched_count(&self) -> usize;
    fn clear(&mut self) -> Result<(), WatchlistError>;
}

/// Watchlist held in memory and persisted under the `movieWatchlist` key.
pub struct WatchlistManager {
    store: Rc<dyn KeyValueStore>,
    entries: Vec<WatchlistEntry>,
}

impl WatchlistManager {
    /// Loads the persisted watchlist, starting empty if nothing usable is stored.
    ///
    /// # Errors
    /// Returns `StorageError` if the store cannot be read.
    pub fn load(store: Rc<dyn KeyValueStore>) -> Result<Self, StorageError> {
        let stored: Vec<WatchlistEntry> = codec::load_or_default(store.as_ref(), WATCHLIST_KEY)?;
        let entries = dedup_by_title(stored);
        tracing::debug!(count = entries.len(), "loaded watchlist");
        Ok(Self { store, entries })
    }

    /// Persists `next` and only then makes it the in-memory list.
    fn commit(&mut self, next: Vec<WatchlistEntry>) -> Result<(), WatchlistError> {
        codec::save(self.store.as_ref(), WATCHLIST_KEY, &next)?;
        self.entries = next;
        Ok(())
    }

    fn position(&self, title_id: u64) -> Option<usize> {
        self.entries.iter().position(|e| e.title_id == title_id)
    }

    /// Applies `change` to the matching entry and persists. Returns false if absent.
    fn update_entry<F>(&mut self, title_id: u64, change: F) -> Result<bool, WatchlistError>
    where
        F: FnOnce(&mut WatchlistEntry),
    {
        let Some(idx) = self.position(title_id) else {
            return Ok(false);
        };
        let mut next = self.entries.clone();
        change(&mut next[idx]);
        self.commit(next)?;
        Ok(true)
    }
}

/// Keeps the first entry for each title id.
fn dedup_by_title(entries: Vec<WatchlistEntry>) -> Vec<WatchlistEntry> {
    let mut seen = HashSet::new();
    let before = entries.len();
    let unique: Vec<WatchlistEntry> = entries
        .into_iter()
        .filter(|e| seen.insert(e.title_id))
        .collect();
    if unique.len() != before {
        tracing::warn!(
            dropped = before - unique.len(),
            "stored watchlist had duplicate titles"
        );
    }
    unique
}

impl WatchlistManagerTrait for WatchlistManager {
    fn toggle_bookmark(&mut self, title_id: u64) -> Result<bool, WatchlistError> {
        let mut next = self.entries.clone();
        let bookmarked = match self.position(title_id) {
            Some(idx) => {
                next.remove(idx);
                false
            }
            None => {
                next.push(WatchlistEntry::new(title_id, Utc::now()));
                true
            }
        };
        self.commit(next)?;
        tracing::debug!(title_id, bookmarked, "toggled bookmark");
        Ok(bookmarked)
    }

    fn toggle_watched(&mut self, title_id: u64) -> Result<Option<bool>, WatchlistError> {
        let Some(watched) = self.get(title_id).map(|e| !e.watched) else {
            return Ok(None);
        };
        self.update_entry(title_id, |e| e.watched = watched)?;
        tracing::debug!(title_id, watched, "toggled watched");
        Ok(Some(watched))
    }

    fn is_bookmarked(&self, title_id: u64) -> bool {
        self.position(title_id).is_some()
    }

    fn is_watched(&self, title_id: u64) -> bool {
        self.get(title_id).map(|e| e.watched).unwrap_or(false)
    }

    /// Sets a 1-10 rating. Out-of-range values are rejected even when the title is absent.
    fn set_rating(&mut self, title_id: u64, rating: u8) -> Result<bool, WatchlistError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(WatchlistError::InvalidRating(rating));
        }
        self.update_entry(title_id, |e| e.rating = Some(rating))
    }

    fn clear_rating(&mut self, title_id: u64) -> Result<bool, WatchlistError> {
        self.update_entry(title_id, |e| e.rating = None)
    }

    /// Blank notes clear the field.
    fn set_notes(&mut self, title_id: u64, notes: Option<&str>) -> Result<bool, WatchlistError> {
        let notes = notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        self.update_entry(title_id, |e| e.notes = notes)
    }

    fn set_watched_date(
        &mut self,
        title_id: u64,
        date: Option<DateTime<Utc>>,
    ) -> Result<bool, WatchlistError> {
        self.update_entry(title_id, |e| e.watched_date = date)
    }

    fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    fn get(&self, title_id: u64) -> Option<&WatchlistEntry> {
        self.entries.iter().find(|e| e.title_id == title_id)
    }

    fn list_filtered(&self, filter: WatchFilter) -> Vec<&WatchlistEntry> {
        self.entries.iter().filter(|e| filter.matches(e)).collect()
    }

    fn watched_count(&self) -> usize {
        self.entries.iter().filter(|e| e.watched).count()
    }

    fn unwatched_count(&self) -> usize {
        self.entries.len() - self.watched_count()
    }

    fn clear(&mut self) -> Result<(), WatchlistError> {
        self.commit(Vec::new())
    }
}
