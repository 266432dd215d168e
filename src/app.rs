//! App Core for cinetrack.
//!
//! `App` is the session: it owns the watchlist, the collections, the
//! preferences and the "currently viewed collection" selection, and exposes
//! the operations a presentation layer calls.

use std::path::Path;
use std::rc::Rc;

use chrono::Local;

use crate::database::connection::Database;
use crate::database::kv_store::{KeyValueStore, MemoryStore};
use crate::managers::collection_manager::{CollectionManager, CollectionManagerTrait};
use crate::managers::watchlist_manager::{WatchlistManager, WatchlistManagerTrait};
use crate::services::preference_engine::{PreferenceEngine, PreferenceEngineTrait};
use crate::services::statistics_engine;
use crate::types::collection::Collection;
use crate::types::errors::{CollectionError, PreferenceError, StorageError, WatchlistError};
use crate::types::metadata::MetadataIndex;
use crate::types::preferences::{AccentColor, Preferences, ViewMode};
use crate::types::statistics::WatchStatistics;
use crate::types::watchlist::WatchlistEntry;

pub struct App {
    watchlist: WatchlistManager,
    collections: CollectionManager,
    preferences: PreferenceEngine,
    selected_collection: Option<String>,
}

impl App {
    /// Builds a session over `store`, loading all persisted state.
    ///
    /// # Errors
    /// Returns `StorageError` if the store cannot be read. No session is built
    /// in that case, so nothing is written over the stored records.
    pub fn with_store(store: Rc<dyn KeyValueStore>) -> Result<Self, StorageError> {
        Ok(Self {
            watchlist: WatchlistManager::load(store.clone())?,
            collections: CollectionManager::load(store.clone())?,
            preferences: PreferenceEngine::load(store)?,
            selected_collection: None,
        })
    }

    /// Opens the SQLite database at `path` and loads the session from it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = Database::open(path)?;
        Self::with_store(Rc::new(db))
    }

    /// A session backed by a fresh in-memory store.
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::with_store(Rc::new(MemoryStore::new()))
    }

    // --- queries ---

    pub fn list_watchlist(&self) -> &[WatchlistEntry] {
        self.watchlist.entries()
    }

    pub fn is_bookmarked(&self, title_id: u64) -> bool {
        self.watchlist.is_bookmarked(title_id)
    }

    pub fn is_watched(&self, title_id: u64) -> bool {
        self.watchlist.is_watched(title_id)
    }

    pub fn list_collections(&self) -> &[Collection] {
        self.collections.list()
    }

    pub fn get_preferences(&self) -> &Preferences {
        self.preferences.get_preferences()
    }

    /// The collection being viewed, if any.
    pub fn selected_collection(&self) -> Option<&Collection> {
        self.selected_collection
            .as_deref()
            .and_then(|id| self.collections.get(id))
    }

    // --- mutations ---

    pub fn toggle_bookmark(&mut self, title_id: u64) -> Result<bool, WatchlistError> {
        self.watchlist.toggle_bookmark(title_id)
    }

    pub fn toggle_watched(&mut self, title_id: u64) -> Result<Option<bool>, WatchlistError> {
        self.watchlist.toggle_watched(title_id)
    }

    pub fn set_rating(&mut self, title_id: u64, rating: u8) -> Result<bool, WatchlistError> {
        self.watchlist.set_rating(title_id, rating)
    }

    pub fn create_collection(&mut self, name: &str) -> Result<Collection, CollectionError> {
        self.collections.create(name)
    }

    /// Deletes a collection and drops the selection if it pointed there.
    pub fn delete_collection(&mut self, id: &str) -> Result<bool, CollectionError> {
        let deleted = self.collections.delete(id)?;
        if self.selected_collection.as_deref() == Some(id) {
            self.selected_collection = None;
        }
        Ok(deleted)
    }

    /// Marks `id` as the viewed collection. Unknown ids clear the selection.
    pub fn select_collection(&mut self, id: Option<&str>) -> bool {
        self.selected_collection = id
            .filter(|id| self.collections.get(id).is_some())
            .map(str::to_string);
        self.selected_collection.is_some()
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) -> Result<(), PreferenceError> {
        self.preferences.set_dark_mode(dark_mode)
    }

    pub fn set_accent_color(&mut self, color: AccentColor) -> Result<(), PreferenceError> {
        self.preferences.set_accent_color(color)
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> Result<(), PreferenceError> {
        self.preferences.set_view_mode(mode)
    }

    // --- derived ---

    /// Statistics as of now, with months taken in the local time zone.
    pub fn compute_statistics(&self, metadata: &MetadataIndex) -> WatchStatistics {
        statistics_engine::compute_statistics(self.watchlist.entries(), metadata, Local::now())
    }

    // --- direct store access ---

    pub fn watchlist(&self) -> &WatchlistManager {
        &self.watchlist
    }

    pub fn watchlist_mut(&mut self) -> &mut WatchlistManager {
        &mut self.watchlist
    }

    pub fn collections(&self) -> &CollectionManager {
        &self.collections
    }

    pub fn collections_mut(&mut self) -> &mut CollectionManager {
        &mut self.collections
    }

    pub fn preferences_mut(&mut self) -> &mut PreferenceEngine {
        &mut self.preferences
    }
}
