//! Behavior of the stores and the session when the durable store fails.
//!
//! A failed write must leave memory matching what is stored. A failed read must
//! stop the load instead of starting empty and overwriting the stored record.

use std::cell::Cell;
use std::rc::Rc;

use cinetrack::app::App;
use cinetrack::database::kv_store::{THEME_KEY, WATCHLIST_KEY};
use cinetrack::database::{KeyValueStore, MemoryStore};
use cinetrack::managers::collection_manager::{CollectionManager, CollectionManagerTrait};
use cinetrack::managers::watchlist_manager::{WatchlistManager, WatchlistManagerTrait};
use cinetrack::services::preference_engine::{PreferenceEngine, PreferenceEngineTrait};
use cinetrack::types::errors::{CollectionError, PreferenceError, StorageError, WatchlistError};
use cinetrack::types::preferences::{AccentColor, ViewMode};

/// Memory-backed store whose reads and writes can be switched to fail.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.get() {
            return Err(StorageError::Database("database is locked".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Io("disk full".to_string()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Io("disk full".to_string()));
        }
        self.inner.remove(key)
    }
}

// === Failed writes ===

#[test]
fn test_failed_bookmark_write_leaves_watchlist_unchanged() {
    let store = Rc::new(FlakyStore::default());
    let mut mgr = WatchlistManager::load(store.clone()).unwrap();
    mgr.toggle_bookmark(7).unwrap();

    store.fail_writes.set(true);
    assert!(matches!(mgr.toggle_bookmark(42), Err(WatchlistError::Storage(_))));
    assert!(!mgr.is_bookmarked(42));
    assert!(matches!(mgr.toggle_bookmark(7), Err(WatchlistError::Storage(_))));
    assert!(mgr.is_bookmarked(7));

    store.fail_writes.set(false);
    let reloaded = WatchlistManager::load(store).unwrap();
    assert_eq!(reloaded.entries(), mgr.entries());
}

#[test]
fn test_failed_entry_writes_leave_entry_unchanged() {
    let store = Rc::new(FlakyStore::default());
    let mut mgr = WatchlistManager::load(store.clone()).unwrap();
    mgr.toggle_bookmark(7).unwrap();
    let before = mgr.get(7).cloned().unwrap();

    store.fail_writes.set(true);
    assert!(mgr.toggle_watched(7).is_err());
    assert!(mgr.set_rating(7, 9).is_err());
    assert!(mgr.set_notes(7, Some("again")).is_err());
    assert!(mgr.clear().is_err());

    assert_eq!(mgr.get(7), Some(&before));
    assert!(!mgr.is_watched(7));
}

#[test]
fn test_failed_collection_writes_leave_collections_unchanged() {
    let store = Rc::new(FlakyStore::default());
    let mut mgr = CollectionManager::load(store.clone()).unwrap();
    let noir = mgr.create("Noir").unwrap();
    mgr.add_title(&noir.id, 1).unwrap();

    store.fail_writes.set(true);
    assert!(matches!(mgr.create("Westerns"), Err(CollectionError::Storage(_))));
    assert!(mgr.rename(&noir.id, "Neo-noir").is_err());
    assert!(mgr.add_title(&noir.id, 2).is_err());
    assert!(mgr.remove_title(&noir.id, 1).is_err());
    assert!(mgr.delete(&noir.id).is_err());

    assert_eq!(mgr.list().len(), 1);
    let kept = mgr.get(&noir.id).unwrap();
    assert_eq!(kept.name, "Noir");
    assert_eq!(kept.title_ids, vec![1]);

    store.fail_writes.set(false);
    let reloaded = CollectionManager::load(store).unwrap();
    assert_eq!(reloaded.list(), mgr.list());
}

#[test]
fn test_failed_preference_write_keeps_previous_value() {
    let store = Rc::new(FlakyStore::default());
    let mut engine = PreferenceEngine::load(store.clone()).unwrap();

    store.fail_writes.set(true);
    assert!(matches!(engine.toggle_dark_mode(), Err(PreferenceError::Storage(_))));
    assert!(engine.set_accent_color(AccentColor::Red).is_err());
    assert!(engine.set_view_mode(ViewMode::List).is_err());

    let prefs = engine.get_preferences();
    assert!(prefs.dark_mode);
    assert_eq!(prefs.accent_color, AccentColor::Cyan);
    assert_eq!(prefs.view_mode, ViewMode::Grid);
}

#[test]
fn test_failed_delete_keeps_selection() {
    let store = Rc::new(FlakyStore::default());
    let mut app = App::with_store(store.clone()).unwrap();
    let c = app.create_collection("Noir").unwrap();
    assert!(app.select_collection(Some(c.id.as_str())));

    store.fail_writes.set(true);
    assert!(app.delete_collection(&c.id).is_err());
    assert_eq!(app.selected_collection().map(|s| s.id.as_str()), Some(c.id.as_str()));
}

// === Failed reads ===

#[test]
fn test_failed_read_does_not_wipe_stored_watchlist() {
    let store = Rc::new(FlakyStore::default());
    {
        let mut mgr = WatchlistManager::load(store.clone()).unwrap();
        for id in 1..=5 {
            mgr.toggle_bookmark(id).unwrap();
        }
    }

    store.fail_reads.set(true);
    assert!(WatchlistManager::load(store.clone()).is_err());
    assert!(CollectionManager::load(store.clone()).is_err());
    assert!(PreferenceEngine::load(store.clone()).is_err());
    assert!(matches!(
        App::with_store(store.clone()),
        Err(StorageError::Database(_))
    ));

    store.fail_reads.set(false);
    let reloaded = WatchlistManager::load(store).unwrap();
    let ids: Vec<u64> = reloaded.entries().iter().map(|e| e.title_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_malformed_records_still_load_as_defaults() {
    let store = Rc::new(FlakyStore::default());
    store.set(WATCHLIST_KEY, "{not json").unwrap();
    store.set(THEME_KEY, "sepia").unwrap();

    let app = App::with_store(store).unwrap();
    assert!(app.list_watchlist().is_empty());
    assert!(app.get_preferences().dark_mode);
}
