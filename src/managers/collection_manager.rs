//! Collection Manager for cinetrack.
//!
//! Implements `CollectionManagerTrait`: create, rename and delete named
//! collections, and manage their title membership. Persists under the
//! `movieCollections` key on every change.

use std::rc::Rc;

use chrono::Utc;
use uuid::Uuid;

use crate::database::codec;
use crate::database::kv_store::{KeyValueStore, COLLECTIONS_KEY};
use crate::types::collection::Collection;
use crate::types::errors::{CollectionError, StorageError};

/// Trait defining collection operations.
pub trait CollectionManagerTrait {
    fn create(&mut self, name: &str) -> Result<Collection, CollectionError>;
    fn delete(&mut self, id: &str) -> Result<bool, CollectionError>;
    fn rename(&mut self, id: &str, name: &str) -> Result<bool, CollectionError>;
    fn add_title(&mut self, id: &str, title_id: u64) -> Result<bool, CollectionError>;
    fn remove_title(&mut self, id: &str, title_id: u64) -> Result<bool, CollectionError>;
    fn list(&self) -> &[Collection];
    fn get(&self, id: &str) -> Option<&Collection>;
    fn containing(&self, title_id: u64) -> Vec<&Collection>;
}

/// Collections held in memory, in creation order.
pub struct CollectionManager {
    store: Rc<dyn KeyValueStore>,
    collections: Vec<Collection>,
}

impl CollectionManager {
    /// Loads the persisted collections, starting empty if nothing usable is stored.
    ///
    /// # Errors
    /// Returns `StorageError` if the store cannot be read.
    pub fn load(store: Rc<dyn KeyValueStore>) -> Result<Self, StorageError> {
        let collections: Vec<Collection> =
            codec::load_or_default(store.as_ref(), COLLECTIONS_KEY)?;
        tracing::debug!(count = collections.len(), "loaded collections");
        Ok(Self { store, collections })
    }

    /// Persists `next` and only then makes it the in-memory list.
    fn commit(&mut self, next: Vec<Collection>) -> Result<(), CollectionError> {
        codec::save(self.store.as_ref(), COLLECTIONS_KEY, &next)?;
        self.collections = next;
        Ok(())
    }

    /// Applies `change` to a copy of collection `id` and commits it if `change`
    /// reports a modification. Returns false if `id` is unknown or nothing changed.
    fn update<F>(&mut self, id: &str, change: F) -> Result<bool, CollectionError>
    where
        F: FnOnce(&mut Collection) -> bool,
    {
        let Some(idx) = self.collections.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        let mut next = self.collections.clone();
        if !change(&mut next[idx]) {
            return Ok(false);
        }
        self.commit(next)?;
        Ok(true)
    }
}

/// Trims `name`, rejecting blank names.
fn clean_name(name: &str) -> Result<String, CollectionError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CollectionError::EmptyName);
    }
    Ok(trimmed.to_string())
}

impl CollectionManagerTrait for CollectionManager {
    /// Creates an empty collection. Ids are UUIDv7, so they sort by creation time.
    fn create(&mut self, name: &str) -> Result<Collection, CollectionError> {
        let collection = Collection {
            id: Uuid::now_v7().to_string(),
            name: clean_name(name)?,
            title_ids: Vec::new(),
            created_at: Utc::now(),
        };
        let mut next = self.collections.clone();
        next.push(collection.clone());
        self.commit(next)?;
        tracing::debug!(id = %collection.id, name = %collection.name, "created collection");
        Ok(collection)
    }

    fn delete(&mut self, id: &str) -> Result<bool, CollectionError> {
        if self.get(id).is_none() {
            return Ok(false);
        }
        let next = self.collections.iter().filter(|c| c.id != id).cloned().collect();
        self.commit(next)?;
        tracing::debug!(id, "deleted collection");
        Ok(true)
    }

    fn rename(&mut self, id: &str, name: &str) -> Result<bool, CollectionError> {
        let name = clean_name(name)?;
        self.update(id, |c| {
            c.name = name;
            true
        })
    }

    /// Appends `title_id` unless the collection already lists it.
    fn add_title(&mut self, id: &str, title_id: u64) -> Result<bool, CollectionError> {
        self.update(id, |c| {
            if c.contains(title_id) {
                return false;
            }
            c.title_ids.push(title_id);
            true
        })
    }

    fn remove_title(&mut self, id: &str, title_id: u64) -> Result<bool, CollectionError> {
        self.update(id, |c| {
            let before = c.title_ids.len();
            c.title_ids.retain(|t| *t != title_id);
            c.title_ids.len() != before
        })
    }

    fn list(&self) -> &[Collection] {
        &self.collections
    }

    fn get(&self, id: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == id)
    }

    fn containing(&self, title_id: u64) -> Vec<&Collection> {
        self.collections
            .iter()
            .filter(|c| c.contains(title_id))
            .collect()
    }
}
