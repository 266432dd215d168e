//! JSON encoding of entity lists to and from the key-value store.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::kv_store::KeyValueStore;
use crate::types::errors::StorageError;

/// Reads and decodes the value under `key`.
///
/// Absent keys yield `T::default()`. Corrupt content is logged and also yields
/// `T::default()`. A failed read is an error, never a default.
pub fn load_or_default<T>(store: &dyn KeyValueStore, key: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key)? else {
        return Ok(T::default());
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "stored record is malformed, using default");
            Ok(T::default())
        }
    }
}

/// Encodes `value` as JSON and writes it under `key`.
pub fn save<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
{
    let json =
        serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
    store.set(key, &json)
}
