use thiserror::Error;

// === StorageError ===

/// Errors raised by the durable key-value store or the entity codec.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database operation failed.
    #[error("Storage database error: {0}")]
    Database(String),
    /// Failed to serialize a value for storage.
    #[error("Storage serialization error: {0}")]
    Serialization(String),
    /// A file system error occurred.
    #[error("Storage I/O error: {0}")]
    Io(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Database(e.to_string())
    }
}

// === WatchlistError ===

/// Errors related to watchlist operations.
#[derive(Debug, Error)]
pub enum WatchlistError {
    /// Rating outside the 1..=10 range.
    #[error("Invalid rating: {0} (expected 1-10)")]
    InvalidRating(u8),
    /// The change could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

// === CollectionError ===

/// Errors related to collection operations.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// Collection name was empty or whitespace only.
    #[error("Collection name cannot be empty")]
    EmptyName,
    /// The change could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

// === PreferenceError ===

/// Errors related to display preferences.
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// The value is not one of the enumerated options.
    #[error("Invalid preference value: {0}")]
    InvalidValue(String),
    /// The change could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

// === ConfigError ===

/// Errors related to loading the application config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Config I/O error: {0}")]
    Io(String),
    /// The config file is not valid JSON for `AppConfig`.
    #[error("Config parse error: {0}")]
    Parse(String),
}
