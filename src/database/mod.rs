//! cinetrack storage layer.
//!
//! Provides the durable key-value store (SQLite or in-memory), its schema
//! migrations, and the JSON codec the stores persist through.
//!
//! # Usage
//!
//! ```no_run
//! use cinetrack::database::{Database, KeyValueStore};
//!
//! let db = Database::open("cinetrack.db").expect("failed to open database");
//! db.set("viewMode", "list").expect("write failed");
//! assert_eq!(db.get("viewMode").unwrap().as_deref(), Some("list"));
//! ```

pub mod codec;
pub mod connection;
pub mod kv_store;
pub mod migrations;

pub use connection::Database;
pub use kv_store::{KeyValueStore, MemoryStore};
