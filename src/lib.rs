//! cinetrack: local watchlist, collections and display preferences for a
//! movie/TV discovery app, with write-through persistence and derived statistics.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod config;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;
