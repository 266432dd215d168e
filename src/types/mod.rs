// cinetrack shared type definitions
// Each submodule defines types used across the stores, the statistics engine and the CLI.

pub mod collection;
pub mod errors;
pub mod metadata;
pub mod preferences;
pub mod statistics;
pub mod watchlist;
