// cinetrack state managers
// Managers own the user's list-shaped state: the watchlist and named collections.

pub mod collection_manager;
pub mod watchlist_manager;
