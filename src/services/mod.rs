// cinetrack services
// Services hold scalar state (preferences) and pure computations (statistics).

pub mod preference_engine;
pub mod statistics_engine;
