//! `tracing` subscriber setup for the binary.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Picks the filter: `RUST_LOG` wins, then `-v` count, then the configured default.
pub fn build_filter(verbose_level: u8, configured: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    match verbose_level {
        0 => EnvFilter::try_new(configured).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Installs a stderr subscriber. Later calls are ignored.
pub fn init_logging(verbose_level: u8, configured: &str) {
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let _ = Registry::default()
        .with(build_filter(verbose_level, configured))
        .with(layer)
        .try_init();
}
