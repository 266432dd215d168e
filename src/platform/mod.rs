// cinetrack platform paths
// Config, data and cache directories resolved per OS through `dirs`.
//
// - Linux:   ~/.config/cinetrack, ~/.local/share/cinetrack (XDG vars respected)
// - macOS:   ~/Library/Application Support/cinetrack
// - Windows: %APPDATA%\cinetrack

use std::path::PathBuf;

const APP_DIR: &str = "cinetrack";

/// Falls back to the system temp dir when the platform reports no home.
fn base_or_temp(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(std::env::temp_dir).join(APP_DIR)
}

/// Returns the configuration directory for cinetrack.
pub fn get_config_dir() -> PathBuf {
    base_or_temp(dirs::config_dir())
}

/// Returns the data directory for cinetrack.
pub fn get_data_dir() -> PathBuf {
    base_or_temp(dirs::data_dir())
}

/// Default path of the SQLite database.
pub fn default_database_path() -> PathBuf {
    get_data_dir().join("cinetrack.db")
}

/// Default path of the JSON config file.
pub fn default_config_path() -> PathBuf {
    get_config_dir().join("config.json")
}
