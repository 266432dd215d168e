// cinetrack Preference Engine
// Manages display preferences: dark mode, accent color and grid/list layout.
// Each preference lives under its own key as a plain string and is written on every change.

use std::rc::Rc;
use std::str::FromStr;

use crate::database::kv_store::{KeyValueStore, ACCENT_COLOR_KEY, THEME_KEY, VIEW_MODE_KEY};
use crate::types::errors::{PreferenceError, StorageError};
use crate::types::preferences::{parse_theme_label, theme_label, AccentColor, Preferences, ViewMode};

/// Trait defining the preference engine interface.
pub trait PreferenceEngineTrait {
    fn get_preferences(&self) -> &Preferences;
    fn set_dark_mode(&mut self, dark_mode: bool) -> Result<(), PreferenceError>;
    fn toggle_dark_mode(&mut self) -> Result<bool, PreferenceError>;
    fn set_accent_color(&mut self, color: AccentColor) -> Result<(), PreferenceError>;
    fn set_view_mode(&mut self, mode: ViewMode) -> Result<(), PreferenceError>;
    fn reset(&mut self) -> Result<(), PreferenceError>;
}

/// Preference engine persisting through a key-value store.
pub struct PreferenceEngine {
    store: Rc<dyn KeyValueStore>,
    preferences: Preferences,
}

impl PreferenceEngine {
    /// Loads each preference independently.
    ///
    /// A missing slot takes its default. So does an unrecognized stored value,
    /// which is logged and left in storage until the next write.
    ///
    /// # Errors
    /// Returns `StorageError` if any slot cannot be read.
    pub fn load(store: Rc<dyn KeyValueStore>) -> Result<Self, StorageError> {
        let defaults = Preferences::default();
        let dark_mode = read_slot(store.as_ref(), THEME_KEY, parse_theme_label)?
            .unwrap_or(defaults.dark_mode);
        let accent_color = read_slot(store.as_ref(), ACCENT_COLOR_KEY, |s| {
            AccentColor::from_str(s).ok()
        })?
        .unwrap_or(defaults.accent_color);
        let view_mode = read_slot(store.as_ref(), VIEW_MODE_KEY, |s| ViewMode::from_str(s).ok())?
            .unwrap_or(defaults.view_mode);

        Ok(Self {
            store,
            preferences: Preferences {
                dark_mode,
                accent_color,
                view_mode,
            },
        })
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.store.set(key, value)?;
        tracing::debug!(key, value, "saved preference");
        Ok(())
    }
}

/// Reads and parses one slot. `Ok(None)` means "use the default".
fn read_slot<T, F>(
    store: &dyn KeyValueStore,
    key: &str,
    parse: F,
) -> Result<Option<T>, StorageError>
where
    F: FnOnce(&str) -> Option<T>,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    let parsed = parse(&raw);
    if parsed.is_none() {
        tracing::warn!(key, value = %raw, "unrecognized preference value, using default");
    }
    Ok(parsed)
}

impl PreferenceEngineTrait for PreferenceEngine {
    fn get_preferences(&self) -> &Preferences {
        &self.preferences
    }

    fn set_dark_mode(&mut self, dark_mode: bool) -> Result<(), PreferenceError> {
        self.write(THEME_KEY, theme_label(dark_mode))?;
        self.preferences.dark_mode = dark_mode;
        Ok(())
    }

    fn toggle_dark_mode(&mut self) -> Result<bool, PreferenceError> {
        let dark_mode = !self.preferences.dark_mode;
        self.set_dark_mode(dark_mode)?;
        Ok(dark_mode)
    }

    fn set_accent_color(&mut self, color: AccentColor) -> Result<(), PreferenceError> {
        self.write(ACCENT_COLOR_KEY, color.as_str())?;
        self.preferences.accent_color = color;
        Ok(())
    }

    fn set_view_mode(&mut self, mode: ViewMode) -> Result<(), PreferenceError> {
        self.write(VIEW_MODE_KEY, mode.as_str())?;
        self.preferences.view_mode = mode;
        Ok(())
    }

    /// Restores factory defaults and writes all three slots.
    fn reset(&mut self) -> Result<(), PreferenceError> {
        let defaults = Preferences::default();
        self.set_dark_mode(defaults.dark_mode)?;
        self.set_accent_color(defaults.accent_color)?;
        self.set_view_mode(defaults.view_mode)
    }
}
