use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::PreferenceError;

/// Display preferences for the discovery UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preferences {
    pub dark_mode: bool,
    pub accent_color: AccentColor,
    pub view_mode: ViewMode,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            accent_color: AccentColor::default(),
            view_mode: ViewMode::default(),
        }
    }
}

/// Accent palette. The first entry is the default.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    #[default]
    Cyan,
    Purple,
    Green,
    Red,
    Orange,
}

impl AccentColor {
    pub const ALL: [AccentColor; 5] = [
        AccentColor::Cyan,
        AccentColor::Purple,
        AccentColor::Green,
        AccentColor::Red,
        AccentColor::Orange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccentColor::Cyan => "cyan",
            AccentColor::Purple => "purple",
            AccentColor::Green => "green",
            AccentColor::Red => "red",
            AccentColor::Orange => "orange",
        }
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccentColor {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccentColor::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| PreferenceError::InvalidValue(format!("unknown accent color '{}'", s)))
    }
}

/// Grid or list layout for title listings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(PreferenceError::InvalidValue(format!(
                "unknown view mode '{}'",
                other
            ))),
        }
    }
}

/// Stored form of the dark-mode flag.
pub fn theme_label(dark_mode: bool) -> &'static str {
    if dark_mode {
        "dark"
    } else {
        "light"
    }
}

/// Parses the stored theme label. Returns `None` for anything unrecognized.
pub fn parse_theme_label(label: &str) -> Option<bool> {
    match label {
        "dark" => Some(true),
        "light" => Some(false),
        _ => None,
    }
}
