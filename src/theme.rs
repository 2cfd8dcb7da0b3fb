//! Theme preference
//!
//! The only persisted state: a single `theme` key holding `light` or `dark`.
//! Without a stored value the view follows the system "prefers dark" signal,
//! until the user toggles explicitly.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants as C;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}', expected 'light' or 'dark'", other)),
        }
    }
}

/// Current theme and whether it was chosen rather than inherited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeState {
    pub theme: Theme,
    pub explicit: bool,
}

impl ThemeState {
    /// Stored preference wins, otherwise the system signal
    pub fn init(saved: Option<Theme>, prefers_dark: bool) -> Self {
        match saved {
            Some(theme) => Self { theme, explicit: true },
            None => Self {
                theme: Theme::from_system(prefers_dark),
                explicit: false,
            },
        }
    }

    /// Flip the theme; the result should be persisted by the caller
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.explicit = true;
        self.theme
    }

    /// Follow a system change unless the user chose a theme; true if it changed
    pub fn system_changed(&mut self, prefers_dark: bool) -> bool {
        if self.explicit {
            return false;
        }
        let theme = Theme::from_system(prefers_dark);
        let changed = theme != self.theme;
        self.theme = theme;
        changed
    }
}

/// Persistence for the theme key
pub trait PreferenceStore {
    fn load_theme(&self) -> Result<Option<Theme>>;
    fn save_theme(&mut self, theme: Theme) -> Result<()>;
}

/// Preferences kept as a small JSON object on disk
#[derive(Debug, Clone)]
pub struct JsonPreferenceStore {
    path: PathBuf,
}

impl JsonPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, reason: impl fmt::Display) -> Error {
        Error::Preference {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn read_map(&self) -> Result<serde_json::Map<String, serde_json::Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(serde_json::Map::new()),
            Err(e) => return Err(self.error(e)),
        };
        if content.trim().is_empty() {
            return Ok(serde_json::Map::new());
        }
        match serde_json::from_str::<serde_json::Value>(&content).map_err(|e| self.error(e))? {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(self.error("expected a JSON object")),
        }
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn load_theme(&self) -> Result<Option<Theme>> {
        let map = self.read_map()?;
        match map.get(C::THEME_KEY) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::String(s)) => match s.parse() {
                Ok(theme) => Ok(Some(theme)),
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "ignoring stored theme");
                    Ok(None)
                }
            },
            Some(other) => {
                tracing::warn!(path = %self.path.display(), value = %other, "ignoring stored theme");
                Ok(None)
            }
        }
    }

    fn save_theme(&mut self, theme: Theme) -> Result<()> {
        // Keep whatever else lives in the file
        let mut map = self.read_map()?;
        map.insert(C::THEME_KEY.to_string(), serde_json::Value::String(theme.to_string()));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.error(e))?;
        }
        let json = serde_json::to_string_pretty(&serde_json::Value::Object(map))?;
        fs::write(&self.path, json).map_err(|e| self.error(e))?;
        tracing::debug!(path = %self.path.display(), %theme, "saved theme");
        Ok(())
    }
}
