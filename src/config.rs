//! Layered configuration
//!
//! Built-in defaults, then an optional YAML file, then `NOTE_CARDS_*`
//! environment variables. Command line flags are applied last by the binary.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants as C;
use crate::error::{Error, Result};
use crate::notes::NoteOptions;
use crate::scanner::ScanOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory to scan (current directory when unset)
    pub root: Option<PathBuf>,
    pub excerpt_length: usize,
    pub suffix: String,
    /// Directory names never descended into
    pub exclude: Vec<String>,
    /// Preference store location
    pub preferences: Option<PathBuf>,
    /// System dark-mode signal, used until a theme is stored
    pub prefers_dark: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: None,
            excerpt_length: C::DEFAULT_EXCERPT_LENGTH,
            suffix: C::MARKDOWN_EXTENSION.to_string(),
            exclude: C::DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            preferences: None,
            prefers_dark: false,
        }
    }
}

/// `<config_dir>/note-cards`
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(C::APP_DIR_NAME))
}

impl Config {
    /// Load file and environment layers
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match config_dir().map(|d| d.join(C::CONFIG_FILENAME)) {
                Some(default) if default.is_file() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read '{}': {}", path.display(), e)))?;
        let config = Self::from_yaml(&content)
            .map_err(|e| Error::Config(format!("invalid config '{}': {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Overlay environment variables; empty values are ignored
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(root) = var(C::ENV_ROOT) {
            self.root = Some(PathBuf::from(root));
        }
        if let Some(length) = var(C::ENV_EXCERPT_LENGTH) {
            self.excerpt_length = length
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{} must be a number, got '{}'", C::ENV_EXCERPT_LENGTH, length)))?;
        }
        if let Some(flag) = var(C::ENV_PREFERS_DARK) {
            self.prefers_dark = parse_flag(&flag)
                .ok_or_else(|| Error::Config(format!("{} must be true or false, got '{}'", C::ENV_PREFERS_DARK, flag)))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.excerpt_length == 0 {
            return Err(Error::Config("excerpt_length must be greater than zero".to_string()));
        }
        if self.suffix.is_empty() {
            return Err(Error::Config("suffix must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn root_dir(&self) -> Result<PathBuf> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    pub fn note_options(&self) -> NoteOptions {
        NoteOptions {
            scan: ScanOptions {
                suffix: self.suffix.clone(),
                exclude: self.exclude.clone(),
            },
            excerpt_length: self.excerpt_length,
        }
    }

    pub fn preferences_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.preferences {
            return Ok(path.clone());
        }
        config_dir()
            .map(|d| d.join(C::PREFERENCES_FILENAME))
            .ok_or_else(|| Error::Config("cannot determine config directory; set `preferences`".to_string()))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
