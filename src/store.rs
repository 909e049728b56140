//! JSON file persistence for [`Settings`].
//!
//! Loading is a shallow merge: the persisted top-level object is laid over
//! the serialized defaults, so persisted keys win and missing keys keep
//! their default. Every mutation writes a full snapshot back to disk.

use crate::commands::settings::Settings;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the settings file location
pub const SETTINGS_PATH_ENV: &str = "NOTECAST_SETTINGS";

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Settings I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings file is not valid: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("No configuration directory available on this system")]
    NoConfigDir,
}

/// Resolve where settings live: explicit path, then environment, then the
/// platform configuration directory.
pub fn resolve_settings_path(explicit: Option<&Path>) -> Result<PathBuf, StoreError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join("notecast").join(SETTINGS_FILE))
        .ok_or(StoreError::NoConfigDir)
}

/// Lay `persisted` over `defaults`, one level deep.
pub fn shallow_merge(defaults: Value, persisted: Value) -> Value {
    match (defaults, persisted) {
        (Value::Object(mut base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                base.insert(key, value);
            }
            Value::Object(base)
        }
        // A persisted file that is not an object carries no usable keys
        (defaults, _) => defaults,
    }
}

pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let defaults = serde_json::to_value(Settings::default())?;

        let merged = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => defaults,
            Ok(raw) => shallow_merge(defaults, serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings file at {}, using defaults", path.display());
                defaults
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let mut settings: Settings = serde_json::from_value(merged)?;
        settings.normalize();

        Ok(Self { path, settings })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Point-in-time snapshot of the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply one change and persist the full snapshot.
    pub fn update<F>(&mut self, change: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Settings) -> Result<(), StoreError>,
    {
        let mut next = self.settings.clone();
        change(&mut next)?;
        self.settings = next;
        self.save()
    }

    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        log::debug!("Settings saved to {}", self.path.display());
        Ok(())
    }
}
