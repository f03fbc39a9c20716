use crate::config::Settings;
use crate::{Result, XsnapError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;
use tracing::{debug, warn};

/// Loads, persists, and watches the settings file.
///
/// The store never overwrites a file it could not parse; a malformed file is
/// reported and the built-in defaults are used until the user fixes it.
pub struct SettingsStore {
    path: PathBuf,
    loaded_mtime: Mutex<Option<SystemTime>>,
}

impl SettingsStore {
    /// Store rooted at the platform config directory
    pub fn new() -> Self {
        Self::at(Self::default_path())
    }

    /// Store rooted at an explicit file path
    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            loaded_mtime: Mutex::new(None),
        }
    }

    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".config")
        });
        config_dir.join("xsnap").join("config.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads settings, writing a default file on first run. Parse failures
    /// fall back to defaults without touching the file on disk.
    pub fn load_or_init(&self) -> Result<Settings> {
        if !self.path.exists() {
            debug!(
                "Writing default settings file to {}",
                self.path.display()
            );
            self.save(&Settings::default())?;
            return Ok(Settings::default());
        }

        match self.load() {
            Ok(settings) => Ok(settings),
            Err(err) => {
                warn!(
                    "Settings file {} is invalid, using defaults: {err}",
                    self.path.display()
                );
                Ok(Settings::default())
            }
        }
    }

    /// Strict load; errors on missing or malformed files
    pub fn load(&self) -> Result<Settings> {
        let content = fs::read_to_string(&self.path).map_err(|err| {
            XsnapError::ConfigurationError(format!(
                "Failed to read {}: {err}",
                self.path.display()
            ))
        })?;

        let settings = serde_json::from_str(&content).map_err(|err| {
            XsnapError::ConfigurationError(format!(
                "Failed to parse {}: {err}",
                self.path.display()
            ))
        })?;

        self.record_mtime();
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(settings)?;

        // Atomic write
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;

        self.record_mtime();
        Ok(())
    }

    /// True when the file's mtime differs from the last load or save. Used by
    /// the daemon's change watcher; I/O errors report no change.
    pub fn changed_on_disk(&self) -> bool {
        let current = fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .ok();
        let recorded = *self.loaded_mtime.lock().expect("poisoned lock");

        match (current, recorded) {
            (Some(current), Some(recorded)) => current != recorded,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    fn record_mtime(&self) {
        let mtime = fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .ok();
        *self.loaded_mtime.lock().expect("poisoned lock") = mtime;
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}
