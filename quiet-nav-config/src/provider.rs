//! Change-notification handling for the settings file.

use crate::{Settings, SettingsStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Loads settings from a file into a shared [`SettingsStore`].
///
/// [`reload`](Self::reload) is the change-notification callback: it re-reads
/// the file and swaps the whole value in. A file that fails to load leaves the
/// active settings untouched.
#[derive(Debug, Clone)]
pub struct SettingsProvider {
    path: PathBuf,
    store: Arc<SettingsStore>,
}

impl SettingsProvider {
    /// Load settings from `path` (creating a default file if missing).
    ///
    /// An unreadable or invalid file falls back to defaults with a warning.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = match Settings::load_or_create(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings, failed to load {:?}: {}", path, e);
                Settings::default()
            }
        };
        Self {
            path,
            store: Arc::new(SettingsStore::new(settings)),
        }
    }

    /// Provider over an existing store, without touching the filesystem.
    pub fn with_store(path: impl Into<PathBuf>, store: Arc<SettingsStore>) -> Self {
        Self {
            path: path.into(),
            store,
        }
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Shared store readers snapshot from.
    pub fn store(&self) -> &Arc<SettingsStore> {
        &self.store
    }

    /// Re-read the settings file and publish it.
    ///
    /// Returns `true` if a new value was published.
    pub fn reload(&self) -> bool {
        match Settings::load_from(&self.path) {
            Ok(settings) => {
                self.store.replace(settings);
                true
            }
            Err(e) => {
                log::warn!(
                    "Keeping previous settings, reload of {:?} failed: {}",
                    self.path,
                    e
                );
                false
            }
        }
    }
}
