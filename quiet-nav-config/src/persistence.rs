//! Settings file location and YAML load/save.

use crate::{ConfigError, Settings};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "quiet-nav";
const SETTINGS_FILE: &str = "settings.yaml";

impl Settings {
    /// Directory holding the settings file.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Default settings file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join(SETTINGS_FILE)
    }

    /// Load settings from `path`, creating a default file if none exists.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from(path)
        } else {
            log::info!("Settings file not found, creating default at {:?}", path);
            let settings = Self::default();
            if let Err(e) = settings.save_to(path) {
                // A read-only profile is not fatal; defaults still apply
                log::warn!("Failed to save default settings: {}", e);
            }
            Ok(settings)
        }
    }

    /// Load settings from an existing file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::debug!("Loading settings from {:?}", path);
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Save settings to `path`.
    ///
    /// Writes to a temp file and renames it over the target so a crash
    /// never leaves a truncated settings file behind.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let yaml = self.to_yaml()?;
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UpModifier;
    use tempfile::TempDir;

    #[test]
    fn test_config_path_is_under_config_dir() {
        let path = Settings::config_path();
        assert!(path.starts_with(Settings::config_dir()));
        assert!(path.ends_with("settings.yaml"));
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.yaml");

        let settings = Settings::load_or_create(&path).unwrap();

        assert_eq!(settings, Settings::default());
        assert!(path.exists());
        assert!(!path.with_extension("yaml.tmp").exists());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.yaml");
        let settings = Settings::new()
            .with_up_modifier(UpModifier::Alt)
            .with_logging(true);

        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = Settings::load_from(&temp_dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
