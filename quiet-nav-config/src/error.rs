//! Typed error variants for the quiet-nav-config crate.

use thiserror::Error;

/// Errors that can occur when loading or saving settings.
///
/// Callers at the application edge usually hold these inside an
/// `anyhow::Error`; use `downcast_ref::<ConfigError>()` to match on them.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the settings file.
    #[error("I/O error reading settings: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file contained YAML that could not be parsed.
    #[error("YAML parse error in settings: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string names the field and the rejected value.
    #[error("Settings validation error: {0}")]
    Validation(String),
}
