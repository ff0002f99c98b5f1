//! Configuration system for quiet-nav.
//!
//! Provides the two user-facing settings (the "up" modifier and the
//! diagnostics switch), their YAML persistence, and the process-wide
//! [`SettingsStore`] that readers snapshot once per dispatch.
//!
//! - Settings types and defaults
//! - YAML load/save with atomic writes
//! - Whole-value atomic replacement on change notification
//! - Settings file watching

mod error;
mod persistence;
mod provider;
mod settings;
mod store;
#[cfg(feature = "watcher")]
pub mod watcher;

pub use error::ConfigError;
pub use provider::SettingsProvider;
pub use settings::{Settings, UpModifier};
pub use store::SettingsStore;
