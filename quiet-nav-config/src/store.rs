//! Process-wide settings holder with whole-value replacement.

use crate::Settings;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Shared, atomically replaceable settings value.
///
/// Readers take a [`snapshot`](Self::snapshot) once and use it for the whole
/// dispatch; a concurrent [`replace`](Self::replace) publishes a new value
/// without disturbing snapshots already taken. Fields are never updated in
/// place, so a reader can never see half of an old value and half of a new one.
#[derive(Debug)]
pub struct SettingsStore {
    current: ArcSwap<Settings>,
}

impl SettingsStore {
    /// Create a store holding `settings`.
    pub fn new(settings: Settings) -> Self {
        Self {
            current: ArcSwap::from_pointee(settings),
        }
    }

    /// Current settings value.
    pub fn snapshot(&self) -> Arc<Settings> {
        self.current.load_full()
    }

    /// Publish a new settings value, returning the one it replaced.
    pub fn replace(&self, settings: Settings) -> Arc<Settings> {
        let previous = self.current.swap(Arc::new(settings));
        if *previous != settings {
            log::info!(
                "Settings replaced: up_modifier {} -> {}, logging {} -> {}",
                previous.up_modifier,
                settings.up_modifier,
                previous.logging_enabled,
                settings.logging_enabled
            );
        }
        previous
    }

    /// Cheap check used by the diagnostics logger on every record.
    pub fn logging_enabled(&self) -> bool {
        self.current.load().logging_enabled
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UpModifier;

    #[test]
    fn test_snapshot_survives_replace() {
        let store = SettingsStore::default();
        let before = store.snapshot();

        store.replace(Settings::new().with_up_modifier(UpModifier::Alt));

        assert_eq!(before.up_modifier, UpModifier::Shift);
        assert_eq!(store.snapshot().up_modifier, UpModifier::Alt);
    }

    #[test]
    fn test_replace_returns_previous() {
        let store = SettingsStore::new(Settings::new().with_logging(true));
        let previous = store.replace(Settings::default());
        assert!(previous.logging_enabled);
        assert!(!store.logging_enabled());
    }

    #[test]
    fn test_concurrent_readers_see_whole_values() {
        let store = Arc::new(SettingsStore::default());
        let shift = Settings::new().with_up_modifier(UpModifier::Shift);
        let alt = Settings::new()
            .with_up_modifier(UpModifier::Alt)
            .with_logging(true);

        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..2000 {
                    store.replace(if i % 2 == 0 { alt } else { shift });
                }
            })
        };

        for _ in 0..2000 {
            let seen = *store.snapshot();
            assert!(seen == shift || seen == alt, "torn settings: {seen:?}");
        }
        writer.join().unwrap();
    }
}
