//! Settings value types.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Modifier that turns Backspace into "navigate up".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpModifier {
    /// Shift+Backspace navigates up
    #[default]
    Shift,
    /// Alt+Backspace navigates up
    Alt,
}

impl UpModifier {
    /// Display name for UI and CLI output
    pub fn display_name(&self) -> &'static str {
        match self {
            UpModifier::Shift => "Shift",
            UpModifier::Alt => "Alt",
        }
    }

    /// All available modifiers for iteration
    pub fn all() -> &'static [UpModifier] {
        &[UpModifier::Shift, UpModifier::Alt]
    }

    /// The modifier that is *not* configured for "up".
    pub fn other(&self) -> UpModifier {
        match self {
            UpModifier::Shift => UpModifier::Alt,
            UpModifier::Alt => UpModifier::Shift,
        }
    }
}

impl fmt::Display for UpModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for UpModifier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shift" => Ok(UpModifier::Shift),
            "alt" | "option" => Ok(UpModifier::Alt),
            other => Err(ConfigError::Validation(format!(
                "up_modifier must be 'shift' or 'alt', got '{other}'"
            ))),
        }
    }
}

/// User settings.
///
/// Treated as an immutable value: a change produces a new `Settings` that
/// replaces the old one wholesale in the [`SettingsStore`](crate::SettingsStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Modifier held with Backspace to navigate up instead of back
    #[serde(alias = "upHotkey")]
    pub up_modifier: UpModifier,
    /// Whether diagnostic log lines are written
    #[serde(alias = "enableLogging")]
    pub logging_enabled: bool,
}

impl Settings {
    /// Create settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with a different up modifier.
    pub fn with_up_modifier(mut self, up_modifier: UpModifier) -> Self {
        self.up_modifier = up_modifier;
        self
    }

    /// Return a copy with logging switched on or off.
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    /// Parse settings from a YAML document.
    ///
    /// Unknown keys are ignored and missing keys take their defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(contents).map_err(|e| {
            // serde reports bad enum values as a parse error; surface them as
            // validation so callers can tell typos from broken YAML
            if e.to_string().contains("unknown variant") {
                ConfigError::Validation(e.to_string())
            } else {
                ConfigError::Parse(e)
            }
        })
    }

    /// Serialize settings to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.up_modifier, UpModifier::Shift);
        assert!(!settings.logging_enabled);
    }

    #[test]
    fn test_parse_modifier_names() {
        assert_eq!("shift".parse::<UpModifier>().unwrap(), UpModifier::Shift);
        assert_eq!(" ALT ".parse::<UpModifier>().unwrap(), UpModifier::Alt);
        assert!(matches!(
            "ctrl".parse::<UpModifier>(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_other_modifier() {
        assert_eq!(UpModifier::Shift.other(), UpModifier::Alt);
        assert_eq!(UpModifier::Alt.other(), UpModifier::Shift);
    }

    #[test]
    fn test_from_yaml_partial() {
        let settings = Settings::from_yaml("up_modifier: alt\n").unwrap();
        assert_eq!(settings.up_modifier, UpModifier::Alt);
        assert!(!settings.logging_enabled);
    }

    #[test]
    fn test_from_yaml_host_aliases() {
        let settings = Settings::from_yaml("upHotkey: alt\nenableLogging: true\n").unwrap();
        assert_eq!(settings.up_modifier, UpModifier::Alt);
        assert!(settings.logging_enabled);
    }

    #[test]
    fn test_from_yaml_empty_is_default() {
        assert_eq!(Settings::from_yaml("").unwrap(), Settings::default());
    }

    #[test]
    fn test_from_yaml_bad_modifier_is_validation() {
        let err = Settings::from_yaml("up_modifier: ctrl\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn test_from_yaml_broken_document_is_parse() {
        let err = Settings::from_yaml("up_modifier: [shift\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_yaml_round_trip() {
        let settings = Settings::new()
            .with_up_modifier(UpModifier::Alt)
            .with_logging(true);
        let yaml = settings.to_yaml().unwrap();
        assert!(yaml.contains("up_modifier: alt"));
        assert_eq!(Settings::from_yaml(&yaml).unwrap(), settings);
    }
}
