//! Key chord parser.
//!
//! Parses strings like "Shift+Backspace" into [`KeyChord`] values and maps
//! Windows virtual-key codes onto [`Key`].

use std::fmt;
use thiserror::Error;

/// Error type for chord parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ParseError(String);

/// Modifier state of a chord.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
    };

    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift
    }
}

/// The non-modifier key of a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Backspace (VK_BACK), the key quiet-nav intercepts
    Backspace,
    /// Any other key, by virtual-key code
    Other(u16),
}

const VK_BACK: u16 = 0x08;
const VK_TAB: u16 = 0x09;
const VK_RETURN: u16 = 0x0D;
const VK_ESCAPE: u16 = 0x1B;
const VK_SPACE: u16 = 0x20;
const VK_DELETE: u16 = 0x2E;
const VK_F1: u16 = 0x70;

impl Key {
    /// Map a Windows virtual-key code.
    pub fn from_virtual_key(vk: u16) -> Self {
        if vk == VK_BACK {
            Key::Backspace
        } else {
            Key::Other(vk)
        }
    }

    /// Windows virtual-key code for this key.
    pub fn virtual_key(&self) -> u16 {
        match self {
            Key::Backspace => VK_BACK,
            Key::Other(vk) => *vk,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        let vk = match lower.as_str() {
            "backspace" | "back" | "bs" => return Some(Key::Backspace),
            "tab" => VK_TAB,
            "enter" | "return" => VK_RETURN,
            "escape" | "esc" => VK_ESCAPE,
            "space" => VK_SPACE,
            "delete" | "del" => VK_DELETE,
            _ => {
                if let Some(n) = lower.strip_prefix('f')
                    && let Ok(n) = n.parse::<u16>()
                    && (1..=24).contains(&n)
                {
                    return Some(Key::Other(VK_F1 + n - 1));
                }
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphanumeric() => c.to_ascii_uppercase() as u16,
                    _ => return None,
                }
            }
        };
        Some(Key::Other(vk))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Key::Backspace => write!(f, "Backspace"),
            Key::Other(VK_TAB) => write!(f, "Tab"),
            Key::Other(VK_RETURN) => write!(f, "Enter"),
            Key::Other(VK_ESCAPE) => write!(f, "Escape"),
            Key::Other(VK_SPACE) => write!(f, "Space"),
            Key::Other(VK_DELETE) => write!(f, "Delete"),
            Key::Other(vk) if (VK_F1..VK_F1 + 24).contains(&vk) => {
                write!(f, "F{}", vk - VK_F1 + 1)
            }
            Key::Other(vk) if (vk as u8).is_ascii_alphanumeric() && vk < 0x80 => {
                write!(f, "{}", vk as u8 as char)
            }
            Key::Other(vk) => write!(f, "VK(0x{vk:02X})"),
        }
    }
}

/// A key plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyChord {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.alt {
            write!(f, "Alt+")?;
        }
        if self.modifiers.shift {
            write!(f, "Shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

/// Parse a chord string into a [`KeyChord`].
///
/// Supported format: "Modifier+Modifier+Key"
///
/// Modifiers:
/// - `Ctrl`, `Control`
/// - `Alt`, `Option`
/// - `Shift`
///
/// Keys:
/// - `Backspace` (also `Back`, `BS`)
/// - Named keys: `Enter`, `Escape`, `Tab`, `Space`, `Delete`, `F1`-`F24`
/// - Single letters and digits
pub fn parse_key_chord(s: &str) -> Result<KeyChord, ParseError> {
    let parts: Vec<&str> = s.split('+').map(str::trim).collect();
    if parts.iter().all(|p| p.is_empty()) {
        return Err(ParseError("Empty key chord".to_string()));
    }

    let mut modifiers = Modifiers::default();
    let mut key = None;

    for part in parts {
        if part.is_empty() {
            return Err(ParseError(format!("Empty component in '{s}'")));
        }
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => modifiers.ctrl = true,
            "alt" | "option" => modifiers.alt = true,
            "shift" => modifiers.shift = true,
            _ => {
                if key.is_some() {
                    return Err(ParseError(format!(
                        "Multiple keys specified: already have key, found '{part}'"
                    )));
                }
                key = Some(
                    Key::from_name(part)
                        .ok_or_else(|| ParseError(format!("Unknown key: '{part}'")))?,
                );
            }
        }
    }

    let key = key.ok_or_else(|| ParseError(format!("No key specified in '{s}'")))?;
    Ok(KeyChord::new(key, modifiers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_backspace() {
        let chord = parse_key_chord("Backspace").unwrap();
        assert_eq!(chord.key, Key::Backspace);
        assert!(chord.modifiers.is_empty());
    }

    #[test]
    fn test_parse_modifiers_case_insensitive() {
        let chord = parse_key_chord("ctrl+SHIFT+back").unwrap();
        assert_eq!(chord.key, Key::Backspace);
        assert!(chord.modifiers.ctrl);
        assert!(chord.modifiers.shift);
        assert!(!chord.modifiers.alt);
    }

    #[test]
    fn test_parse_other_keys() {
        assert_eq!(parse_key_chord("Alt+F4").unwrap().key, Key::Other(0x73));
        assert_eq!(parse_key_chord("a").unwrap().key, Key::Other(b'A' as u16));
        assert_eq!(parse_key_chord("Enter").unwrap().key, Key::Other(VK_RETURN));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_key_chord("").is_err());
        assert!(parse_key_chord("Shift+").is_err());
        assert!(parse_key_chord("Shift").is_err());
        assert!(parse_key_chord("A+B").is_err());
        assert!(parse_key_chord("Hyper+Backspace").is_err());
    }

    #[test]
    fn test_display() {
        let chord = parse_key_chord("shift+alt+backspace").unwrap();
        assert_eq!(chord.to_string(), "Alt+Shift+Backspace");
        assert_eq!(Key::Other(0x2E).to_string(), "Delete");
        assert_eq!(Key::Other(0xBA).to_string(), "VK(0xBA)");
    }

    #[test]
    fn test_virtual_key_mapping() {
        assert_eq!(Key::from_virtual_key(0x08), Key::Backspace);
        assert_eq!(Key::from_virtual_key(0x41), Key::Other(0x41));
        assert_eq!(Key::Backspace.virtual_key(), 0x08);
    }
}
