//! Alert suppression.
//!
//! Every alert request in the process is answered with success and no
//! sound. This is global: alerts unrelated to navigation are silenced too.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Category of an alert request, from the host's alert type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertCategory {
    /// Default system sound (MB_OK)
    Default,
    /// Critical stop (MB_ICONHAND)
    Error,
    /// Question (MB_ICONQUESTION)
    Question,
    /// Exclamation (MB_ICONEXCLAMATION)
    Warning,
    /// Asterisk (MB_ICONASTERISK)
    Information,
    /// Speaker beep (0xFFFFFFFF)
    SimpleBeep,
    /// Anything else, kept verbatim
    Other(u32),
}

impl From<u32> for AlertCategory {
    fn from(code: u32) -> Self {
        match code {
            0x0000_0000 => AlertCategory::Default,
            0x0000_0010 => AlertCategory::Error,
            0x0000_0020 => AlertCategory::Question,
            0x0000_0030 => AlertCategory::Warning,
            0x0000_0040 => AlertCategory::Information,
            0xFFFF_FFFF => AlertCategory::SimpleBeep,
            other => AlertCategory::Other(other),
        }
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertCategory::Default => write!(f, "default"),
            AlertCategory::Error => write!(f, "error"),
            AlertCategory::Question => write!(f, "question"),
            AlertCategory::Warning => write!(f, "warning"),
            AlertCategory::Information => write!(f, "information"),
            AlertCategory::SimpleBeep => write!(f, "simple beep"),
            AlertCategory::Other(code) => write!(f, "type {code:#x}"),
        }
    }
}

/// Swallows alert requests.
#[derive(Debug, Default)]
pub struct AlertSuppressor {
    suppressed: AtomicU64,
}

impl AlertSuppressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one alert request. Always reports success and produces nothing.
    pub fn suppress(&self, alert_type: u32) -> bool {
        self.suppressed.fetch_add(1, Ordering::Relaxed);
        log::info!(
            "Alert suppressed ({}, type: {})",
            AlertCategory::from(alert_type),
            alert_type
        );
        true
    }

    /// Number of alerts swallowed so far.
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(AlertCategory::from(0x10), AlertCategory::Error);
        assert_eq!(AlertCategory::from(u32::MAX), AlertCategory::SimpleBeep);
        assert_eq!(AlertCategory::from(0x99), AlertCategory::Other(0x99));
        assert_eq!(AlertCategory::Other(0x99).to_string(), "type 0x99");
    }

    #[test]
    fn test_suppress_always_succeeds() {
        let suppressor = AlertSuppressor::new();
        for code in [0, 0x10, 0x20, 0x30, 0x40, 0x99, u32::MAX] {
            assert!(suppressor.suppress(code));
        }
        assert_eq!(suppressor.suppressed_count(), 7);
    }
}
