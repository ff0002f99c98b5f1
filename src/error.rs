//! Failure types for navigation against a browsing session.
//!
//! None of these ever reach the user. A resolution failure makes the event
//! fall through to the host; an action failure advances the fallback chain.

use thiserror::Error;

/// Why a host interaction did not produce the requested result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The window has no browsing session attached.
    #[error("no browsing session for window {0}")]
    NoSession(String),

    /// A session object or location identity could not be obtained.
    #[error("could not resolve {what}: {detail}")]
    Resolution { what: &'static str, detail: String },

    /// The current location is already a namespace root.
    #[error("{0} has no parent")]
    NoParent(String),

    /// The host refused a navigation request.
    #[error("host rejected {action}: {detail}")]
    Action { action: &'static str, detail: String },
}

impl NavigationError {
    pub fn resolution(what: &'static str, detail: impl ToString) -> Self {
        Self::Resolution {
            what,
            detail: detail.to_string(),
        }
    }

    pub fn action(action: &'static str, detail: impl ToString) -> Self {
        Self::Action {
            action,
            detail: detail.to_string(),
        }
    }

    /// True for failures to obtain a session or identity, as opposed to a
    /// navigation the host attempted and refused.
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::NoSession(_) | Self::Resolution { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_and_action_failures_are_distinct() {
        assert!(NavigationError::NoSession("0x10".into()).is_resolution());
        assert!(NavigationError::resolution("active view", "E_FAIL").is_resolution());
        assert!(!NavigationError::NoParent("Desktop".into()).is_resolution());

        let refused = NavigationError::action("back", "history is empty");
        assert!(!refused.is_resolution());
        assert_eq!(refused.to_string(), "host rejected back: history is empty");
    }
}
