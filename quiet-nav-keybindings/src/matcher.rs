//! Chord classification.
//!
//! Decides whether a key event is a "navigate up", a "navigate back", or
//! something the host should handle itself.

use super::parser::{Key, KeyChord, Modifiers};
use quiet_nav_config::{Settings, UpModifier};
use std::fmt;

/// Phase of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

/// A key event as seen just before the host's accelerator handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub phase: KeyPhase,
    pub chord: KeyChord,
}

impl KeyEvent {
    pub fn key_down(chord: KeyChord) -> Self {
        Self {
            phase: KeyPhase::Down,
            chord,
        }
    }

    pub fn key_up(chord: KeyChord) -> Self {
        Self {
            phase: KeyPhase::Up,
            chord,
        }
    }
}

/// Why an event was left for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassReason {
    /// Not a key-down event
    NotKeyDown,
    /// Key other than Backspace
    NotBackspace,
    /// Ctrl is reserved for the host's own bindings
    ControlHeld,
    /// Only the modifier that is not configured for "up" is held
    UnboundModifiers,
}

/// Outcome of classifying a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordAction {
    NavigateUp,
    NavigateBack,
    PassThrough(PassReason),
}

impl ChordAction {
    pub fn is_pass_through(&self) -> bool {
        matches!(self, ChordAction::PassThrough(_))
    }
}

impl fmt::Display for ChordAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChordAction::NavigateUp => write!(f, "navigate up"),
            ChordAction::NavigateBack => write!(f, "navigate back"),
            ChordAction::PassThrough(reason) => write!(f, "pass through ({reason:?})"),
        }
    }
}

/// Classifies key events against a settings snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ChordMatcher {
    up_modifier: UpModifier,
}

impl ChordMatcher {
    /// Matcher for a settings snapshot.
    pub fn new(settings: &Settings) -> Self {
        Self {
            up_modifier: settings.up_modifier,
        }
    }

    /// Classify a key event.
    ///
    /// Filters, in order:
    /// 1. only key-down Backspace is considered
    /// 2. Ctrl always passes through, whatever else is held
    /// 3. the configured up modifier means up, whatever else is held; no
    ///    modifier means back; the other modifier alone passes through
    pub fn classify(&self, event: &KeyEvent) -> ChordAction {
        if event.phase != KeyPhase::Down {
            return ChordAction::PassThrough(PassReason::NotKeyDown);
        }
        if event.chord.key != Key::Backspace {
            return ChordAction::PassThrough(PassReason::NotBackspace);
        }
        let action = self.classify_modifiers(&event.chord.modifiers);
        log::trace!("{} classified as {}", event.chord, action);
        action
    }

    fn classify_modifiers(&self, mods: &Modifiers) -> ChordAction {
        if mods.ctrl {
            return ChordAction::PassThrough(PassReason::ControlHeld);
        }
        let up_held = match self.up_modifier {
            UpModifier::Shift => mods.shift,
            UpModifier::Alt => mods.alt,
        };
        if up_held {
            ChordAction::NavigateUp
        } else if !mods.shift && !mods.alt {
            ChordAction::NavigateBack
        } else {
            ChordAction::PassThrough(PassReason::UnboundModifiers)
        }
    }
}
