//! Key chord handling for quiet-nav.
//!
//! Turns raw key events into one of three outcomes: navigate up, navigate
//! back, or leave the event alone. Classification is a pure function of the
//! event and a settings snapshot, so it can be exercised without any host.
//!
//! - Human-readable chord strings ("Shift+Backspace")
//! - Virtual-key translation
//! - Chord classification against the configured up modifier

mod matcher;
pub mod parser;

pub use matcher::{ChordAction, ChordMatcher, KeyEvent, KeyPhase, PassReason};
pub use parser::{Key, KeyChord, Modifiers, ParseError, parse_key_chord};
