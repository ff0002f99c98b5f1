//! Integration tests for quiet-nav-keybindings.
//!
//! These exercise the parse → classify pipeline the way the CLI and the
//! dispatcher use it.

use quiet_nav_config::{Settings, SettingsStore, UpModifier};
use quiet_nav_keybindings::{
    ChordAction, ChordMatcher, KeyEvent, PassReason, parse_key_chord,
};

fn classify(chord: &str, settings: &Settings) -> ChordAction {
    let chord = parse_key_chord(chord).expect("valid chord");
    ChordMatcher::new(settings).classify(&KeyEvent::key_down(chord))
}

// ---------------------------------------------------------------------------
// Default (Shift) configuration
// ---------------------------------------------------------------------------

#[test]
fn test_shift_config_table() {
    let settings = Settings::default();
    assert_eq!(classify("Backspace", &settings), ChordAction::NavigateBack);
    assert_eq!(classify("Shift+Backspace", &settings), ChordAction::NavigateUp);
    assert_eq!(classify("Alt+Shift+Backspace", &settings), ChordAction::NavigateUp);
    assert_eq!(
        classify("Alt+Backspace", &settings),
        ChordAction::PassThrough(PassReason::UnboundModifiers)
    );
    assert_eq!(
        classify("Ctrl+Backspace", &settings),
        ChordAction::PassThrough(PassReason::ControlHeld)
    );
    assert_eq!(
        classify("Ctrl+Shift+Backspace", &settings),
        ChordAction::PassThrough(PassReason::ControlHeld)
    );
}

// ---------------------------------------------------------------------------
// Alt configuration
// ---------------------------------------------------------------------------

#[test]
fn test_alt_config_table() {
    let settings = Settings::new().with_up_modifier(UpModifier::Alt);
    assert_eq!(classify("Backspace", &settings), ChordAction::NavigateBack);
    assert_eq!(classify("Alt+Backspace", &settings), ChordAction::NavigateUp);
    assert_eq!(classify("Alt+Shift+Backspace", &settings), ChordAction::NavigateUp);
    assert!(classify("Shift+Backspace", &settings).is_pass_through());
    assert!(classify("Ctrl+Alt+Backspace", &settings).is_pass_through());
}

#[test]
fn test_non_backspace_keys_never_match() {
    let settings = Settings::default();
    for chord in ["Delete", "Shift+Delete", "Enter", "Alt+F4", "B"] {
        let chord = parse_key_chord(chord).expect("valid chord");
        let action = ChordMatcher::new(&settings).classify(&KeyEvent::key_down(chord));
        assert_eq!(action, ChordAction::PassThrough(PassReason::NotBackspace));
    }
}

// ---------------------------------------------------------------------------
// Settings changes
// ---------------------------------------------------------------------------

#[test]
fn test_switching_modifier_changes_next_classification() {
    let store = SettingsStore::default();
    let chord = parse_key_chord("Shift+Backspace").unwrap();
    let event = KeyEvent::key_down(chord);

    let in_flight = ChordMatcher::new(&store.snapshot());
    store.replace(Settings::new().with_up_modifier(UpModifier::Alt));
    let next = ChordMatcher::new(&store.snapshot());

    // The matcher built before the swap keeps the old modifier
    assert_eq!(in_flight.classify(&event), ChordAction::NavigateUp);
    assert!(next.classify(&event).is_pass_through());
}
