//! Shared integration test helpers for quiet-nav.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` attribute keeps per-file unused helpers quiet.

#![allow(dead_code)]

use quiet_nav::KnownLocation;
use quiet_nav::dispatcher::Dispatcher;
use quiet_nav::simulation::{SimFolder, SimulatedHost, SimulatedShell};
use quiet_nav_config::{Settings, SettingsStore};
use quiet_nav_keybindings::{KeyEvent, parse_key_chord};
use std::sync::Arc;

pub const WINDOW: u32 = 0x10;

/// Shell where every target fails except the ones left enabled.
///
/// No history (back fails), parent browse refused, both well-known
/// locations unresolvable.
pub fn failing_shell(at: &str) -> SimulatedShell {
    let mut shell = SimulatedShell::at(at)
        .with_unresolvable(KnownLocation::AllDrives)
        .with_unresolvable(KnownLocation::Desktop);
    if let Some(parent) = quiet_nav::FolderIdentity::parent(&SimFolder::parse(at)) {
        shell = shell.rejecting(parent);
    }
    shell
}

/// Dispatcher over a single simulated window, plus the shared settings store.
pub fn dispatcher_for(
    shell: &SimulatedShell,
    settings: Settings,
) -> (Dispatcher<SimulatedHost>, Arc<SettingsStore>) {
    let store = Arc::new(SettingsStore::new(settings));
    let host = SimulatedHost::new().with_window(WINDOW, shell.clone());
    (Dispatcher::new(host, Arc::clone(&store)), store)
}

pub fn key_down(chord: &str) -> KeyEvent {
    KeyEvent::key_down(parse_key_chord(chord).expect("valid chord"))
}
