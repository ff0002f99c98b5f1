//! Key event interception.
//!
//! Classification happens first and needs nothing but the event and a
//! settings snapshot. Only a matching chord resolves a session and runs a
//! fallback chain; everything else goes straight back to the host.

use crate::navigation::{BACK_CHAIN, ChainOutcome, FallbackChain, UP_CHAIN, run_chain};
use crate::resolver::ContextResolver;
use quiet_nav_config::SettingsStore;
use quiet_nav_keybindings::{ChordAction, ChordMatcher, KeyEvent};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// What the hook should do with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Navigation happened; suppress the host's default handling.
    Handled,
    /// Hand the event to the host unchanged.
    PassThrough,
}

/// Running totals, for diagnostics only.
#[derive(Debug, Default)]
pub struct DispatchStats {
    handled: AtomicU64,
    passed_through: AtomicU64,
}

impl DispatchStats {
    pub fn handled(&self) -> u64 {
        self.handled.load(Ordering::Relaxed)
    }

    pub fn passed_through(&self) -> u64 {
        self.passed_through.load(Ordering::Relaxed)
    }

    fn record(&self, disposition: Disposition) {
        let counter = match disposition {
            Disposition::Handled => &self.handled,
            Disposition::PassThrough => &self.passed_through,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Routes Backspace chords to the fallback engine.
#[derive(Debug)]
pub struct Dispatcher<R: ContextResolver> {
    resolver: R,
    settings: Arc<SettingsStore>,
    stats: DispatchStats,
}

impl<R: ContextResolver> Dispatcher<R> {
    pub fn new(resolver: R, settings: Arc<SettingsStore>) -> Self {
        Self {
            resolver,
            settings,
            stats: DispatchStats::default(),
        }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn stats(&self) -> &DispatchStats {
        &self.stats
    }

    /// Classify `event` against the current settings.
    pub fn classify(&self, event: &KeyEvent) -> ChordAction {
        ChordMatcher::new(&self.settings.snapshot()).classify(event)
    }

    /// Handle `event` for `window`.
    pub fn dispatch(&self, window: R::Window, event: &KeyEvent) -> Disposition {
        let disposition = match self.classify(event) {
            ChordAction::NavigateUp => self.navigate(window, event, &UP_CHAIN),
            ChordAction::NavigateBack => self.navigate(window, event, &BACK_CHAIN),
            ChordAction::PassThrough(reason) => {
                log::trace!("{} not intercepted: {:?}", event.chord, reason);
                Disposition::PassThrough
            }
        };
        self.stats.record(disposition);
        disposition
    }

    /// Hook-shaped entry point.
    ///
    /// Returns `handled` when the event was consumed; otherwise calls
    /// `original` (the host's own handler, with its untouched arguments
    /// captured) and returns its result verbatim.
    pub fn intercept<T>(
        &self,
        window: R::Window,
        event: &KeyEvent,
        handled: T,
        original: impl FnOnce() -> T,
    ) -> T {
        match self.dispatch(window, event) {
            Disposition::Handled => handled,
            Disposition::PassThrough => original(),
        }
    }

    fn navigate(&self, window: R::Window, event: &KeyEvent, chain: &FallbackChain) -> Disposition {
        log::debug!("{} detected, running {} chain", event.chord, chain.name());

        let Some(session) = self.resolver.acquire(window) else {
            return Disposition::PassThrough;
        };
        let outcome: ChainOutcome = run_chain(chain, &*session);

        if outcome.succeeded() {
            Disposition::Handled
        } else {
            log::warn!(
                "{} chain exhausted after {} attempts, passing {} to host",
                chain.name(),
                outcome.attempted.len(),
                event.chord
            );
            Disposition::PassThrough
        }
    }
}
