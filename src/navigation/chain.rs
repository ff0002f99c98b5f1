//! Ordered fallback chains and the walker that runs them.

use super::target::NavigationTarget;
use crate::host::BrowsingSession;
use std::fmt;

/// Ordered list of targets tried until one succeeds.
///
/// A chain may hand over to another chain once its own targets are
/// exhausted. Targets already attempted earlier in the same walk are
/// skipped, so no target runs twice in one dispatch.
#[derive(Debug)]
pub struct FallbackChain {
    name: &'static str,
    targets: &'static [NavigationTarget],
    then: Option<&'static FallbackChain>,
}

/// Back, then parent, then This PC, then Desktop as the last resort.
pub static BACK_CHAIN: FallbackChain = FallbackChain {
    name: "back",
    targets: &[
        NavigationTarget::Back,
        NavigationTarget::Parent,
        NavigationTarget::RootCollection,
        NavigationTarget::DesktopCollection,
    ],
    then: None,
};

/// Parent, then everything the Back-chain would do.
pub static UP_CHAIN: FallbackChain = FallbackChain {
    name: "up",
    targets: &[NavigationTarget::Parent],
    then: Some(&BACK_CHAIN),
};

impl FallbackChain {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Targets in the order they will be attempted.
    pub fn targets(&self) -> Vec<NavigationTarget> {
        let mut ordered = Vec::with_capacity(NavigationTarget::all().len());
        let mut chain = Some(self);
        while let Some(current) = chain {
            for target in current.targets {
                if !ordered.contains(target) {
                    ordered.push(*target);
                }
            }
            chain = current.then;
        }
        ordered
    }
}

impl fmt::Display for FallbackChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.targets().iter().map(|t| t.to_string()).collect();
        write!(f, "{} [{}]", self.name, names.join(" -> "))
    }
}

/// What a chain walk did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOutcome {
    /// Targets attempted, in order
    pub attempted: Vec<NavigationTarget>,
    /// Target the host accepted, if any
    pub landed: Option<NavigationTarget>,
}

impl ChainOutcome {
    pub fn succeeded(&self) -> bool {
        self.landed.is_some()
    }
}

/// Walk `chain` against `session`, stopping at the first success.
pub fn run_chain<S: BrowsingSession + ?Sized>(chain: &FallbackChain, session: &S) -> ChainOutcome {
    let mut attempted = Vec::new();

    for target in chain.targets() {
        attempted.push(target);
        log::debug!("{} chain: trying {}", chain.name, target);
        if target.attempt(session) {
            log::info!(
                "{} chain: {} succeeded after {} attempt(s)",
                chain.name,
                target,
                attempted.len()
            );
            return ChainOutcome {
                attempted,
                landed: Some(target),
            };
        }
    }

    log::warn!("{} chain: every target failed", chain.name);
    ChainOutcome {
        attempted,
        landed: None,
    }
}

/// Go back, falling back to parent, This PC, then Desktop.
///
/// Returns `false` only if every target failed.
pub fn navigate_back<S: BrowsingSession + ?Sized>(session: &S) -> bool {
    run_chain(&BACK_CHAIN, session).succeeded()
}

/// Go to the parent, falling back to the full Back-chain.
pub fn navigate_up<S: BrowsingSession + ?Sized>(session: &S) -> bool {
    run_chain(&UP_CHAIN, session).succeeded()
}
