//! Fallback navigation engine.
//!
//! A navigation request walks an ordered [`FallbackChain`] of
//! [`NavigationTarget`]s against one browsing session and stops at the first
//! target the host accepts. The engine holds no state between requests.

mod chain;
mod target;

pub use chain::{BACK_CHAIN, ChainOutcome, FallbackChain, UP_CHAIN, navigate_back, navigate_up, run_chain};
pub use target::NavigationTarget;
