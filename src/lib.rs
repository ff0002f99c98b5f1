//! quiet-nav: silent fallback navigation for the Windows file browser.
//!
//! Backspace in a file-browser window normally goes back in history and
//! plays an error sound when there is nowhere to go. quiet-nav intercepts
//! the key, walks an ordered fallback chain (back, parent, This PC,
//! Desktop) until one target succeeds, and silences the host's alert sound.
//!
//! - [`navigation`]: fallback chains and the stateless engine
//! - [`dispatcher`]: chord classification and per-event wiring
//! - [`resolver`]: window → browsing session lookup
//! - [`suppressor`]: alert swallowing
//! - [`runtime`]: settings lifecycle for the hooked process
//! - [`simulation`]: in-memory host for dry runs and tests

pub mod cli;
pub mod debug;
pub mod dispatcher;
pub mod error;
pub mod host;
pub mod navigation;
pub mod platform;
pub mod resolver;
pub mod runtime;
pub mod simulation;
pub mod suppressor;

pub use dispatcher::{Dispatcher, Disposition};
pub use error::NavigationError;
pub use host::{BrowsingSession, FolderIdentity, KnownLocation};
pub use navigation::{NavigationTarget, navigate_back, navigate_up};
pub use resolver::{ContextResolver, ScopedSession};
pub use suppressor::{AlertCategory, AlertSuppressor};
