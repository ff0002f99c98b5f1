//! Window → browsing session resolution.

use crate::error::NavigationError;
use crate::host::BrowsingSession;
use std::fmt;
use std::ops::Deref;

/// Finds the browsing session attached to a window.
pub trait ContextResolver {
    /// Host window handle type.
    type Window: Copy + fmt::Debug;
    /// Session type handed out; releasing it is dropping it.
    type Session: BrowsingSession;

    /// Look up the session for `window`.
    fn resolve(&self, window: Self::Window) -> Result<Self::Session, NavigationError>;

    /// Resolve and wrap the session for use within a single dispatch.
    ///
    /// A failure is logged and reported as `None`; the caller treats the
    /// event as unmatched.
    fn acquire(&self, window: Self::Window) -> Option<ScopedSession<Self::Session, Self::Window>> {
        match self.resolve(window) {
            Ok(session) => {
                log::trace!("Acquired browsing session for {:?}", window);
                Some(ScopedSession { session, window })
            }
            Err(e) => {
                log::debug!("No browsing session for {:?}: {}", window, e);
                None
            }
        }
    }
}

/// Session borrowed for one dispatch.
///
/// Not `Clone`: the session is released exactly once, when this value is
/// dropped, whichever path the dispatch returns through.
pub struct ScopedSession<S: BrowsingSession, W: Copy + fmt::Debug> {
    session: S,
    window: W,
}

impl<S: BrowsingSession, W: Copy + fmt::Debug> ScopedSession<S, W> {
    /// Window the session was resolved from.
    pub fn window(&self) -> W {
        self.window
    }
}

impl<S: BrowsingSession, W: Copy + fmt::Debug> Deref for ScopedSession<S, W> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.session
    }
}

impl<S: BrowsingSession, W: Copy + fmt::Debug> Drop for ScopedSession<S, W> {
    fn drop(&mut self) {
        log::trace!("Releasing browsing session for {:?}", self.window);
    }
}

impl<S: BrowsingSession, W: Copy + fmt::Debug> fmt::Debug for ScopedSession<S, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedSession")
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}
