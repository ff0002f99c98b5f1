//! Individual navigation targets.

use crate::error::NavigationError;
use crate::host::{BrowsingSession, FolderIdentity, KnownLocation};
use std::fmt;

/// One step of a fallback chain.
///
/// Each step performs at most one navigation request on the host and never
/// retries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationTarget {
    /// Previous entry in the view's history
    Back,
    /// Folder containing the current one
    Parent,
    /// The "all drives" collection
    RootCollection,
    /// The desktop, last resort
    DesktopCollection,
}

impl NavigationTarget {
    /// All targets in Back-chain order.
    pub fn all() -> &'static [NavigationTarget] {
        &[
            NavigationTarget::Back,
            NavigationTarget::Parent,
            NavigationTarget::RootCollection,
            NavigationTarget::DesktopCollection,
        ]
    }

    /// Attempt this target, reporting only whether the host accepted it.
    pub fn attempt<S: BrowsingSession + ?Sized>(self, session: &S) -> bool {
        match self.try_attempt(session) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("{} failed: {}", self, e);
                false
            }
        }
    }

    /// Attempt this target, keeping the failure reason.
    pub fn try_attempt<S: BrowsingSession + ?Sized>(
        self,
        session: &S,
    ) -> Result<(), NavigationError> {
        match self {
            NavigationTarget::Back => session.browse_back(),
            NavigationTarget::Parent => {
                let current = session.current_folder()?;
                let parent = current
                    .parent()
                    .ok_or_else(|| NavigationError::NoParent(format!("{current:?}")))?;
                session.browse_to(&parent)
            }
            NavigationTarget::RootCollection => {
                browse_known(session, KnownLocation::AllDrives)
            }
            NavigationTarget::DesktopCollection => browse_known(session, KnownLocation::Desktop),
        }
    }
}

fn browse_known<S: BrowsingSession + ?Sized>(
    session: &S,
    location: KnownLocation,
) -> Result<(), NavigationError> {
    let folder = session.known_location(location)?;
    session.browse_to(&folder)
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationTarget::Back => write!(f, "back"),
            NavigationTarget::Parent => write!(f, "parent"),
            NavigationTarget::RootCollection => write!(f, "This PC"),
            NavigationTarget::DesktopCollection => write!(f, "Desktop"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{HostCall, SimFolder, SimulatedShell};

    #[test]
    fn test_parent_browses_to_containing_folder() {
        let shell = SimulatedShell::at(r"C:\Users\X\Docs");
        assert!(NavigationTarget::Parent.attempt(&shell));
        assert_eq!(shell.current().to_string(), r"C:\Users\X");
    }

    #[test]
    fn test_parent_at_root_is_failure_without_host_call() {
        let shell = SimulatedShell::at("Desktop");
        let err = NavigationTarget::Parent.try_attempt(&shell).unwrap_err();
        assert!(matches!(err, NavigationError::NoParent(_)));
        assert!(shell.calls().is_empty());
    }

    #[test]
    fn test_back_uses_history() {
        let shell = SimulatedShell::at(r"C:\Temp").with_history([r"C:\Users"]);
        assert!(NavigationTarget::Back.attempt(&shell));
        assert_eq!(shell.calls(), vec![HostCall::BrowseBack]);
        assert_eq!(shell.current().to_string(), r"C:\Users");
    }

    #[test]
    fn test_unresolvable_known_location_is_failure() {
        let shell = SimulatedShell::at(r"C:\Temp").with_unresolvable(KnownLocation::AllDrives);
        let err = NavigationTarget::RootCollection
            .try_attempt(&shell)
            .unwrap_err();
        assert!(err.is_resolution());
        assert!(shell.calls().is_empty());
    }

    #[test]
    fn test_desktop_lands_on_desktop() {
        let shell = SimulatedShell::at(r"C:\Temp");
        assert!(NavigationTarget::DesktopCollection.attempt(&shell));
        assert_eq!(shell.current(), SimFolder::desktop());
    }
}
