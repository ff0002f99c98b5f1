//! Host object model as seen by the fallback engine.
//!
//! The engine never touches the platform directly: it talks to a
//! [`BrowsingSession`], and location values flow through it as opaque
//! [`FolderIdentity`] values. The Windows implementation lives in
//! `platform::windows`; an in-memory one lives in `simulation`.

use crate::error::NavigationError;
use std::fmt;

/// Opaque reference to a location in the shell namespace.
///
/// Comparable and able to derive its parent, but deliberately not a path
/// string: virtual locations have no path at all.
pub trait FolderIdentity: PartialEq + fmt::Debug + Sized {
    /// Identity with the last component removed, or `None` at a namespace root.
    fn parent(&self) -> Option<Self>;
}

/// Well-known virtual collections resolved by fixed identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownLocation {
    /// The "all drives" collection (This PC)
    AllDrives,
    /// The desktop, root of the shell namespace
    Desktop,
}

impl fmt::Display for KnownLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnownLocation::AllDrives => write!(f, "This PC"),
            KnownLocation::Desktop => write!(f, "Desktop"),
        }
    }
}

/// Navigation operations of one file-browser view.
///
/// Every call is synchronous and completes within the current dispatch.
/// Success is binary: `Ok(())` carries no detail about what actually changed.
pub trait BrowsingSession {
    type Folder: FolderIdentity;

    /// Identity of the folder the active view is showing.
    fn current_folder(&self) -> Result<Self::Folder, NavigationError>;

    /// Navigate to `folder` as an absolute location.
    fn browse_to(&self, folder: &Self::Folder) -> Result<(), NavigationError>;

    /// Step back in the view's history.
    fn browse_back(&self) -> Result<(), NavigationError>;

    /// Resolve a well-known collection.
    fn known_location(&self, location: KnownLocation) -> Result<Self::Folder, NavigationError>;
}
