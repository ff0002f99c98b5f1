//! In-memory shell used for dry runs and tests.
//!
//! [`SimulatedShell`] behaves like one file-browser view: it has a current
//! folder, a back history, and knobs to make individual host operations fail.
//! Every navigation request is recorded as a [`HostCall`]. Cloning a shell
//! hands out another reference to the same view, and the number of live
//! references is tracked so callers can verify sessions are released.

use crate::error::NavigationError;
use crate::host::{BrowsingSession, FolderIdentity, KnownLocation};
use crate::resolver::ContextResolver;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

const THIS_PC: &str = "This PC";

/// Location in the simulated namespace, rooted at the desktop.
///
/// `C:\Users\X` is stored as `[This PC, C:, Users, X]`. Locations written as
/// `::{...}` are detached virtual folders with no parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimFolder {
    segments: Vec<String>,
    detached: bool,
}

impl SimFolder {
    pub fn desktop() -> Self {
        Self {
            segments: Vec::new(),
            detached: false,
        }
    }

    pub fn all_drives() -> Self {
        Self {
            segments: vec![THIS_PC.to_string()],
            detached: false,
        }
    }

    /// Parse a display path such as `C:\Users\X`, `This PC` or `Desktop`.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.is_empty() || location.eq_ignore_ascii_case("desktop") {
            return Self::desktop();
        }
        if location.eq_ignore_ascii_case(THIS_PC) {
            return Self::all_drives();
        }
        if location.starts_with("::") {
            return Self {
                segments: vec![location.to_string()],
                detached: true,
            };
        }

        let parts = location
            .split(['\\', '/'])
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        let is_drive = location.as_bytes().get(1) == Some(&b':');
        let segments = if is_drive {
            std::iter::once(THIS_PC.to_string()).chain(parts).collect()
        } else {
            parts.collect()
        };
        Self {
            segments,
            detached: false,
        }
    }
}

impl From<&str> for SimFolder {
    fn from(location: &str) -> Self {
        Self::parse(location)
    }
}

impl FolderIdentity for SimFolder {
    fn parent(&self) -> Option<Self> {
        if self.detached || self.segments.is_empty() {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(Self {
            segments,
            detached: false,
        })
    }
}

impl fmt::Display for SimFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.segments.as_slice() {
            [] => write!(f, "Desktop"),
            [only] if self.detached => write!(f, "{only}"),
            [pc] if pc == THIS_PC => write!(f, "{THIS_PC}"),
            [pc, drive] if pc == THIS_PC => write!(f, "{drive}\\"),
            [pc, rest @ ..] if pc == THIS_PC => write!(f, "{}", rest.join("\\")),
            all => write!(f, "{}", all.join("\\")),
        }
    }
}

/// A navigation request the simulated host received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    BrowseBack,
    BrowseTo(SimFolder),
}

impl fmt::Display for HostCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostCall::BrowseBack => write!(f, "browse back"),
            HostCall::BrowseTo(folder) => write!(f, "browse to {folder}"),
        }
    }
}

#[derive(Debug)]
struct ShellState {
    current: SimFolder,
    history: Vec<SimFolder>,
    back_rejected: bool,
    rejected: HashSet<SimFolder>,
    unresolvable: HashSet<KnownLocation>,
    calls: Vec<HostCall>,
    open_handles: usize,
}

/// One simulated file-browser view.
#[derive(Debug)]
pub struct SimulatedShell {
    state: Rc<RefCell<ShellState>>,
}

impl SimulatedShell {
    /// View showing `location` with an empty history.
    pub fn at(location: impl Into<SimFolder>) -> Self {
        Self {
            state: Rc::new(RefCell::new(ShellState {
                current: location.into(),
                history: Vec::new(),
                back_rejected: false,
                rejected: HashSet::new(),
                unresolvable: HashSet::new(),
                calls: Vec::new(),
                open_handles: 1,
            })),
        }
    }

    /// Set the back history, oldest entry first.
    pub fn with_history<I, L>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<SimFolder>,
    {
        self.state.borrow_mut().history = entries.into_iter().map(Into::into).collect();
        self
    }

    /// Make "back" fail even when history exists.
    pub fn rejecting_back(self) -> Self {
        self.state.borrow_mut().back_rejected = true;
        self
    }

    /// Make absolute navigation to `location` fail.
    pub fn rejecting(self, location: impl Into<SimFolder>) -> Self {
        self.state.borrow_mut().rejected.insert(location.into());
        self
    }

    /// Make resolution of a well-known location fail.
    pub fn with_unresolvable(self, location: KnownLocation) -> Self {
        self.state.borrow_mut().unresolvable.insert(location);
        self
    }

    pub fn current(&self) -> SimFolder {
        self.state.borrow().current.clone()
    }

    /// Navigation requests received so far.
    pub fn calls(&self) -> Vec<HostCall> {
        self.state.borrow().calls.clone()
    }

    /// Number of live references to this view.
    pub fn open_handles(&self) -> usize {
        self.state.borrow().open_handles
    }
}

impl Clone for SimulatedShell {
    fn clone(&self) -> Self {
        self.state.borrow_mut().open_handles += 1;
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl Drop for SimulatedShell {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.open_handles = state.open_handles.saturating_sub(1);
        }
    }
}

impl BrowsingSession for SimulatedShell {
    type Folder = SimFolder;

    fn current_folder(&self) -> Result<SimFolder, NavigationError> {
        Ok(self.current())
    }

    fn browse_to(&self, folder: &SimFolder) -> Result<(), NavigationError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(HostCall::BrowseTo(folder.clone()));
        if state.rejected.contains(folder) {
            return Err(NavigationError::action("browse", folder));
        }
        let previous = std::mem::replace(&mut state.current, folder.clone());
        state.history.push(previous);
        Ok(())
    }

    fn browse_back(&self) -> Result<(), NavigationError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(HostCall::BrowseBack);
        if state.back_rejected {
            return Err(NavigationError::action("back", "refused by host"));
        }
        match state.history.pop() {
            Some(previous) => {
                state.current = previous;
                Ok(())
            }
            None => Err(NavigationError::action("back", "history is empty")),
        }
    }

    fn known_location(&self, location: KnownLocation) -> Result<SimFolder, NavigationError> {
        if self.state.borrow().unresolvable.contains(&location) {
            return Err(NavigationError::resolution("known location", location));
        }
        Ok(match location {
            KnownLocation::AllDrives => SimFolder::all_drives(),
            KnownLocation::Desktop => SimFolder::desktop(),
        })
    }
}

/// Window registry of simulated views.
#[derive(Debug, Default)]
pub struct SimulatedHost {
    windows: HashMap<u32, SimulatedShell>,
}

impl SimulatedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `shell` to `window`, returning the host for chaining.
    pub fn with_window(mut self, window: u32, shell: SimulatedShell) -> Self {
        self.windows.insert(window, shell);
        self
    }
}

impl ContextResolver for SimulatedHost {
    type Window = u32;
    type Session = SimulatedShell;

    fn resolve(&self, window: u32) -> Result<SimulatedShell, NavigationError> {
        self.windows
            .get(&window)
            .cloned()
            .ok_or_else(|| NavigationError::NoSession(format!("{window:#x}")))
    }
}
