//! `IShellBrowser`-backed browsing sessions.

use crate::error::NavigationError;
use crate::host::{BrowsingSession, FolderIdentity, KnownLocation};
use crate::resolver::ContextResolver;
use std::ffi::c_void;
use std::fmt;
use std::ptr::NonNull;
use windows::Win32::Foundation::HWND;
use windows::Win32::System::Com::CoTaskMemFree;
use windows::Win32::UI::Shell::Common::ITEMIDLIST;
use windows::Win32::UI::Shell::{
    CSIDL_DESKTOP, CSIDL_DRIVES, ILClone, ILIsEqual, ILRemoveLastID, IPersistFolder2,
    IShellBrowser, SBSP_ABSOLUTE, SBSP_NAVIGATEBACK, SHGetSpecialFolderLocation,
    SVGIO_BACKGROUND,
};
use windows::Win32::UI::WindowsAndMessaging::GetPropW;
use windows::core::{IUnknown, Interface, w};

/// Owned shell item identifier list (PIDL), freed on drop.
pub struct ItemIdList(NonNull<ITEMIDLIST>);

impl ItemIdList {
    /// Take ownership of a PIDL allocated with the COM task allocator.
    ///
    /// # Safety
    /// `pidl` must be null or a valid PIDL that nothing else will free.
    unsafe fn from_raw(pidl: *mut ITEMIDLIST) -> Option<Self> {
        NonNull::new(pidl).map(Self)
    }

    fn as_ptr(&self) -> *const ITEMIDLIST {
        self.0.as_ptr()
    }
}

impl Drop for ItemIdList {
    fn drop(&mut self) {
        unsafe { CoTaskMemFree(Some(self.0.as_ptr() as *const c_void)) };
    }
}

impl PartialEq for ItemIdList {
    fn eq(&self, other: &Self) -> bool {
        unsafe { ILIsEqual(self.as_ptr(), other.as_ptr()).as_bool() }
    }
}

impl fmt::Debug for ItemIdList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemIdList({:p})", self.0.as_ptr())
    }
}

impl FolderIdentity for ItemIdList {
    fn parent(&self) -> Option<Self> {
        let copy = unsafe { Self::from_raw(ILClone(self.as_ptr()))? };
        // ILRemoveLastID fails on the empty list, i.e. the desktop
        if unsafe { ILRemoveLastID(Some(copy.0.as_ptr())) }.as_bool() {
            Some(copy)
        } else {
            None
        }
    }
}

/// Browsing session of one file-browser window.
///
/// Holds a counted reference to the window's `IShellBrowser`; dropping the
/// session releases it.
pub struct ShellBrowserSession {
    browser: IShellBrowser,
}

impl fmt::Debug for ShellBrowserSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellBrowserSession").finish_non_exhaustive()
    }
}

impl BrowsingSession for ShellBrowserSession {
    type Folder = ItemIdList;

    fn current_folder(&self) -> Result<ItemIdList, NavigationError> {
        unsafe {
            let view = self
                .browser
                .QueryActiveShellView()
                .map_err(|e| NavigationError::resolution("active view", e))?;
            let folder: IPersistFolder2 = view
                .GetItemObject(SVGIO_BACKGROUND)
                .map_err(|e| NavigationError::resolution("view folder", e))?;
            let pidl = folder
                .GetCurFolder()
                .map_err(|e| NavigationError::resolution("current folder", e))?;
            ItemIdList::from_raw(pidl)
                .ok_or_else(|| NavigationError::resolution("current folder", "null identity"))
        }
    }

    fn browse_to(&self, folder: &ItemIdList) -> Result<(), NavigationError> {
        unsafe { self.browser.BrowseObject(folder.as_ptr(), SBSP_ABSOLUTE) }
            .map_err(|e| NavigationError::action("absolute browse", e))
    }

    fn browse_back(&self) -> Result<(), NavigationError> {
        // Any non-error return counts as success, even if only the
        // selection changed
        unsafe {
            self.browser
                .BrowseObject(std::ptr::null(), SBSP_NAVIGATEBACK)
        }
        .map_err(|e| NavigationError::action("back", e))
    }

    fn known_location(&self, location: KnownLocation) -> Result<ItemIdList, NavigationError> {
        let csidl = match location {
            KnownLocation::AllDrives => CSIDL_DRIVES,
            KnownLocation::Desktop => CSIDL_DESKTOP,
        };
        unsafe {
            let pidl = SHGetSpecialFolderLocation(HWND::default(), csidl as i32)
                .map_err(|e| NavigationError::resolution("known location", e))?;
            ItemIdList::from_raw(pidl)
                .ok_or_else(|| NavigationError::resolution("known location", location))
        }
    }
}

/// Resolves sessions through the window property the file browser
/// publishes its `IShellBrowser` under.
#[derive(Debug, Default, Clone, Copy)]
pub struct CabinetResolver;

impl ContextResolver for CabinetResolver {
    type Window = HWND;
    type Session = ShellBrowserSession;

    fn resolve(&self, window: HWND) -> Result<ShellBrowserSession, NavigationError> {
        let prop = unsafe { GetPropW(window, w!("CabinetWClass.IShellBrowser")) };
        let unknown = unsafe { IUnknown::from_raw_borrowed(&prop.0) }
            .ok_or_else(|| NavigationError::NoSession(format!("{window:?}")))?;
        let browser = unknown
            .cast::<IShellBrowser>()
            .map_err(|e| NavigationError::resolution("IShellBrowser", e))?;
        Ok(ShellBrowserSession { browser })
    }
}
