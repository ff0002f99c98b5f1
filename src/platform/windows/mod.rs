//! Windows shell bindings and hook entry points.
//!
//! The module loader attaches this library to the file-browser process,
//! installs [`hooks::translate_accelerator_hook`] and
//! [`hooks::message_beep_hook`] in place of the host's own entry points, and
//! drives the lifecycle through the exported `quiet_nav_*` functions.

pub mod hooks;
mod shell;

pub use shell::{CabinetResolver, ItemIdList, ShellBrowserSession};

use crate::runtime::{Runtime, RuntimeOptions};

/// Module attach: load settings and arm the hooks.
#[unsafe(no_mangle)]
pub extern "system" fn quiet_nav_init() -> bool {
    let options = RuntimeOptions {
        watch_settings: true,
        ..Default::default()
    };
    match Runtime::init(options) {
        Ok(runtime) => {
            hooks::activate(runtime);
            true
        }
        Err(e) => {
            log::error!("quiet-nav init failed: {:#}", e);
            false
        }
    }
}

/// Host settings-change notification.
#[unsafe(no_mangle)]
pub extern "system" fn quiet_nav_settings_changed() {
    if let Some(runtime) = Runtime::get() {
        runtime.settings_changed();
    }
}

/// Module detach.
#[unsafe(no_mangle)]
pub extern "system" fn quiet_nav_uninit() {
    if let Some(runtime) = Runtime::get() {
        runtime.uninit();
    }
}
