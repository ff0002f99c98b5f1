//! Process-wide lifecycle for the hooked process.
//!
//! The loader calls [`Runtime::init`] once when the module is attached,
//! [`Runtime::settings_changed`] whenever the host reports a settings change,
//! and [`Runtime::uninit`] on detach.

use crate::debug::{self, DiagnosticsLogger};
use crate::suppressor::AlertSuppressor;
use anyhow::Result;
use log::LevelFilter;
use parking_lot::Mutex;
use quiet_nav_config::watcher::ReloadHandle;
use quiet_nav_config::{Settings, SettingsProvider, SettingsStore};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

const WATCH_DEBOUNCE_MS: u64 = 200;

/// Where diagnostics go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogTarget {
    /// `quiet_nav_debug.log` in the temp directory
    #[default]
    TempFile,
    /// A specific file
    File(PathBuf),
    /// Standard error
    Stderr,
    /// No logger is installed
    None,
}

/// Options for [`Runtime::init`].
#[derive(Debug, Clone, Default)]
pub struct RuntimeOptions {
    /// Settings file; defaults to the per-user config location
    pub settings_path: Option<PathBuf>,
    /// Reload settings automatically when the file changes
    pub watch_settings: bool,
    pub log_target: LogTarget,
}

/// State shared by every hook in the process.
#[derive(Debug)]
pub struct Runtime {
    provider: SettingsProvider,
    suppressor: AlertSuppressor,
    reloader: Mutex<Option<ReloadHandle>>,
}

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

impl Runtime {
    /// Build a runtime without registering it globally.
    pub fn new(options: &RuntimeOptions) -> Result<Self> {
        let path = options
            .settings_path
            .clone()
            .unwrap_or_else(Settings::config_path);
        let provider = SettingsProvider::open(path);

        let reloader = if options.watch_settings {
            match ReloadHandle::spawn(provider.clone(), WATCH_DEBOUNCE_MS) {
                Ok(handle) => Some(handle),
                Err(e) => {
                    // The host's own change notification still works without it
                    log::warn!("Settings watcher unavailable: {:#}", e);
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            provider,
            suppressor: AlertSuppressor::new(),
            reloader: Mutex::new(reloader),
        })
    }

    /// Initialise the process-wide runtime. Later calls return the first one.
    pub fn init(options: RuntimeOptions) -> Result<&'static Runtime> {
        if let Some(runtime) = RUNTIME.get() {
            return Ok(runtime);
        }

        let runtime = Self::new(&options)?;
        install_logger(&options.log_target, runtime.settings());
        log::info!("quiet-nav init");

        Ok(RUNTIME.get_or_init(|| runtime))
    }

    /// The runtime, if [`init`](Self::init) has run.
    pub fn get() -> Option<&'static Runtime> {
        RUNTIME.get()
    }

    pub fn settings(&self) -> &Arc<SettingsStore> {
        self.provider.store()
    }

    pub fn suppressor(&self) -> &AlertSuppressor {
        &self.suppressor
    }

    /// Change notification from the host: re-read and publish settings.
    pub fn settings_changed(&self) -> bool {
        log::info!("quiet-nav settings changed");
        self.provider.reload()
    }

    /// Stop background work. Hooks keep working with the last settings.
    pub fn uninit(&self) {
        log::info!("quiet-nav uninit");
        if let Some(mut handle) = self.reloader.lock().take() {
            handle.stop();
        }
        log::logger().flush();
    }
}

fn install_logger(target: &LogTarget, settings: &Arc<SettingsStore>) {
    let settings = Arc::clone(settings);
    let logger = match target {
        LogTarget::None => return,
        LogTarget::Stderr => DiagnosticsLogger::to_stderr(settings, LevelFilter::Debug),
        LogTarget::TempFile => {
            DiagnosticsLogger::to_file(settings, LevelFilter::Debug, debug::log_file_path())
        }
        LogTarget::File(path) => DiagnosticsLogger::to_file(settings, LevelFilter::Debug, path),
    };
    if logger.install().is_err() {
        // Another logger already owns the facade; keep using it
        log::debug!("Diagnostics logger not installed, a logger is already set");
    }
}
