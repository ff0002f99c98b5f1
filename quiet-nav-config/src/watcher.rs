//! Settings file watcher for automatic reload.
//!
//! Watches the settings file for changes and publishes the new value through a
//! [`SettingsProvider`]. Uses debouncing to avoid multiple reloads during rapid
//! saves from editors.

use crate::SettingsProvider;
use anyhow::{Context, Result};
use notify::{Config as NotifyConfig, Event, PollWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Event indicating the settings file has changed and needs reloading.
#[derive(Debug, Clone)]
pub struct SettingsChangedEvent {
    /// Path to the settings file that changed.
    pub path: PathBuf,
}

/// Watches the settings file for changes and sends change events.
pub struct ConfigWatcher {
    /// The file system watcher (kept alive to maintain watching).
    _watcher: Box<dyn Watcher + Send>,
    /// Receiver for change events.
    event_receiver: Receiver<SettingsChangedEvent>,
}

impl std::fmt::Debug for ConfigWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigWatcher").finish_non_exhaustive()
    }
}

/// Build the event-handler closure shared by both watcher backends.
fn make_event_handler(
    filename: std::ffi::OsString,
    canonical_path: PathBuf,
    debounce_delay: Duration,
    tx: Sender<SettingsChangedEvent>,
    last_event_time: Arc<Mutex<Option<Instant>>>,
) -> impl Fn(std::result::Result<Event, notify::Error>) + Send + 'static {
    move |result: std::result::Result<Event, notify::Error>| {
        let Ok(event) = result else {
            return;
        };

        // Create covers editors that save by writing a new file and renaming
        if !matches!(
            event.kind,
            notify::EventKind::Modify(_) | notify::EventKind::Create(_)
        ) {
            return;
        }

        let matches_settings = event
            .paths
            .iter()
            .any(|p| p.file_name().is_some_and(|f| f == filename));
        if !matches_settings {
            return;
        }

        let should_send = {
            let now = Instant::now();
            let mut last = last_event_time.lock();
            match *last {
                Some(last_time) if now.duration_since(last_time) < debounce_delay => {
                    log::trace!("Debouncing settings change event");
                    false
                }
                _ => {
                    *last = Some(now);
                    true
                }
            }
        };

        if should_send {
            log::info!("Settings file changed: {}", canonical_path.display());
            if let Err(e) = tx.send(SettingsChangedEvent {
                path: canonical_path.clone(),
            }) {
                log::error!("Failed to send settings change event: {}", e);
            }
        }
    }
}

impl ConfigWatcher {
    /// Create a new watcher for `settings_path`.
    ///
    /// Uses the platform's native watcher and falls back to a `PollWatcher`
    /// (500 ms interval) when the native backend cannot be initialised.
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist or watching fails on both
    /// backends.
    pub fn new(settings_path: &Path, debounce_delay_ms: u64) -> Result<Self> {
        if !settings_path.exists() {
            anyhow::bail!("Settings file not found: {}", settings_path.display());
        }

        let canonical = settings_path
            .canonicalize()
            .unwrap_or_else(|_| settings_path.to_path_buf());

        let filename = canonical
            .file_name()
            .context("Settings path has no filename")?
            .to_os_string();

        let parent_dir = canonical
            .parent()
            .context("Settings path has no parent directory")?
            .to_path_buf();

        let (tx, rx) = channel::<SettingsChangedEvent>();
        let debounce_delay = Duration::from_millis(debounce_delay_ms);
        let last_event_time = Arc::new(Mutex::new(None));

        let mut watcher = Self::create_watcher(
            filename,
            canonical.clone(),
            debounce_delay,
            tx,
            last_event_time,
        )?;

        watcher
            .watch(&parent_dir, RecursiveMode::NonRecursive)
            .with_context(|| {
                format!(
                    "Failed to watch settings directory: {}",
                    parent_dir.display()
                )
            })?;

        log::info!("Settings hot reload: watching {}", canonical.display());

        Ok(Self {
            _watcher: watcher,
            event_receiver: rx,
        })
    }

    fn create_watcher(
        filename: std::ffi::OsString,
        canonical_path: PathBuf,
        debounce_delay: Duration,
        tx: Sender<SettingsChangedEvent>,
        last_event_time: Arc<Mutex<Option<Instant>>>,
    ) -> Result<Box<dyn Watcher + Send>> {
        let handler = make_event_handler(
            filename.clone(),
            canonical_path.clone(),
            debounce_delay,
            tx.clone(),
            Arc::clone(&last_event_time),
        );

        match notify::recommended_watcher(handler) {
            Ok(w) => {
                log::debug!("Settings watcher: using native backend");
                Ok(Box::new(w))
            }
            Err(e) => {
                log::warn!(
                    "Settings watcher: native backend unavailable ({}); falling back to PollWatcher",
                    e
                );
                let fallback_handler = make_event_handler(
                    filename,
                    canonical_path,
                    debounce_delay,
                    tx,
                    last_event_time,
                );
                let poll_watcher = PollWatcher::new(
                    fallback_handler,
                    NotifyConfig::default().with_poll_interval(Duration::from_millis(500)),
                )
                .context("Failed to create fallback PollWatcher")?;
                Ok(Box::new(poll_watcher))
            }
        }
    }

    /// Next pending change event, if any (non-blocking).
    pub fn try_recv(&self) -> Option<SettingsChangedEvent> {
        self.event_receiver.try_recv().ok()
    }

    fn recv_timeout(&self, timeout: Duration) -> Result<SettingsChangedEvent, RecvTimeoutError> {
        self.event_receiver.recv_timeout(timeout)
    }
}

/// Background thread that reloads settings whenever the file changes.
///
/// Dropping the handle stops the thread and the underlying watcher.
pub struct ReloadHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for ReloadHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReloadHandle")
            .field("running", &self.thread.is_some())
            .finish()
    }
}

impl ReloadHandle {
    /// Watch the provider's settings file and call
    /// [`SettingsProvider::reload`] on every debounced change.
    pub fn spawn(provider: SettingsProvider, debounce_delay_ms: u64) -> Result<Self> {
        let watcher = ConfigWatcher::new(provider.path(), debounce_delay_ms)?;
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let thread = std::thread::Builder::new()
            .name("quiet-nav-settings".to_string())
            .spawn(move || {
                while !thread_stop.load(Ordering::Relaxed) {
                    match watcher.recv_timeout(Duration::from_millis(250)) {
                        Ok(event) => {
                            log::debug!("Reloading settings from {}", event.path.display());
                            provider.reload();
                        }
                        Err(RecvTimeoutError::Timeout) => {}
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                log::debug!("Settings reload thread exiting");
            })
            .context("Failed to spawn settings reload thread")?;

        Ok(Self {
            stop,
            thread: Some(thread),
        })
    }

    /// Stop watching and wait for the reload thread to exit.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            log::error!("Settings reload thread panicked");
        }
    }
}

impl Drop for ReloadHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
