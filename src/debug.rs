//! Diagnostic logging for quiet-nav.
//!
//! All code logs through the `log` facade. [`DiagnosticsLogger`] is the
//! installed backend: it checks the live settings on every record and drops
//! everything while `logging_enabled` is off, so diagnostics can be toggled
//! at runtime without changing what the hooks do.
//!
//! In the hooked process output goes to `quiet_nav_debug.log` in the temp
//! directory (the process has no console). The CLI writes to stderr.

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use quiet_nav_config::SettingsStore;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Default log file for the hooked process.
pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join("quiet_nav_debug.log")
}

/// Where formatted records are written.
enum Sink {
    Stream(Box<dyn Write + Send>),
    /// Opened on the first record that passes the filter. An open failure
    /// silently discards records from then on.
    File {
        path: PathBuf,
        file: Option<File>,
        unavailable: bool,
    },
}

impl Sink {
    fn writer(&mut self) -> Option<&mut dyn Write> {
        match self {
            Sink::Stream(stream) => Some(&mut **stream),
            Sink::File {
                path,
                file,
                unavailable,
            } => {
                if file.is_none() && !*unavailable {
                    match OpenOptions::new().create(true).append(true).open(&*path) {
                        Ok(opened) => *file = Some(opened),
                        Err(_) => *unavailable = true,
                    }
                }
                file.as_mut().map(|f| f as &mut dyn Write)
            }
        }
    }
}

/// `log` backend gated on the live settings.
pub struct DiagnosticsLogger {
    settings: Arc<SettingsStore>,
    level: LevelFilter,
    sink: Mutex<Sink>,
}

impl std::fmt::Debug for DiagnosticsLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsLogger")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

impl DiagnosticsLogger {
    /// Logger writing to an arbitrary sink.
    pub fn with_sink(
        settings: Arc<SettingsStore>,
        level: LevelFilter,
        sink: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            settings,
            level,
            sink: Mutex::new(Sink::Stream(sink)),
        }
    }

    /// Logger appending to `path`.
    ///
    /// The file is not touched until logging is enabled and a record is
    /// written, so a disabled logger never creates it.
    pub fn to_file(settings: Arc<SettingsStore>, level: LevelFilter, path: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            level,
            sink: Mutex::new(Sink::File {
                path: path.into(),
                file: None,
                unavailable: false,
            }),
        }
    }

    /// Logger writing to stderr.
    pub fn to_stderr(settings: Arc<SettingsStore>, level: LevelFilter) -> Self {
        Self::with_sink(settings, level, Box::new(io::stderr()))
    }

    /// Install as the global `log` backend.
    ///
    /// Fails if another logger is already installed.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    fn format(record: &Record) -> String {
        // One line per record: collapse any embedded newlines
        let message = record.args().to_string().replace(['\r', '\n'], " ");
        format!(
            "[{}] [{:<5}] [{}] {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            message
        )
    }
}

impl Log for DiagnosticsLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && self.settings.logging_enabled()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format(record);
        let mut sink = self.sink.lock();
        // A broken sink must never disturb the host
        if let Some(writer) = sink.writer() {
            let _ = writer.write_all(line.as_bytes());
            let _ = writer.flush();
        }
    }

    fn flush(&self) {
        let mut sink = self.sink.lock();
        match &mut *sink {
            Sink::Stream(stream) => {
                let _ = stream.flush();
            }
            Sink::File {
                file: Some(file), ..
            } => {
                let _ = file.flush();
            }
            Sink::File { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use quiet_nav_config::Settings;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    fn logger(enabled: bool) -> (DiagnosticsLogger, Arc<SettingsStore>, SharedBuffer) {
        let store = Arc::new(SettingsStore::new(Settings::new().with_logging(enabled)));
        let buffer = SharedBuffer::default();
        let logger = DiagnosticsLogger::with_sink(
            Arc::clone(&store),
            LevelFilter::Debug,
            Box::new(buffer.clone()),
        );
        (logger, store, buffer)
    }

    fn emit(logger: &DiagnosticsLogger, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .args(format_args!("{message}"))
                .level(level)
                .target("quiet_nav::test")
                .build(),
        );
    }

    #[test]
    fn test_disabled_writes_nothing() {
        let (logger, _store, buffer) = logger(false);
        emit(&logger, Level::Info, "hidden");
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn test_enabled_writes_single_line() {
        let (logger, _store, buffer) = logger(true);
        emit(&logger, Level::Info, "first\nsecond");
        let contents = buffer.contents();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("[INFO ] [quiet_nav::test] first second"));
    }

    #[test]
    fn test_toggle_takes_effect_immediately() {
        let (logger, store, buffer) = logger(false);
        emit(&logger, Level::Info, "before");
        store.replace(Settings::new().with_logging(true));
        emit(&logger, Level::Info, "after");
        let contents = buffer.contents();
        assert!(!contents.contains("before"));
        assert!(contents.contains("after"));
    }

    #[test]
    fn test_file_created_only_once_enabled() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("diagnostics.log");
        let store = Arc::new(SettingsStore::new(Settings::new().with_logging(false)));
        let logger = DiagnosticsLogger::to_file(Arc::clone(&store), LevelFilter::Debug, &path);

        emit(&logger, Level::Info, "hidden");
        logger.flush();
        assert!(!path.exists());

        store.replace(Settings::new().with_logging(true));
        emit(&logger, Level::Info, "visible");
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("visible"));
        assert!(!contents.contains("hidden"));
    }

    #[test]
    fn test_unopenable_file_discards_records() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("diagnostics.log");
        let store = Arc::new(SettingsStore::new(Settings::new().with_logging(true)));
        let logger = DiagnosticsLogger::to_file(store, LevelFilter::Debug, &path);

        emit(&logger, Level::Info, "first");
        emit(&logger, Level::Warn, "second");
        logger.flush();
        assert!(!path.exists());
    }

    #[test]
    fn test_level_filter_applies() {
        let (logger, _store, buffer) = logger(true);
        emit(&logger, Level::Trace, "too chatty");
        assert!(buffer.contents().is_empty());
    }
}
