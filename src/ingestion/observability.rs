//! Run observability.
//!
//! The run layer reports leveled events through an [`IngestionObserver`].
//! The bundled binary wires up a [`FileObserver`] (append-mode log file) and
//! a [`ConsoleObserver`], fanned out through a [`CompositeObserver`]; tests
//! plug in their own recording observers.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Local;

/// Severity of a run event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal, e.g. missing input file).
    Warning,
    /// Error-level event (the run could not ingest).
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        })
    }
}

/// Observer interface for run events.
///
/// Implementors can record logs, print progress, or collect events for
/// assertions.
pub trait IngestionObserver: Send + Sync {
    /// Called for every leveled event the run emits.
    fn record(&self, level: LogLevel, message: &str);
}

/// An observer that fans events out to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl IngestionObserver for CompositeObserver {
    fn record(&self, level: LogLevel, message: &str) {
        for o in &self.observers {
            o.record(level, message);
        }
    }
}

/// Prints events to stdout for a human watching the run.
///
/// Info lines are printed bare; warnings and errors carry their level.
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl IngestionObserver for ConsoleObserver {
    fn record(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => println!("{message}"),
            LogLevel::Warning | LogLevel::Error => println!("{level}: {message}"),
        }
    }
}

/// Appends `<timestamp> - <LEVEL> - <message>` lines to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`, creating the
    /// parent directory if it does not exist.
    ///
    /// Writes are best-effort; failures to open/write the log file are
    /// ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                let _ = fs::create_dir_all(dir);
            }
        }
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl IngestionObserver for FileObserver {
    fn record(&self, level: LogLevel, message: &str) {
        let ts = Local::now().format("%Y-%m-%d %H:%M:%S");
        self.append_line(&format!("{ts} - {level} - {message}"));
    }
}
