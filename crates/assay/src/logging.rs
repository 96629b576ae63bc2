//! Process log sink.
//!
//! The log is an append-only text file with one line per event: timestamp,
//! level, message and any structured fields. It is opened once by [`init`],
//! which installs a global `tracing` subscriber, and flushed when the
//! returned [`LogGuard`] is dropped.
//!
//! ```rust,no_run
//! use assay::logging::{LogConfig, init};
//!
//! let _guard = init(LogConfig::new("data_validation.log")).unwrap();
//! tracing::info!("Run started");
//! ```

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::{AssayError, Result};

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "data_validation.log";

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// File the log is appended to.
    pub path: PathBuf,
    /// Level used when `RUST_LOG` is not set.
    pub level: Level,
}

impl LogConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            level: Level::INFO,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Builds the environment filter, preferring `RUST_LOG` when set.
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.as_str().to_lowercase()))
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILE)
    }
}

/// Append-mode file handle shared between the subscriber and the guard.
#[derive(Debug, Clone)]
pub struct SharedLogFile(Arc<Mutex<File>>);

impl SharedLogFile {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| AssayError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(Self(Arc::new(Mutex::new(file))))
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, File>> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))
    }
}

impl Write for SharedLogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.flush()
    }
}

/// Build the subscriber used for the process log.
///
/// Plain text, no colour codes, no module targets.
pub fn subscriber<W>(make_writer: W, filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(make_writer)
        .with_ansi(false)
        .with_target(false)
        .finish()
}

/// Keeps the log sink open; flushes it when dropped.
#[derive(Debug)]
pub struct LogGuard {
    file: SharedLogFile,
    path: PathBuf,
}

impl LogGuard {
    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush buffered log output.
    pub fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        let _ = self.file.flush();
    }
}

/// Open the log file and install the global subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init(config: LogConfig) -> Result<LogGuard> {
    let file = SharedLogFile::open(&config.path)?;
    let writer = file.clone();

    subscriber(move || writer.clone(), config.env_filter())
        .try_init()
        .map_err(|e| AssayError::Logging(e.to_string()))?;

    Ok(LogGuard {
        file,
        path: config.path,
    })
}
