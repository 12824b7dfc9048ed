//! Logging setup on top of `tracing-subscriber`.
//!
//! By default events go to stderr. With `enabled = true` they are written
//! to `~/.config/rum/logs/rum.log` instead; when the file exceeds the
//! configured size it is rotated to `rum.log.1` (one backup kept).

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::Result;

const LOG_FILE_NAME: &str = "rum.log";

/// Crate targets whose events the level applies to.
const OUR_CRATES: &[&str] = &["rum", "rum_core", "rum_windows"];

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false` (stderr).
    pub enabled: bool,
    /// Minimum log level: "trace", "debug", "info", "warn", or "error".
    pub level: String,
    /// Maximum log file size in megabytes before rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

impl LogConfig {
    /// Rotation threshold in bytes, saturating for oversized values.
    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_mb.saturating_mul(1024 * 1024)
    }
}

/// Builds a filter directive setting `level` for all of our crates.
///
/// Unknown levels fall back to `info`.
pub fn level_spec_for(level: &str) -> String {
    let lvl = match level.to_ascii_lowercase().as_str() {
        l @ ("trace" | "debug" | "info" | "warn" | "error") => l.to_string(),
        _ => "info".to_string(),
    };
    OUR_CRATES
        .iter()
        .map(|t| format!("{t}={lvl}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the global subscriber. Call once at startup.
///
/// `RUST_LOG` overrides the configured level. A second call is a no-op.
pub fn init(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_spec_for(&config.level)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if !config.enabled {
        let _ = builder.with_writer(io::stderr).try_init();
        return Ok(());
    }

    let dir = crate::config::config_dir()
        .ok_or_else(|| crate::Error::Config("could not determine log directory".into()))?
        .join("logs");
    let file = RotatingFile::open(&dir.join(LOG_FILE_NAME), config.max_file_bytes())?;
    let _ = builder.with_ansi(false).with_writer(file).try_init();
    Ok(())
}

/// A log file that rotates itself once it grows past `max_bytes`.
pub struct RotatingFile {
    inner: Mutex<LogFile>,
}

struct LogFile {
    file: File,
    path: PathBuf,
    max_bytes: u64,
    written: u64,
}

impl RotatingFile {
    /// Opens (appending) or creates the log file and its directory.
    ///
    /// `max_bytes == 0` disables rotation.
    pub fn open(path: &Path, max_bytes: u64) -> Result<Self> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            inner: Mutex::new(LogFile {
                file,
                path: path.to_path_buf(),
                max_bytes,
                written,
            }),
        })
    }
}

impl LogFile {
    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".1");
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        fs::rename(&self.path, self.backup_path())?;
        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for LogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.file.write(buf)?;
        self.written += n as u64;
        if self.max_bytes > 0 && self.written >= self.max_bytes {
            // The bytes are already on disk. A failed rotation is retried
            // once another `max_bytes` have been written.
            if let Err(e) = self.rotate() {
                eprintln!("Warning: could not rotate {}: {e}", self.path.display());
                self.written = 0;
            }
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Writer handed out per event by [`RotatingFile`].
pub struct RotatingWriter<'a>(&'a Mutex<LogFile>);

impl Write for RotatingWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?
            .flush()
    }
}

impl<'a> MakeWriter<'a> for RotatingFile {
    type Writer = RotatingWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingWriter(&self.inner)
    }
}
