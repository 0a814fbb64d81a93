//! Rolling file logger with an in-memory circular buffer.
//!
//! Log lines are appended to one file per day (`{app}-{YYYY-MM-DD}.log`)
//! inside the directory given to [`init_logger`]. Old files beyond
//! [`MAX_LOG_FILES`] are pruned whenever the date rolls over. The most
//! recent lines are also kept in a bounded ring buffer so callers can
//! show them without touching the filesystem.
//!
//! [`init_logger`] additionally registers the logger as the backend for
//! the `log` crate facade, so `log::info!` and friends end up in the
//! same files.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use chrono::{Local, NaiveDate};
use log::{Level, LevelFilter, Metadata, Record};

/// How many daily log files are kept on disk.
pub const MAX_LOG_FILES: usize = 7;

/// Capacity of the in-memory ring buffer of recent lines.
pub const RING_CAPACITY: usize = 256;

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// Thread-safe rolling file logger.
pub struct RollingLogger {
    log_dir: PathBuf,
    app_name: String,
    inner: Mutex<LoggerInner>,
}

struct LoggerInner {
    file: File,
    current_date: NaiveDate,
    ring: VecDeque<String>,
}

impl RollingLogger {
    /// Creates a logger writing into `log_dir`, creating the directory
    /// and today's log file if needed.
    pub fn new(log_dir: PathBuf, app_name: &str) -> Result<Self, String> {
        fs::create_dir_all(&log_dir)
            .map_err(|e| format!("Failed to create log dir {}: {}", log_dir.display(), e))?;

        let today = Local::now().date_naive();
        let file = open_log_file(&log_dir, app_name, today)?;
        prune_old_logs(&log_dir, app_name);

        Ok(RollingLogger {
            log_dir,
            app_name: app_name.to_string(),
            inner: Mutex::new(LoggerInner {
                file,
                current_date: today,
                ring: VecDeque::with_capacity(RING_CAPACITY),
            }),
        })
    }

    /// Path of the file currently being written.
    pub fn current_file_path(&self) -> PathBuf {
        match self.inner.lock() {
            Ok(inner) => log_file_name(&self.log_dir, &self.app_name, inner.current_date),
            Err(_) => log_file_name(&self.log_dir, &self.app_name, Local::now().date_naive()),
        }
    }

    /// Appends one line, rolling to a new file when the date changed.
    pub fn write_line(&self, level: Level, message: &str) -> Result<(), String> {
        let now = Local::now();
        let line = format!(
            "[{}] [{}] {}",
            now.format("%Y-%m-%d %H:%M:%S%.3f"),
            level,
            message
        );

        let mut inner = self
            .inner
            .lock()
            .map_err(|_| "Logger mutex poisoned".to_string())?;

        let today = now.date_naive();
        if today != inner.current_date {
            inner.file = open_log_file(&self.log_dir, &self.app_name, today)?;
            inner.current_date = today;
            prune_old_logs(&self.log_dir, &self.app_name);
        }

        writeln!(inner.file, "{}", line)
            .map_err(|e| format!("Failed to write log line: {}", e))?;

        if inner.ring.len() == RING_CAPACITY {
            inner.ring.pop_front();
        }
        inner.ring.push_back(line);

        Ok(())
    }

    /// Most recent lines, oldest first, at most `limit`.
    pub fn recent_lines(&self, limit: usize) -> Vec<String> {
        match self.inner.lock() {
            Ok(inner) => {
                let skip = inner.ring.len().saturating_sub(limit);
                inner.ring.iter().skip(skip).cloned().collect()
            }
            Err(_) => Vec::new(),
        }
    }
}

impl log::Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = self.write_line(record.level(), &record.args().to_string());
        }
    }

    fn flush(&self) {}
}

fn log_file_name(log_dir: &Path, app_name: &str, date: NaiveDate) -> PathBuf {
    log_dir.join(format!("{}-{}.log", app_name, date.format("%Y-%m-%d")))
}

fn open_log_file(log_dir: &Path, app_name: &str, date: NaiveDate) -> Result<File, String> {
    let path = log_file_name(log_dir, app_name, date);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("Failed to open log file {}: {}", path.display(), e))
}

fn prune_old_logs(log_dir: &Path, app_name: &str) {
    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };

    let prefix = format!("{}-", app_name);
    let mut logs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(&prefix) && n.ends_with(".log"))
                .unwrap_or(false)
        })
        .collect();

    // Date is embedded in the name, so lexicographic order is chronological
    logs.sort();
    while logs.len() > MAX_LOG_FILES {
        let oldest = logs.remove(0);
        let _ = fs::remove_file(oldest);
    }
}

/// Initializes the global logger and installs it as the `log` facade
/// backend. Returns an error when called twice.
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    let logger = RollingLogger::new(log_dir, app_name)?;
    LOGGER
        .set(logger)
        .map_err(|_| "Logger already initialized".to_string())?;

    if let Some(logger) = LOGGER.get() {
        log::set_logger(logger).map_err(|e| format!("Failed to install log facade: {}", e))?;
        log::set_max_level(LevelFilter::Debug);
    }

    Ok(())
}

fn with_logger(level: Level, message: &str) -> Result<(), String> {
    match LOGGER.get() {
        Some(logger) => logger.write_line(level, message),
        None => Err("Logger not initialized".to_string()),
    }
}

/// Logs a line at info level through the global logger.
pub fn info(message: &str) -> Result<(), String> {
    with_logger(Level::Info, message)
}

/// Logs a line at warn level through the global logger.
pub fn warn(message: &str) -> Result<(), String> {
    with_logger(Level::Warn, message)
}

/// Logs a line at error level through the global logger.
pub fn error(message: &str) -> Result<(), String> {
    with_logger(Level::Error, message)
}

/// Logs a line at debug level through the global logger.
pub fn debug(message: &str) -> Result<(), String> {
    with_logger(Level::Debug, message)
}

/// Recent lines from the global logger, oldest first.
pub fn recent_lines(limit: usize) -> Vec<String> {
    match LOGGER.get() {
        Some(logger) => logger.recent_lines(limit),
        None => Vec::new(),
    }
}
