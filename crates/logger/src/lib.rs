//! Logging infrastructure for pyedit.
//!
//! Keeps the last N records in memory and mirrors them to a log file.
//! Library crates log through the `log` facade; [`init`] installs this
//! logger as its backend.

use chrono::Local;
use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

/// Log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Timestamp in HH:MM:SS format
    pub timestamp: String,
    /// Message level
    pub level: LogLevel,
    /// Module that produced the record
    pub target: String,
    /// Message text
    pub message: String,
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert log level to string
    pub fn to_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Info => LogLevel::Info,
            // Trace folds into Debug
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "trace" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// Logger state
#[derive(Debug)]
struct Logger {
    /// Last N records
    entries: VecDeque<LogEntry>,
    max_entries: usize,
    min_level: LogLevel,
    /// Log file path, `None` keeps records in memory only
    file_path: Option<PathBuf>,
}

impl Logger {
    fn new(file_path: Option<PathBuf>, max_entries: usize, min_level: LogLevel) -> Self {
        if let Some(path) = &file_path {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }

            // Clear log file on startup
            if let Ok(mut file) = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
            {
                let _ = writeln!(file, "=== pyedit log start ===");
            }
        }

        Self {
            entries: VecDeque::new(),
            max_entries,
            min_level,
            file_path,
        }
    }

    fn add_entry(&mut self, level: LogLevel, target: &str, message: String) {
        if level < self.min_level {
            return;
        }

        let timestamp = Local::now().format("%H:%M:%S").to_string();

        // Write to file (create if deleted)
        if let Some(path) = &self.file_path {
            if let Ok(mut file) = OpenOptions::new().append(true).create(true).open(path) {
                let _ = writeln!(
                    file,
                    "[{}] {} {}: {}",
                    timestamp,
                    level.to_str(),
                    target,
                    message
                );
            }
        }

        self.entries.push_back(LogEntry {
            timestamp,
            level,
            target: target.to_string(),
            message,
        });

        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }
}

/// Global logger instance that persists for the application lifetime.
static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Bridge from the `log` facade to the global logger.
struct FacadeLogger;

static FACADE: FacadeLogger = FacadeLogger;

impl log::Log for FacadeLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        LOGGER
            .get()
            .and_then(|logger| logger.lock().ok())
            .map(|logger| LogLevel::from(metadata.level()) >= logger.min_level)
            .unwrap_or(false)
    }

    fn log(&self, record: &log::Record) {
        if let Some(Ok(mut logger)) = LOGGER.get().map(|l| l.lock()) {
            logger.add_entry(
                record.level().into(),
                record.target(),
                record.args().to_string(),
            );
        }
    }

    fn flush(&self) {}
}

/// Initialize the global logger and install it behind the `log` facade.
///
/// Subsequent calls are ignored.
///
/// # Arguments
///
/// * `file_path` - Path to the log file, `None` for memory only
/// * `max_entries` - Maximum number of log entries to keep in memory
/// * `min_level` - Minimum log level to record
pub fn init(file_path: Option<PathBuf>, max_entries: usize, min_level: LogLevel) {
    let mut fresh = false;
    LOGGER.get_or_init(|| {
        fresh = true;
        Mutex::new(Logger::new(file_path, max_entries, min_level))
    });

    if fresh && log::set_logger(&FACADE).is_ok() {
        log::set_max_level(min_level.to_filter());
    }
}

/// Get all log entries currently stored in memory.
pub fn get_entries() -> Vec<LogEntry> {
    match LOGGER.get().map(|l| l.lock()) {
        Some(Ok(logger)) => logger.entries.iter().cloned().collect(),
        _ => Vec::new(),
    }
}
