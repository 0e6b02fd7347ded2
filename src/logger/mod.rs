//! Logger module
//!
//! The logger is an explicit capability: `main` constructs one from the
//! logging config and hands it to the server, so tests can swap in a
//! capture sink instead of touching process-wide streams.

mod format;

pub use format::AccessLogEntry;

use crate::config::LoggingConfig;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Log output target
enum LogSink {
    Stdout,
    Stderr,
    File(Mutex<File>),
    Capture(Arc<Mutex<Vec<String>>>),
}

impl LogSink {
    fn write_line(&self, message: &str) {
        match self {
            Self::Stdout => println!("{message}"),
            Self::Stderr => eprintln!("{message}"),
            Self::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{message}");
                }
            }
            Self::Capture(lines) => {
                if let Ok(mut l) = lines.lock() {
                    l.push(message.to_string());
                }
            }
        }
    }
}

/// Thread-safe logger with separate access and error targets
pub struct Logger {
    access: LogSink,
    error: LogSink,
}

impl Logger {
    /// Build a logger from the logging config, opening file targets
    /// where configured and falling back to stdout/stderr otherwise.
    pub fn from_config(config: &LoggingConfig) -> io::Result<Self> {
        let access = match config.access_log_file.as_deref() {
            Some(path) => LogSink::File(Mutex::new(open_log_file(path)?)),
            None => LogSink::Stdout,
        };
        let error = match config.error_log_file.as_deref() {
            Some(path) => LogSink::File(Mutex::new(open_log_file(path)?)),
            None => LogSink::Stderr,
        };
        Ok(Self { access, error })
    }

    /// In-memory logger for tests; both targets share one buffer.
    pub fn capture() -> (Self, CapturedLogs) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let logger = Self {
            access: LogSink::Capture(Arc::clone(&lines)),
            error: LogSink::Capture(Arc::clone(&lines)),
        };
        (logger, CapturedLogs { lines })
    }

    pub fn info(&self, message: &str) {
        self.access.write_line(message);
    }

    /// Write a formatted access log line
    pub fn access(&self, line: &str) {
        self.access.write_line(line);
    }

    pub fn warning(&self, message: &str) {
        self.error.write_line(&format!("[WARN] {message}"));
    }

    pub fn error(&self, message: &str) {
        self.error.write_line(&format!("[ERROR] {message}"));
    }
}

/// Handle to the lines collected by a capture logger
pub struct CapturedLogs {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CapturedLogs {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}
