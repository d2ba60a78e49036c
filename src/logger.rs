//! Timestamped line logger
//!
//! The terminal belongs to the UI while the game runs, so log lines are
//! appended to a file instead of stdout. Use the crate-level `log!` macro.

use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub struct Logger {
    prefix: Option<String>,
    sink: Mutex<Option<File>>,
}

impl Logger {
    fn new(prefix: Option<String>, sink: Option<File>) -> Self {
        Self {
            prefix,
            sink: Mutex::new(sink),
        }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        let Ok(mut guard) = self.sink.lock() else {
            return;
        };
        let Some(sink) = guard.as_mut() else {
            return;
        };
        // A failed write has nowhere better to be reported.
        let _ = match self.prefix {
            Some(ref prefix) => writeln!(
                sink,
                "[{}][{}][{}:{}] {}",
                timestamp, prefix, file_name, line, message
            ),
            None => writeln!(sink, "[{}][{}:{}] {}", timestamp, file_name, line, message),
        };
    }
}

/// Open (append) the log file and install the global logger.
///
/// Returns false when the file could not be opened; logging is then a no-op.
pub fn init_logger(prefix: Option<String>, path: &Path) -> bool {
    let sink = OpenOptions::new().create(true).append(true).open(path).ok();
    let opened = sink.is_some();
    LOGGER.get_or_init(|| Logger::new(prefix, sink));
    opened
}

pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}
