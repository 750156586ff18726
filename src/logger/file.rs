/// Daily log file persistence
///
/// Lines are appended to `<logs dir>/ziptos_<YYYY-MM-DD>.log`. Writing is a
/// no-op until `init_file_logging` has opened the file.
use super::config::get_logger_config;
use chrono::Local;
use once_cell::sync::Lazy;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::Mutex;

static LOG_FILE: Lazy<Mutex<Option<BufWriter<File>>>> = Lazy::new(|| Mutex::new(None));

/// Open (or create) today's log file
pub fn init_file_logging() {
    if !get_logger_config().file_logging {
        return;
    }

    let file_name = format!("ziptos_{}.log", Local::now().format("%Y-%m-%d"));
    let path = crate::paths::get_logs_directory().join(file_name);

    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            if let Ok(mut guard) = LOG_FILE.lock() {
                *guard = Some(BufWriter::new(file));
            }
        }
        Err(e) => {
            eprintln!("Failed to open log file '{}': {}", path.display(), e);
        }
    }
}

/// Append a single plain-text line
pub fn write_to_file(line: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(writer) = guard.as_mut() {
            let _ = writeln!(writer, "{}", line);
        }
    }
}

/// Flush buffered lines to disk
pub fn flush_file_logging() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(writer) = guard.as_mut() {
            let _ = writer.flush();
        }
    }
}
