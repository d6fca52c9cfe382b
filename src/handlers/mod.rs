//! Handler implementations

#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "file")]
pub mod file;

#[cfg(feature = "console")]
pub use console::ConsoleHandler;
#[cfg(feature = "file")]
pub use file::FileHandler;

// Re-export traits for convenience
pub use crate::core::{Handler, HandlerConfig};

use crate::core::{LogLevel, LoggerError, Result};
use chrono::Local;
use std::fmt::Write;

/// Render `LEVEL - <date> --> message` with the local time.
///
/// Invalid date formats surface as an error rather than a panic.
pub fn format_line(level: LogLevel, date_format: &str, message: &str) -> Result<String> {
    let mut line = String::with_capacity(message.len() + 40);
    write!(
        line,
        "{} - {} --> {}",
        level.label(),
        Local::now().format(date_format),
        message
    )
    .map_err(|_| LoggerError::config("date_format", format!("cannot render '{}'", date_format)))?;
    Ok(line)
}
