//! File handler implementation

use super::format_line;
use crate::core::config::DEFAULT_DATE_FORMAT;
use crate::core::handler::all_levels;
use crate::core::{Handler, HandlerConfig, LogLevel, LoggerError, Result};
use fs2::FileExt;
use serde::Deserialize;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct FileSettings {
    path: PathBuf,
    #[serde(default = "all_levels")]
    handles: Vec<LogLevel>,
}

/// Appends one line per record to a file.
///
/// Each write holds an exclusive advisory lock so several processes can share
/// the same log file.
#[derive(Debug)]
pub struct FileHandler {
    path: PathBuf,
    file: File,
    handles: Vec<LogLevel>,
    date_format: String,
}

impl FileHandler {
    /// Open (or create) `path` for appending, creating missing parent directories
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "creating log directory",
                    parent.display().to_string(),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        Ok(Self {
            path,
            file,
            handles: all_levels(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        })
    }

    /// Restrict the handler to `levels`
    #[must_use]
    pub fn with_handles(mut self, levels: impl Into<Vec<LogLevel>>) -> Self {
        self.handles = levels.into();
        self
    }

    /// Build from `{ "path": "...", "handles": [...] }`
    pub fn from_config(config: &HandlerConfig) -> Result<Self> {
        let settings: FileSettings = config.parse("file")?;
        Self::new(settings.path)
            .map(|handler| handler.with_handles(settings.handles))
            .map_err(|e| LoggerError::handler_construction("file", e.to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_locked(&mut self, line: &str) -> std::io::Result<()> {
        FileExt::lock_exclusive(&self.file)?;
        let written = self
            .file
            .write_all(line.as_bytes())
            .and_then(|()| self.file.flush());
        let unlocked = FileExt::unlock(&self.file);
        written.and(unlocked)
    }
}

impl Handler for FileHandler {
    fn can_handle(&self, level: LogLevel) -> bool {
        self.handles.contains(&level)
    }

    fn set_date_format(&mut self, format: &str) -> &mut dyn Handler {
        self.date_format = format.to_string();
        self
    }

    fn handle(&mut self, level: LogLevel, message: &str) -> Result<bool> {
        let mut line = format_line(level, &self.date_format, message)?;
        line.push('\n');

        self.write_locked(&line).map_err(|e| {
            LoggerError::io_operation("writing log file", self.path.display().to_string(), e)
        })?;
        Ok(true)
    }

    fn name(&self) -> &str {
        "file"
    }
}
