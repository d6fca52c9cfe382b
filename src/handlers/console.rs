//! Console handler implementation

use super::format_line;
use crate::core::config::DEFAULT_DATE_FORMAT;
use crate::core::handler::all_levels;
use crate::core::{Handler, HandlerConfig, LogLevel, Result};
use colored::Colorize;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ConsoleSettings {
    #[serde(default = "all_levels")]
    handles: Vec<LogLevel>,
    #[serde(default = "default_colors")]
    colors: bool,
}

fn default_colors() -> bool {
    true
}

/// Writes records to stdout, or stderr for `error` and more severe
#[derive(Debug)]
pub struct ConsoleHandler {
    handles: Vec<LogLevel>,
    use_colors: bool,
    date_format: String,
}

impl ConsoleHandler {
    pub fn new() -> Self {
        Self {
            handles: all_levels(),
            use_colors: true,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Restrict the handler to `levels`
    #[must_use]
    pub fn with_handles(mut self, levels: impl Into<Vec<LogLevel>>) -> Self {
        self.handles = levels.into();
        self
    }

    /// Build from `{ "handles": [...], "colors": bool }`
    pub fn from_config(config: &HandlerConfig) -> Result<Self> {
        let settings: ConsoleSettings = config.parse("console")?;
        Ok(Self {
            handles: settings.handles,
            use_colors: settings.colors,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        })
    }

    fn render(&self, level: LogLevel, message: &str) -> Result<String> {
        let line = format_line(level, &self.date_format, message)?;
        if !self.use_colors {
            return Ok(line);
        }
        // Colour just the level label
        let rest = &line[level.label().len()..];
        Ok(format!("{}{}", level.label().color(level.color_code()), rest))
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ConsoleHandler {
    fn can_handle(&self, level: LogLevel) -> bool {
        self.handles.contains(&level)
    }

    fn set_date_format(&mut self, format: &str) -> &mut dyn Handler {
        self.date_format = format.to_string();
        self
    }

    fn handle(&mut self, level: LogLevel, message: &str) -> Result<bool> {
        let output = self.render(level, message)?;

        // Route error and more severe levels to stderr, others to stdout
        if level <= LogLevel::Error {
            eprintln!("{}", output);
        } else {
            println!("{}", output);
        }
        Ok(true)
    }

    fn name(&self) -> &str {
        "console"
    }
}
