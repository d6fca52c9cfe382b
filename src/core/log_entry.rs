//! Log message payloads, call sites and dispatched records

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::panic::Location;

/// Message handed to the dispatcher.
///
/// Only text is interpolated; structured payloads pass through unchanged and are
/// dumped to text before reaching the handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Text(String),
    Structured(serde_json::Value),
}

impl Message {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Message::Text(text) => Some(text),
            Message::Structured(_) => None,
        }
    }

    /// Render the message as text, pretty-printing structured payloads
    pub fn into_text(self) -> String {
        match self {
            Message::Text(text) => text,
            Message::Structured(value) => {
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Text(text.to_string())
    }
}

impl From<&String> for Message {
    fn from(text: &String) -> Self {
        Message::Text(text.clone())
    }
}

impl From<serde_json::Value> for Message {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Message::Text(text),
            other => Message::Structured(other),
        }
    }
}

/// Source location a log call originated from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    pub file: String,
    pub line: u32,
}

impl CallSite {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Location of the nearest caller not marked `#[track_caller]`
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }
}

impl From<&Location<'_>> for CallSite {
    fn from(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line())
    }
}

/// A record that made it through the filter, with its final message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}
