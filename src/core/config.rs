//! Logger configuration
//!
//! ```json
//! {
//!     "threshold": 4,
//!     "date_format": "%Y-%m-%d %H:%M:%S",
//!     "cache_logs": false,
//!     "handlers": {
//!         "file": { "path": "logs/app.log", "handles": ["emergency", "error"] },
//!         "console": { "colors": true }
//!     }
//! }
//! ```
//!
//! The order of `handlers` is the order of the handler chain.

use super::error::{LoggerError, Result};
use super::handler::HandlerConfig;
use super::threshold::Threshold;
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::path::Path;

/// Timestamp format handed to handlers when none is configured
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Deserialize)]
pub struct LoggerConfig {
    #[serde(default)]
    pub threshold: Threshold,

    #[serde(default)]
    pub date_format: Option<String>,

    /// Handler identifier to handler configuration, in chain order
    #[serde(default)]
    pub handlers: serde_json::Map<String, serde_json::Value>,

    /// Keep every dispatched record in memory
    #[serde(default)]
    pub cache_logs: bool,
}

impl LoggerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger configuration",
                path.display().to_string(),
                e,
            )
        })?;
        Self::from_json_str(&content)
    }

    /// Handler entries in chain order
    pub fn handler_entries(&self) -> Vec<(String, HandlerConfig)> {
        self.handlers
            .iter()
            .map(|(id, value)| (id.clone(), HandlerConfig::new(value.clone())))
            .collect()
    }

    pub fn date_format(&self) -> &str {
        self.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT)
    }
}

/// Reject strftime strings chrono cannot render
pub fn validate_date_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(LoggerError::config(
            "date_format",
            format!("invalid strftime format '{}'", format),
        ));
    }
    Ok(())
}
