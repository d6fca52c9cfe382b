//! Handler trait for log output destinations

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use serde::de::DeserializeOwned;

/// Output sink in the dispatcher's handler chain
///
/// # Example
///
/// ```
/// use rust_log_dispatcher::core::{Handler, LogLevel, Result};
///
/// struct StdoutHandler {
///     date_format: String,
/// }
///
/// impl Handler for StdoutHandler {
///     fn can_handle(&self, level: LogLevel) -> bool {
///         level <= LogLevel::Warning
///     }
///
///     fn set_date_format(&mut self, format: &str) -> &mut dyn Handler {
///         self.date_format = format.to_string();
///         self
///     }
///
///     fn handle(&mut self, level: LogLevel, message: &str) -> Result<bool> {
///         println!("{} {}", level.label(), message);
///         Ok(true)
///     }
///
///     fn name(&self) -> &str {
///         "stdout"
///     }
/// }
/// ```
pub trait Handler: Send {
    /// Whether this handler wants records of `level`
    fn can_handle(&self, level: LogLevel) -> bool;

    /// Set the strftime format used for timestamps, returning the handler for chaining
    fn set_date_format(&mut self, format: &str) -> &mut dyn Handler;

    /// Process a record.
    ///
    /// `Ok(false)` stops the remaining handlers for this record only.
    fn handle(&mut self, level: LogLevel, message: &str) -> Result<bool>;

    fn name(&self) -> &str;
}

/// Opaque per-handler configuration value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandlerConfig(serde_json::Value);

impl HandlerConfig {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(serde_json::Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(serde_json::Value::as_bool)
    }

    /// Deserialize into a handler-specific settings type.
    ///
    /// A null config deserializes from an empty object so settings with
    /// defaults need no explicit configuration.
    pub fn parse<T: DeserializeOwned>(&self, handler: &str) -> Result<T> {
        let value = if self.0.is_null() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            self.0.clone()
        };
        serde_json::from_value(value)
            .map_err(|e| LoggerError::handler_construction(handler, e.to_string()))
    }
}

impl From<serde_json::Value> for HandlerConfig {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Default `handles` list: every level
pub fn all_levels() -> Vec<LogLevel> {
    LogLevel::ALL.to_vec()
}
