//! Placeholder context for log messages
//!
//! This module provides:
//! - `LogContext`: caller-supplied values keyed by placeholder name
//! - `FieldValue`: the values a context can hold
//! - `ExceptionInfo`: error details, rendered with a sanitised file path

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::panic::Location;

/// Context key [`LogContext::with_exception`] stores errors under
pub const EXCEPTION_KEY: &str = "exception";

/// Error details captured where the error was observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionInfo {
    pub message: String,
    pub file: String,
    pub line: u32,
}

impl ExceptionInfo {
    pub fn new(message: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            message: message.into(),
            file: file.into(),
            line,
        }
    }

    /// Capture an error together with the location of the caller
    ///
    /// # Example
    ///
    /// ```
    /// use rust_log_dispatcher::core::ExceptionInfo;
    ///
    /// let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config missing");
    /// let info = ExceptionInfo::capture(&err);
    /// assert_eq!(info.message, "config missing");
    /// assert!(info.file.ends_with(".rs"));
    /// ```
    #[track_caller]
    pub fn capture<E: std::error::Error + ?Sized>(error: &E) -> Self {
        let location = Location::caller();
        Self::new(error.to_string(), location.file(), location.line())
    }
}

impl fmt::Display for ExceptionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.message, self.file, self.line)
    }
}

/// Value type for context fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Exception(ExceptionInfo),
    /// Arbitrary structured data, rendered as compact JSON
    Structured(serde_json::Value),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
            FieldValue::Exception(e) => write!(f, "{}", e),
            FieldValue::Structured(v) => write!(f, "{}", v),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<ExceptionInfo> for FieldValue {
    fn from(e: ExceptionInfo) -> Self {
        FieldValue::Exception(e)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        FieldValue::Structured(v)
    }
}

/// Placeholder values for a single log call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogContext {
    fields: HashMap<String, FieldValue>,
}

impl LogContext {
    /// Create a new empty log context
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field to the context (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    /// Attach an error under the `exception` key, located at the caller
    #[track_caller]
    pub fn with_exception<E: std::error::Error + ?Sized>(self, error: &E) -> Self {
        self.with_field(EXCEPTION_KEY, ExceptionInfo::capture(error))
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Get all fields
    pub fn fields(&self) -> &HashMap<String, FieldValue> {
        &self.fields
    }

    /// Check if context has any fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for LogContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_context_creation() {
        let ctx = LogContext::new();
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_log_context_with_fields() {
        let ctx = LogContext::new()
            .with_field("user_id", 123)
            .with_field("username", "john_doe")
            .with_field("active", true);

        assert_eq!(ctx.len(), 3);
        assert_eq!(ctx.get("user_id"), Some(&FieldValue::Int(123)));
    }

    #[test]
    fn test_field_display() {
        assert_eq!(FieldValue::from(1.5).to_string(), "1.5");
        assert_eq!(FieldValue::Null.to_string(), "null");
        assert_eq!(
            FieldValue::from(serde_json::json!({"a": [1, 2]})).to_string(),
            r#"{"a":[1,2]}"#
        );
    }

    #[test]
    fn test_with_exception_records_caller_location() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let line = line!() + 1;
        let ctx = LogContext::new().with_exception(&err);

        match ctx.get(EXCEPTION_KEY) {
            Some(FieldValue::Exception(info)) => {
                assert_eq!(info.message, "boom");
                assert_eq!(info.line, line);
                assert!(info.file.ends_with("log_context.rs"));
            }
            other => panic!("Expected exception value, got {:?}", other),
        }
    }

    #[test]
    fn test_from_iterator() {
        let ctx: LogContext = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(ctx.len(), 2);
    }
}
