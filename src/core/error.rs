//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Severity name or rank outside the fixed level table
    #[error("'{level}' is an invalid log level")]
    InvalidLevel { level: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Handler identifier with no registered factory
    #[error("No handler factory registered for '{id}'")]
    UnknownHandler { id: String },

    /// Handler factory rejected its configuration
    #[error("Failed to construct handler '{handler}': {message}")]
    HandlerConstruction { handler: String, message: String },

    /// Handler failed while processing a record
    #[error("Handler '{handler}' failed: {source}")]
    Handler {
        handler: String,
        #[source]
        source: Box<LoggerError>,
    },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an invalid level error
    pub fn invalid_level(level: impl Into<String>) -> Self {
        LoggerError::InvalidLevel {
            level: level.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Configuration error for a logger built without any handler
    pub fn no_handlers(component: impl Into<String>) -> Self {
        Self::config(component, "no handlers configured")
    }

    pub fn unknown_handler(id: impl Into<String>) -> Self {
        LoggerError::UnknownHandler { id: id.into() }
    }

    /// Create a handler construction error
    pub fn handler_construction(handler: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::HandlerConstruction {
            handler: handler.into(),
            message: message.into(),
        }
    }

    /// Wrap a failure raised by a handler while it processed a record
    pub fn handler(handler: impl Into<String>, source: LoggerError) -> Self {
        LoggerError::Handler {
            handler: handler.into(),
            source: Box::new(source),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether this error was raised while setting the logger up rather than per record
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LoggerError::InvalidConfiguration { .. }
                | LoggerError::UnknownHandler { .. }
                | LoggerError::HandlerConstruction { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::invalid_level("verbose");
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));

        let err = LoggerError::no_handlers("LoggerConfig");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::handler_construction("file", "missing path");
        assert!(matches!(err, LoggerError::HandlerConstruction { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::invalid_level("verbose");
        assert_eq!(err.to_string(), "'verbose' is an invalid log level");

        let err = LoggerError::no_handlers("LoggerConfig");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for LoggerConfig: no handlers configured"
        );

        let err = LoggerError::unknown_handler("syslog");
        assert_eq!(err.to_string(), "No handler factory registered for 'syslog'");
    }

    #[test]
    fn test_handler_error_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::handler(
            "file",
            LoggerError::io_operation("writing log file", "cannot write", io_err),
        );

        assert!(err.to_string().contains("Handler 'file' failed"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_configuration_classification() {
        assert!(LoggerError::no_handlers("LoggerConfig").is_configuration());
        assert!(LoggerError::unknown_handler("x").is_configuration());
        assert!(LoggerError::handler_construction("x", "y").is_configuration());
        assert!(!LoggerError::invalid_level("x").is_configuration());
    }
}
