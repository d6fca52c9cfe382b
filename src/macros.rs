//! Logging macros for ergonomic log message formatting.
//!
//! These macros format their arguments with `format!` and log the result
//! with an empty context, so `{...}` in the format string follows `format!`
//! rules rather than placeholder rules. Use the logger methods directly for
//! placeholder interpolation. Each macro evaluates to the `Result<bool>` of
//! the underlying call.
//!
//! # Examples
//!
//! ```
//! use rust_log_dispatcher::prelude::*;
//! use rust_log_dispatcher::info;
//! use serde_json::json;
//!
//! let logger = Logger::builder()
//!     .handler("console", json!({ "colors": false }))
//!     .build()
//!     .unwrap();
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port).unwrap();
//! ```

/// Log a message at any level with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_log_dispatcher::prelude::*;
/// # let logger = Logger::builder().handler("console", serde_json::Value::Null).build().unwrap();
/// use rust_log_dispatcher::log;
/// log!(logger, LogLevel::Info, "Simple message").unwrap();
/// log!(logger, "error", "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), &$crate::LogContext::new())
    };
}

/// Log an emergency-level message.
#[macro_export]
macro_rules! emergency {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Emergency, $($arg)+)
    };
}

/// Log an alert-level message.
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Alert, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_dispatcher::prelude::*;
/// # let logger = Logger::builder().handler("console", serde_json::Value::Null).build().unwrap();
/// use rust_log_dispatcher::error;
/// error!(logger, "Failed to connect to database").unwrap();
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error").unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log a notice-level message.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Notice, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}
