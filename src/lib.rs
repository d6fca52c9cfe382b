//! # Rust Log Dispatcher
//!
//! A leveled logging dispatcher: records are filtered against a configured
//! threshold, message placeholders are expanded from context and runtime
//! data, and the result is forwarded through an ordered chain of handlers.
//!
//! ## Features
//!
//! - **Eight severities**: `emergency` (rank 1) through `debug` (rank 8)
//! - **Placeholders**: `{key}` from context plus `{env}`, `{env:NAME}`,
//!   `{file}`, `{line}`, `{get_vars}`, `{post_vars}`, `{session_vars}`
//! - **Handler chain**: lazily built, cached handlers; any handler can stop the
//!   chain for a record
//! - **Thread Safe**: one logger can be shared across threads
//!
//! ```
//! use rust_log_dispatcher::prelude::*;
//! use serde_json::json;
//!
//! let logger = Logger::builder()
//!     .threshold(LogLevel::Error)
//!     .handler("console", json!({ "colors": false }))
//!     .build()?;
//!
//! let ctx = LogContext::new().with_field("id", 42);
//! assert!(logger.error("User {id} failed to log in", &ctx)?);
//! assert!(!logger.debug("suppressed", &ctx)?);
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod handlers;
pub mod macros;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::handlers::ConsoleHandler;
    #[cfg(feature = "file")]
    pub use crate::handlers::FileHandler;
    pub use crate::core::{
        AmbientRuntime, CallSite, DispatchMetrics, ExceptionInfo, FieldValue, Handler,
        HandlerConfig, HandlerFactories, LevelSpec, LogContext, LogEntry, LogLevel, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, Message, PathRoots, ReportSeverity, Reporter,
        Result, RuntimeContext, Threshold,
    };
}

#[cfg(feature = "console")]
pub use handlers::ConsoleHandler;
#[cfg(feature = "file")]
pub use handlers::FileHandler;
pub use crate::core::{
    interpolate, AmbientRuntime, CallSite, ChainOutcome, DispatchMetrics, ExceptionInfo,
    FieldValue, Handler, HandlerConfig, HandlerFactories, HandlerFactory, HandlerRegistry,
    LevelSpec, LogContext, LogEntry, LogLevel, LoggableLevels, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, Message, PathRoots, RecordCache, ReportSeverity, Reporter,
    RequestScope, Result, RuntimeContext, SharedHandler, Threshold, VarMap,
    DEFAULT_DATE_FORMAT, EXCEPTION_KEY,
};
