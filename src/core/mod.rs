//! Core dispatcher types and traits

pub mod config;
pub mod error;
pub mod handler;
pub mod interpolate;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod record_cache;
pub mod registry;
pub mod reporter;
pub mod runtime;
pub mod threshold;

pub use config::{LoggerConfig, DEFAULT_DATE_FORMAT};
pub use error::{LoggerError, Result};
pub use handler::{Handler, HandlerConfig};
pub use interpolate::interpolate;
pub use log_context::{ExceptionInfo, FieldValue, LogContext, EXCEPTION_KEY};
pub use log_entry::{CallSite, LogEntry, Message};
pub use log_level::{LevelSpec, LogLevel};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::DispatchMetrics;
pub use record_cache::RecordCache;
pub use registry::{ChainOutcome, HandlerFactories, HandlerFactory, HandlerRegistry, SharedHandler};
pub use reporter::{ReportSeverity, Reporter};
pub use runtime::{AmbientRuntime, PathRoots, RequestScope, RuntimeContext, VarMap};
pub use threshold::{LoggableLevels, Threshold};
