//! Main logger implementation

use super::{
    config::{validate_date_format, LoggerConfig, DEFAULT_DATE_FORMAT},
    error::Result,
    handler::{Handler, HandlerConfig},
    interpolate::interpolate,
    log_context::LogContext,
    log_entry::{CallSite, LogEntry, Message},
    log_level::{LevelSpec, LogLevel},
    metrics::DispatchMetrics,
    record_cache::RecordCache,
    registry::{HandlerFactories, HandlerRegistry},
    reporter::{ReportSeverity, Reporter},
    runtime::{AmbientRuntime, RuntimeContext},
    threshold::{LoggableLevels, Threshold},
};
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Leveled log dispatcher
///
/// Filters records against the loggable levels, expands placeholders and
/// forwards the result through the handler chain. Safe to share between
/// threads.
pub struct Logger {
    loggable: LoggableLevels,
    date_format: String,
    handlers: HandlerRegistry,
    runtime: Arc<dyn RuntimeContext>,
    /// Optional best-effort observer of accepted records
    reporter: Option<Arc<dyn Reporter>>,
    /// Present only when record caching is enabled
    cache: Option<RecordCache>,
    metrics: DispatchMetrics,
}

impl Logger {
    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_log_dispatcher::prelude::*;
    /// use serde_json::json;
    ///
    /// let logger = Logger::builder()
    ///     .threshold(LogLevel::Error)
    ///     .handler("console", json!({ "colors": false }))
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(!logger.warning("Disk at 80%", &LogContext::new()).unwrap());
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Build a logger from configuration using the built-in handlers
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        LoggerBuilder::from_config(config).build()
    }

    /// Log with an arbitrary level given as a [`LogLevel`], name or rank.
    ///
    /// Returns `Ok(true)` when the record went through the handler chain and
    /// `Ok(false)` when the threshold suppressed it.
    ///
    /// # Errors
    ///
    /// `InvalidLevel` for a level outside the level table, a construction error
    /// for a handler that cannot be built, or the first handler failure.
    #[track_caller]
    pub fn log(
        &self,
        level: impl Into<LevelSpec>,
        message: impl Into<Message>,
        context: &LogContext,
    ) -> Result<bool> {
        let call_site = CallSite::caller();
        self.log_at(level, message, context, Some(call_site))
    }

    /// Log with an explicit call site for `{file}`/`{line}`
    pub fn log_at(
        &self,
        level: impl Into<LevelSpec>,
        message: impl Into<Message>,
        context: &LogContext,
        call_site: Option<CallSite>,
    ) -> Result<bool> {
        let level = level.into().resolve()?;

        if !self.loggable.contains(level) {
            self.metrics.record_suppressed();
            return Ok(false);
        }

        let message = interpolate(
            message.into(),
            context,
            self.runtime.as_ref(),
            call_site.as_ref(),
        )
        .into_text();

        if let Some(ref cache) = self.cache {
            cache.push(level, message.as_str());
        }

        self.report(level, &message);

        let outcome = self.handlers.dispatch(level, &message, &self.date_format)?;
        if outcome.stopped {
            self.metrics.record_chain_stop();
        }
        self.metrics.record_dispatched();

        Ok(true)
    }

    /// Forward to the reporter; errors and panics stay here
    fn report(&self, level: LogLevel, message: &str) {
        let Some(ref reporter) = self.reporter else {
            return;
        };
        let severity = ReportSeverity::from(level);

        let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
            reporter.capture_message(severity, message)
        }));

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                self.metrics.record_reporter_failure();
                eprintln!("[LOGGER ERROR] Reporter failed: {}", e);
            }
            Err(panic_info) => {
                self.metrics.record_reporter_failure();
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Reporter panicked: {}. Dispatch continues.",
                    panic_msg
                );
            }
        }
    }

    /// System is unusable.
    #[inline]
    #[track_caller]
    pub fn emergency(&self, message: impl Into<Message>, context: &LogContext) -> Result<bool> {
        self.log(LogLevel::Emergency, message, context)
    }

    /// Action must be taken immediately.
    #[inline]
    #[track_caller]
    pub fn alert(&self, message: impl Into<Message>, context: &LogContext) -> Result<bool> {
        self.log(LogLevel::Alert, message, context)
    }

    /// Critical conditions.
    #[inline]
    #[track_caller]
    pub fn critical(&self, message: impl Into<Message>, context: &LogContext) -> Result<bool> {
        self.log(LogLevel::Critical, message, context)
    }

    /// Runtime errors that do not require immediate action.
    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<Message>, context: &LogContext) -> Result<bool> {
        self.log(LogLevel::Error, message, context)
    }

    /// Exceptional occurrences that are not errors.
    #[inline]
    #[track_caller]
    pub fn warning(&self, message: impl Into<Message>, context: &LogContext) -> Result<bool> {
        self.log(LogLevel::Warning, message, context)
    }

    /// Normal but significant events.
    #[inline]
    #[track_caller]
    pub fn notice(&self, message: impl Into<Message>, context: &LogContext) -> Result<bool> {
        self.log(LogLevel::Notice, message, context)
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<Message>, context: &LogContext) -> Result<bool> {
        self.log(LogLevel::Info, message, context)
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<Message>, context: &LogContext) -> Result<bool> {
        self.log(LogLevel::Debug, message, context)
    }

    pub fn is_loggable(&self, level: LogLevel) -> bool {
        self.loggable.contains(level)
    }

    pub fn loggable_levels(&self) -> LoggableLevels {
        self.loggable
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Construct every configured handler now
    ///
    /// Handlers are otherwise built on the first record that reaches them;
    /// calling this at startup surfaces construction errors early.
    pub fn warm_up(&self) -> Result<()> {
        self.handlers.warm_up()
    }

    /// The record cache, when enabled
    pub fn record_cache(&self) -> Option<&RecordCache> {
        self.cache.as_ref()
    }

    /// Cached records, oldest first; empty when caching is disabled
    pub fn cached_records(&self) -> Vec<LogEntry> {
        self.cache
            .as_ref()
            .map(RecordCache::snapshot)
            .unwrap_or_default()
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("loggable", &self.loggable)
            .field("date_format", &self.date_format)
            .field("handlers", &self.handlers)
            .field("reporter", &self.reporter.is_some())
            .field("cache_logs", &self.cache.is_some())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_log_dispatcher::prelude::*;
/// use serde_json::json;
///
/// let logger = Logger::builder()
///     .threshold(vec![LogLevel::Critical, LogLevel::Info])
///     .date_format("%H:%M:%S")
///     .handler("console", json!({ "handles": ["critical"] }))
///     .runtime(AmbientRuntime::new().with_environment("staging"))
///     .cache_logs(true)
///     .build()
///     .unwrap();
///
/// assert!(logger.info("Started in {env}", &LogContext::new()).unwrap());
/// assert_eq!(logger.cached_records()[0].message, "Started in staging");
/// ```
pub struct LoggerBuilder {
    threshold: Threshold,
    date_format: Option<String>,
    handlers: Vec<(String, HandlerConfig)>,
    factories: HandlerFactories,
    runtime: Option<Arc<dyn RuntimeContext>>,
    reporter: Option<Arc<dyn Reporter>>,
    cache_logs: bool,
}

impl LoggerBuilder {
    /// Create a new builder with the built-in handler factories
    pub fn new() -> Self {
        Self {
            threshold: Threshold::default(),
            date_format: None,
            handlers: Vec::new(),
            factories: HandlerFactories::with_builtin(),
            runtime: None,
            reporter: None,
            cache_logs: false,
        }
    }

    /// Builder pre-filled from configuration
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self {
            threshold: config.threshold.clone(),
            date_format: config.date_format.clone(),
            handlers: config.handler_entries(),
            cache_logs: config.cache_logs,
            ..Self::new()
        }
    }

    /// Set which levels are dispatched
    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, threshold: impl Into<Threshold>) -> Self {
        self.threshold = threshold.into();
        self
    }

    /// Set the strftime format handed to handlers
    #[must_use = "builder methods return a new value"]
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    /// Append a handler to the chain
    #[must_use = "builder methods return a new value"]
    pub fn handler(mut self, id: impl Into<String>, config: impl Into<HandlerConfig>) -> Self {
        self.handlers.push((id.into(), config.into()));
        self
    }

    /// Register a handler constructor under `id`
    #[must_use = "builder methods return a new value"]
    pub fn factory<F>(mut self, id: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&HandlerConfig) -> Result<Box<dyn Handler>> + Send + Sync + 'static,
    {
        self.factories.register(id, factory);
        self
    }

    /// Replace the whole factory table
    #[must_use = "builder methods return a new value"]
    pub fn factories(mut self, factories: HandlerFactories) -> Self {
        self.factories = factories;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn runtime<R: RuntimeContext + 'static>(mut self, runtime: R) -> Self {
        self.runtime = Some(Arc::new(runtime));
        self
    }

    /// Attach a best-effort reporter that sees every accepted record
    #[must_use = "builder methods return a new value"]
    pub fn reporter<R: Reporter + 'static>(mut self, reporter: R) -> Self {
        self.reporter = Some(Arc::new(reporter));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn shared_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Keep dispatched records in memory
    #[must_use = "builder methods return a new value"]
    pub fn cache_logs(mut self, enabled: bool) -> Self {
        self.cache_logs = enabled;
        self
    }

    /// Build the Logger
    ///
    /// # Errors
    ///
    /// Fails when no handler is configured, a handler identifier has no
    /// factory, the threshold names an unknown level, or the date format is
    /// not a valid strftime string.
    pub fn build(self) -> Result<Logger> {
        let loggable = self.threshold.loggable_levels()?;

        let date_format = self
            .date_format
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());
        validate_date_format(&date_format)?;

        let handlers = HandlerRegistry::new(self.handlers, &self.factories)?;

        let runtime = self
            .runtime
            .unwrap_or_else(|| Arc::new(AmbientRuntime::new()));

        Ok(Logger {
            loggable,
            date_format,
            handlers,
            runtime,
            reporter: self.reporter,
            cache: self.cache_logs.then(RecordCache::new),
            metrics: DispatchMetrics::new(),
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
