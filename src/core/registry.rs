//! Handler factories and the lazily instantiated handler chain

use super::error::{LoggerError, Result};
use super::handler::{Handler, HandlerConfig};
use super::log_level::LogLevel;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Constructor for a handler from its configuration value
pub type HandlerFactory = Arc<dyn Fn(&HandlerConfig) -> Result<Box<dyn Handler>> + Send + Sync>;

/// Handler instance shared between concurrent dispatches
pub type SharedHandler = Arc<Mutex<Box<dyn Handler>>>;

/// Table of handler constructors keyed by handler identifier
#[derive(Clone, Default)]
pub struct HandlerFactories {
    factories: HashMap<String, HandlerFactory>,
}

impl HandlerFactories {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the handlers shipped by this crate (`console`, `file`)
    pub fn with_builtin() -> Self {
        #[allow(unused_mut)]
        let mut factories = Self::new();
        #[cfg(feature = "console")]
        factories.register("console", |config: &HandlerConfig| {
            Ok(Box::new(crate::handlers::ConsoleHandler::from_config(config)?) as Box<dyn Handler>)
        });
        #[cfg(feature = "file")]
        factories.register("file", |config: &HandlerConfig| {
            Ok(Box::new(crate::handlers::FileHandler::from_config(config)?) as Box<dyn Handler>)
        });
        factories
    }

    /// Register (or replace) the constructor for `id`
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn(&HandlerConfig) -> Result<Box<dyn Handler>> + Send + Sync + 'static,
    {
        self.factories.insert(id.into(), Arc::new(factory));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    pub fn resolve(&self, id: &str) -> Result<HandlerFactory> {
        self.factories
            .get(id)
            .cloned()
            .ok_or_else(|| LoggerError::unknown_handler(id))
    }
}

impl fmt::Debug for HandlerFactories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.factories.keys().collect();
        ids.sort();
        f.debug_struct("HandlerFactories").field("ids", &ids).finish()
    }
}

struct HandlerSlot {
    id: String,
    config: HandlerConfig,
    factory: HandlerFactory,
    instance: OnceCell<SharedHandler>,
}

impl HandlerSlot {
    /// Instantiate on first use; concurrent first uses build at most one instance
    fn instance(&self) -> Result<&SharedHandler> {
        self.instance.get_or_try_init(|| {
            let handler = (self.factory)(&self.config).map_err(|e| match e {
                e if e.is_configuration() => e,
                other => LoggerError::handler_construction(&self.id, other.to_string()),
            })?;
            Ok(Arc::new(Mutex::new(handler)))
        })
    }
}

/// Outcome of running a record through the handler chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainOutcome {
    /// Handlers whose `handle` was invoked
    pub invoked: usize,
    /// Whether a handler asked to skip the rest of the chain
    pub stopped: bool,
}

/// Ordered handler chain with lazily created, cached instances
pub struct HandlerRegistry {
    slots: Vec<HandlerSlot>,
}

impl HandlerRegistry {
    /// Resolve every configured identifier against `factories`.
    ///
    /// Chain order is the order of `handlers`. Fails when the list is empty or an
    /// identifier has no factory. Handlers themselves are built on first use.
    pub fn new<I>(handlers: I, factories: &HandlerFactories) -> Result<Self>
    where
        I: IntoIterator<Item = (String, HandlerConfig)>,
    {
        let mut slots: Vec<HandlerSlot> = Vec::new();
        for (id, config) in handlers {
            if slots.iter().any(|slot| slot.id == id) {
                return Err(LoggerError::config(
                    "handlers",
                    format!("handler '{}' configured twice", id),
                ));
            }
            let factory = factories.resolve(&id)?;
            slots.push(HandlerSlot {
                id,
                config,
                factory,
                instance: OnceCell::new(),
            });
        }

        if slots.is_empty() {
            return Err(LoggerError::no_handlers("LoggerConfig"));
        }

        Ok(Self { slots })
    }

    /// Cached instance for `id`, constructing it on first request
    pub fn get(&self, id: &str) -> Result<SharedHandler> {
        let slot = self
            .slots
            .iter()
            .find(|slot| slot.id == id)
            .ok_or_else(|| LoggerError::unknown_handler(id))?;
        slot.instance().map(Arc::clone)
    }

    /// Configured identifiers in chain order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of handlers instantiated so far
    pub fn instantiated(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.instance.get().is_some())
            .count()
    }

    /// Construct every handler now instead of on first record
    pub fn warm_up(&self) -> Result<()> {
        for slot in &self.slots {
            slot.instance()?;
        }
        Ok(())
    }

    /// Run one record through the chain in configuration order.
    ///
    /// Handlers that decline the level are skipped. A handler returning `false`
    /// ends the chain for this record; a handler error ends it and is returned.
    pub fn dispatch(&self, level: LogLevel, message: &str, date_format: &str) -> Result<ChainOutcome> {
        let mut outcome = ChainOutcome {
            invoked: 0,
            stopped: false,
        };

        for slot in &self.slots {
            let handler = slot.instance()?;
            let mut handler = handler.lock();

            if !handler.can_handle(level) {
                continue;
            }

            outcome.invoked += 1;
            let keep_going = handler
                .set_date_format(date_format)
                .handle(level, message)
                .map_err(|e| LoggerError::handler(&slot.id, e))?;

            if !keep_going {
                outcome.stopped = true;
                break;
            }
        }

        Ok(outcome)
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("ids", &self.ids().collect::<Vec<_>>())
            .field("instantiated", &self.instantiated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticHandler {
        name: String,
        result: bool,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl Handler for StaticHandler {
        fn can_handle(&self, level: LogLevel) -> bool {
            level != LogLevel::Debug
        }

        fn set_date_format(&mut self, _format: &str) -> &mut dyn Handler {
            self
        }

        fn handle(&mut self, _level: LogLevel, message: &str) -> Result<bool> {
            self.calls.lock().push(format!("{}:{}", self.name, message));
            Ok(self.result)
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    fn factories(calls: &Arc<Mutex<Vec<String>>>, built: &Arc<AtomicUsize>) -> HandlerFactories {
        let mut factories = HandlerFactories::new();
        for (id, result) in [("first", true), ("stopper", false), ("last", true)] {
            let calls = Arc::clone(calls);
            let built = Arc::clone(built);
            factories.register(id, move |_config: &HandlerConfig| {
                built.fetch_add(1, Ordering::SeqCst);
                Ok(Box::new(StaticHandler {
                    name: id.to_string(),
                    result,
                    calls: Arc::clone(&calls),
                }) as Box<dyn Handler>)
            });
        }
        factories
    }

    fn chain(ids: &[&str]) -> Vec<(String, HandlerConfig)> {
        ids.iter()
            .map(|id| (id.to_string(), HandlerConfig::default()))
            .collect()
    }

    #[test]
    fn test_empty_chain_is_rejected() {
        let err = HandlerRegistry::new(Vec::new(), &HandlerFactories::new()).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_unknown_handler_is_rejected() {
        let err = HandlerRegistry::new(chain(&["nope"]), &HandlerFactories::new()).unwrap_err();
        assert!(matches!(err, LoggerError::UnknownHandler { .. }));
    }

    #[test]
    fn test_duplicate_handler_is_rejected() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let built = Arc::new(AtomicUsize::new(0));
        let err = HandlerRegistry::new(chain(&["first", "first"]), &factories(&calls, &built))
            .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_lazy_and_cached_instantiation() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let built = Arc::new(AtomicUsize::new(0));
        let registry = HandlerRegistry::new(chain(&["first", "last"]), &factories(&calls, &built))
            .unwrap();

        assert_eq!(built.load(Ordering::SeqCst), 0);
        assert_eq!(registry.instantiated(), 0);

        let a = registry.get("first").unwrap();
        let b = registry.get("first").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(built.load(Ordering::SeqCst), 1);

        for _ in 0..5 {
            registry.dispatch(LogLevel::Error, "x", "%Y").unwrap();
        }
        assert_eq!(built.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_stop_signal_truncates_chain_for_one_record() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let built = Arc::new(AtomicUsize::new(0));
        let registry = HandlerRegistry::new(
            chain(&["first", "stopper", "last"]),
            &factories(&calls, &built),
        )
        .unwrap();

        let outcome = registry.dispatch(LogLevel::Error, "one", "%Y").unwrap();
        assert_eq!(outcome, ChainOutcome { invoked: 2, stopped: true });

        registry.dispatch(LogLevel::Error, "two", "%Y").unwrap();
        assert_eq!(
            *calls.lock(),
            vec!["first:one", "stopper:one", "first:two", "stopper:two"]
        );
    }

    #[test]
    fn test_declined_levels_are_skipped() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let built = Arc::new(AtomicUsize::new(0));
        let registry = HandlerRegistry::new(chain(&["first"]), &factories(&calls, &built)).unwrap();

        let outcome = registry.dispatch(LogLevel::Debug, "quiet", "%Y").unwrap();
        assert_eq!(outcome.invoked, 0);
        assert!(calls.lock().is_empty());
        // Declining still requires the instance
        assert_eq!(registry.instantiated(), 1);
    }

    #[test]
    fn test_construction_failure_is_configuration_error() {
        let mut factories = HandlerFactories::new();
        factories.register("broken", |_config: &HandlerConfig| {
            Err(LoggerError::other("cannot open sink"))
        });
        let registry = HandlerRegistry::new(chain(&["broken"]), &factories).unwrap();

        let err = registry.warm_up().unwrap_err();
        assert!(matches!(err, LoggerError::HandlerConstruction { .. }));
        assert!(err.is_configuration());
    }
}
