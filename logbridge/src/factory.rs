use std::{
    collections::HashMap,
    io,
    sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock},
};

use logbridge_core::{Cause, ConfigurationError, Level, LogBridgeConfig, LogDelegateFactory};

use crate::{
    Logger,
    backend::{self, BackendConstructor, FallbackConstructor},
};

/// Name of the logger reporting the factory's own configuration problems.
pub const FACTORY_LOGGER: &str = "logbridge::factory";

enum ConfigSource {
    Environment,
    Fixed(LogBridgeConfig),
}

impl ConfigSource {
    fn load(&self) -> Result<LogBridgeConfig, ConfigurationError> {
        match self {
            ConfigSource::Environment => LogBridgeConfig::load(),
            ConfigSource::Fixed(config) => Ok(config.clone()),
        }
    }
}

/// State of an initialized factory: the resolved backend and the loggers handed out so far.
struct Initialized {
    backend: String,
    factory: Arc<dyn LogDelegateFactory>,
    loggers: HashMap<String, Logger>,
}

impl Initialized {
    fn new(backend: String, factory: Arc<dyn LogDelegateFactory>) -> Self {
        Self {
            backend,
            factory,
            loggers: HashMap::new(),
        }
    }

    fn logger(&mut self, name: &str) -> Logger {
        if let Some(logger) = self.loggers.get(name) {
            return logger.clone();
        }
        let logger = Logger::new(name, self.factory.create_delegate(name));
        self.loggers.insert(name.into(), logger.clone());
        logger
    }
}

/// Registry resolving logger names to [`Logger`] handles.
///
/// The backend is chosen lazily, on the first [`get_logger`](Self::get_logger), from the
/// configured selector. Handles are cached per name until [`terminate`](Self::terminate),
/// after which the next lookup starts over from the configuration.
pub struct LoggerFactory {
    source: ConfigSource,
    backends: RwLock<HashMap<String, BackendConstructor>>,
    default_backend: String,
    fallback: FallbackConstructor,
    state: Mutex<Option<Initialized>>,
}

impl LoggerFactory {
    /// Builder with the built-in backends, reading its configuration from the environment.
    pub fn builder() -> FactoryBuilder {
        FactoryBuilder::default()
    }

    /// Returns the logger for `name`, initializing the factory if needed.
    ///
    /// If the configured backend cannot be used, the default backend takes its place and the
    /// reason is logged through it, under [`FACTORY_LOGGER`].
    pub fn get_logger(&self, name: &str) -> Logger {
        let mut diagnostic = None;
        let logger = {
            let mut state = self.lock_state();
            let initialized = state.get_or_insert_with(|| {
                let (initialized, error) = self.initialize();
                diagnostic = error;
                initialized
            });
            initialized.logger(name)
        };
        // reported once the state lock is released, the report looks up a logger itself
        if let Some(err) = diagnostic {
            self.report(&err);
        }
        logger
    }

    /// Returns the logger named after the type `T`.
    pub fn logger_for<T: ?Sized>(&self) -> Logger {
        self.get_logger(std::any::type_name::<T>())
    }

    /// Drops the cached logger for `name`. Existing handles keep working.
    pub fn remove_logger(&self, name: &str) -> Option<Logger> {
        self.lock_state()
            .as_mut()
            .and_then(|initialized| initialized.loggers.remove(name))
    }

    /// Registers a backend under `name`, replacing any previous one.
    ///
    /// Takes effect at the next initialization.
    pub fn register_backend<F>(&self, name: &str, constructor: F)
    where
        F: Fn(&LogBridgeConfig) -> io::Result<Arc<dyn LogDelegateFactory>> + Send + Sync + 'static,
    {
        self.backends
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), Arc::new(constructor));
    }

    pub fn is_initialized(&self) -> bool {
        self.lock_state().is_some()
    }

    /// Name of the backend in use, `None` before initialization.
    pub fn selected_backend(&self) -> Option<String> {
        self.lock_state()
            .as_ref()
            .map(|initialized| initialized.backend.clone())
    }

    /// Releases the backend and forgets every cached logger.
    ///
    /// The next [`get_logger`](Self::get_logger) initializes the factory again. Handles
    /// obtained before keep their delegate.
    pub fn terminate(&self) -> io::Result<()> {
        let initialized = self.lock_state().take();
        match initialized {
            Some(initialized) => initialized.factory.terminate(),
            None => Ok(()),
        }
    }

    /// Guard terminating the factory when dropped.
    #[must_use = "FactoryGuard terminates the factory when dropped. Do \"let _guard = factory.guard();\""]
    pub fn guard(&self) -> FactoryGuard<'_> {
        FactoryGuard { factory: self }
    }

    fn lock_state(&self) -> MutexGuard<'_, Option<Initialized>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn initialize(&self) -> (Initialized, Option<ConfigurationError>) {
        let config = match self.source.load() {
            Ok(config) => config,
            Err(err) => return self.fall_back(&LogBridgeConfig::default(), err),
        };
        let name = config.selector().unwrap_or(&self.default_backend).to_owned();
        match self.construct(&name, &config) {
            Ok(factory) => (Initialized::new(name, factory), None),
            Err(err) => self.fall_back(&config, err),
        }
    }

    fn construct(
        &self,
        name: &str,
        config: &LogBridgeConfig,
    ) -> Result<Arc<dyn LogDelegateFactory>, ConfigurationError> {
        let constructor = self
            .backends
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigurationError::UnknownBackend(name.into()))?;
        constructor(config).map_err(|source| ConfigurationError::Backend {
            name: name.into(),
            source,
        })
    }

    fn fall_back(
        &self,
        config: &LogBridgeConfig,
        err: ConfigurationError,
    ) -> (Initialized, Option<ConfigurationError>) {
        let factory = (self.fallback)(config);
        (
            Initialized::new(self.default_backend.clone(), factory),
            Some(err),
        )
    }

    fn report(&self, err: &ConfigurationError) {
        let message = format!(
            "falling back to the \"{}\" logging backend",
            self.default_backend
        );
        // nowhere left to report a failing diagnostic
        let _ = self
            .get_logger(FACTORY_LOGGER)
            .log_message(Level::Warn, &message, Some(Cause::new(err)));
    }
}

/// Builder for [`LoggerFactory`].
pub struct FactoryBuilder {
    source: ConfigSource,
    backends: HashMap<String, BackendConstructor>,
    default_backend: String,
    fallback: FallbackConstructor,
}

impl Default for FactoryBuilder {
    fn default() -> Self {
        Self {
            source: ConfigSource::Environment,
            backends: backend::builtin(),
            default_backend: backend::CONSOLE.into(),
            fallback: Arc::new(backend::fallback_console),
        }
    }
}

impl FactoryBuilder {
    /// Uses `config` instead of reading the environment.
    pub fn with_config(self, config: LogBridgeConfig) -> Self {
        Self {
            source: ConfigSource::Fixed(config),
            ..self
        }
    }

    /// Reads the configuration from the environment at each initialization.
    pub fn with_env(self) -> Self {
        Self {
            source: ConfigSource::Environment,
            ..self
        }
    }

    /// Registers a backend under `name`.
    pub fn with_backend<F>(mut self, name: &str, constructor: F) -> Self
    where
        F: Fn(&LogBridgeConfig) -> io::Result<Arc<dyn LogDelegateFactory>> + Send + Sync + 'static,
    {
        self.backends.insert(name.into(), Arc::new(constructor));
        self
    }

    /// Sets the backend used for an empty selector, and the infallible constructor used when
    /// the selected backend cannot be created.
    pub fn with_default_backend<F>(self, name: &str, fallback: F) -> Self
    where
        F: Fn(&LogBridgeConfig) -> Arc<dyn LogDelegateFactory> + Send + Sync + 'static,
    {
        Self {
            default_backend: name.into(),
            fallback: Arc::new(fallback),
            ..self
        }
    }

    pub fn build(self) -> LoggerFactory {
        let Self {
            source,
            backends,
            default_backend,
            fallback,
        } = self;
        LoggerFactory {
            source,
            backends: RwLock::new(backends),
            default_backend,
            fallback,
            state: Mutex::new(None),
        }
    }
}

/// Guard that terminates its factory when dropped.
/// Hold this guard for the lifetime of your logging session.
pub struct FactoryGuard<'a> {
    factory: &'a LoggerFactory,
}

impl Drop for FactoryGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.factory.terminate() {
            eprintln!("logbridge: failed to release the logging backend: {err}");
        }
    }
}
