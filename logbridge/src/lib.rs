//! # logbridge
//! Logging facade with positional message formatting. The backend is picked at startup from
//! the environment and every call site only sees [`Logger`] handles.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! logbridge = "0.1.0"
//! ```
//!
//! ```rust
//! use logbridge::log_info;
//!
//! let _guard = logbridge::guard();
//! let logger = logbridge::get_logger("my-logger");
//! log_info!(logger, "hello {0} and {1}", "Paulo", "Julien")?;
//! // tokens without a matching argument are kept as is
//! log_info!(logger, "hello {0} - {1}", "vert.x")?;
//! // guard flushes the backend when dropped
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! ## Errors as arguments
//! The first argument whose type implements [`std::error::Error`] is taken out of the
//! argument list, wherever it sits, and handed to the backend as the record's cause.
//! Placeholders are numbered after that extraction.
//!
//! ```rust
//! use logbridge::log_warn;
//!
//! let logger = logbridge::get_logger("my-logger");
//! let err = std::io::Error::other("connection reset");
//! // logs "Luke, an exception has been thrown" followed by the error
//! log_warn!(logger, "{0}, an exception has been thrown", err, "Luke")?;
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! ## Choosing a backend
//! `LOGBRIDGE_DELEGATE_FACTORY` names the backend: `console` (default), `file` or `log`.
//! `LOGBRIDGE_LEVEL` sets the threshold of the `console` and `file` backends and
//! `LOGBRIDGE_LOG_FILE` the path used by `file`. An unusable selection falls back to
//! `console` and says why on the `logbridge::factory` logger.
//!
//! Other backends are registered by name before the first lookup:
//!
//! ```rust
//! use std::sync::Arc;
//! use logbridge::{Level, LogDelegateFactory, LoggerFactory, WriterBackend};
//!
//! let factory = LoggerFactory::builder()
//!     .with_config(logbridge::LogBridgeConfig::default().with_selector("stderr"))
//!     .with_backend("stderr", |_| {
//!         let backend: Arc<dyn LogDelegateFactory> =
//!             Arc::new(WriterBackend::new(std::io::stderr(), Level::Debug));
//!         Ok(backend)
//!     })
//!     .build();
//! factory.get_logger("my-logger").debug("to stderr", &[])?;
//! assert_eq!(factory.selected_backend().as_deref(), Some("stderr"));
//! # Ok::<(), std::io::Error>(())
//! ```

mod backend;
mod factory;
mod logger;
#[cfg(test)]
mod test_utils;

pub use backend::{
    BackendConstructor, CONSOLE, FILE, FallbackConstructor, LOG, LogCrateBackend, WriterBackend,
};
pub use factory::{FACTORY_LOGGER, FactoryBuilder, FactoryGuard, LoggerFactory};
pub use logbridge_core::{
    Arg, Cause, ConfigurationError, Level, LogBridgeConfig, LogDelegate, LogDelegateFactory,
    classify, format_message,
};
pub use logger::Logger;

use std::{io, sync::{Arc, LazyLock}};

#[doc(hidden)]
pub mod __private {
    pub use logbridge_core::probe::{ArgProbe, ProbeBoxedCause, ProbeCause, ProbeValue};
}

/// Process-wide factory, configured from the environment.
static LOGGER_FACTORY: LazyLock<LoggerFactory> =
    LazyLock::new(|| LoggerFactory::builder().build());

/// The process-wide factory behind the free functions of this crate.
pub fn global() -> &'static LoggerFactory {
    &LOGGER_FACTORY
}

/// Returns the process-wide logger for `name`.
pub fn get_logger(name: &str) -> Logger {
    LOGGER_FACTORY.get_logger(name)
}

/// Returns the process-wide logger named after the type `T`.
pub fn logger_for<T: ?Sized>() -> Logger {
    LOGGER_FACTORY.logger_for::<T>()
}

/// Drops the process-wide cached logger for `name`.
pub fn remove_logger(name: &str) -> Option<Logger> {
    LOGGER_FACTORY.remove_logger(name)
}

/// Registers a backend on the process-wide factory. Takes effect at its next initialization.
pub fn register_backend<F>(name: &str, constructor: F)
where
    F: Fn(&LogBridgeConfig) -> io::Result<Arc<dyn LogDelegateFactory>> + Send + Sync + 'static,
{
    LOGGER_FACTORY.register_backend(name, constructor)
}

/// Releases the process-wide backend. The next lookup initializes it again.
pub fn terminate() -> io::Result<()> {
    LOGGER_FACTORY.terminate()
}

/// Returns a guard that terminates the process-wide factory when dropped.
#[must_use = "FactoryGuard must be kept alive until logging is done. Do \"let _guard = logbridge::guard();\""]
pub fn guard() -> FactoryGuard<'static> {
    LOGGER_FACTORY.guard()
}

/// Logs at `level` through `logger`, substituting `{n}` tokens with the arguments.
///
/// Arguments are borrowed. The first one whose type implements [`std::error::Error`], or
/// that is a `Box<dyn Error>` (optionally `Send`/`Sync`), becomes the cause; explicit [`Arg`]
/// values are passed through. Evaluates to `io::Result<()>`.
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::__private::{ProbeBoxedCause as _, ProbeCause as _, ProbeValue as _};
        $logger.log(
            $level,
            $template,
            &[$((&$crate::__private::ArgProbe(&$arg)).to_arg()),*],
        )
    }};
}

#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Trace, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Debug, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Info, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Warn, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Error, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Fatal, $($rest)+)
    };
}
