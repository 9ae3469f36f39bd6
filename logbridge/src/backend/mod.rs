//! Backends linked into the build, registered by name.
//!
//! | name      | backend                                   |
//! |-----------|-------------------------------------------|
//! | `console` | colored lines on stdout (default)         |
//! | `file`    | lines appended to `LOGBRIDGE_LOG_FILE`    |
//! | `log`     | records forwarded to the `log` crate      |

mod log_crate;
mod writer;

pub use log_crate::LogCrateBackend;
pub use writer::WriterBackend;

use std::{collections::HashMap, io, sync::Arc};

use logbridge_core::{Level, LogBridgeConfig, LogDelegateFactory};

/// Creates a backend from the configuration. Failing constructors make the factory fall back
/// to its default backend.
pub type BackendConstructor =
    Arc<dyn Fn(&LogBridgeConfig) -> io::Result<Arc<dyn LogDelegateFactory>> + Send + Sync>;

/// Creates the default backend when nothing else could be resolved. Cannot fail.
pub type FallbackConstructor =
    Arc<dyn Fn(&LogBridgeConfig) -> Arc<dyn LogDelegateFactory> + Send + Sync>;

pub const CONSOLE: &str = "console";
pub const FILE: &str = "file";
pub const LOG: &str = "log";

pub(crate) fn builtin() -> HashMap<String, BackendConstructor> {
    let mut backends: HashMap<String, BackendConstructor> = HashMap::new();
    backends.insert(CONSOLE.into(), Arc::new(console));
    backends.insert(FILE.into(), Arc::new(file));
    backends.insert(LOG.into(), Arc::new(log_crate));
    backends
}

pub(crate) fn threshold(config: &LogBridgeConfig) -> io::Result<Level> {
    config
        .LEVEL
        .parse()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

fn console(config: &LogBridgeConfig) -> io::Result<Arc<dyn LogDelegateFactory>> {
    Ok(Arc::new(WriterBackend::console(threshold(config)?)))
}

fn file(config: &LogBridgeConfig) -> io::Result<Arc<dyn LogDelegateFactory>> {
    Ok(Arc::new(WriterBackend::file(
        &config.LOG_FILE,
        threshold(config)?,
    )?))
}

fn log_crate(_: &LogBridgeConfig) -> io::Result<Arc<dyn LogDelegateFactory>> {
    Ok(Arc::new(LogCrateBackend))
}

/// Console backend used when the configured one is unusable. An invalid level falls back to
/// `info`.
pub(crate) fn fallback_console(config: &LogBridgeConfig) -> Arc<dyn LogDelegateFactory> {
    Arc::new(WriterBackend::console(
        threshold(config).unwrap_or(Level::Info),
    ))
}
