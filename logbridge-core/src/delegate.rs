use std::{io, sync::Arc};

use crate::{Cause, Level};

/// Backend-side view of a named logger.
///
/// One delegate is shared by every handle resolved for the same name, so implementations
/// must be `Send + Sync`. `log` runs on the caller's thread; any error it returns is handed
/// back to the caller untouched.
pub trait LogDelegate: Send + Sync {
    fn is_enabled(&self, level: Level) -> bool;

    /// Writes one record. `message` is already formatted.
    fn log(&self, level: Level, message: &str, cause: Option<&Cause<'_>>) -> io::Result<()>;
}

/// A logging backend: creates the delegates for logger names and owns their shared resources.
pub trait LogDelegateFactory: Send + Sync {
    /// Creates the delegate for `name`.
    ///
    /// Called with the factory's state lock held: it must not look up loggers itself.
    fn create_delegate(&self, name: &str) -> Arc<dyn LogDelegate>;

    /// Flushes and releases whatever the backend holds.
    fn terminate(&self) -> io::Result<()> {
        Ok(())
    }
}
