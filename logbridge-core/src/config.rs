use derive_from_env::FromEnv;

use crate::ConfigurationError;

/// Environment configuration, read with the `LOGBRIDGE` prefix.
///
/// - `LOGBRIDGE_DELEGATE_FACTORY`: name of the backend to use, empty for the default one.
/// - `LOGBRIDGE_LEVEL`: threshold used by the writer backends.
/// - `LOGBRIDGE_LOG_FILE`: path of the file backend's log file.
#[derive(FromEnv, Debug, Clone, PartialEq, Eq)]
#[from_env(prefix = "LOGBRIDGE")]
#[allow(non_snake_case)]
pub struct LogBridgeConfig {
    #[from_env(default = "")]
    pub DELEGATE_FACTORY: String,
    #[from_env(default = "info")]
    pub LEVEL: String,
    #[from_env(default = "logbridge.log")]
    pub LOG_FILE: String,
}

impl Default for LogBridgeConfig {
    fn default() -> Self {
        Self {
            DELEGATE_FACTORY: String::new(),
            LEVEL: "info".into(),
            LOG_FILE: "logbridge.log".into(),
        }
    }
}

impl LogBridgeConfig {
    /// Reads the configuration from the process environment.
    pub fn load() -> Result<Self, ConfigurationError> {
        Self::from_env().map_err(|e| ConfigurationError::Environment(format!("{e:?}")))
    }

    /// The backend selector, `None` when the default backend should be used.
    pub fn selector(&self) -> Option<&str> {
        Some(self.DELEGATE_FACTORY.trim()).filter(|s| !s.is_empty())
    }

    /// Sets the backend selector.
    pub fn with_selector(self, selector: &str) -> Self {
        Self {
            DELEGATE_FACTORY: selector.into(),
            ..self
        }
    }

    /// Sets the level threshold.
    pub fn with_level(self, level: &str) -> Self {
        Self {
            LEVEL: level.into(),
            ..self
        }
    }

    /// Sets the log file path.
    pub fn with_log_file(self, path: &str) -> Self {
        Self {
            LOG_FILE: path.into(),
            ..self
        }
    }
}
