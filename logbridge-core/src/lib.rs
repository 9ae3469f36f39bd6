//! # logbridge-core
//! Core pieces of logbridge: levels, positional message formatting, cause extraction and
//! the traits logging backends implement.

mod args;
mod config;
mod delegate;
mod error;
mod format;
mod level;
#[doc(hidden)]
pub mod probe;

pub use args::{Arg, Cause, Classified, classify};
pub use config::LogBridgeConfig;
pub use delegate::{LogDelegate, LogDelegateFactory};
pub use error::ConfigurationError;
pub use format::format_message;
pub use level::Level;
