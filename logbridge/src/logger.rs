use std::{fmt, io, sync::Arc};

use logbridge_core::{Arg, Cause, Classified, Level, LogDelegate, classify, format_message};

struct LoggerInner {
    name: String,
    delegate: Arc<dyn LogDelegate>,
}

/// Handle used at call sites, bound to a logger name.
///
/// Cloning is cheap: clones share the same delegate. Every logging call performs exactly one
/// call to the delegate and returns its result as is.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

impl Logger {
    pub fn new(name: &str, delegate: Arc<dyn LogDelegate>) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                name: name.into(),
                delegate,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn delegate(&self) -> &Arc<dyn LogDelegate> {
        &self.inner.delegate
    }

    /// Whether both handles are the same cached logger.
    pub fn ptr_eq(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        self.inner.delegate.is_enabled(level)
    }

    pub fn is_trace_enabled(&self) -> bool {
        self.is_enabled(Level::Trace)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.is_enabled(Level::Debug)
    }

    pub fn is_info_enabled(&self) -> bool {
        self.is_enabled(Level::Info)
    }

    /// Logs `template` with its `{n}` tokens substituted.
    ///
    /// The first error among `args` is taken out as the cause before the indices are
    /// resolved against the remaining arguments.
    pub fn log(&self, level: Level, template: &str, args: &[Arg<'_>]) -> io::Result<()> {
        let Classified { args, cause } = classify(args);
        let message = format_message(template, &args);
        self.inner.delegate.log(level, &message, cause.as_ref())
    }

    /// Logs `message` verbatim, without looking for tokens.
    pub fn log_message(
        &self,
        level: Level,
        message: &str,
        cause: Option<Cause<'_>>,
    ) -> io::Result<()> {
        self.inner.delegate.log(level, message, cause.as_ref())
    }

    pub fn trace(&self, template: &str, args: &[Arg<'_>]) -> io::Result<()> {
        self.log(Level::Trace, template, args)
    }

    pub fn debug(&self, template: &str, args: &[Arg<'_>]) -> io::Result<()> {
        self.log(Level::Debug, template, args)
    }

    pub fn info(&self, template: &str, args: &[Arg<'_>]) -> io::Result<()> {
        self.log(Level::Info, template, args)
    }

    pub fn warn(&self, template: &str, args: &[Arg<'_>]) -> io::Result<()> {
        self.log(Level::Warn, template, args)
    }

    pub fn error(&self, template: &str, args: &[Arg<'_>]) -> io::Result<()> {
        self.log(Level::Error, template, args)
    }

    pub fn fatal(&self, template: &str, args: &[Arg<'_>]) -> io::Result<()> {
        self.log(Level::Fatal, template, args)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("name", &self.inner.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{IllegalState, NullPointer};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(Level, String, Option<String>)>>,
        fail: bool,
    }

    impl LogDelegate for Recorder {
        fn is_enabled(&self, level: Level) -> bool {
            level >= Level::Debug
        }

        fn log(&self, level: Level, message: &str, cause: Option<&Cause<'_>>) -> io::Result<()> {
            self.calls.lock().unwrap().push((
                level,
                message.into(),
                cause.map(|c| c.type_name().to_string()),
            ));
            if self.fail {
                return Err(io::Error::other("disk full"));
            }
            Ok(())
        }
    }

    fn recorded() -> (Logger, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        (Logger::new("my-logger", recorder.clone()), recorder)
    }

    #[test]
    fn test_each_level_dispatches_once() {
        let (logger, recorder) = recorded();
        let methods: [fn(&Logger, &str, &[Arg<'_>]) -> io::Result<()>; 6] = [
            Logger::trace,
            Logger::debug,
            Logger::info,
            Logger::warn,
            Logger::error,
            Logger::fatal,
        ];
        for method in methods {
            method(&logger, "hello {0}", &[Arg::value(&"vert.x")]).unwrap();
        }
        let calls = recorder.calls.lock().unwrap();
        assert_eq!(calls.len(), 6);
        for ((level, message, cause), expected) in calls.iter().zip(Level::ALL) {
            assert_eq!(*level, expected);
            assert_eq!(message, "hello vert.x");
            assert!(cause.is_none());
        }
    }

    #[test]
    fn test_cause_extracted_before_indexing() {
        let (logger, recorder) = recorded();
        let err = IllegalState;
        logger
            .info(
                "{0}, an exception has been thrown",
                &[Arg::error(&err), Arg::value(&"Luke")],
            )
            .unwrap();
        logger
            .info(
                "{0}, an exception has been thrown",
                &[Arg::value(&"Luke"), Arg::error(&err)],
            )
            .unwrap();
        let calls = recorder.calls.lock().unwrap();
        for (_, message, cause) in calls.iter() {
            assert_eq!(message, "Luke, an exception has been thrown");
            assert!(cause.as_deref().unwrap().ends_with("IllegalState"));
        }
    }

    #[test]
    fn test_log_message_is_verbatim() {
        let (logger, recorder) = recorded();
        let err = NullPointer;
        logger
            .log_message(Level::Error, "exception {0}", Some(Cause::new(&err)))
            .unwrap();
        logger.log_message(Level::Info, "hello", None).unwrap();
        let calls = recorder.calls.lock().unwrap();
        assert_eq!(calls[0].1, "exception {0}");
        assert!(calls[0].2.as_deref().unwrap().ends_with("NullPointer"));
        assert_eq!(calls[1], (Level::Info, "hello".to_string(), None));
    }

    #[test]
    fn test_delegate_failure_propagates() {
        let recorder = Arc::new(Recorder {
            fail: true,
            ..Default::default()
        });
        let logger = Logger::new("broken", recorder.clone());
        let err = logger.warn("hello", &[]).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(recorder.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_enabled_checks_forward_to_delegate() {
        let (logger, _) = recorded();
        assert!(!logger.is_trace_enabled());
        assert!(logger.is_debug_enabled());
        assert!(logger.is_info_enabled());
        assert!(logger.is_enabled(Level::Fatal));
    }

    #[test]
    fn test_clones_are_same_logger() {
        let (logger, _) = recorded();
        let clone = logger.clone();
        assert!(logger.ptr_eq(&clone));
        assert_eq!(clone.name(), "my-logger");
        let (other, _) = recorded();
        assert!(!logger.ptr_eq(&other));
        assert_eq!(format!("{logger:?}"), "Logger { name: \"my-logger\" }");
    }
}
