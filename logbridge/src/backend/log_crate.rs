use std::{io, sync::Arc};

use log::{Metadata, Record};
use logbridge_core::{Cause, Level, LogDelegate, LogDelegateFactory};

/// Backend forwarding records to the [`log`] crate's global logger.
///
/// The logger name becomes the record target. [`Level::Fatal`] is reported as
/// [`log::Level::Error`], and the cause is appended to the message on its own lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCrateBackend;

impl LogDelegateFactory for LogCrateBackend {
    fn create_delegate(&self, name: &str) -> Arc<dyn LogDelegate> {
        Arc::new(LogCrateDelegate {
            target: name.into(),
        })
    }

    fn terminate(&self) -> io::Result<()> {
        log::logger().flush();
        Ok(())
    }
}

struct LogCrateDelegate {
    target: String,
}

impl LogDelegate for LogCrateDelegate {
    fn is_enabled(&self, level: Level) -> bool {
        let level = log::Level::from(level);
        level <= log::max_level()
            && log::logger().enabled(&Metadata::builder().level(level).target(&self.target).build())
    }

    fn log(&self, level: Level, message: &str, cause: Option<&Cause<'_>>) -> io::Result<()> {
        let level = log::Level::from(level);
        if level > log::max_level() {
            return Ok(());
        }
        let logger = log::logger();
        match cause {
            Some(cause) => logger.log(
                &Record::builder()
                    .args(format_args!("{message}\n{cause}"))
                    .level(level)
                    .target(&self.target)
                    .build(),
            ),
            None => logger.log(
                &Record::builder()
                    .args(format_args!("{message}"))
                    .level(level)
                    .target(&self.target)
                    .build(),
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::IllegalState;
    use std::sync::{Mutex, Once};

    struct Capture(Mutex<Vec<(log::Level, String, String)>>);

    impl log::Log for Capture {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.target() != "muted"
        }

        fn log(&self, record: &Record) {
            self.0.lock().unwrap().push((
                record.level(),
                record.target().to_string(),
                record.args().to_string(),
            ));
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));
    static INIT: Once = Once::new();

    fn records_for(target: &str) -> Vec<(log::Level, String)> {
        INIT.call_once(|| {
            log::set_logger(&CAPTURE).unwrap();
            log::set_max_level(log::LevelFilter::Debug);
        });
        CAPTURE
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, t, _)| t == target)
            .map(|(level, _, message)| (*level, message.clone()))
            .collect()
    }

    #[test]
    fn test_forwards_with_target_and_mapped_level() {
        records_for("");
        let delegate = LogCrateBackend.create_delegate("bridge-levels");
        delegate.log(Level::Info, "hello vert.x", None).unwrap();
        delegate.log(Level::Fatal, "down", None).unwrap();
        delegate.log(Level::Trace, "too verbose", None).unwrap();
        assert_eq!(
            records_for("bridge-levels"),
            [
                (log::Level::Info, "hello vert.x".to_string()),
                (log::Level::Error, "down".to_string()),
            ]
        );
    }

    #[test]
    fn test_cause_appended_to_message() {
        records_for("");
        let err = IllegalState;
        LogCrateBackend
            .create_delegate("bridge-cause")
            .log(Level::Warn, "exception", Some(&Cause::new(&err)))
            .unwrap();
        let records = records_for("bridge-cause");
        assert_eq!(records.len(), 1);
        assert!(records[0].1.starts_with("exception\n"));
        assert!(records[0].1.contains("IllegalState: illegal state"));
    }

    #[test]
    fn test_enabled_follows_max_level_and_logger() {
        records_for("");
        let delegate = LogCrateBackend.create_delegate("bridge-enabled");
        assert!(delegate.is_enabled(Level::Debug));
        assert!(!delegate.is_enabled(Level::Trace));
        assert!(!LogCrateBackend.create_delegate("muted").is_enabled(Level::Error));
    }
}
