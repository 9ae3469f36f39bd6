use std::{
    fs::File,
    io::{self, BufWriter, Stdout, Write},
    path::Path,
    sync::{Arc, Mutex, PoisonError},
};

use chrono::Utc;
use colored::Colorize;
use logbridge_core::{Cause, Level, LogDelegate, LogDelegateFactory};

/// Backend writing formatted lines to any [`Write`] implementation.
///
/// All delegates created by one backend share its writer, behind a mutex. Records are written
/// synchronously on the caller's thread; the writer is flushed after error and fatal records
/// and when the backend is terminated.
pub struct WriterBackend<W> {
    writer: Arc<Mutex<W>>,
    threshold: Level,
    colored: bool,
}

impl WriterBackend<Stdout> {
    /// Colored output on stdout.
    pub fn console(threshold: Level) -> Self {
        Self::new(io::stdout(), threshold).with_colors(true)
    }
}

impl WriterBackend<BufWriter<File>> {
    /// Appends to the file at `path`, creating it if needed.
    pub fn file<P: AsRef<Path>>(path: P, threshold: Level) -> Result<Self, io::Error> {
        let file = File::options().create(true).append(true).open(&path)?;
        Ok(Self::new(BufWriter::new(file), threshold))
    }
}

impl<W: Write + Send + 'static> WriterBackend<W> {
    pub fn new(writer: W, threshold: Level) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            threshold,
            colored: false,
        }
    }

    /// Enables ANSI colors on level labels.
    pub fn with_colors(self, yes: bool) -> Self {
        Self {
            colored: yes,
            ..self
        }
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }
}

impl<W: Write + Send + 'static> LogDelegateFactory for WriterBackend<W> {
    fn create_delegate(&self, name: &str) -> Arc<dyn LogDelegate> {
        Arc::new(WriterDelegate {
            name: name.into(),
            writer: Arc::clone(&self.writer),
            threshold: self.threshold,
            colored: self.colored,
        })
    }

    fn terminate(&self) -> io::Result<()> {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}

struct WriterDelegate<W> {
    name: String,
    writer: Arc<Mutex<W>>,
    threshold: Level,
    colored: bool,
}

impl<W: Write + Send> LogDelegate for WriterDelegate<W> {
    fn is_enabled(&self, level: Level) -> bool {
        level >= self.threshold
    }

    fn log(&self, level: Level, message: &str, cause: Option<&Cause<'_>>) -> io::Result<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }
        let line = format_log(message, level, &self.name, self.colored);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{line}")?;
        if let Some(cause) = cause {
            writeln!(writer, "{cause}")?;
        }
        if level >= Level::Error {
            writer.flush()?;
        }
        Ok(())
    }
}

fn format_log(message: &str, level: Level, name: &str, colored: bool) -> String {
    let time = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3f");
    if !colored {
        return format!("[{time} {name} {level}] {message}");
    }
    let level = match level {
        Level::Fatal => "FATAL".red().bold(),
        Level::Error => "ERROR".red(),
        Level::Warn => "WARN".yellow(),
        Level::Info => "INFO".green(),
        Level::Debug => "DEBUG".blue(),
        Level::Trace => "TRACE".purple(),
    };
    format!("[{time} {name} {level}] {message}")
}
