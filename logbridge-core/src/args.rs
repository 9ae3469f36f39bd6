use std::{error::Error, fmt};

/// The error attached to a log record.
///
/// Backends render it as `type: message`, followed by one `Caused by:` line per error in
/// its [`source`](Error::source) chain. That is the [`Display`](fmt::Display) output.
#[derive(Clone, Copy)]
pub struct Cause<'a> {
    error: &'a (dyn Error + 'a),
    display: &'a dyn fmt::Display,
    type_name: &'static str,
}

impl<'a> Cause<'a> {
    pub fn new<E: Error>(error: &'a E) -> Self {
        Self {
            error,
            display: error,
            type_name: std::any::type_name::<E>().trim_start_matches('&'),
        }
    }

    /// Cause for an error only known as a trait object, such as the contents of a
    /// `Box<dyn Error>`. `display` is the error's message and `type_name` what backends print
    /// in front of it.
    pub fn from_dyn(
        error: &'a (dyn Error + 'a),
        display: &'a dyn fmt::Display,
        type_name: &'static str,
    ) -> Self {
        Self {
            error,
            display,
            type_name,
        }
    }

    pub fn error(&self) -> &'a (dyn Error + 'a) {
        self.error
    }

    /// Fully qualified name of the error's type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The error's own message, as used when it is substituted into a template.
    pub fn as_display(&self) -> &'a dyn fmt::Display {
        self.display
    }
}

impl fmt::Debug for Cause<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cause")
            .field("type_name", &self.type_name)
            .field("error", &self.error)
            .finish()
    }
}

impl fmt::Display for Cause<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.display)?;
        let mut source = self.error.source();
        while let Some(err) = source {
            write!(f, "\n    Caused by: {err}")?;
            source = err.source();
        }
        Ok(())
    }
}

/// A single argument of a log call.
#[derive(Clone, Copy)]
pub enum Arg<'a> {
    /// An ordinary argument, substituted through its `Display` implementation.
    Value(&'a dyn fmt::Display),
    /// An error argument, candidate for extraction as the record's cause.
    Error(Cause<'a>),
}

impl<'a> Arg<'a> {
    pub fn value<T: fmt::Display>(value: &'a T) -> Self {
        Arg::Value(value)
    }

    pub fn error<E: Error>(error: &'a E) -> Self {
        Arg::Error(Cause::new(error))
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(value) => f.debug_tuple("Value").field(&value.to_string()).finish(),
            Arg::Error(cause) => f.debug_tuple("Error").field(cause).finish(),
        }
    }
}

/// Arguments of a log call once the cause has been taken out.
pub struct Classified<'a> {
    pub args: Vec<&'a dyn fmt::Display>,
    pub cause: Option<Cause<'a>>,
}

/// Splits the cause out of `raw`.
///
/// The first [`Arg::Error`], wherever it sits, becomes the cause. Every other argument keeps
/// its relative order; error arguments after the first one are plain format arguments.
pub fn classify<'a>(raw: &[Arg<'a>]) -> Classified<'a> {
    let mut cause = None;
    let mut args = Vec::with_capacity(raw.len());
    for arg in raw {
        match *arg {
            Arg::Error(found) if cause.is_none() => cause = Some(found),
            Arg::Error(other) => args.push(other.as_display()),
            Arg::Value(value) => args.push(value),
        }
    }
    Classified { args, cause }
}
