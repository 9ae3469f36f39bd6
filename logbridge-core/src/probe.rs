//! Compile-time argument probing for the logging macros.
//!
//! `(&ArgProbe(&value)).to_arg()` resolves, through method lookup order, to
//! [`ProbeCause`] when `value` is an error or an [`Arg`], to [`ProbeBoxedCause`] when it is a
//! boxed error trait object, and to [`ProbeValue`] otherwise.

use std::{error::Error, fmt::Display};

use crate::{Arg, Cause};

pub struct ArgProbe<'a, T>(pub &'a T);

pub trait ProbeCause<'a> {
    fn to_arg(&self) -> Arg<'a>;
}

impl<'a, T: Error> ProbeCause<'a> for ArgProbe<'a, T> {
    fn to_arg(&self) -> Arg<'a> {
        Arg::error(self.0)
    }
}

impl<'a> ProbeCause<'a> for ArgProbe<'a, Arg<'a>> {
    fn to_arg(&self) -> Arg<'a> {
        *self.0
    }
}

/// Boxed trait objects do not implement [`Error`] themselves, so they get their own trait.
pub trait ProbeBoxedCause<'a> {
    fn to_arg(&self) -> Arg<'a>;
}

macro_rules! probe_boxed {
    ($($bounds:tt)*) => {
        impl<'a, 'b> ProbeBoxedCause<'a> for ArgProbe<'a, Box<dyn Error $($bounds)* + 'b>> {
            fn to_arg(&self) -> Arg<'a> {
                Arg::Error(Cause::from_dyn(
                    &**self.0,
                    self.0,
                    std::any::type_name::<dyn Error>(),
                ))
            }
        }
    };
}

probe_boxed!();
probe_boxed!(+ Send);
probe_boxed!(+ Send + Sync);

pub trait ProbeValue<'a> {
    fn to_arg(&self) -> Arg<'a>;
}

impl<'a, T: Display> ProbeValue<'a> for &ArgProbe<'a, T> {
    fn to_arg(&self) -> Arg<'a> {
        Arg::value(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Boom;

    impl fmt::Display for Boom {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "boom")
        }
    }

    impl Error for Boom {}

    #[test]
    fn test_error_probes_as_cause() {
        let arg = (&ArgProbe(&Boom)).to_arg();
        assert!(matches!(arg, Arg::Error(_)));
    }

    #[test]
    fn test_boxed_error_probes_as_cause() {
        let plain: Box<dyn Error> = Box::new(Boom);
        let shared: Box<dyn Error + Send + Sync> = Box::new(Boom);
        for arg in [
            (&ArgProbe(&plain)).to_arg(),
            (&ArgProbe(&shared)).to_arg(),
        ] {
            let Arg::Error(cause) = arg else {
                panic!("boxed error probed as a value");
            };
            assert_eq!(cause.as_display().to_string(), "boom");
            assert!(cause.to_string().ends_with("Error: boom"));
        }
    }

    #[test]
    fn test_display_probes_as_value() {
        let name = String::from("Luke");
        assert!(matches!((&ArgProbe(&name)).to_arg(), Arg::Value(_)));
        assert!(matches!((&ArgProbe(&7u8)).to_arg(), Arg::Value(_)));
    }

    #[test]
    fn test_explicit_arg_passes_through() {
        let name = "Luke";
        let explicit = Arg::value(&name);
        assert!(matches!((&ArgProbe(&explicit)).to_arg(), Arg::Value(_)));
        let err = Boom;
        let explicit = Arg::error(&err);
        assert!(matches!((&ArgProbe(&explicit)).to_arg(), Arg::Error(_)));
    }
}
