use std::fmt::{self, Display};

use crate::matcher::Matchers;
use crate::value::Value;

pub(crate) fn fmt_arg_list<T: Display>(f: &mut fmt::Formatter<'_>, args: &[T]) -> fmt::Result {
    write!(f, "(")?;
    for (index, arg) in args.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{arg}")?;
    }
    write!(f, ")")
}

/// `Dog.bark` or `spy`.
#[derive(Clone, Copy)]
pub(crate) struct Target<'a> {
    pub object: &'a str,
    pub member: Option<&'a str>,
}

impl<'a> Display for Target<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.member {
            Some(member) => write!(f, "{}.{member}", self.object),
            None => write!(f, "{}", self.object),
        }
    }
}

/// A call as it was actually made, e.g. `Dog.bark("hi")`.
pub(crate) struct FnActualCall<'a, T> {
    pub target: Target<'a>,
    pub args: &'a [T],
}

impl<'a, T: Display> Display for FnActualCall<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.target)?;
        fmt_arg_list(f, self.args)
    }
}

/// A call pattern, e.g. `Dog.bark(any(String))`.
pub(crate) struct CallPatternDebug<'a> {
    pub target: Target<'a>,
    pub matchers: &'a Matchers,
}

impl<'a> Display for CallPatternDebug<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.target, self.matchers)
    }
}

/// Numbered listing of recorded calls, used in verification failures.
pub(crate) struct RecordedCalls<'a> {
    pub target: Target<'a>,
    pub calls: &'a [Vec<Value>],
}

impl<'a> Display for RecordedCalls<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.calls.is_empty() {
            return write!(f, "No calls were recorded for {}.", self.target);
        }

        write!(f, "Recorded calls:")?;
        for (index, args) in self.calls.iter().enumerate() {
            write!(f, "\n  #{index} {}", self.target)?;
            fmt_arg_list(f, args)?;
        }
        Ok(())
    }
}
