use std::fmt::{self, Display};

use crate::error::{QilanResult, UsageError};
use crate::value::{Value, ValueKind};

/// A single argument pattern.
#[derive(Clone, Debug, PartialEq)]
pub enum Matcher {
    /// Matches a structurally equal value.
    Literal(Value),
    /// Matches any value of the given kind, or any value at all when no kind is given.
    Any(Option<ValueKind>),
    /// Matches any argument list. Must be the only matcher in its list.
    AnyArgs,
}

impl Matcher {
    pub fn matches(&self, actual: &Value) -> bool {
        match self {
            Self::Literal(expected) => expected == actual,
            Self::Any(None) => true,
            Self::Any(Some(kind)) => actual.kind() == *kind,
            Self::AnyArgs => true,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Any(None) => write!(f, "any()"),
            Self::Any(Some(kind)) => write!(f, "any({kind})"),
            Self::AnyArgs => write!(f, ".."),
        }
    }
}

/// One argument as written at a proxy call site.
///
/// Inside a capture closure an argument may be a [Matcher] produced by
/// [any](crate::any) or [any_args](crate::any_args). Outside of one, only
/// plain values can be dispatched.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    Value(Value),
    Matcher(Matcher),
}

impl Arg {
    /// Literal values become [Matcher::Literal], matchers are kept verbatim.
    pub fn into_matcher(self) -> Matcher {
        match self {
            Self::Value(value) => Matcher::Literal(value),
            Self::Matcher(matcher) => matcher,
        }
    }

    pub(crate) fn into_value(self) -> Result<Value, Matcher> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Matcher(matcher) => Err(matcher),
        }
    }
}

impl Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => value.fmt(f),
            Self::Matcher(matcher) => matcher.fmt(f),
        }
    }
}

impl From<Matcher> for Arg {
    fn from(matcher: Matcher) -> Self {
        Self::Matcher(matcher)
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

macro_rules! impl_arg_from_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Value(value.into())
                }
            }
        )*
    };
}

impl_arg_from_value!(
    (),
    bool,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    &str,
    String,
    serde_json::Value
);

impl<T: Into<Value>> From<Vec<T>> for Arg {
    fn from(items: Vec<T>) -> Self {
        Self::Value(items.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        Self::Value(value.into())
    }
}

/// How narrowly a matcher list selects calls. Higher is more specific.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Specificity {
    /// At least one [Matcher::Any], or `[AnyArgs]`.
    Wildcard,
    /// Literals only.
    Exact,
}

/// An ordered matcher list scoping a stub registration or an assertion.
#[derive(Clone, Debug, PartialEq)]
pub struct Matchers(Vec<Matcher>);

impl Matchers {
    /// Fails with [UsageError::MisplacedAnyArgs] when [Matcher::AnyArgs] is
    /// combined with other matchers.
    pub fn new(tokens: Vec<Matcher>) -> QilanResult<Self> {
        if tokens.len() > 1 && tokens.iter().any(|token| *token == Matcher::AnyArgs) {
            return Err(UsageError::MisplacedAnyArgs);
        }
        Ok(Self(tokens))
    }

    pub fn any_args() -> Self {
        Self(vec![Matcher::AnyArgs])
    }

    /// Literal matchers for exactly these values.
    pub fn exact(values: impl IntoIterator<Item = Value>) -> Self {
        Self(values.into_iter().map(Matcher::Literal).collect())
    }

    pub fn tokens(&self) -> &[Matcher] {
        &self.0
    }

    pub fn is_any_args(&self) -> bool {
        matches!(self.0.as_slice(), [Matcher::AnyArgs])
    }

    pub fn matches(&self, args: &[Value]) -> bool {
        if self.is_any_args() {
            return true;
        }

        self.0.len() == args.len()
            && self
                .0
                .iter()
                .zip(args)
                .all(|(matcher, actual)| matcher.matches(actual))
    }

    pub fn specificity(&self) -> Specificity {
        if self.0.iter().all(Matcher::is_literal) {
            Specificity::Exact
        } else {
            Specificity::Wildcard
        }
    }
}

impl Display for Matchers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::debug::fmt_arg_list(f, &self.0)
    }
}
