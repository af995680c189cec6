//! The seam between the qilan DSL and the library that stores mock state.
//!
//! The DSL only talks to a backend through the [Backend] trait. The crate
//! ships with [InProcessBackend](in_process::InProcessBackend), but any type
//! implementing the trait can be passed to [Qilan::with_backend](crate::Qilan::with_backend).

use std::sync::Arc;

use crate::error::MockError;
use crate::matcher::Matchers;
use crate::value::Value;

pub mod in_process;

/// Opaque reference to an object owned by a [Backend].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectKey(usize);

impl ObjectKey {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "object #{}", self.0)
    }
}

pub type AnswerFn = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// What a stub registration does when it is selected.
#[derive(Clone)]
pub enum Behavior {
    Return(Value),
    Answer(AnswerFn),
}

impl Behavior {
    pub fn respond(&self, args: &[Value]) -> Value {
        match self {
            Self::Return(value) => value.clone(),
            Self::Answer(func) => func(args),
        }
    }
}

impl std::fmt::Debug for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Return(value) => f.debug_tuple("Return").field(value).finish(),
            Self::Answer(_) => write!(f, "Answer(..)"),
        }
    }
}

/// Capabilities a mocking backend provides to the DSL.
///
/// `member` is `Some` for methods of a mock and `None` for spies.
///
/// The `assert_*` and `values_are_*` operations report verification failures
/// by panicking, which is how the Rust test harness fails a test. They only
/// return an error for misuse, such as an unknown object or member.
pub trait Backend: Send + Sync {
    fn create_mock(&self, name: &str, members: &[String]) -> ObjectKey;

    fn create_spy(&self, name: Option<&str>) -> ObjectKey;

    /// Add a stub registration. Earlier registrations are kept.
    fn register_behavior(
        &self,
        object: ObjectKey,
        member: Option<&str>,
        matchers: Matchers,
        behavior: Behavior,
    ) -> Result<(), MockError>;

    /// Record a call and respond with the most specific matching registration.
    ///
    /// Ties are broken in favour of the most recent registration. An
    /// unmatched call is not an error.
    fn dispatch(
        &self,
        object: ObjectKey,
        member: Option<&str>,
        args: Vec<Value>,
    ) -> Result<Value, MockError>;

    fn assert_called(
        &self,
        object: ObjectKey,
        member: Option<&str>,
        matchers: &Matchers,
    ) -> Result<(), MockError>;

    fn assert_called_once(
        &self,
        object: ObjectKey,
        member: Option<&str>,
        matchers: &Matchers,
    ) -> Result<(), MockError>;

    fn assert_called_times(
        &self,
        object: ObjectKey,
        member: Option<&str>,
        matchers: &Matchers,
        times: usize,
    ) -> Result<(), MockError>;

    fn assert_not_called(
        &self,
        object: ObjectKey,
        member: Option<&str>,
        matchers: &Matchers,
    ) -> Result<(), MockError>;

    fn values_are_identical(&self, actual: &Value, expected: &Value);

    fn values_are_equivalent(&self, actual: &Value, expected: &Value);
}
