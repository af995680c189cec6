//! `qilan` is a small behavior-verification DSL for writing tests with mocks and spies.
//!
//! Stubs and expectations are written by performing the call they describe inside a closure.
//! While the closure runs, proxies only record what was called on them. The recorded call then
//! becomes a pattern that is handed to a pluggable [Backend]:
//!
//! ```rust
//! use qilan::*;
//!
//! #[mockable]
//! trait Dog {
//!     fn bark(&self);
//!     fn sit(&self);
//! }
//!
//! let qilan = Qilan::new();
//! let dog = qilan.mock(&Dog).unwrap();
//!
//! qilan.when(|| dog.call("bark", args![2])).unwrap().returns("woof woof").unwrap();
//! qilan.when(|| dog.call("bark", args![anything()])).unwrap().returns("woof").unwrap();
//!
//! assert_eq!(dog.call("bark", args![2]), Value::from("woof woof"));
//! assert_eq!(dog.call("bark", args![7]), Value::from("woof"));
//! assert_eq!(dog.call("sit", args![]), Value::Undefined);
//!
//! qilan.expect().called_once(|| dog.call("bark", args![2])).unwrap();
//! qilan.expect().called_times(|| dog.call("bark", args![any_args()]), 2).unwrap();
//! qilan.expect().not_called(|| dog.call("bark", args![3])).unwrap();
//! ```
//!
//! # Matching
//! Every argument of a captured call is a literal value, unless it is a matcher:
//! * [any] matches a single argument, optionally restricted to a [ValueKind].
//! * [any_args] matches any argument list and must be the only argument.
//!
//! When several registrations match a call, patterns made only of literal values are
//! preferred over patterns containing any matcher, whether [any] or [any_args].
//! Among equally specific patterns, the most recent registration wins.
//!
//! # Failures
//! Misuse of the DSL, such as a capture closure that calls zero or several proxies,
//! is reported as a [UsageError]. Failed verifications panic with a message starting with
//! `Verification failed`.

#![forbid(unsafe_code)]

pub mod backend;

mod builders;
mod call_pattern;
mod capture;
mod counter;
mod debug;
mod error;
mod expect;
mod fn_mocker;
mod matcher;
mod mismatch;
mod mockable;
mod proxy;
mod registry;
mod state;
mod value;

use std::sync::Arc;

pub use backend::in_process::{InProcessBackend, InProcessConfig};
pub use backend::{Backend, Behavior, ObjectKey};
pub use builders::When;
pub use error::{MockError, QilanResult, UsageError};
pub use expect::Expect;
pub use matcher::{Arg, Matcher, Matchers, Specificity};
pub use mockable::{Mockable, MockableTrait};
pub use proxy::Proxy;
pub use registry::{ProxyId, ProxyKind};
pub use value::{Value, ValueKind};

/// Describe the members of a trait, so it can be passed to [Qilan::mock].
///
/// The trait is emitted unchanged, together with a constant of type [MockableTrait]
/// carrying the same name.
///
/// # Arguments
/// * `extends = [Parent, ..]`: Parents that are themselves `#[mockable]`. Their members are inherited.
/// * `prefix = path`: Path to the `qilan` crate, in case it is re-exported elsewhere.
///
/// Associated functions without a `self` receiver are constructors and are not members.
///
/// ```rust
/// use qilan::*;
///
/// #[mockable]
/// trait Animal {
///     fn eat(&self, food: &str);
/// }
///
/// #[mockable(extends = [Animal])]
/// trait Dog: Animal {
///     fn new() -> Self where Self: Sized;
///     fn bark(&self);
/// }
///
/// let dog = Mockable::from(&Dog);
/// assert_eq!(dog.members().collect::<Vec<_>>(), ["bark", "eat"]);
/// ```
pub use qilan_macros::mockable;

/// Build the argument list of a proxy call.
///
/// Each expression is converted into an [Arg], so values and matchers can be mixed.
///
/// ```rust
/// use qilan::*;
///
/// let args = args![1, "two", any(ValueKind::Bool)];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),*]
    };
}

/// Matcher for one argument of the given kind, or of any kind when `None`.
pub fn any(kind: impl Into<Option<ValueKind>>) -> Matcher {
    Matcher::Any(kind.into())
}

/// Matcher for one argument of any kind.
pub fn anything() -> Matcher {
    Matcher::Any(None)
}

/// Matcher for any argument list. Must be the only argument of a call.
pub fn any_args() -> Matcher {
    Matcher::AnyArgs
}

/// The DSL engine.
///
/// Owns the proxy registry, and forwards stubs, dispatch and verification
/// to its [Backend].
///
/// Proxies created by one engine can only be used with that engine.
/// Call capture is tracked per thread and shared by all engines, so a
/// capture closure never dispatches a call, whichever engine owns the proxy.
pub struct Qilan<B = InProcessBackend> {
    backend: Arc<B>,
    shared: Arc<state::SharedState>,
}

impl Qilan<InProcessBackend> {
    /// Construct an engine using the [InProcessBackend].
    pub fn new() -> Self {
        Self::with_backend(InProcessBackend::new())
    }
}

impl Default for Qilan<InProcessBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend + 'static> Qilan<B> {
    /// Construct an engine using a custom backend.
    pub fn with_backend(backend: B) -> Self {
        let backend = Arc::new(backend);
        let dyn_backend: Arc<dyn Backend> = backend.clone();

        Self {
            backend,
            shared: Arc::new(state::SharedState::new(dyn_backend)),
        }
    }

    /// Access the backend, e.g. for inspecting recorded calls.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Create a mock object with the members of `mockable`.
    pub fn mock(&self, mockable: impl Into<Mockable>) -> QilanResult<Proxy> {
        let mockable = mockable.into();
        let members: Vec<String> = mockable.members().map(str::to_string).collect();
        let object = self.shared.backend.create_mock(mockable.name(), &members);

        let proxy = self.register(object, ProxyKind::Mock, mockable.name())?;
        tracing::debug!(proxy = %proxy.id(), %object, name = mockable.name(), ?members, "created mock");

        Ok(proxy)
    }

    /// Create an unnamed spy function.
    ///
    /// Inside a capture closure, creating a spy also counts as invoking it
    /// without arguments, so `qilan.when(|| qilan.spy())` stubs the new spy.
    pub fn spy(&self) -> QilanResult<Proxy> {
        self.create_spy(None)
    }

    /// Create a spy function whose name is used in failure messages.
    pub fn spy_named(&self, name: &str) -> QilanResult<Proxy> {
        self.create_spy(Some(name))
    }

    fn create_spy(&self, name: Option<&str>) -> QilanResult<Proxy> {
        let object = self.shared.backend.create_spy(name);

        let proxy = self.register(object, ProxyKind::Spy, name.unwrap_or("spy"))?;
        tracing::debug!(proxy = %proxy.id(), %object, ?name, "created spy");

        let recorded = self.shared.record_if_tracking(capture::Call {
            proxy: proxy.id(),
            member: None,
            args: vec![],
        });
        if recorded {
            tracing::trace!(proxy = %proxy.id(), "captured spy creation");
        }

        Ok(proxy)
    }

    fn register(&self, object: ObjectKey, kind: ProxyKind, name: &str) -> QilanResult<Proxy> {
        let id = ProxyId::mint();
        let name: Arc<str> = Arc::from(name);

        self.shared.register(
            id,
            registry::ProxyEntry {
                object,
                kind,
                name: name.clone(),
            },
        )?;

        Ok(proxy::Proxy::new(id, kind, name, self.shared.clone()))
    }

    /// Capture the single proxy call made by `f`, and prepare a stub for it.
    ///
    /// The value returned by `f` is ignored.
    pub fn when<R>(&self, f: impl FnOnce() -> R) -> QilanResult<When> {
        let call = self.shared.capture_one(f).map_err(log_usage_error)?;
        let call = state::ResolvedCall::resolve(&self.shared, call).map_err(log_usage_error)?;

        Ok(When::new(self.shared.clone(), call))
    }

    /// Value and call history assertions.
    pub fn expect(&self) -> Expect<'_> {
        Expect::new(&self.shared)
    }

    /// The backend object behind `proxy`.
    pub fn unwrap_handle(&self, proxy: &Proxy) -> QilanResult<ObjectKey> {
        let entry = self.shared.resolve(proxy.id()).map_err(log_usage_error)?;
        Ok(entry.object)
    }
}

fn log_usage_error(error: UsageError) -> UsageError {
    tracing::debug!(%error, "usage error");
    error
}
